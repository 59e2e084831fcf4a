//! Puzzle components for the demo bomb
//!
//! In-memory components laid out the way each supported puzzle exposes its state.
//! Tests build single modules from the same functions.

use keepsake_accessor::{FieldValue, MemoryComponent, ObjectRef, StaticFields, Visibility};
use std::sync::Arc;

pub use keepsake_accessor::table::{SELECTABLE_TYPE, TEXT_MESH_TYPE};

pub const GAME_OBJECT: &str = "GameObject";
pub const AUDIO_CLIP: &str = "AudioClip";

pub const PARADE_BUTTONS: [&str; 9] = [
    "hairLeft",
    "hairRight",
    "buildLeft",
    "buildRight",
    "attireLeft",
    "attireRight",
    "suspectLeft",
    "suspectRight",
    "convictBut",
];

pub const PARADE_LABELS: [&str; 4] = ["hairText", "buildText", "attireText", "suspectText"];

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Raw value of a string list, for scripted field updates
pub fn string_seq(values: &[&str]) -> FieldValue {
    FieldValue::Seq(values.iter().map(|v| FieldValue::Str((*v).to_string())).collect())
}

pub fn ice_cream(
    stage: i64,
    options: Vec<Vec<i64>>,
    solution: Vec<i64>,
    customers: Vec<i64>,
) -> MemoryComponent {
    MemoryComponent::new("IceCreamModule")
        .with_field("CurrentStage", stage)
        .with_array("FlavorOptions", options)
        .with_array("Solution", solution)
        .with_array("CustomerNamesSolution", customers)
}

pub fn crisis_statics(shape_names: &[&str]) -> Arc<StaticFields> {
    let statics = StaticFields::new();
    statics.insert("shapeNames", Visibility::NonPublic, strings(shape_names));
    statics
}

pub fn identification_crisis(
    statics: &Arc<StaticFields>,
    shapes: Vec<i64>,
    datasets: Vec<i64>,
) -> MemoryComponent {
    MemoryComponent::new("identificationCrisis")
        .with_statics(Arc::clone(statics))
        .with_array("shapesUsed", shapes)
        .with_array("datasetsUsed", datasets)
}

pub fn identity_parade(hairs: &[&str], builds: &[&str], attires: &[&str]) -> MemoryComponent {
    let mut component = MemoryComponent::new("identityParadeScript")
        .with_list("hairEntries", strings(hairs))
        .with_list("buildEntries", strings(builds))
        .with_list("attireEntries", strings(attires));
    for button in PARADE_BUTTONS {
        component = component.with_public_field(button, ObjectRef::new(SELECTABLE_TYPE, button));
    }
    for label in PARADE_LABELS {
        component = component.with_public_field(label, ObjectRef::new(TEXT_MESH_TYPE, label));
    }
    component
}

pub fn impostor(prefabs: &[&str], chosen: i64) -> MemoryComponent {
    MemoryComponent::new("impostorScript")
        .with_public_array(
            "Prefabs",
            prefabs
                .iter()
                .map(|name| ObjectRef::new(GAME_OBJECT, *name))
                .collect(),
        )
        .with_field("chosenMod", chosen)
}

pub fn infinite_loop(word: &str) -> MemoryComponent {
    MemoryComponent::new("InfiniteLoop").with_field("SelectedWord", word.to_string())
}

/// Ingredients before any are used: the current list equals the initial one
pub fn ingredients(initial: &[&str]) -> MemoryComponent {
    MemoryComponent::new("IngredientsScript")
        .with_field("InitialIngredientsList", strings(initial))
        .with_field("CurrentIngredientsList", strings(initial))
}

pub fn inner_connections(morse_number: i64, led_colour: i64) -> MemoryComponent {
    MemoryComponent::new("InnerConnectionsScript")
        .with_field("morseNumber", morse_number)
        .with_field("rndLEDColour", led_colour)
}

pub fn interpunct(stage: i64, symbol: &str) -> MemoryComponent {
    MemoryComponent::new("InterpunctScript")
        .with_field("stage", stage)
        .with_field("displaySymbol", symbol.to_string())
}

pub fn clip_name(index: usize) -> String {
    format!("ipa_{index:02}")
}

pub fn ipa(clips: usize, cap: i64, present: i64) -> MemoryComponent {
    MemoryComponent::new("ipa")
        .with_public_array(
            "sounds",
            (0..clips)
                .map(|i| ObjectRef::new(AUDIO_CLIP, clip_name(i)))
                .collect(),
        )
        .with_field("cap", cap)
        .with_field("soundPresent", present)
}

pub fn iphone(digits: &[&str]) -> MemoryComponent {
    MemoryComponent::new("iPhoneScript").with_public_list("pinDigits", strings(digits))
}
