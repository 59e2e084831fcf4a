mod common;

use common::{config, correct, harvest, harvest_with};
use keepsake_accessor::{FieldValue, Interaction, MemoryComponent};
use keepsake_core::simulation::components::{self as fixtures, strings, PARADE_BUTTONS};
use keepsake_core::{supported, Harvester};
use keepsake_kernel::test_harness::{Script, ScriptAction};
use keepsake_kernel::{CollectingSink, HarvestPhase, Host, TaskStatus};
use keepsake_question::{ModuleId, QuestionKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn solve_at(tick: u64) -> impl FnOnce(ModuleId) -> Script {
    move |id| Script::new().at(tick, ScriptAction::Solve(id))
}

fn set_str(script: Script, tick: u64, module: ModuleId, field: &str, value: &str) -> Script {
    script.at(
        tick,
        ScriptAction::SetField {
            module,
            field: field.to_string(),
            value: FieldValue::Str(value.to_string()),
        },
    )
}

fn ice_cream_rows() -> Vec<Vec<i64>> {
    vec![vec![5, 1, 2, 0, 3], vec![0, 1, 2, 3, 4], vec![5, 6, 7, 8, 9]]
}

fn served_in_order(id: ModuleId) -> Script {
    Script::new()
        .at(1, ScriptAction::Activate)
        .set_int(3, id, "CurrentStage", 1)
        .set_int(5, id, "CurrentStage", 2)
        .set_int(7, id, "CurrentStage", 3)
        .at(9, ScriptAction::Solve(id))
}

#[test]
fn test_ice_cream_asks_about_every_customer() {
    let config = config().with_answer_override(
        QuestionKind::IceCreamCustomer,
        strings(&["Ann", "Bo", "Cy", "Di"]),
    );
    let component = fixtures::ice_cream(0, ice_cream_rows(), vec![1, 1, 1], vec![0, 0, 0]);
    let run = harvest_with(&config, "iceCreamModule", component, served_in_order);

    assert_eq!(run.report.completed(), 1);
    let questions = run.questions();
    let kinds: Vec<_> = questions.iter().map(|q| q.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            QuestionKind::IceCreamFlavour,
            QuestionKind::IceCreamFlavour,
            QuestionKind::IceCreamCustomer,
            QuestionKind::IceCreamFlavour,
            QuestionKind::IceCreamFlavour,
            QuestionKind::IceCreamCustomer,
            QuestionKind::IceCreamFlavour,
            QuestionKind::IceCreamFlavour,
        ]
    );

    assert_eq!(questions[0].format_args(), ["was on offer, but not sold,", "first"]);
    assert_eq!(
        correct(&questions[0]),
        vec!["Cookies and Cream", "Raspberry Ripple", "Tutti Frutti", "Double Chocolate"]
    );
    assert_eq!(questions[1].format_args(), ["was not on offer", "first"]);
    assert_eq!(
        correct(&questions[1]),
        vec!["Double Strawberry", "Neapolitan", "Mint Chocolate Chip", "The Classic", "Vanilla"]
    );
    assert_eq!(questions[2].format_args(), ["first"]);
    assert_eq!(correct(&questions[2]), vec!["Ann"]);
    assert_eq!(correct(&questions[5]), vec!["Ann"]);
    assert_eq!(
        correct(&questions[3]),
        vec!["Tutti Frutti", "Raspberry Ripple", "Double Chocolate", "Double Strawberry"]
    );
    assert_eq!(questions[7].format_args(), ["was not on offer", "third"]);
}

#[test]
fn test_ice_cream_waits_for_the_bomb() {
    let component = fixtures::ice_cream(0, ice_cream_rows(), vec![1, 1, 1], vec![0, 1, 2]);
    let run = harvest("iceCreamModule", component, |_| Script::new());

    assert_eq!(run.report.still_live, vec![run.module]);
    assert_eq!(run.component().read_count("CurrentStage"), 0);
}

#[test]
fn test_ice_cream_sale_outside_offer_abandons() {
    let component = fixtures::ice_cream(0, ice_cream_rows(), vec![1, 5, 1], vec![0, 1, 2]);
    let run = harvest("iceCreamModule", component, served_in_order);

    let reason = run.abandon_reason().unwrap();
    assert!(reason.contains("sold option 5 of 5"), "{reason}");
    assert!(run.questions().is_empty());
}

#[test]
fn test_ice_cream_stage_regression() {
    let component = fixtures::ice_cream(0, ice_cream_rows(), vec![1, 1, 1], vec![0, 1, 2]);
    let run = harvest("iceCreamModule", component, |id| {
        Script::new()
            .at(1, ScriptAction::Activate)
            .set_int(3, id, "CurrentStage", 1)
            .set_int(5, id, "CurrentStage", 2)
            .set_int(7, id, "CurrentStage", 1)
    });

    assert_eq!(
        run.report.outcomes[0].status,
        TaskStatus::Abandoned {
            reason: "The stage number went down from 2 to 1.".to_string()
        }
    );
    assert_eq!(run.report.outcomes[0].last_phase, HarvestPhase::Observing { stage: 2 });
}

#[test]
fn test_ice_cream_stage_below_zero_abandons() {
    let component = fixtures::ice_cream(-1, ice_cream_rows(), vec![1, 1, 1], vec![0, 1, 2]);
    let run = harvest("iceCreamModule", component, |id| {
        Script::new()
            .at(1, ScriptAction::Activate)
            .at(5, ScriptAction::Solve(id))
    });

    assert_eq!(
        run.report.outcomes[0].status,
        TaskStatus::Abandoned {
            reason: "The stage number went down from 0 to -1.".to_string()
        }
    );
    assert_eq!(run.report.outcomes[0].last_phase, HarvestPhase::Observing { stage: 0 });
    assert!(run.questions().is_empty());
}

#[test]
fn test_indigo_cipher_is_skipped_at_discovery() {
    assert!(supported("indigoCipher").is_none());

    let component = MemoryComponent::new("indigoCipher").with_field("page", 0_i64);
    let (host, record) = keepsake_test_utils::single_module("indigoCipher", "Indigo Cipher", component);
    let shared: Arc<dyn Host> = Arc::clone(&host) as Arc<dyn Host>;
    let mut harvester = Harvester::new(&config(), shared, CollectingSink::new()).unwrap();

    assert_eq!(harvester.discover([&record]), 0);
    assert!(harvester.scheduler().is_idle());
}

#[test]
fn test_identification_crisis_rounds() {
    let statics = fixtures::crisis_statics(&["Circle", "Square", "Triangle", "Star", "Heart", "Hexagon"]);
    let component = fixtures::identification_crisis(&statics, vec![2, 0, 5], vec![1, 3, 9]);
    let run = harvest("identificationCrisis", component, solve_at(2));

    let answers: Vec<_> = run.questions().iter().map(|q| correct(q)[0]).collect();
    assert_eq!(
        answers,
        vec![
            "Triangle",
            "Boozleglyph Identification",
            "Circle",
            "Pickup Identification",
            "Hexagon",
            "VTuber Identification",
        ]
    );
    assert_eq!(run.questions()[4].format_args(), ["third"]);
}

#[test]
fn test_identification_crisis_dataset_out_of_range() {
    let statics = fixtures::crisis_statics(&["Circle", "Square", "Triangle"]);
    let component = fixtures::identification_crisis(&statics, vec![2, 0, 1], vec![1, 3, 10]);
    let run = harvest("identificationCrisis", component, solve_at(2));

    assert_eq!(
        run.abandon_reason(),
        Some("identificationCrisis.datasetsUsed: element 2: expected range 0–9, got 10")
    );
}

#[test]
fn test_identity_parade_locks_the_module() {
    let component = fixtures::identity_parade(
        &["Red", "Grey", "Black"],
        &["Tall", "Slim", "Fat"],
        &["Suit", "Hoodie", "Blazer"],
    );
    let run = harvest("identityParade", component, solve_at(2));
    assert_eq!(run.report.completed(), 1);

    let interactions = run.component().interactions();
    let neutralized: Vec<_> = interactions
        .iter()
        .filter(|(_, i)| *i == Interaction::Neutralize)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(neutralized, PARADE_BUTTONS.to_vec());
    let labels: Vec<_> = interactions
        .iter()
        .filter_map(|(name, i)| match i {
            Interaction::SetText(text) => Some((name.as_str(), text.as_str())),
            Interaction::Neutralize => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec![
            ("hairText", "Identity"),
            ("buildText", "Parade"),
            ("attireText", "has been"),
            ("suspectText", "solved"),
        ]
    );

    let questions = run.questions();
    assert_eq!(questions.len(), 6);
    assert_eq!(questions[0].format_args(), ["was"]);
    assert_eq!(correct(&questions[0]), vec!["Red", "Grey", "Black"]);
    assert_eq!(questions[1].format_args(), ["was not"]);
    assert_eq!(correct(&questions[1]), vec!["Blonde", "Brown", "White"]);
    assert_eq!(questions[4].kind(), QuestionKind::IdentityParadeAttires);
}

#[test]
fn test_identity_parade_short_list() {
    let component = fixtures::identity_parade(&["Red", "Grey"], &["Tall", "Slim", "Fat"], &["Suit", "Hoodie", "Blazer"]);
    let run = harvest("identityParade", component, solve_at(2));

    assert_eq!(
        run.abandon_reason(),
        Some("identityParadeScript.hairEntries: expected length 3, got 2")
    );
}

#[test]
fn test_impostor_disguise() {
    let prefabs = ["Wires", "The Button", "Keypad", "Maze"];
    let run = harvest("impostor", fixtures::impostor(&prefabs, 2), solve_at(3));

    let questions = run.questions();
    assert_eq!(questions.len(), 1);
    assert_eq!(correct(&questions[0]), vec!["Keypad"]);
    assert!(questions[0].wrong_candidates().iter().all(|w| w != "Keypad"));
}

#[test]
fn test_impostor_choice_out_of_range() {
    let run = harvest("impostor", fixtures::impostor(&["Wires", "Maze"], 7), solve_at(3));
    assert_eq!(
        run.abandon_reason(),
        Some("impostorScript.chosenMod: expected range 0–1, got 7")
    );
}

#[test]
fn test_impostor_wrong_component() {
    let component = keepsake_accessor::MemoryComponent::new("impostorModule");
    let run = harvest("impostor", component, solve_at(3));

    let reason = run.abandon_reason().unwrap();
    assert!(reason.contains("component 'impostorScript' not found"), "{reason}");
}

#[test]
fn test_infinite_loop_reads_word_after_solve() {
    let run = harvest("infiniteLoop", fixtures::infinite_loop("ANCHOR"), |id| {
        set_str(Script::new(), 2, id, "SelectedWord", "BRIDGE").at(3, ScriptAction::Solve(id))
    });
    assert_eq!(correct(&run.questions()[0]), vec!["BRIDGE"]);
}

#[test]
fn test_infinite_loop_null_word() {
    let run = harvest("infiniteLoop", fixtures::infinite_loop("ANCHOR"), |id| {
        Script::new()
            .at(
                2,
                ScriptAction::SetField {
                    module: id,
                    field: "SelectedWord".to_string(),
                    value: FieldValue::Null,
                },
            )
            .at(3, ScriptAction::Solve(id))
    });
    assert_eq!(run.abandon_reason(), Some("InfiniteLoop.SelectedWord: value is null"));
}

#[test]
fn test_ingredients_used_and_unused() {
    let initial = ["Flour", "Eggs", "Butter", "Sugar"];
    let run = harvest("ingredients", fixtures::ingredients(&initial), |id| {
        Script::new()
            // the initial list is captured at start, later changes are ignored
            .at(
                2,
                ScriptAction::SetField {
                    module: id,
                    field: "InitialIngredientsList".to_string(),
                    value: fixtures::string_seq(&[]),
                },
            )
            .at(
                3,
                ScriptAction::SetField {
                    module: id,
                    field: "CurrentIngredientsList".to_string(),
                    value: fixtures::string_seq(&["Sugar"]),
                },
            )
            .at(4, ScriptAction::Solve(id))
    });

    let questions = run.questions();
    assert_eq!(questions[0].kind(), QuestionKind::IngredientsIngredients);
    assert_eq!(correct(&questions[0]), vec!["Flour", "Eggs", "Butter"]);
    assert_eq!(questions[1].kind(), QuestionKind::IngredientsNonIngredients);
    assert_eq!(correct(&questions[1]), vec!["Sugar"]);
}

#[test]
fn test_inner_connections() {
    let run = harvest("innerConnections", fixtures::inner_connections(7, 2), solve_at(2));
    let answers: Vec<_> = run.questions().iter().map(|q| correct(q)[0]).collect();
    assert_eq!(answers, vec!["Red", "7"]);
}

#[test]
fn test_inner_connections_unknown_colour_abandons_at_start() {
    let run = harvest("innerConnections", fixtures::inner_connections(7, 5), |_| Script::new());
    assert_eq!(
        run.abandon_reason(),
        Some("InnerConnectionsScript.rndLEDColour: expected range 0–4, got 5")
    );
    assert_eq!(run.report.ticks, 1);
}

#[test]
fn test_interpunct_strike_replaces_sample() {
    let run = harvest("interpunct", fixtures::interpunct(1, "·"), |id| {
        let script = set_str(Script::new(), 3, id, "displaySymbol", "‽").at(3, ScriptAction::Strike(id));
        let script = set_str(script, 5, id, "displaySymbol", "¶").set_int(5, id, "stage", 2);
        let script = set_str(script, 7, id, "displaySymbol", "§").set_int(7, id, "stage", 3);
        script.at(9, ScriptAction::Solve(id))
    });

    let answers: Vec<_> = run.questions().iter().map(|q| correct(q)[0]).collect();
    assert_eq!(answers, vec!["‽", "¶", "§"]);
    let args: Vec<_> = run.questions().iter().map(|q| q.format_args()[0].as_str()).collect();
    assert_eq!(args, vec!["first", "second", "third"]);
}

#[test]
fn test_interpunct_skipped_stage() {
    let run = harvest("interpunct", fixtures::interpunct(1, "·"), |id| {
        set_str(Script::new(), 3, id, "displaySymbol", "§")
            .set_int(3, id, "stage", 3)
            .at(5, ScriptAction::Solve(id))
    });
    assert_eq!(run.abandon_reason(), Some("stage 2 was never observed"));
}

#[test]
fn test_ipa_sound_from_capped_pool() {
    let run = harvest("ipa", fixtures::ipa(71, 44, 10), solve_at(2));

    let question = &run.questions()[0];
    assert_eq!(correct(question), vec![fixtures::clip_name(10).as_str()]);
    let pool = question.all_answers().unwrap();
    assert_eq!(pool.len(), 44);
    assert_eq!(pool[43], fixtures::clip_name(43));
}

#[test]
fn test_ipa_unknown_cap() {
    let run = harvest("ipa", fixtures::ipa(71, 50, 10), solve_at(2));
    assert_eq!(
        run.abandon_reason(),
        Some("ipa.cap: Unknown cap value 50 (expected 44 or 71)")
    );
}

#[test]
fn test_ipa_missing_clips() {
    let run = harvest("ipa", fixtures::ipa(70, 44, 10), solve_at(2));
    assert_eq!(run.abandon_reason(), Some("ipa.sounds: expected length 71, got 70"));
}

#[test]
fn test_iphone_digits() {
    let run = harvest("iPhone", fixtures::iphone(&["1", "2", "3", "4"]), solve_at(2));

    let questions = run.questions();
    assert_eq!(questions.len(), 4);
    assert_eq!(correct(&questions[0]), vec!["1"]);
    assert_eq!(questions[3].format_args(), ["fourth"]);
    assert_eq!(
        questions[0].preferred_wrong_answers().map(<[String]>::to_vec),
        Some(strings(&["2", "3", "4"]))
    );
}

#[test]
fn test_iphone_short_pin_abandons_at_start() {
    let run = harvest("iPhone", fixtures::iphone(&["1", "2", "3"]), |_| Script::new());

    assert_eq!(run.report.outcomes.len(), 1);
    assert_eq!(
        run.abandon_reason(),
        Some("iPhoneScript.pinDigits: expected length 4, got 3")
    );
    assert_eq!(run.report.outcomes[0].last_phase, HarvestPhase::Initial);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_inner_connections_reports_flashed_digit(morse in 0_i64..10, led in 0_i64..5) {
        let run = harvest("innerConnections", fixtures::inner_connections(morse, led), solve_at(2));
        let questions = run.questions();
        prop_assert_eq!(questions.len(), 2);
        let digit = morse.to_string();
        prop_assert_eq!(correct(&questions[1]), vec![digit.as_str()]);
    }

    #[test]
    fn prop_impostor_names_the_chosen_prefab(chosen in 0_usize..6) {
        let prefabs = ["Wires", "The Button", "Keypad", "Simon Says", "Memory", "Maze"];
        let run = harvest(
            "impostor",
            fixtures::impostor(&prefabs, i64::try_from(chosen).unwrap()),
            solve_at(2),
        );
        prop_assert_eq!(correct(&run.questions()[0]), vec![prefabs[chosen]]);
    }
}
