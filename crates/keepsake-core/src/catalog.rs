//! Supported puzzles
//!
//! [`harvest_table`] registers one task per supported module type. [`SUPPORTED`]
//! describes the same set for listings.

use crate::modules::{
    IPhone, IceCream, IdentificationCrisis, IdentityParade, Impostor, InfiniteLoop, Ingredients,
    InnerConnections, Interpunct, Ipa,
};
use keepsake_kernel::TaskTable;
use keepsake_question::QuestionKind;
use serde::Serialize;

/// Listing entry for one supported puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportedModule {
    /// Module type identifier reported by the host
    pub module_type: &'static str,
    /// Component type read on the module
    pub component_type: &'static str,
    /// Puzzle display name
    pub display_name: &'static str,
    /// Question kinds the harvest produces
    pub kinds: &'static [QuestionKind],
}

/// Every supported puzzle, in registration order
pub const SUPPORTED: &[SupportedModule] = &[
    SupportedModule {
        module_type: "iceCreamModule",
        component_type: "IceCreamModule",
        display_name: "Ice Cream",
        kinds: &[QuestionKind::IceCreamFlavour, QuestionKind::IceCreamCustomer],
    },
    SupportedModule {
        module_type: "identificationCrisis",
        component_type: "identificationCrisis",
        display_name: "Identification Crisis",
        kinds: &[
            QuestionKind::IdentificationCrisisShape,
            QuestionKind::IdentificationCrisisDataset,
        ],
    },
    SupportedModule {
        module_type: "identityParade",
        component_type: "identityParadeScript",
        display_name: "Identity Parade",
        kinds: &[
            QuestionKind::IdentityParadeHairColors,
            QuestionKind::IdentityParadeBuilds,
            QuestionKind::IdentityParadeAttires,
        ],
    },
    SupportedModule {
        module_type: "impostor",
        component_type: "impostorScript",
        display_name: "The Impostor",
        kinds: &[QuestionKind::ImpostorDisguise],
    },
    SupportedModule {
        module_type: "infiniteLoop",
        component_type: "InfiniteLoop",
        display_name: "Infinite Loop",
        kinds: &[QuestionKind::InfiniteLoopSelectedWord],
    },
    SupportedModule {
        module_type: "ingredients",
        component_type: "IngredientsScript",
        display_name: "Ingredients",
        kinds: &[
            QuestionKind::IngredientsIngredients,
            QuestionKind::IngredientsNonIngredients,
        ],
    },
    SupportedModule {
        module_type: "innerConnections",
        component_type: "InnerConnectionsScript",
        display_name: "Inner Connections",
        kinds: &[QuestionKind::InnerConnectionsLed, QuestionKind::InnerConnectionsMorse],
    },
    SupportedModule {
        module_type: "interpunct",
        component_type: "InterpunctScript",
        display_name: "Interpunct",
        kinds: &[QuestionKind::InterpunctDisplay],
    },
    SupportedModule {
        module_type: "ipa",
        component_type: "ipa",
        display_name: "IPA",
        kinds: &[QuestionKind::IpaSound],
    },
    SupportedModule {
        module_type: "iPhone",
        component_type: "iPhoneScript",
        display_name: "The iPhone",
        kinds: &[QuestionKind::IPhoneDigits],
    },
];

/// Listing entry for `module_type`
#[must_use]
pub fn supported(module_type: &str) -> Option<&'static SupportedModule> {
    SUPPORTED.iter().find(|m| m.module_type == module_type)
}

/// Task table with every supported puzzle registered
#[must_use]
pub fn harvest_table() -> TaskTable {
    let mut table = TaskTable::new();
    table.register_staged(IceCream);
    table.register_staged(IdentificationCrisis);
    table.register_staged(IdentityParade);
    table.register_staged(Impostor);
    table.register_staged(InfiniteLoop);
    table.register_staged(Ingredients);
    table.register_staged(InnerConnections);
    table.register_continuous(Interpunct);
    table.register_staged(Ipa);
    table.register_staged(IPhone);
    table
}
