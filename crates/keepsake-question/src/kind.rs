//! Question kinds and module identity

use crate::error::QuestionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of one puzzle instance on the bomb
///
/// Assigned by the host; unique per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How answers of a kind are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerType {
    /// Plain text options
    Text,
    /// Audio clips, identified by clip name
    Audio,
}

macro_rules! question_kinds {
    ($($variant:ident),+ $(,)?) => {
        /// Every question the harvest catalog can produce
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum QuestionKind {
            $(
                #[allow(missing_docs)]
                $variant,
            )+
        }

        impl QuestionKind {
            /// All kinds, in catalog order
            pub const ALL: &'static [QuestionKind] = &[$(QuestionKind::$variant),+];

            /// Stable name used in configuration and logs
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(QuestionKind::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

question_kinds!(
    IceCreamFlavour,
    IceCreamCustomer,
    IdentificationCrisisShape,
    IdentificationCrisisDataset,
    IdentityParadeHairColors,
    IdentityParadeBuilds,
    IdentityParadeAttires,
    ImpostorDisguise,
    InfiniteLoopSelectedWord,
    IngredientsIngredients,
    IngredientsNonIngredients,
    InnerConnectionsLed,
    InnerConnectionsMorse,
    InterpunctDisplay,
    IpaSound,
    IPhoneDigits,
);

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuestionKind {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| QuestionError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_parse_back() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.name().parse::<QuestionKind>().unwrap(), *kind);
        }
        assert!("IceCream".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn module_id_display() {
        assert_eq!(ModuleId(7).to_string(), "#7");
    }
}
