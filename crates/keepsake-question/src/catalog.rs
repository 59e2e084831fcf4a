//! Question templates and answer domains
//!
//! Each [`QuestionKind`] has a template with positional placeholders `{0}`, `{1}` …
//! plus `{module}` for the puzzle name, and an answer domain. Fixed domains supply
//! distractors when a question brings no pool of its own; open domains mean every
//! question of that kind must supply its own answers.

use crate::kind::{AnswerType, QuestionKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Answer domain of a question kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerDomain {
    /// Known, finite set of answers
    Fixed(Vec<String>),
    /// Answers only known at harvest time
    Open,
}

impl AnswerDomain {
    fn fixed(values: &[&str]) -> Self {
        Self::Fixed(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// Answers of a fixed domain; empty for open domains
    #[must_use]
    pub fn answers(&self) -> &[String] {
        match self {
            Self::Fixed(values) => values,
            Self::Open => &[],
        }
    }
}

/// Presentation metadata for one question kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionInfo {
    /// Kind this entry describes
    pub kind: QuestionKind,
    /// Puzzle display name substituted for `{module}`
    pub module_name: String,
    /// Template with positional placeholders
    pub template: String,
    /// How answers are presented
    pub answer_type: AnswerType,
    /// Global answer domain
    pub domain: AnswerDomain,
}

impl QuestionInfo {
    /// Number of positional arguments the template takes
    #[must_use]
    pub fn format_arg_count(&self) -> usize {
        placeholder_count(&self.template)
    }

    /// Render the template with `args`
    ///
    /// Missing arguments leave their placeholder in place.
    #[must_use]
    pub fn render(&self, args: &[String]) -> String {
        let mut text = self.template.replace("{module}", &self.module_name);
        for (index, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{index}}}"), arg);
        }
        text
    }
}

/// Highest positional placeholder index plus one
fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find('}') else { break };
        if let Ok(index) = rest[..close].parse::<usize>() {
            count = count.max(index + 1);
        }
        rest = &rest[close + 1..];
    }
    count
}

const FLAVOURS: &[&str] = &[
    "Tutti Frutti",
    "Rocky Road",
    "Raspberry Ripple",
    "Double Chocolate",
    "Double Strawberry",
    "Cookies and Cream",
    "Neapolitan",
    "Mint Chocolate Chip",
    "The Classic",
    "Vanilla",
];

const CUSTOMERS: &[&str] = &[
    "Mike", "Tim", "Tom", "Dave", "Adam", "Cheryl", "Sean", "Ashley", "Jessica", "Taylor",
    "Simon", "Sally", "Jade", "Sam", "Gary", "Victor", "George", "Jacob", "Pat", "Bob",
];

const DATASETS: &[&str] = &[
    "Morse Identification",
    "Boozleglyph Identification",
    "Plant Identification",
    "Pickup Identification",
    "Emotiguy Identification",
    "Ars Goetia Identification",
    "Mii Identification",
    "Customer identification",
    "Spongebob Birthday Identification",
    "VTuber Identification",
];

const HAIR_COLOURS: &[&str] = &["Black", "Blonde", "Brown", "Grey", "Red", "White"];
const BUILDS: &[&str] = &["Fat", "Hunched", "Muscular", "Short", "Slim", "Tall"];
const ATTIRES: &[&str] = &["Blazer", "Hoodie", "Jumper", "Suit", "T-shirt", "Tank top"];
const LED_COLOURS: &[&str] = &["Black", "Blue", "Red", "White", "Yellow"];
const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Lookup table from question kind to its presentation metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionCatalog {
    entries: IndexMap<QuestionKind, QuestionInfo>,
}

impl QuestionCatalog {
    /// Empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog covering every [`QuestionKind`]
    #[must_use]
    pub fn builtin() -> Self {
        use AnswerType::{Audio, Text};
        use QuestionKind as K;

        let fixed = AnswerDomain::fixed;
        let rows = [
            (K::IceCreamFlavour, "Ice Cream", "Which one of these flavours {0} to the {1} customer in {module}?", Text, fixed(FLAVOURS)),
            (K::IceCreamCustomer, "Ice Cream", "Who was the {0} customer in {module}?", Text, fixed(CUSTOMERS)),
            (K::IdentificationCrisisShape, "Identification Crisis", "What was the {0} shape used in {module}?", Text, AnswerDomain::Open),
            (K::IdentificationCrisisDataset, "Identification Crisis", "What was the {0} identification module used in {module}?", Text, fixed(DATASETS)),
            (K::IdentityParadeHairColors, "Identity Parade", "Which hair colour {0} listed in {module}?", Text, fixed(HAIR_COLOURS)),
            (K::IdentityParadeBuilds, "Identity Parade", "Which build {0} listed in {module}?", Text, fixed(BUILDS)),
            (K::IdentityParadeAttires, "Identity Parade", "Which attire {0} listed in {module}?", Text, fixed(ATTIRES)),
            (K::ImpostorDisguise, "The Impostor", "Which module was {module} pretending to be?", Text, AnswerDomain::Open),
            (K::InfiniteLoopSelectedWord, "Infinite Loop", "What was the selected word in {module}?", Text, AnswerDomain::Open),
            (K::IngredientsIngredients, "Ingredients", "Which ingredient was used in {module}?", Text, AnswerDomain::Open),
            (K::IngredientsNonIngredients, "Ingredients", "Which ingredient was listed but not used in {module}?", Text, AnswerDomain::Open),
            (K::InnerConnectionsLed, "Inner Connections", "What was the colour of the LED in {module}?", Text, fixed(LED_COLOURS)),
            (K::InnerConnectionsMorse, "Inner Connections", "What was the digit flashed in Morse in {module}?", Text, fixed(DIGITS)),
            (K::InterpunctDisplay, "Interpunct", "What was the symbol displayed in the {0} stage of {module}?", Text, AnswerDomain::Open),
            (K::IpaSound, "IPA", "What sound played in {module}?", Audio, AnswerDomain::Open),
            (K::IPhoneDigits, "The iPhone", "What was the {0} digit of the PIN in {module}?", Text, fixed(DIGITS)),
        ];

        let mut catalog = Self::new();
        for (kind, module_name, template, answer_type, domain) in rows {
            catalog.insert(QuestionInfo {
                kind,
                module_name: module_name.to_string(),
                template: template.to_string(),
                answer_type,
                domain,
            });
        }
        catalog
    }

    /// Add or replace an entry
    pub fn insert(&mut self, info: QuestionInfo) {
        self.entries.insert(info.kind, info);
    }

    /// Replace the answer domain of `kind` with a fixed list
    ///
    /// Kinds without an entry are left untouched.
    #[must_use]
    pub fn with_answers(mut self, kind: QuestionKind, answers: Vec<String>) -> Self {
        if let Some(info) = self.entries.get_mut(&kind) {
            info.domain = AnswerDomain::Fixed(answers);
        }
        self
    }

    /// Entry for `kind`
    #[must_use]
    pub fn info(&self, kind: QuestionKind) -> Option<&QuestionInfo> {
        self.entries.get(&kind)
    }

    /// Fixed answer domain of `kind`; empty for open or unknown kinds
    #[must_use]
    pub fn answers(&self, kind: QuestionKind) -> &[String] {
        self.info(kind).map_or(&[], |info| info.domain.answers())
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &QuestionInfo> {
        self.entries.values()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind() {
        let catalog = QuestionCatalog::builtin();
        assert_eq!(catalog.len(), QuestionKind::ALL.len());
        for kind in QuestionKind::ALL {
            assert!(catalog.info(*kind).is_some(), "{kind} missing");
        }
    }

    #[test]
    fn placeholder_counting() {
        assert_eq!(placeholder_count("no args in {module}"), 0);
        assert_eq!(placeholder_count("{0} and {1}"), 2);
        assert_eq!(placeholder_count("{1} only"), 2);
    }

    #[test]
    fn render_substitutes_module_and_args() {
        let catalog = QuestionCatalog::builtin();
        let info = catalog.info(QuestionKind::IceCreamCustomer).unwrap();
        assert_eq!(
            info.render(&["first".to_string()]),
            "Who was the first customer in Ice Cream?"
        );
    }

    #[test]
    fn overrides_replace_domain() {
        let catalog = QuestionCatalog::builtin().with_answers(
            QuestionKind::IceCreamCustomer,
            vec!["Ann".into(), "Bo".into()],
        );
        assert_eq!(catalog.answers(QuestionKind::IceCreamCustomer), ["Ann", "Bo"]);
        assert!(catalog.answers(QuestionKind::IpaSound).is_empty());
    }
}
