//! Wrong-answer selection

use crate::question::Question;
use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Split wrong-answer candidates into a primary pool and a domain top-up
///
/// The explicit pool is complete, so it never gets a top-up.
pub(crate) fn distractor_pool(
    correct: &IndexSet<String>,
    preferred: Option<&[String]>,
    all: Option<&[String]>,
    domain: &[String],
) -> (Vec<String>, Vec<String>) {
    let without_correct = |values: &[String]| -> IndexSet<String> {
        values
            .iter()
            .filter(|v| !correct.contains(*v))
            .cloned()
            .collect()
    };

    if let Some(all) = all {
        return (without_correct(all).into_iter().collect(), Vec::new());
    }

    let from_domain = without_correct(domain);
    match preferred {
        Some(preferred) => {
            let primary = without_correct(preferred);
            let fallback = from_domain
                .into_iter()
                .filter(|v| !primary.contains(v))
                .collect();
            (primary.into_iter().collect(), fallback)
        }
        None => (from_domain.into_iter().collect(), Vec::new()),
    }
}

/// Options drawn for one presentation of a question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    /// Options in display order
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_index: usize,
}

impl Question {
    /// Draw one correct answer and up to `count - 1` wrong answers
    ///
    /// Wrong answers come from [`wrong_candidates`](Question::wrong_candidates) and,
    /// when preferred wrong answers run short, are topped up from the kind's domain.
    pub fn select_answers<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> AnswerSet {
        let Some(correct) = self.correct_answers().choose(rng).cloned() else {
            return AnswerSet::default();
        };
        let wanted = count.saturating_sub(1);

        let mut options: Vec<String> = self
            .distractors
            .choose_multiple(rng, wanted)
            .cloned()
            .collect();
        if options.len() < wanted {
            let missing = wanted - options.len();
            options.extend(self.fallback.choose_multiple(rng, missing).cloned());
        }
        options.shuffle(rng);

        let correct_index = rng.gen_range(0..=options.len());
        options.insert(correct_index, correct);
        AnswerSet {
            options,
            correct_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModuleId, QuestionBuilder, QuestionCatalog, QuestionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn preferred_wrong_answers_are_topped_up_from_domain() {
        let catalog = QuestionCatalog::builtin();
        let question = QuestionBuilder::new(QuestionKind::IceCreamCustomer)
            .format_arg("first")
            .correct("Mike")
            .preferred_wrong(["Mike", "Tim", "Tom"])
            .build(ModuleId(1), &catalog)
            .unwrap();
        assert_eq!(question.wrong_candidates(), ["Tim", "Tom"]);

        let mut rng = StdRng::seed_from_u64(7);
        let set = question.select_answers(6, &mut rng);
        assert_eq!(set.options.len(), 6);
        assert_eq!(set.options[set.correct_index], "Mike");
        assert!(set.options.contains(&"Tim".to_string()));
        assert!(set.options.contains(&"Tom".to_string()));
        assert_eq!(set.options.iter().filter(|o| *o == "Mike").count(), 1);
    }

    #[test]
    fn explicit_pool_is_never_topped_up() {
        let catalog = QuestionCatalog::builtin();
        let question = QuestionBuilder::new(QuestionKind::IpaSound)
            .correct("b")
            .all_answers(["a", "b", "c"])
            .build(ModuleId(1), &catalog)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let set = question.select_answers(6, &mut rng);
        assert_eq!(set.options.len(), 3);
        assert_eq!(set.options[set.correct_index], "b");
    }

    #[test]
    fn open_domain_without_answers_has_single_option() {
        let catalog = QuestionCatalog::builtin();
        let question = QuestionBuilder::new(QuestionKind::InfiniteLoopSelectedWord)
            .correct("tomato")
            .build(ModuleId(1), &catalog)
            .unwrap();
        assert!(question.wrong_candidates().is_empty());

        let mut rng = StdRng::seed_from_u64(3);
        let set = question.select_answers(6, &mut rng);
        assert_eq!(set.options, vec!["tomato".to_string()]);
        assert_eq!(set.correct_index, 0);
    }
}
