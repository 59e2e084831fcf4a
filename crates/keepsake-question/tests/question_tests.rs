use keepsake_question::{
    ordinal, ModuleId, QuestionBuilder, QuestionCatalog, QuestionError, QuestionKind,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_ice_cream_flavour_question_uses_domain_minus_correct() {
    let catalog = QuestionCatalog::builtin();
    let question = QuestionBuilder::new(QuestionKind::IceCreamFlavour)
        .format_arg("was not on offer")
        .format_arg(ordinal(1))
        .correct_answers(["Vanilla", "Neapolitan"])
        .build(ModuleId(4), &catalog)
        .unwrap();

    assert_eq!(question.format_args(), ["was not on offer", "first"]);
    assert_eq!(question.wrong_candidates().len(), 8);
    assert!(!question.wrong_candidates().contains(&"Vanilla".to_string()));

    let info = catalog.info(QuestionKind::IceCreamFlavour).unwrap();
    assert_eq!(
        info.render(question.format_args()),
        "Which one of these flavours was not on offer to the first customer in Ice Cream?"
    );
}

#[test]
fn test_serialized_record_keeps_argument_order() {
    let catalog = QuestionCatalog::builtin();
    let question = QuestionBuilder::new(QuestionKind::IceCreamFlavour)
        .format_arg("was on offer, but not sold,")
        .format_arg(ordinal(2))
        .correct("Rocky Road")
        .build(ModuleId(9), &catalog)
        .unwrap();

    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["kind"], "IceCreamFlavour");
    assert_eq!(json["module"], 9);
    assert_eq!(
        json["format_args"],
        serde_json::json!(["was on offer, but not sold,", "second"])
    );
    assert!(json.get("distractors").is_none());
}

proptest! {
    #[test]
    fn prop_built_records_satisfy_invariants(
        correct in proptest::collection::vec("[a-e]", 0..4),
        pool in proptest::option::of(proptest::collection::vec("[a-g]", 0..7)),
        preferred in proptest::option::of(proptest::collection::vec("[a-g]", 0..5)),
    ) {
        let catalog = QuestionCatalog::builtin();
        let mut builder = QuestionBuilder::new(QuestionKind::IpaSound).correct_answers(correct.clone());
        if let Some(pool) = &pool {
            builder = builder.all_answers(pool.clone());
        }
        if let Some(preferred) = &preferred {
            builder = builder.preferred_wrong(preferred.clone());
        }

        match builder.build(ModuleId(1), &catalog) {
            Ok(question) => {
                prop_assert!(!question.correct_answers().is_empty());
                if let Some(pool) = question.all_answers() {
                    for answer in question.correct_answers() {
                        prop_assert!(pool.contains(answer));
                    }
                }
                for wrong in question.wrong_candidates() {
                    prop_assert!(!question.is_correct(wrong));
                }

                let mut rng = StdRng::seed_from_u64(11);
                let set = question.select_answers(4, &mut rng);
                prop_assert!(question.is_correct(&set.options[set.correct_index]));
                let correct_count = set.options.iter().filter(|o| question.is_correct(o)).count();
                prop_assert_eq!(correct_count, 1);
            }
            Err(QuestionError::EmptyCorrectAnswers { .. }) => prop_assert!(correct.is_empty()),
            Err(QuestionError::CorrectNotInPool { answer, .. }) => {
                let pool = pool.unwrap_or_default();
                prop_assert!(!pool.contains(&answer));
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }
}
