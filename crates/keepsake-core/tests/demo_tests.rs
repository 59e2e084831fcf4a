use keepsake_core::{Demo, Fault, HarvestConfig, SUPPORTED};
use keepsake_question::ModuleId;
use pretty_assertions::assert_eq;

fn run(seed: u64, fault: Option<Fault>) -> Demo {
    let mut demo = Demo::new(&HarvestConfig::default(), seed, fault).unwrap();
    let report = demo.run(1_000);
    assert!(report.all_ended(), "{}", report.generate_text());
    demo
}

#[test]
fn test_demo_bomb_completes_every_module() {
    for seed in [1, 7, 42] {
        let demo = run(seed, None);
        let report = demo.report();
        assert_eq!(report.completed(), SUPPORTED.len(), "seed {seed}");
        assert_eq!(report.abandoned(), 0);
        assert!(report.still_live.is_empty());
        assert!(demo.sink().batches.iter().all(|batch| !batch.is_empty()));
    }
}

#[test]
fn test_demo_is_reproducible() {
    let first = run(9, None).rendered();
    let second = run(9, None).rendered();
    assert_eq!(first, second);
}

#[test]
fn test_rendered_options_contain_the_answer() {
    let demo = run(3, None);
    let rendered = demo.rendered();
    assert!(!rendered.is_empty());
    for question in &rendered {
        assert!(question.correct_index < question.options.len());
        assert!(!question.text.contains('{'), "{}", question.text);
    }
    let sink = demo.sink();
    let questions = sink.batches.iter().flat_map(|batch| batch.iter());
    for (question, shown) in questions.zip(&rendered) {
        assert!(question.is_correct(&shown.options[shown.correct_index]));
    }
}

#[test]
fn test_each_fault_abandons_one_module() {
    let cases = [
        (Fault::StageRegression, ModuleId(1), "The stage number went down"),
        (Fault::MissingComponent, ModuleId(4), "component 'impostorScript' not found"),
        (Fault::NullWord, ModuleId(5), "InfiniteLoop.SelectedWord: value is null"),
        (Fault::ShortPin, ModuleId(10), "iPhoneScript.pinDigits: expected length 4, got 3"),
    ];
    for (fault, module, reason) in cases {
        let demo = run(42, Some(fault));
        let report = demo.report();
        assert_eq!(report.abandoned(), 1, "{fault}");
        assert_eq!(report.completed(), SUPPORTED.len() - 1, "{fault}");

        let abandonment = demo.sink().abandonment_for(module).unwrap();
        assert!(abandonment.reason.contains(reason), "{fault}: {}", abandonment.reason);
    }
}

#[test]
fn test_fault_names_round_trip() {
    for name in Fault::NAMES {
        let fault: Fault = name.parse().unwrap();
        assert_eq!(fault.to_string(), name);
    }
    assert_eq!(
        "flaky-wire".parse::<Fault>().unwrap_err().to_string(),
        "unknown fault 'flaky-wire'"
    );
}

#[tokio::test]
async fn test_paced_run_finishes() {
    let config = HarvestConfig::default();
    let mut demo = Demo::new(&config, 5, None).unwrap();
    let report = demo.run_paced(config.tick_interval(), 1_000).await;
    assert!(report.all_ended());
    assert_eq!(report.completed(), SUPPORTED.len());
}
