use labeldesk_core::export;
use labeldesk_core::schema::Dimension;
use labeldesk_core::session::{ActivityAction, EngineState};
use labeldesk_core::{AnnotationEngine, LabelDeskError, LabelSchema, SampleSource};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Select(usize, usize),
    Reset,
    Submit,
    Skip,
    Export,
    Report,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (0usize..3, 0usize..3).prop_map(|(d, v)| Command::Select(d, v)),
        1 => Just(Command::Reset),
        3 => Just(Command::Submit),
        2 => Just(Command::Skip),
        1 => Just(Command::Export),
        1 => Just(Command::Report),
    ]
}

fn schema() -> LabelSchema {
    LabelSchema::new(vec![
        Dimension::new("tone", ["warm", "cold", "flat"]),
        Dimension::new("topic", ["billing", "shipping", "other"]),
        Dimension::new("urgency", ["now", "soon", "later"]),
    ])
    .unwrap()
}

fn engine_over(texts: Vec<String>) -> AnnotationEngine {
    AnnotationEngine::new(SampleSource::new(texts).unwrap(), schema())
}

/// Applies a command, completing any advancement right away.
fn apply(engine: &mut AnnotationEngine, command: &Command) {
    let keys: Vec<String> = engine.schema().keys().map(str::to_string).collect();
    match command {
        Command::Select(d, v) => {
            let value = engine.schema().dimensions()[*d].values[*v].clone();
            engine.select_label(&keys[*d], &value).unwrap();
        }
        Command::Reset => engine.reset_draft().unwrap(),
        Command::Submit => {
            if let Ok(submission) = engine.submit() {
                assert!(engine.complete_advance(submission.ticket));
            }
        }
        Command::Skip => engine.skip().unwrap(),
        Command::Export => {
            let _ = engine.export_structured();
        }
        Command::Report => {
            let _ = engine.generate_report();
        }
    }
}

proptest! {
    #[test]
    fn incomplete_submit_never_records(
        selections in proptest::collection::vec((0usize..3, 0usize..3), 0..6),
        skipped in 0usize..3,
    ) {
        let mut engine = engine_over(vec!["a".into(), "b".into()]);
        let keys: Vec<String> = engine.schema().keys().map(str::to_string).collect();
        for (d, v) in selections {
            // Leave one dimension out so the draft stays incomplete.
            if d == skipped {
                continue;
            }
            let value = engine.schema().dimensions()[d].values[v].clone();
            engine.select_label(&keys[d], &value).unwrap();
        }

        let before = engine.annotations().len();
        let result = engine.submit();
        prop_assert!(matches!(result, Err(LabelDeskError::IncompleteLabels { .. })), "expected IncompleteLabels error, got {:?}", result);
        prop_assert_eq!(engine.annotations().len(), before);
        prop_assert_eq!(engine.cursor(), 0);
        prop_assert_eq!(engine.state(), EngineState::Pending);
    }

    #[test]
    fn skipping_n_times_wraps_to_start(n in 1usize..20) {
        let texts: Vec<String> = (0..n).map(|i| format!("item {}", i)).collect();
        let mut engine = engine_over(texts);
        for _ in 0..n {
            engine.skip().unwrap();
        }
        prop_assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn invariants_hold_for_any_command_sequence(
        commands in proptest::collection::vec(command(), 0..60),
        n in 1usize..6,
    ) {
        let texts: Vec<String> = (0..n).map(|i| format!("item {}", i)).collect();
        let mut engine = engine_over(texts);
        for command in &commands {
            let before = engine.annotations().len();
            apply(&mut engine, command);

            // Activity log bound
            prop_assert!(engine.activity().len() <= 10);
            prop_assert!(engine.cursor() < n);
            prop_assert!(engine.annotations().len() - before <= 1);
        }

        let count = engine.stats().count;
        prop_assert_eq!(count, engine.annotations().len());
        for key in ["tone", "topic", "urgency"] {
            let total: usize = engine.distribution(key).unwrap().values().sum();
            prop_assert_eq!(total, count);
        }
    }

    #[test]
    fn most_recent_action_is_first(commands in proptest::collection::vec(command(), 1..40)) {
        let mut engine = engine_over(vec!["x".into(), "y".into(), "z".into()]);
        for command in &commands {
            let item_id = engine.current_item().id;
            let recorded = engine.annotations().len();
            apply(&mut engine, command);

            match command {
                Command::Skip => {
                    let latest = engine.activity().latest().unwrap();
                    prop_assert_eq!(latest.action, ActivityAction::Skipped);
                    prop_assert_eq!(&latest.details, &format!("Item #{} skipped", item_id));
                }
                Command::Submit if engine.annotations().len() > recorded => {
                    let latest = engine.activity().latest().unwrap();
                    prop_assert_eq!(latest.action, ActivityAction::Submitted);
                }
                _ => {}
            }
            prop_assert!(engine.activity().len() <= 10);
        }
    }

    #[test]
    fn structured_export_round_trips(
        texts in proptest::collection::vec("[ -~]{0,40}", 1..5),
        rounds in 1usize..8,
    ) {
        let mut engine = engine_over(texts);
        for round in 0..rounds {
            engine.select_label("tone", ["warm", "cold", "flat"][round % 3]).unwrap();
            engine.select_label("topic", "other").unwrap();
            engine.select_label("urgency", "soon").unwrap();
            let submission = engine.submit().unwrap();
            engine.complete_advance(submission.ticket);
        }

        let json = engine.export_structured().unwrap();
        let parsed = export::parse_structured(&json).unwrap();
        prop_assert_eq!(parsed.as_slice(), engine.annotations());
    }
}

#[test]
fn clear_session_after_activity_leaves_single_entry() {
    let mut engine = engine_over(vec!["one".into(), "two".into(), "three".into()]);
    for _ in 0..4 {
        engine.select_label("tone", "warm").unwrap();
        engine.select_label("topic", "billing").unwrap();
        engine.select_label("urgency", "now").unwrap();
        engine.submit().unwrap();
        engine.advance_now();
        engine.skip().unwrap();
    }
    engine.export_tabular().unwrap();

    engine.clear_session();

    assert_eq!(engine.stats().count, 0);
    assert!(engine.annotations().is_empty());
    assert_eq!(engine.cursor(), 0);
    let entries: Vec<_> = engine.activity().iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, ActivityAction::Cleared);
}

#[test]
fn tabular_export_has_one_row_per_annotation() {
    let mut engine = engine_over(vec!["He said \"hi\", then left".into()]);
    for _ in 0..3 {
        engine.select_label("tone", "flat").unwrap();
        engine.select_label("topic", "shipping").unwrap();
        engine.select_label("urgency", "later").unwrap();
        engine.submit().unwrap();
        engine.advance_now();
    }
    // A half-filled draft must not appear in the export.
    engine.select_label("tone", "warm").unwrap();

    let csv = engine.export_tabular().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "Item ID,Text,Tone,Topic,Urgency,Time Spent (s),Timestamp"
    );
    assert!(lines[1].starts_with("1,\"He said \"\"hi\"\", then left\",flat,shipping,later,"));
}
