//! Tests for pipeline states and diagnostic events

use super::{SKIP_LOG, builtin_registry, collecting_pipeline};
use crate::app::models::TaggedLineSet;
use crate::app::services::ingestion_pipeline::{IngestEvent, PipelineState};

#[test]
fn test_successful_run_visits_every_state() {
    let (pipeline, sink) = collecting_pipeline(builtin_registry());
    pipeline
        .process_reader(SKIP_LOG.as_bytes(), "skip.csv", &TaggedLineSet::new())
        .unwrap();

    assert_eq!(
        sink.states(),
        vec![
            PipelineState::Start,
            PipelineState::HeaderRead,
            PipelineState::SchemaMatched,
            PipelineState::Streaming,
            PipelineState::Done,
        ]
    );
    assert!(sink.events().iter().any(|event| matches!(
        event,
        IngestEvent::SchemaMatched { schema_id, header_line: 1, .. } if schema_id == "kape_skip_log"
    )));
}

#[test]
fn test_unrecognized_is_not_reported_as_failure() {
    let (pipeline, sink) = collecting_pipeline(builtin_registry());
    let result = pipeline.process_reader("a,b,c\n1,2,3\n".as_bytes(), "x.csv", &TaggedLineSet::new());

    assert!(result.unwrap_err().is_unrecognized());
    let events = sink.events();
    assert!(events.iter().any(|e| matches!(e, IngestEvent::Unrecognized { .. })));
    assert!(!events.iter().any(|e| matches!(e, IngestEvent::Failed { .. })));
    assert!(!sink.states().contains(&PipelineState::Failed));
}

#[test]
fn test_rejected_rows_are_emitted() {
    let (pipeline, sink) = collecting_pipeline(builtin_registry());
    let data = "SourceFile,SourceFileSha1,Reason\n,ABCD,missing name\nfoo.dat,EF01,ok\n";
    pipeline
        .process_reader(data.as_bytes(), "skip.csv", &TaggedLineSet::new())
        .unwrap();

    let rejected: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            IngestEvent::RowRejected { error, .. } => Some(error),
            _ => None,
        })
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].row, 1);
}

#[test]
fn test_terminal_states() {
    assert!(PipelineState::Done.is_terminal());
    assert!(PipelineState::Failed.is_terminal());
    assert!(!PipelineState::Streaming.is_terminal());
    assert_eq!(PipelineState::SchemaMatched.to_string(), "schema-matched");
}

#[test]
fn test_collecting_sink_clear() {
    let (pipeline, sink) = collecting_pipeline(builtin_registry());
    pipeline
        .process_reader(SKIP_LOG.as_bytes(), "skip.csv", &TaggedLineSet::new())
        .unwrap();
    assert!(!sink.events().is_empty());

    sink.clear();
    assert!(sink.events().is_empty());
}
