//! End-to-end tests for the ingestion pipeline through the public API
//!
//! Each test drives whole files (in memory or on disk) through
//! `IngestionPipeline` with the built-in schema catalog and checks the
//! records, row errors and file-level errors the host would see.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use timeline_ingest::app::services::schema_registry::FieldSpec;
use timeline_ingest::constants::{FILE_ATTRIBUTE_FLAGS, labels};
use timeline_ingest::{
    Error, FieldValue, IngestionPipeline, RowErrorKind, Schema, SchemaRegistry, TaggedLineSet,
};

const L2T_HEADER: &str = "date,time,timezone,MACB,source,sourcetype,type,user,host,short,desc,\
                          version,filename,inode,notes,format,extra";

fn builtin_pipeline() -> IngestionPipeline {
    IngestionPipeline::new(Arc::new(SchemaRegistry::builtin().unwrap()))
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn l2t_row(date: &str, source: &str, sourcetype: &str, desc: &str) -> String {
    format!(
        "{},12:00:00,UTC,MACB,{},{},Last Written,-,HOST,short,{},2,file,1,-,fmt,-",
        date, source, sourcetype, desc
    )
}

#[test]
fn test_every_builtin_header_variant_is_identified() {
    let pipeline = builtin_pipeline();

    for schema in pipeline.list_supported_schemas() {
        for variant in &schema.header_variants {
            assert_eq!(
                pipeline.identify(variant),
                Some(schema.id.as_str()),
                "header of {} not identified",
                schema.id
            );
            assert_eq!(
                pipeline.identify(&variant.to_lowercase()),
                Some(schema.id.as_str()),
                "lowercase header of {} not identified",
                schema.id
            );
        }
    }
}

#[test]
fn test_unknown_headers_are_not_identified() {
    let pipeline = builtin_pipeline();
    for header in ["", "Foo,Bar", "SourceFile,Reason", "date,time", "\u{feff}"] {
        assert_eq!(pipeline.identify(header), None, "{:?} should not match", header);
    }
}

#[test]
fn test_skip_log_scenario_from_disk() {
    let pipeline = builtin_pipeline();
    let file = write_temp("SourceFile,SourceFileSha1,Reason\r\nfoo.dat,ABCD1234,not found\r\n");

    let outcome = pipeline.process_file(file.path(), &TaggedLineSet::new()).unwrap();

    assert_eq!(outcome.schema_id, "kape_skip_log");
    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.is_clean());

    let record = &outcome.records[0];
    assert_eq!(record.get("SourceFile"), Some(&FieldValue::Text("foo.dat".to_string())));
    assert_eq!(record.get("SourceFileSha1"), Some(&FieldValue::Text("ABCD1234".to_string())));
    assert_eq!(record.get("Reason"), Some(&FieldValue::Text("not found".to_string())));
    assert_eq!(record.line(), 1);
    assert!(!record.tagged());
}

#[test]
fn test_unrecognized_file_yields_nothing() {
    let pipeline = builtin_pipeline();
    let file = write_temp("Alpha,Beta,Gamma\n1,2,3\n");

    let err = pipeline.process_file(file.path(), &TaggedLineSet::new()).unwrap_err();
    assert!(err.is_unrecognized());
    assert_eq!(err.last_good_line(), None);
    assert_eq!(pipeline.identify_file(file.path()).unwrap(), None);
}

#[test]
fn test_line_numbers_are_dense_and_tags_follow_them() {
    let pipeline = builtin_pipeline();
    let data = "SourceFile,SourceFileSha1,Reason\n\
                a.dat,01,r\n\
                ,02,missing name\n\
                b.dat,03,r\n\
                c.dat,04,r\n\
                ,05,missing name\n\
                d.dat,06,r\n";
    let tagged = TaggedLineSet::parse_list("2, 4 7").unwrap();

    let outcome = pipeline.process_reader(data.as_bytes(), "skip.csv", &tagged).unwrap();

    let lines: Vec<usize> = outcome.records.iter().map(|r| r.line()).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);
    for record in &outcome.records {
        assert_eq!(record.tagged(), tagged.contains(record.line()));
    }

    let rejected_rows: Vec<usize> = outcome.row_errors.iter().map(|e| e.row).collect();
    assert_eq!(rejected_rows, vec![2, 5]);
    assert!(outcome
        .row_errors
        .iter()
        .all(|e| matches!(e.kind, RowErrorKind::MissingField { ref field } if field == "SourceFile")));
}

#[test]
fn test_removing_required_column_rejects_only_that_row() {
    let pipeline = builtin_pipeline();
    let data = "RunTime,ExecutableName\n\
                2023-01-02 03:04:05,C:\\Windows\\cmd.exe\n\
                2023-01-02 03:05:00,\n\
                2023-01-02 03:06:00,C:\\Windows\\notepad.exe\n";

    let outcome = pipeline.process_reader(data.as_bytes(), "runs.csv", &TaggedLineSet::new()).unwrap();

    assert_eq!(outcome.schema_id, "pecmd_timeline");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.row_errors.len(), 1);
    assert_eq!(outcome.row_errors[0].row, 2);
    assert_eq!(
        outcome.records[1].get("ExecutableName").and_then(|v| v.as_text()),
        Some("C:\\Windows\\notepad.exe")
    );
}

#[test]
fn test_invalid_required_date_is_row_error() {
    let pipeline = builtin_pipeline();
    let data = "RunTime,ExecutableName\nyesterday,cmd.exe\n2023-01-02 03:04:05,cmd.exe\n";

    let outcome = pipeline.process_reader(data.as_bytes(), "runs.csv", &TaggedLineSet::new()).unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert!(matches!(
        outcome.row_errors[0].kind,
        RowErrorKind::InvalidDate { ref value, .. } if value == "yesterday"
    ));
}

#[test]
fn test_hex_flag_garbage_is_empty_without_row_error() {
    let schema = Schema::fixed("attrs", "Attributes")
        .header("Path,Attributes")
        .field(FieldSpec::string("Path").required())
        .field(FieldSpec::string("Attributes").hex_flags(FILE_ATTRIBUTE_FLAGS));
    let mut registry = SchemaRegistry::new();
    registry.register(schema).unwrap();
    let pipeline = IngestionPipeline::new(Arc::new(registry));

    let data = "Path,Attributes\nC:\\a,0xZZZ\nC:\\b,0x21\n";
    let outcome = pipeline.process_reader(data.as_bytes(), "attrs.csv", &TaggedLineSet::new()).unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.records[0].get("Attributes"), Some(&FieldValue::Text(String::new())));
    assert_eq!(
        outcome.records[1].get("Attributes").and_then(|v| v.as_text()),
        Some("ReadOnly|Archive")
    );
}

#[test]
fn test_timeline_recycle_bin_classified_as_deleted_data() {
    let pipeline = builtin_pipeline();
    let data = format!(
        "{}\n{}\n{}\n",
        L2T_HEADER,
        l2t_row("01/02/2023", "FILE", "NTFS $MFT", "C:\\$Recycle.Bin\\S-1-5\\$R1.txt"),
        l2t_row("01/02/2023", "FILE", "NTFS $MFT", "C:\\Users\\me\\notes.txt"),
    );

    let outcome = pipeline.process_reader(data.as_bytes(), "l2t.csv", &TaggedLineSet::new()).unwrap();

    assert_eq!(outcome.schema_id, "l2t_csv");
    assert!(outcome.records[0]
        .classification()
        .is_some_and(|label| label.contains(labels::DELETED_DATA)));
    assert_eq!(outcome.records[1].classification(), None);
}

#[test]
fn test_non_timeline_records_are_never_classified() {
    let pipeline = builtin_pipeline();
    let data = "SourceFile,SourceFileSha1,Reason\nC:\\$Recycle.Bin\\x,01,Prefetch\n";

    let outcome = pipeline.process_reader(data.as_bytes(), "skip.csv", &TaggedLineSet::new()).unwrap();
    assert_eq!(outcome.records[0].classification(), None);
}

#[test]
fn test_processing_twice_is_identical() {
    let pipeline = builtin_pipeline();
    let data = format!(
        "{}\n{}\n{}\n{}\n",
        L2T_HEADER,
        l2t_row("01/02/2023", "WEBHIST", "Chrome", "http://example.com"),
        l2t_row("not a date", "LNK", "Shortcut", "C:\\x.lnk"),
        l2t_row("01/03/2023", "REG", "UserAssist", "C:\\tool.exe"),
    );
    let file = write_temp(&data);
    let tagged: TaggedLineSet = [2].into_iter().collect();

    let first = pipeline.process_file(file.path(), &tagged).unwrap();
    let second = pipeline.process_file(file.path(), &tagged).unwrap();

    assert_eq!(first.records.len(), 2);
    assert_eq!(first.records, second.records);
    assert_eq!(first.row_errors, second.row_errors);
    assert_eq!(first.stats, second.stats);
    assert!(second.records[1].tagged());
}

#[test]
fn test_concurrent_processing_shares_one_pipeline() {
    let pipeline = Arc::new(builtin_pipeline());
    let data = "SourceFile,SourceFileSha1,Reason\nfoo.dat,01,r\nbar.dat,02,r\n";

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || {
                pipeline
                    .process_reader(data.as_bytes(), "skip.csv", &TaggedLineSet::new())
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[1].line(), 2);
    }
}

#[test]
fn test_duplicate_schema_registration_fails() {
    let mut registry = SchemaRegistry::builtin().unwrap();
    let err = registry
        .register(Schema::fixed("kape_skip_log", "Again").header("A,B").field(FieldSpec::string("A")))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateSchema { ref id } if id == "kape_skip_log"));
}

#[test]
fn test_corrupt_file_reports_last_good_line() {
    let pipeline = IngestionPipeline::new(Arc::new(SchemaRegistry::builtin().unwrap()))
        .with_config(timeline_ingest::IngestConfig::default().with_max_consecutive_malformed(2))
        .unwrap();
    let data = "SourceFile,SourceFileSha1,Reason\n\
                a.dat,01,r\n\
                b.dat,02,r\n\
                garbage\n\
                more garbage\n\
                c.dat,03,r\n";

    let err = pipeline.process_reader(data.as_bytes(), "skip.csv", &TaggedLineSet::new()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(err.last_good_line(), Some(2));
}
