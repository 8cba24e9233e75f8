//! Tests for the built-in schema catalog

use std::collections::HashSet;

use crate::app::services::header_matcher::HeaderMatcher;
use crate::app::services::schema_registry::catalog::{builtin_schemas, generic_csv};
use crate::app::services::schema_registry::{Delimiter, FieldType, SchemaRegistry};

#[test]
fn test_builtin_ids_are_unique() {
    let schemas = builtin_schemas();
    let ids: HashSet<&str> = schemas.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), schemas.len());
}

#[test]
fn test_every_header_variant_matches_its_own_schema() {
    let registry = SchemaRegistry::builtin().unwrap();
    let matcher = HeaderMatcher::new(&registry);

    for entry in registry.all() {
        let schema = entry.schema();
        for variant in &schema.header_variants {
            let matched = matcher
                .match_at(schema.preamble_lines, variant)
                .unwrap_or_else(|| panic!("{} header does not match", schema.id));
            assert_eq!(matched.id(), schema.id, "variant '{}' is ambiguous", variant);

            let upper = variant.to_uppercase();
            let matched = matcher.match_at(schema.preamble_lines, &upper).unwrap();
            assert_eq!(matched.id(), schema.id);
        }
    }
}

#[test]
fn test_catalog_formats() {
    let registry = SchemaRegistry::builtin().unwrap();

    let l2t = registry.get("l2t_csv").unwrap().schema();
    assert!(l2t.is_timeline());
    assert!(registry.get("kape_skip_log").map(|e| !e.schema().is_timeline()).unwrap());

    let tln = registry.get("regripper_tln").unwrap().schema();
    assert_eq!(tln.delimiter, Delimiter::Pipe);

    let autoruns = registry.get("autorunsc").unwrap().schema();
    assert_eq!(autoruns.preamble_lines, 3);
}

#[test]
fn test_timeline_display_formats_have_datetime() {
    let registry = SchemaRegistry::builtin().unwrap();
    let without_dates: Vec<&str> = registry
        .all()
        .iter()
        .filter(|entry| !entry.plan().has_datetime())
        .map(|entry| entry.id())
        .collect();

    // Only the skip log lacks timestamps
    assert_eq!(without_dates, vec!["kape_skip_log"]);
}

#[test]
fn test_usn_journal_decodes_flags() {
    let registry = SchemaRegistry::builtin().unwrap();
    let usn = registry.get("mftecmd_usn_journal").unwrap();
    let decoded = usn
        .plan()
        .fields()
        .iter()
        .filter(|f| f.options.decoding.is_some())
        .map(|f| f.output.as_str())
        .collect::<Vec<_>>();

    assert_eq!(decoded, vec!["UpdateReasons", "FileAttributes"]);
    assert!(
        usn.plan()
            .fields()
            .iter()
            .filter(|f| f.options.decoding.is_some())
            .all(|f| f.field_type == FieldType::String)
    );
}

#[test]
fn test_generic_csv_is_discovered() {
    let schema = generic_csv();
    assert!(schema.is_discovered());
    assert!(schema.fields().is_empty());
}
