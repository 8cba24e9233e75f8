//! Tests for schema registration and lookup

use super::simple_schema;
use crate::Error;
use crate::app::services::schema_registry::{FieldSpec, Schema, SchemaRegistry};
use crate::config::IngestConfig;

#[test]
fn test_register_and_lookup() {
    let mut registry = SchemaRegistry::new();
    assert!(registry.is_empty());

    registry.register(simple_schema("first")).unwrap();
    registry.register(simple_schema("second")).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("second").map(|s| s.id()), Some("second"));
    assert!(registry.get("third").is_none());

    let ids: Vec<&str> = registry.all().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut registry = SchemaRegistry::new();
    registry.register(simple_schema("dup")).unwrap();

    let err = registry.register(simple_schema("dup")).unwrap_err();
    assert!(matches!(err, Error::DuplicateSchema { ref id } if id == "dup"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_invalid_schema_is_not_registered() {
    let mut registry = SchemaRegistry::new();
    let err = registry
        .register(Schema::fixed("empty", "Empty").header("a,b"))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidSchema { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_matches_header_normalizes_case() {
    let mut registry = SchemaRegistry::new();
    registry.register(simple_schema("inv")).unwrap();
    let entry = registry.get("inv").unwrap();

    assert!(entry.matches_header("name,size"));
    assert!(entry.matches_header("NAME,SIZE"));
    assert!(!entry.matches_header("Name,Size,Extra"));
}

#[test]
fn test_discovered_schema_matches_any_non_empty_header() {
    let registry = SchemaRegistry::new().with_generic_fallback().unwrap();
    let entry = registry.get("generic_csv").unwrap();

    assert!(entry.matches_header("anything,at,all"));
    assert!(!entry.matches_header("   "));
}

#[test]
fn test_builtin_registry() {
    let registry = SchemaRegistry::builtin().unwrap();
    assert!(registry.get("kape_skip_log").is_some());
    assert!(registry.get("generic_csv").is_none());
    assert_eq!(registry.max_preamble_lines(), 3);
}

#[test]
fn test_from_config_adds_fallback_last() {
    let plain = SchemaRegistry::from_config(&IngestConfig::default()).unwrap();
    let with_fallback =
        SchemaRegistry::from_config(&IngestConfig::default().with_generic_fallback()).unwrap();

    assert_eq!(with_fallback.len(), plain.len() + 1);
    assert_eq!(with_fallback.all().last().map(|s| s.id()), Some("generic_csv"));
}

#[test]
fn test_whitespace_insensitive_header_variant() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            Schema::fixed("spaced", "Spaced")
                .header("Visit Time,URL")
                .ignore_header_whitespace()
                .field(FieldSpec::string("URL")),
        )
        .unwrap();
    let entry = registry.get("spaced").unwrap();

    assert!(entry.matches_header("VisitTime,URL"));
    assert!(entry.matches_header("visit  time , url"));
}
