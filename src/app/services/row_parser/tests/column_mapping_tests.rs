//! Tests for header column mapping

use super::split;
use crate::app::services::row_parser::ColumnMapping;

#[test]
fn test_lookup_is_case_insensitive() {
    let mapping = ColumnMapping::analyze(&split("SourceFile,SourceFileSha1,Reason"), false);

    assert_eq!(mapping.get_index("sourcefile"), Some(0));
    assert_eq!(mapping.get_index("REASON"), Some(2));
    assert!(!mapping.has_column("Size"));
    assert_eq!(mapping.column_count(), 3);
}

#[test]
fn test_whitespace_insensitive_lookup() {
    let mapping = ColumnMapping::analyze(&split("Visit Time,URL"), true);
    assert_eq!(mapping.get_index("VisitTime"), Some(0));

    let strict = ColumnMapping::analyze(&split("Visit Time,URL"), false);
    assert_eq!(strict.get_index("VisitTime"), None);
    assert_eq!(strict.get_index("visit time"), Some(0));
}

#[test]
fn test_first_duplicate_wins() {
    let mapping = ColumnMapping::analyze(&split("Name,Name,Size"), false);
    assert_eq!(mapping.get_index("Name"), Some(0));
}

#[test]
fn test_quoted_header_names() {
    let mapping = ColumnMapping::analyze(&split("\"Name\",\"Size\""), false);
    assert_eq!(mapping.get_index("Size"), Some(1));
}
