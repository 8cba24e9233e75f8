//! Header line matching against registered schemas
//!
//! Matching is case-insensitive, tolerant of a leading byte order mark and
//! trailing line endings, and strips spaces for schemas that declare
//! whitespace-insensitive headers. A miss is an ordinary outcome: the host
//! tries many plugins against files it does not recognise.

use std::sync::Arc;

use crate::app::services::schema_registry::{RegisteredSchema, SchemaRegistry};
use crate::constants::UTF8_BOM;

/// Finds the schema whose header signature matches a file's header line
#[derive(Debug, Clone, Copy)]
pub struct HeaderMatcher<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> HeaderMatcher<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// First registered schema whose header variants match `header_line`
    ///
    /// Preamble declarations are not considered; the caller has already
    /// isolated the header line. Fixed schemas are tried before discovered
    /// ones.
    pub fn match_header(&self, header_line: &str) -> Option<&'a Arc<RegisteredSchema>> {
        let cleaned = clean_header_line(header_line);
        self.by_priority().find(|entry| entry.matches_header(cleaned))
    }

    /// First schema expecting its header at line `index` that matches `line`
    ///
    /// Line 0 is checked against schemas without a preamble, line 3 against
    /// schemas with a three line banner, and so on.
    pub fn match_at(&self, index: usize, line: &str) -> Option<&'a Arc<RegisteredSchema>> {
        let cleaned = clean_header_line(line);
        self.by_priority()
            .filter(|entry| entry.schema().preamble_lines == index)
            .find(|entry| entry.matches_header(cleaned))
    }

    /// Match over the leading lines of a file, honouring preambles
    ///
    /// Every fixed schema is tried at its own preamble offset before any
    /// discovered schema, so a catch-all layout never claims a banner line
    /// that precedes a recognised header. Returns the schema and the index
    /// of its header line.
    pub fn match_lines(&self, lines: &[String]) -> Option<(&'a Arc<RegisteredSchema>, usize)> {
        self.by_priority().find_map(|entry| {
            let index = entry.schema().preamble_lines;
            lines
                .get(index)
                .filter(|line| entry.matches_header(clean_header_line(line)))
                .map(|_| (entry, index))
        })
    }

    /// Registry entries with fixed layouts first, each group in registration order
    fn by_priority(&self) -> impl Iterator<Item = &'a Arc<RegisteredSchema>> + use<'a> {
        let entries = self.registry.all();
        entries
            .iter()
            .filter(|entry| !entry.schema().is_discovered())
            .chain(entries.iter().filter(|entry| entry.schema().is_discovered()))
    }
}

/// Remove a leading BOM and trailing line ending from a raw header line
pub fn clean_header_line(line: &str) -> &str {
    line.trim_start_matches(UTF8_BOM)
        .trim_end_matches(['\r', '\n'])
}
