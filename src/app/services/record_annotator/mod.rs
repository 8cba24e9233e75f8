//! Record annotation
//!
//! Stamps parsed records with their line number and previously tagged status,
//! and labels records of timeline formats using keyword classification.
//!
//! ## Architecture
//!
//! - [`classification`] - Ordered keyword rules over descriptive text columns

pub mod classification;

#[cfg(test)]
pub mod tests;

pub use classification::{ClassificationRule, DescriptiveText, TIMELINE_RULES, classify};

use crate::app::models::{FieldValue, Record, TaggedLineSet};
use crate::app::services::schema_registry::{SchemaKind, TimelineFields};
use crate::config::ClassificationMode;

/// Applies derived metadata to records of one schema
#[derive(Debug, Clone)]
pub struct RecordAnnotator {
    timeline: Option<TimelineFields>,
    rules: &'static [ClassificationRule],
    mode: ClassificationMode,
}

impl RecordAnnotator {
    pub fn new(kind: &SchemaKind, mode: ClassificationMode) -> Self {
        let timeline = match kind {
            SchemaKind::Timeline(fields) => Some(fields.clone()),
            SchemaKind::Standard => None,
        };

        Self {
            timeline,
            rules: TIMELINE_RULES,
            mode,
        }
    }

    /// Replace the classification rule set
    pub fn with_rules(mut self, rules: &'static [ClassificationRule]) -> Self {
        self.rules = rules;
        self
    }

    /// Set line number, tagged status and (for timelines) classification
    pub fn annotate(&self, record: &mut Record, line: usize, tagged_lines: &TaggedLineSet) {
        record.assign_line(line);
        record.set_tagged(tagged_lines.contains(line));

        if let Some(fields) = &self.timeline {
            let text = DescriptiveText {
                long_description: text_of(record, &fields.long_description),
                source_name: text_of(record, &fields.source_name),
                source_description: text_of(record, &fields.source_description),
            };
            let classification = classify(&text, self.rules, self.mode);
            record.set_classification(classification);
        }
    }
}

fn text_of<'r>(record: &'r Record, field: &str) -> &'r str {
    record.get(field).and_then(FieldValue::as_text).unwrap_or("")
}
