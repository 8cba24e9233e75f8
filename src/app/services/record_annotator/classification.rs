//! Keyword classification of timeline records
//!
//! Rules are plain data: each names a label and the predicates that trigger
//! it. Every rule is evaluated independently and in order, so one record may
//! match several labels or none. Matching is case-sensitive unless a
//! predicate says otherwise.

use crate::config::ClassificationMode;
use crate::constants::{CLASSIFICATION_SEPARATOR, labels};

/// Descriptive text column a predicate inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    LongDescription,
    SourceName,
    SourceDescription,
}

/// Text test applied to one descriptive column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Contains(&'static str),
    StartsWith(&'static str),
    EndsWith(&'static str),
    Equals(&'static str),
    /// Substring test against the lower-cased column (needle is lower case)
    ContainsLowercase(&'static str),
}

impl Matcher {
    pub fn matches(self, text: &str) -> bool {
        match self {
            Matcher::Contains(needle) => text.contains(needle),
            Matcher::StartsWith(prefix) => text.starts_with(prefix),
            Matcher::EndsWith(suffix) => text.ends_with(suffix),
            Matcher::Equals(value) => text == value,
            Matcher::ContainsLowercase(needle) => text.to_lowercase().contains(needle),
        }
    }
}

/// Matcher bound to the column it inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub field: TextField,
    pub matcher: Matcher,
}

const fn on(field: TextField, matcher: Matcher) -> Predicate {
    Predicate { field, matcher }
}

/// A label assigned when any of its predicates match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub label: &'static str,
    pub any_of: &'static [Predicate],
}

impl ClassificationRule {
    pub fn matches(&self, text: &DescriptiveText<'_>) -> bool {
        self.any_of
            .iter()
            .any(|predicate| predicate.matcher.matches(text.get(predicate.field)))
    }
}

use Matcher::{Contains, ContainsLowercase, EndsWith, Equals, StartsWith};
use TextField::{LongDescription, SourceDescription, SourceName};

/// Timeline rules in evaluation order
pub const TIMELINE_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        label: labels::DELETED_DATA,
        any_of: &[
            on(LongDescription, Contains("$Recycle.Bin")),
            on(LongDescription, Contains("RECYCLER")),
            on(SourceName, Equals("RECBIN")),
        ],
    },
    ClassificationRule {
        label: labels::WEB_HISTORY,
        any_of: &[
            on(SourceName, Equals("WEBHIST")),
            on(LongDescription, StartsWith("http")),
            on(LongDescription, Contains("Visited")),
        ],
    },
    ClassificationRule {
        label: labels::FOLDER_OPENING,
        any_of: &[
            on(SourceDescription, Contains("BagMRU")),
            on(SourceDescription, Contains("ShellBags")),
            on(LongDescription, Contains("BagMRU")),
        ],
    },
    ClassificationRule {
        label: labels::FILE_OPENING,
        any_of: &[
            on(SourceName, Equals("LNK")),
            on(SourceDescription, Contains("RecentDocs")),
            on(SourceDescription, Contains("OpenSaveMRU")),
            on(LongDescription, EndsWith(".lnk")),
        ],
    },
    ClassificationRule {
        label: labels::DEVICE_USB_USAGE,
        any_of: &[
            on(LongDescription, Contains("USBSTOR")),
            on(SourceDescription, ContainsLowercase("usb")),
        ],
    },
    ClassificationRule {
        label: labels::LOG_FILE,
        any_of: &[
            on(SourceName, Equals("EVT")),
            on(SourceName, Equals("EVTX")),
            on(SourceName, Equals("LOG")),
            on(SourceDescription, Contains("Event Log")),
        ],
    },
    ClassificationRule {
        label: labels::EXECUTION,
        any_of: &[
            on(SourceDescription, Contains("Prefetch")),
            on(SourceDescription, Contains("UserAssist")),
            on(SourceDescription, Contains("AppCompatCache")),
            on(LongDescription, EndsWith(".pf")),
        ],
    },
];

/// The three descriptive columns of a timeline record
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptiveText<'a> {
    pub long_description: &'a str,
    pub source_name: &'a str,
    pub source_description: &'a str,
}

impl<'a> DescriptiveText<'a> {
    pub fn get(&self, field: TextField) -> &'a str {
        match field {
            TextField::LongDescription => self.long_description,
            TextField::SourceName => self.source_name,
            TextField::SourceDescription => self.source_description,
        }
    }
}

/// Label a record from its descriptive text
///
/// Returns `None` when no rule matches.
pub fn classify(
    text: &DescriptiveText<'_>,
    rules: &[ClassificationRule],
    mode: ClassificationMode,
) -> Option<String> {
    let matched = rules.iter().filter(|rule| rule.matches(text)).map(|rule| rule.label);

    match mode {
        ClassificationMode::LastMatchWins => matched.last().map(str::to_string),
        ClassificationMode::Accumulate => {
            let all: Vec<&str> = matched.collect();
            if all.is_empty() {
                None
            } else {
                Some(all.join(CLASSIFICATION_SEPARATOR))
            }
        }
    }
}
