//! Application constants for timeline ingestion
//!
//! This module contains parsing defaults, date format tables, flag and enum
//! decoding tables, and classification labels used throughout the crate.

// =============================================================================
// Header and Stream Handling
// =============================================================================

/// UTF-8 byte order mark some tools write ahead of the header row
pub const UTF8_BOM: char = '\u{feff}';

/// Maximum number of lines read while looking for a header row
pub const DEFAULT_MAX_PREAMBLE_LINES: usize = 16;

/// Consecutive unmappable rows tolerated before a file is declared corrupt
pub const DEFAULT_MAX_CONSECUTIVE_MALFORMED: usize = 100;

/// Separator placed between composite source columns before parsing
pub const COMPOSITE_SEPARATOR: &str = " ";

/// Separator placed between values when building a record's search text
pub const SEARCH_TEXT_SEPARATOR: &str = " ";

/// File extensions picked up by directory scans
pub const DEFAULT_SCAN_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "tln"];

// =============================================================================
// Boolean Tokens
// =============================================================================

/// Truthy tokens used when a schema does not declare its own set
pub const DEFAULT_TRUTHY_TOKENS: &[&str] = &["True"];

/// Truthy tokens for tools that write yes/no style flags
pub const YES_NO_TRUTHY_TOKENS: &[&str] = &["Yes", "Y", "True"];

// =============================================================================
// Date and Time Formats
// =============================================================================

/// Display format for datetimes in search text and table output
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats carrying an explicit UTC offset, tried during general parsing
pub const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%m/%d/%Y %H:%M:%S%.f %z",
];

/// Naive formats tried during general parsing, in order
pub const GENERAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y/%m/%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
];

/// Date-only formats tried last during general parsing (midnight assumed)
pub const GENERAL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// =============================================================================
// Flag and Enum Decoding Tables
// =============================================================================

/// Windows file attribute bits, in rendering order
pub const FILE_ATTRIBUTE_FLAGS: &[(u64, &str)] = &[
    (0x0000_0001, "ReadOnly"),
    (0x0000_0002, "Hidden"),
    (0x0000_0004, "System"),
    (0x0000_0010, "Directory"),
    (0x0000_0020, "Archive"),
    (0x0000_0040, "Device"),
    (0x0000_0080, "Normal"),
    (0x0000_0100, "Temporary"),
    (0x0000_0200, "SparseFile"),
    (0x0000_0400, "ReparsePoint"),
    (0x0000_0800, "Compressed"),
    (0x0000_1000, "Offline"),
    (0x0000_2000, "NotContentIndexed"),
    (0x0000_4000, "Encrypted"),
    (0x0000_8000, "IntegrityStream"),
    (0x0002_0000, "NoScrubData"),
    (0x0004_0000, "RecallOnOpen"),
    (0x0040_0000, "RecallOnDataAccess"),
];

/// USN journal update reason bits, in rendering order
pub const USN_REASON_FLAGS: &[(u64, &str)] = &[
    (0x0000_0001, "DataOverwrite"),
    (0x0000_0002, "DataExtend"),
    (0x0000_0004, "DataTruncation"),
    (0x0000_0010, "NamedDataOverwrite"),
    (0x0000_0020, "NamedDataExtend"),
    (0x0000_0040, "NamedDataTruncation"),
    (0x0000_0100, "FileCreate"),
    (0x0000_0200, "FileDelete"),
    (0x0000_0400, "EaChange"),
    (0x0000_0800, "SecurityChange"),
    (0x0000_1000, "RenameOldName"),
    (0x0000_2000, "RenameNewName"),
    (0x0000_4000, "IndexableChange"),
    (0x0000_8000, "BasicInfoChange"),
    (0x0001_0000, "HardLinkChange"),
    (0x0002_0000, "CompressionChange"),
    (0x0004_0000, "EncryptionChange"),
    (0x0008_0000, "ObjectIdChange"),
    (0x0010_0000, "ReparsePointChange"),
    (0x0020_0000, "StreamChange"),
    (0x0040_0000, "TransactedChange"),
    (0x0080_0000, "IntegrityChange"),
    (0x8000_0000, "Close"),
];

/// Windows event log level codes
pub const EVENT_LEVEL_NAMES: &[(i64, &str)] = &[
    (0, "LogAlways"),
    (1, "Critical"),
    (2, "Error"),
    (3, "Warning"),
    (4, "Information"),
    (5, "Verbose"),
];

// =============================================================================
// Classification Labels
// =============================================================================

/// Category labels assigned to timeline records
pub mod labels {
    pub const DELETED_DATA: &str = "DeletedData";
    pub const WEB_HISTORY: &str = "WebHistory";
    pub const FOLDER_OPENING: &str = "FolderOpening";
    pub const FILE_OPENING: &str = "FileOpening";
    pub const DEVICE_USB_USAGE: &str = "Device|USBUsage";
    pub const LOG_FILE: &str = "LogFile";
    pub const EXECUTION: &str = "Execution";

    /// All labels in rule evaluation order
    pub const ALL: &[&str] = &[
        DELETED_DATA,
        WEB_HISTORY,
        FOLDER_OPENING,
        FILE_OPENING,
        DEVICE_USB_USAGE,
        LOG_FILE,
        EXECUTION,
    ];
}

/// Separator between labels when several classification rules match
pub const CLASSIFICATION_SEPARATOR: &str = "|";
