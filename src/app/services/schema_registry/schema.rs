//! Declarative schema model for supported tool formats
//!
//! A [`Schema`] pairs the header signature of one tool's CSV/TSV output with
//! the plan for turning each row into typed values. Schemas are plain data
//! built with small builder methods so a new format is a declaration rather
//! than parsing code.

use crate::constants::DEFAULT_TRUTHY_TOKENS;

/// Column separator used by a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Delimiter as a single byte for the CSV reader
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
        }
    }

    /// Delimiter as a character for re-joining raw rows
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// Guess the delimiter of an undeclared header line (tab or comma)
    pub fn detect(header_line: &str) -> Self {
        let tabs = header_line.matches('\t').count();
        let commas = header_line.matches(',').count();
        if tabs > commas {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }
}

/// Whether a format's data rows map onto declared fields or onto the header
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaLayout {
    /// Field plan declared up front
    Fixed(Vec<FieldSpec>),
    /// Every header column becomes a text field, discovered at parse time
    Discovered,
}

/// Descriptive columns consulted by timeline classification rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineFields {
    pub long_description: String,
    pub source_name: String,
    pub source_description: String,
}

/// Record post-processing category of a format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    Standard,
    /// Aggregated timeline; records receive a classification label
    Timeline(TimelineFields),
}

/// How record line numbers are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineNumbering {
    /// Count of successfully parsed records so far + 1
    #[default]
    Sequential,
    /// Position of the row in the data portion, rejected rows included
    RawPosition,
}

/// Declared value type of an output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Long,
    UnsignedLong,
    Float,
    Bool,
    DateTime,
    NullableDateTime,
    TimeSpan,
}

impl FieldType {
    /// Check if the type holds a datetime
    pub fn is_datetime(self) -> bool {
        matches!(self, FieldType::DateTime | FieldType::NullableDateTime)
    }

    /// Check if the type is numeric
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldType::Int | FieldType::Long | FieldType::UnsignedLong | FieldType::Float
        )
    }
}

/// Where a field's raw text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Column looked up by header name
    Column(String),
    /// Column looked up by zero-based position
    Position(usize),
    /// Several named columns joined with a single space (date + time)
    Composite(Vec<String>),
    /// Computed field, never read from input
    Ignored,
}

/// Interpretation of zone-less timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// Timestamps are already UTC; never shifted
    #[default]
    AssumeUtc,
    /// Timestamps are in the machine's local zone and converted to UTC
    AssumeLocal,
}

/// How datetime text is parsed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// Culture-invariant general parsing over a fixed list of layouts
    #[default]
    General,
    /// Explicit chrono format string
    Pattern(String),
    /// Seconds since the Unix epoch
    UnixSeconds,
}

/// Table-driven decoding applied to text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Hexadecimal bit mask rendered as pipe-joined flag names
    HexFlags(&'static [(u64, &'static str)]),
    /// Numeric code rendered as its name; unknown codes pass through
    Enum(&'static [(i64, &'static str)]),
}

/// Parse options attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Missing or blank values reject the row
    pub required: bool,
    /// Missing or unparseable numeric values become null instead of zero/error
    pub nullable: bool,
    pub date_format: DateFormat,
    pub date_style: DateStyle,
    pub decoding: Option<Decoding>,
}

/// One output field of a fixed schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub output: String,
    pub source: FieldSource,
    pub field_type: FieldType,
    pub options: ParseOptions,
}

impl FieldSpec {
    /// Field read from the column of the same name
    pub fn new(output: impl Into<String>, field_type: FieldType) -> Self {
        let output = output.into();
        Self {
            source: FieldSource::Column(output.clone()),
            output,
            field_type,
            options: ParseOptions::default(),
        }
    }

    pub fn string(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::String)
    }

    pub fn int(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::Int)
    }

    pub fn long(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::Long)
    }

    pub fn unsigned_long(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::UnsignedLong)
    }

    pub fn float(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::Float)
    }

    pub fn boolean(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::Bool)
    }

    pub fn datetime(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::DateTime)
    }

    pub fn nullable_datetime(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::NullableDateTime)
    }

    pub fn timespan(output: impl Into<String>) -> Self {
        Self::new(output, FieldType::TimeSpan)
    }

    /// Read from a differently named source column
    pub fn from_column(mut self, column: impl Into<String>) -> Self {
        self.source = FieldSource::Column(column.into());
        self
    }

    /// Read from a zero-based column position
    pub fn at(mut self, position: usize) -> Self {
        self.source = FieldSource::Position(position);
        self
    }

    /// Join several source columns with a space before parsing
    pub fn composite(mut self, columns: &[&str]) -> Self {
        self.source = FieldSource::Composite(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Computed field that is never read from input
    pub fn ignored(mut self) -> Self {
        self.source = FieldSource::Ignored;
        self
    }

    pub fn required(mut self) -> Self {
        self.options.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.options.nullable = true;
        self
    }

    /// Parse with an explicit chrono format string
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.options.date_format = DateFormat::Pattern(format.into());
        self
    }

    /// Parse as seconds since the Unix epoch
    pub fn unix_seconds(mut self) -> Self {
        self.options.date_format = DateFormat::UnixSeconds;
        self
    }

    /// Treat zone-less timestamps as local time
    pub fn assume_local(mut self) -> Self {
        self.options.date_style = DateStyle::AssumeLocal;
        self
    }

    pub fn hex_flags(mut self, table: &'static [(u64, &'static str)]) -> Self {
        self.options.decoding = Some(Decoding::HexFlags(table));
        self
    }

    pub fn enum_names(mut self, table: &'static [(i64, &'static str)]) -> Self {
        self.options.decoding = Some(Decoding::Enum(table));
        self
    }
}

/// Declarative description of one supported source-tool format
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Stable identifier
    pub id: String,
    /// Human-readable tool/format name
    pub name: String,
    /// Header lines (case-insensitive) that identify the format
    pub header_variants: Vec<String>,
    /// Strip spaces from header lines before comparison
    pub whitespace_insensitive: bool,
    /// Fixed number of banner lines ahead of the header
    pub preamble_lines: usize,
    pub delimiter: Delimiter,
    /// Tokens parsed as `true` for boolean fields (case-insensitive)
    pub truthy_tokens: Vec<String>,
    pub kind: SchemaKind,
    pub layout: SchemaLayout,
    pub line_numbering: LineNumbering,
    /// Outputs of fields handed to a discovered layout, rejected at registration
    misplaced_fields: Vec<String>,
}

impl Schema {
    /// Start a schema with declared fields
    pub fn fixed(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_layout(id, name, SchemaLayout::Fixed(Vec::new()))
    }

    /// Start a schema whose columns are discovered from the header
    pub fn discovered(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_layout(id, name, SchemaLayout::Discovered)
    }

    fn with_layout(id: impl Into<String>, name: impl Into<String>, layout: SchemaLayout) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            header_variants: Vec::new(),
            whitespace_insensitive: false,
            preamble_lines: 0,
            delimiter: Delimiter::Comma,
            truthy_tokens: DEFAULT_TRUTHY_TOKENS.iter().map(|t| t.to_string()).collect(),
            kind: SchemaKind::Standard,
            layout,
            line_numbering: LineNumbering::Sequential,
            misplaced_fields: Vec::new(),
        }
    }

    /// Add an identifying header line
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header_variants.push(header.into());
        self
    }

    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn ignore_header_whitespace(mut self) -> Self {
        self.whitespace_insensitive = true;
        self
    }

    pub fn preamble(mut self, lines: usize) -> Self {
        self.preamble_lines = lines;
        self
    }

    pub fn truthy(mut self, tokens: &[&str]) -> Self {
        self.truthy_tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Mark as a timeline format classified over the given columns
    pub fn timeline(
        mut self,
        long_description: &str,
        source_name: &str,
        source_description: &str,
    ) -> Self {
        self.kind = SchemaKind::Timeline(TimelineFields {
            long_description: long_description.to_string(),
            source_name: source_name.to_string(),
            source_description: source_description.to_string(),
        });
        self
    }

    pub fn line_numbering(mut self, numbering: LineNumbering) -> Self {
        self.line_numbering = numbering;
        self
    }

    /// Append a field to a fixed layout
    ///
    /// Discovered layouts take their columns from the header, so a field
    /// given to one is remembered only to fail registration.
    pub fn field(mut self, field: FieldSpec) -> Self {
        match &mut self.layout {
            SchemaLayout::Fixed(fields) => fields.push(field),
            SchemaLayout::Discovered => self.misplaced_fields.push(field.output),
        }
        self
    }

    /// Fields declared on a discovered layout, by output name
    pub fn misplaced_fields(&self) -> &[String] {
        &self.misplaced_fields
    }

    /// Declared fields, empty for discovered layouts
    pub fn fields(&self) -> &[FieldSpec] {
        match &self.layout {
            SchemaLayout::Fixed(fields) => fields,
            SchemaLayout::Discovered => &[],
        }
    }

    /// Check if the schema discovers its columns from the header
    pub fn is_discovered(&self) -> bool {
        matches!(self.layout, SchemaLayout::Discovered)
    }

    /// Check if the schema is a classified timeline format
    pub fn is_timeline(&self) -> bool {
        matches!(self.kind, SchemaKind::Timeline(_))
    }
}
