//! Collector for lines and rows the importers skipped.
//!
//! Parsing is lenient: a malformed line or row is dropped and the import
//! carries on. Every drop is recorded here so callers and tests can see how
//! much of a document was ignored.

use serde::Serialize;
use tracing::debug;

/// Where in the source a diagnostic points. Indices are 1-based, as a user
/// would count lines in Word or rows in a spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourcePosition {
    Line(usize),
    Row(usize),
    Document,
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourcePosition::Line(n) => write!(f, "line {}", n),
            SourcePosition::Row(n) => write!(f, "row {}", n),
            SourcePosition::Document => write!(f, "document"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum SkipReason {
    /// Content found before any service header (or after the sports marker
    /// closed the current service)
    OutsideService,
    /// A generic-template row lacked a required column value
    MissingColumn(String),
    /// A roster row had no location and none to inherit
    MissingLocation,
    /// A roster row appeared before any section header
    NoSection,
    /// A roster row appeared before the LUGAR/LP header row
    NoHeaderRow,
    /// The document did not match the expected layout
    FormatUnrecognized(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::OutsideService => write!(f, "content outside any service"),
            SkipReason::MissingColumn(column) => write!(f, "missing required column '{}'", column),
            SkipReason::MissingLocation => write!(f, "row has no location"),
            SkipReason::NoSection => write!(f, "row before any section header"),
            SkipReason::NoHeaderRow => write!(f, "row before the column header row"),
            SkipReason::FormatUnrecognized(what) => write!(f, "format not recognized: {}", what),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub position: SourcePosition,
    pub reason: SkipReason,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: SourcePosition, reason: SkipReason) {
        debug!(%position, %reason, "Skipped");
        self.entries.push(Diagnostic { position, reason });
    }

    /// Record a skipped Word line (0-based index in, 1-based stored)
    pub fn skip_line(&mut self, index: usize, reason: SkipReason) {
        self.push(SourcePosition::Line(index + 1), reason);
    }

    /// Record a skipped sheet row (0-based index in, 1-based stored)
    pub fn skip_row(&mut self, index: usize, reason: SkipReason) {
        self.push(SourcePosition::Row(index + 1), reason);
    }

    pub fn unrecognized(&mut self, what: impl Into<String>) {
        self.push(SourcePosition::Document, SkipReason::FormatUnrecognized(what.into()));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of rows/lines dropped (format-level diagnostics excluded)
    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.position != SourcePosition::Document)
            .count()
    }

    pub fn count_reason(&self, reason: &SkipReason) -> usize {
        self.entries.iter().filter(|d| &d.reason == reason).count()
    }
}
