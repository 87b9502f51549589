//! Line classification for Word schedules.
//!
//! Each extracted line is classified on its own (plus one line of lookahead)
//! into a [`LineKind`]. The reducer in [`super::state`] decides what a kind
//! means given the current parsing state.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{DutyRole, Rank};
use crate::utils::text::{self, strip_quotes, trim_trailing_dots};
use crate::utils::{eq_folded, strip_prefix_folded, strip_word_prefix_folded};

/// Section marker that is layout noise
pub const SERVICES_MARKER: &str = "SERVICIOS";
/// Section marker after which every service is a sports event
pub const SPORTS_EVENTS_MARKER: &str = "EVENTOS DEPORTIVOS";

/// Minimum length (exclusive) of a bare all-caps location line
const BARE_LOCATION_MIN_CHARS: usize = 8;

/// Non-officer ranks that open all-caps personnel lines. [`Rank`] only
/// models officers, so these are listed separately for the location test.
const PERSONNEL_RANK_WORDS: &[&str] = &["SUBOFICIAL", "SARGENTO", "CABO", "BOMBERO"];

/// Assignment field keys recognized in `KEY: value` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Qth,
    ImplementationTime,
    Time,
    Unit,
    Personnel,
    CoverageMode,
}

impl FieldKey {
    const ALL: [FieldKey; 6] = [
        FieldKey::ImplementationTime,
        FieldKey::CoverageMode,
        FieldKey::Personnel,
        FieldKey::Time,
        FieldKey::Unit,
        FieldKey::Qth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Qth => "QTH",
            FieldKey::ImplementationTime => "HORARIO DE IMPLANTACIÓN",
            FieldKey::Time => "HORARIO",
            FieldKey::Unit => "UNIDAD",
            FieldKey::Personnel => "PERSONAL",
            FieldKey::CoverageMode => "MODALIDAD DE COBERTURA",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| eq_folded(key.trim(), k.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `JEFE DE GUARDIA: Comandante Juan Pérez`
    DutyLine { role: DutyRole, text: String },
    ServicesMarker,
    SportsEventsMarker,
    /// `1 - O.S. 123/45 - "TÍTULO"`
    ServiceHeader { title: String, description: String },
    /// `QTH: Lugar A`
    Field { key: FieldKey, value: String },
    /// An all-caps line taken as an implicit location header
    BareLocation(String),
    /// Anything else; becomes an assignment detail
    Text(String),
}

fn service_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\s*[-–—]\s*(.+)$").expect("valid service header regex"))
}

fn order_reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(O\.\s*S\.\s*[\d/]+)\s*[-–—]?\s*(.*)$").expect("valid order reference regex")
    })
}

/// Classify one trimmed, non-empty line. `next` is the following line.
pub fn classify(line: &str, next: Option<&str>) -> LineKind {
    if let Some((role, text)) = parse_duty_line(line) {
        return LineKind::DutyLine { role, text };
    }
    if eq_folded(line, SERVICES_MARKER) {
        return LineKind::ServicesMarker;
    }
    if eq_folded(line, SPORTS_EVENTS_MARKER) {
        return LineKind::SportsEventsMarker;
    }
    if let Some((title, description)) = parse_service_header(line) {
        return LineKind::ServiceHeader { title, description };
    }
    if let Some((key, value)) = parse_field(line) {
        return LineKind::Field { key, value };
    }
    if is_bare_location(line, next) {
        return LineKind::BareLocation(trim_trailing_dots(line).to_string());
    }
    LineKind::Text(line.to_string())
}

/// Split a `KEY: value` line at its first colon
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

pub fn parse_duty_line(line: &str) -> Option<(DutyRole, String)> {
    let (key, value) = split_key_value(line)?;
    let role = DutyRole::from_label(key)?;
    Some((role, value.to_string()))
}

pub fn parse_field(line: &str) -> Option<(FieldKey, String)> {
    let (key, value) = split_key_value(line)?;
    let key = FieldKey::from_key(key)?;
    Some((key, value.to_string()))
}

/// Parse a `<number> - <rest>` service header into `(title, description)`.
/// A leading `O.S. <digits/slashes>` reference becomes the description.
pub fn parse_service_header(line: &str) -> Option<(String, String)> {
    let rest = service_header_re().captures(line)?.get(1)?.as_str().trim();

    if let Some(caps) = order_reference_re().captures(rest) {
        let description = caps[1].trim().to_string();
        let title = clean_title(&caps[2]);
        if !title.is_empty() {
            return Some((title, description));
        }
    }
    Some((clean_title(rest), String::new()))
}

fn clean_title(raw: &str) -> String {
    strip_quotes(trim_trailing_dots(raw)).to_string()
}

/// Heuristic: an all-caps line longer than eight characters is an implicit
/// location header, unless
///
/// - it opens with an officer rank, a personnel rank word
///   ([`PERSONNEL_RANK_WORDS`]) or a duty-line label, so it names people
/// - the next line starts with `HORARIO` (then it reads as a caption for
///   that time)
pub fn is_bare_location(line: &str, next: Option<&str>) -> bool {
    if line.chars().count() <= BARE_LOCATION_MIN_CHARS || !text::is_upper_case(line) {
        return false;
    }
    if Rank::split_prefix(line).is_some()
        || starts_with_personnel_rank(line)
        || starts_with_role_label(line)
    {
        return false;
    }
    !next.is_some_and(|n| strip_prefix_folded(n.trim_start(), "HORARIO").is_some())
}

fn starts_with_personnel_rank(line: &str) -> bool {
    PERSONNEL_RANK_WORDS
        .iter()
        .any(|word| strip_word_prefix_folded(line, word).is_some())
}

fn starts_with_role_label(line: &str) -> bool {
    DutyRole::ALL
        .iter()
        .any(|role| strip_prefix_folded(line, role.label()).is_some())
}
