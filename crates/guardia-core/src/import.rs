//! Import entry points: bytes + filename in, typed result out.
//!
//! The file extension picks the extractor; spreadsheets are then classified
//! by content. A layout that cannot be recognized is not an error: the
//! result carries `value: None` and a diagnostic saying why.

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::{classify_schedule_sheet, SourceFormat};
use crate::diagnostics::Diagnostics;
use crate::error::ImportError;
use crate::extract::{extract_first_sheet, extract_lines, DocumentKind};
use crate::grid::CellGrid;
use crate::models::{Schedule, UnitReportImport};
use crate::parse::parse_schedule_lines;
use crate::sheets::{parse_roster, parse_template, parse_unit_report};

/// Outcome of one import
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imported<T> {
    pub format: SourceFormat,
    /// `None` when the document did not match the expected layout
    pub value: Option<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Imported<T> {
    pub fn is_recognized(&self) -> bool {
        self.value.is_some()
    }
}

fn document_kind(filename: &str) -> Result<DocumentKind, ImportError> {
    DocumentKind::from_filename(filename)
        .ok_or_else(|| ImportError::UnsupportedFile(filename.to_string()))
}

// ============================================================================
// Schedules
// ============================================================================

/// Import a duty schedule from a Word document or a schedule spreadsheet
pub fn import_schedule(bytes: &[u8], filename: &str) -> Result<Imported<Schedule>, ImportError> {
    let imported = match document_kind(filename)? {
        DocumentKind::Word => schedule_from_lines(&extract_lines(bytes)?),
        DocumentKind::Spreadsheet => schedule_from_sheet(&extract_first_sheet(bytes)?),
    };

    match &imported.value {
        Some(schedule) => info!(
            file = filename,
            format = %imported.format,
            services = schedule.services.len(),
            sports_events = schedule.sports_events.len(),
            assignments = schedule.assignment_count(),
            skipped = imported.diagnostics.skipped_count(),
            "Imported schedule"
        ),
        None => warn!(file = filename, format = %imported.format, "Schedule format not recognized"),
    }
    Ok(imported)
}

/// Parse extracted Word lines. Unrecognized when neither a duty line nor a
/// service header was found.
pub fn schedule_from_lines<S: AsRef<str>>(lines: &[S]) -> Imported<Schedule> {
    let (schedule, mut diagnostics) = parse_schedule_lines(lines);
    let value = if schedule.is_empty() {
        diagnostics.unrecognized("no duty line or service found");
        None
    } else {
        Some(schedule)
    };
    Imported {
        format: SourceFormat::WordSchedule,
        value,
        diagnostics,
    }
}

/// Parse a schedule spreadsheet as a roster or a generic template
pub fn schedule_from_sheet(sheet: &CellGrid) -> Imported<Schedule> {
    let format = classify_schedule_sheet(sheet);
    let (value, diagnostics) = match format {
        SourceFormat::PersonnelRoster => parse_roster(sheet),
        _ => parse_template(sheet),
    };
    Imported {
        format,
        value,
        diagnostics,
    }
}

// ============================================================================
// Unit reports
// ============================================================================

/// Import one station's unit-status spreadsheet. Word files are rejected.
pub fn import_unit_report(
    bytes: &[u8],
    filename: &str,
) -> Result<Imported<UnitReportImport>, ImportError> {
    if document_kind(filename)? == DocumentKind::Word {
        return Err(ImportError::WordNotSupported(filename.to_string()));
    }
    let imported = unit_report_from_sheet(&extract_first_sheet(bytes)?);

    match &imported.value {
        Some(report) => info!(
            file = filename,
            station = %report.station_name,
            units = report.units.len(),
            "Imported unit report"
        ),
        None => warn!(file = filename, "Unit report format not recognized"),
    }
    Ok(imported)
}

pub fn unit_report_from_sheet(sheet: &CellGrid) -> Imported<UnitReportImport> {
    let (value, diagnostics) = parse_unit_report(sheet);
    Imported {
        format: SourceFormat::UnitStatus,
        value,
        diagnostics,
    }
}
