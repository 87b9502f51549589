//! Input dialect detection.

use serde::Serialize;
use tracing::debug;

use crate::grid::CellGrid;
use crate::utils::contains_folded;

/// Phrase in A1 that marks a personnel roster
pub const ROSTER_MARKER: &str = "LÍNEA DE GUARDIA";

/// The document dialect an import was read as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum SourceFormat {
    WordSchedule,
    PersonnelRoster,
    GenericTemplate,
    UnitStatus,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceFormat::WordSchedule => "Word schedule",
            SourceFormat::PersonnelRoster => "personnel roster",
            SourceFormat::GenericTemplate => "generic template",
            SourceFormat::UnitStatus => "unit status",
        };
        write!(f, "{}", name)
    }
}

/// Pick the schedule dialect of a spreadsheet.
///
/// Only A1 is consulted: if it contains the roster marker the sheet is a
/// personnel roster, anything else is read as the generic template. A
/// template whose A1 happens to contain the phrase is misrouted; changing
/// that would reroute existing files.
pub fn classify_schedule_sheet(sheet: &CellGrid) -> SourceFormat {
    let format = match sheet.first_cell() {
        Some(a1) if contains_folded(a1, ROSTER_MARKER) => SourceFormat::PersonnelRoster,
        _ => SourceFormat::GenericTemplate,
    };
    debug!(%format, a1 = ?sheet.first_cell(), "Classified spreadsheet");
    format
}
