//! Guardia core - import of fire-department duty schedules and unit reports.
//!
//! Reads the semi-structured Word and spreadsheet documents written by
//! dispatchers and rebuilds the structured data model from them:
//!
//! - a daily [`Schedule`] (command staff, services, sports events) from a
//!   free-text Word document, a personnel roster or the generic template
//! - a [`UnitReportImport`] (one station's units and their status) from a
//!   unit-status sheet
//!
//! Everything here is pure: bytes and a filename in, an [`Imported`] value
//! plus [`Diagnostics`] out. Reading files is the caller's business.

pub mod classify;
pub mod date;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod grid;
pub mod import;
pub mod models;
pub mod parse;
pub mod sheets;
pub mod utils;

pub use classify::SourceFormat;
pub use diagnostics::{Diagnostic, Diagnostics, SkipReason, SourcePosition};
pub use error::{DecodeError, ImportError};
pub use grid::CellGrid;
pub use import::{import_schedule, import_unit_report, Imported};
pub use models::{
    Assignment, DutyRole, Officer, Rank, Schedule, Service, Unit, UnitReportImport, UnitStatus,
};
