//! Data models produced by the importers.
//!
//! - `Schedule`, `Officer`, `Service`, `Assignment`: the daily duty schedule
//! - `UnitReportImport`, `Unit`, `UnitStatus`: one station's unit-status sheet

pub mod schedule;
pub mod unit_report;

pub use schedule::{
    Assignment, DutyRole, Officer, PendingAssignment, Rank, Schedule, Service,
    LOCATION_PLACEHOLDER, PERSONNEL_PLACEHOLDER, TIME_PLACEHOLDER,
};
pub use unit_report::{out_of_service_reason, Unit, UnitReportImport, UnitStatus};
