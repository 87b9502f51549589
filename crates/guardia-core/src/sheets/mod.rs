//! Spreadsheet parsers.
//!
//! - `roster`: personnel roster grouped by section and location
//! - `template`: generic one-row-per-assignment template (read and write)
//! - `unit_report`: one station's unit-status sheet

pub mod roster;
pub mod template;
pub mod unit_report;

pub use roster::parse_roster;
pub use template::{parse_template, to_rows};
pub use unit_report::{parse_station_name, parse_unit_report};
