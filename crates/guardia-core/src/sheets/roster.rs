//! Personnel-roster reader.
//!
//! Layout: A1 holds the title with the date in parentheses, single-cell rows
//! open a section (one service each), a row holding both `LUGAR` and `LP`
//! names the columns, and every other row is one person assigned to a
//! location. People sharing a location become one assignment.

use tracing::debug;

use crate::date;
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::grid::{self, cell_or_empty, find_column, CellGrid};
use crate::models::{PendingAssignment, Schedule, Service};
use crate::utils::text::join_non_empty;
use crate::utils::IdSequence;

const LOCATION_HEADER: &str = "LUGAR";
const LP_HEADER: &str = "LP";

const RANK_HEADERS: &[&str] = &["JERARQUIA", "GRADO", "RANGO"];
const NAME_HEADERS: &[&str] = &["APELLIDO Y NOMBRE", "NOMBRE Y APELLIDO", "NOMBRE"];
const POC_HEADERS: &[&str] = &["POC"];
const PHONE_HEADERS: &[&str] = &["CEL", "CELULAR", "TELEFONO"];
const TIME_HEADERS: &[&str] = &["HORARIO"];

/// Column positions taken from the header row
#[derive(Debug, Clone, Copy)]
struct RosterColumns {
    location: usize,
    lp: usize,
    rank: Option<usize>,
    name: Option<usize>,
    poc: Option<usize>,
    phone: Option<usize>,
    time: Option<usize>,
}

impl RosterColumns {
    fn from_header(row: &[Option<String>]) -> Option<Self> {
        Some(Self {
            location: find_column(row, LOCATION_HEADER)?,
            lp: find_column(row, LP_HEADER)?,
            rank: find_any_column(row, RANK_HEADERS),
            name: find_any_column(row, NAME_HEADERS),
            poc: find_any_column(row, POC_HEADERS),
            phone: find_any_column(row, PHONE_HEADERS),
            time: find_any_column(row, TIME_HEADERS),
        })
    }
}

fn find_any_column(row: &[Option<String>], labels: &[&str]) -> Option<usize> {
    labels.iter().find_map(|label| find_column(row, label))
}

/// One section being filled: the service plus its location groups in
/// first-seen order.
struct OpenSection {
    service: Service,
    groups: Vec<PendingAssignment>,
    last_location: Option<String>,
}

impl OpenSection {
    fn group_for(&mut self, location: &str) -> &mut PendingAssignment {
        let index = match self.groups.iter().position(|g| g.location == location) {
            Some(index) => index,
            None => {
                self.groups.push(PendingAssignment {
                    location: location.to_string(),
                    ..PendingAssignment::default()
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    fn close(self, ids: &mut IdSequence) -> Service {
        let mut service = self.service;
        for group in self.groups {
            if let Some(assignment) = group.into_assignment(ids.next("asg")) {
                service.assignments.push(assignment);
            }
        }
        service
    }
}

/// `true` when only the first cell of the row has text
fn is_section_row(row: &[Option<String>]) -> bool {
    grid::cell(row, 0).is_some() && row.iter().skip(1).all(Option::is_none)
}

/// Parse a roster sheet. `None` when the `LUGAR`/`LP` header row is missing.
pub fn parse_roster(sheet: &CellGrid) -> (Option<Schedule>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut ids = IdSequence::new();
    let mut schedule = Schedule {
        date: sheet.first_cell().and_then(date::find_parenthesized_date),
        ..Schedule::default()
    };

    let mut columns: Option<RosterColumns> = None;
    let mut section: Option<OpenSection> = None;

    // Row 0 is the title row
    for (index, row) in sheet.rows().enumerate().skip(1) {
        if grid::is_blank(row) {
            continue;
        }

        if is_section_row(row) {
            if let Some(open) = section.take() {
                schedule.services.push(open.close(&mut ids));
            }
            let title = grid::cell(row, 0).unwrap_or_default();
            section = Some(OpenSection {
                service: Service::new(ids.next("svc"), title, ""),
                groups: Vec::new(),
                last_location: None,
            });
            continue;
        }

        if let Some(found) = RosterColumns::from_header(row) {
            columns = Some(found);
            continue;
        }

        let Some(cols) = columns else {
            diagnostics.skip_row(index, SkipReason::NoHeaderRow);
            continue;
        };
        let Some(open) = section.as_mut() else {
            diagnostics.skip_row(index, SkipReason::NoSection);
            continue;
        };

        // Merged location cells only keep their value in the top row
        let location = match grid::cell(row, cols.location) {
            Some(location) => location.to_string(),
            None => match &open.last_location {
                Some(location) => location.clone(),
                None => {
                    diagnostics.skip_row(index, SkipReason::MissingLocation);
                    continue;
                }
            },
        };
        open.last_location = Some(location.clone());

        let detail = person_line(row, &cols);
        let time = cell_or_empty(row, cols.time).to_string();
        let group = open.group_for(&location);
        if group.time.is_empty() {
            group.time = time;
        }
        if !detail.is_empty() {
            group.details.push(detail);
        }
    }

    if let Some(open) = section.take() {
        schedule.services.push(open.close(&mut ids));
    }

    if columns.is_none() {
        diagnostics.unrecognized("roster without LUGAR/LP header row");
        return (None, diagnostics);
    }

    debug!(
        services = schedule.services.len(),
        assignments = schedule.assignment_count(),
        date = ?schedule.date,
        "Parsed personnel roster"
    );
    (Some(schedule), diagnostics)
}

/// `"<rank> L.P. <lp> <name> POC: <poc> CEL: <phone>"`, empty parts omitted
fn person_line(row: &[Option<String>], cols: &RosterColumns) -> String {
    let lp = cell_or_empty(row, Some(cols.lp));
    let poc = cell_or_empty(row, cols.poc);
    let phone = cell_or_empty(row, cols.phone);

    let lp = if lp.is_empty() { String::new() } else { format!("L.P. {}", lp) };
    let poc = if poc.is_empty() { String::new() } else { format!("POC: {}", poc) };
    let phone = if phone.is_empty() { String::new() } else { format!("CEL: {}", phone) };

    join_non_empty([
        cell_or_empty(row, cols.rank),
        lp.as_str(),
        cell_or_empty(row, cols.name),
        poc.as_str(),
        phone.as_str(),
    ])
}
