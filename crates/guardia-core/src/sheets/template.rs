//! Generic template: one row per assignment under named columns.
//!
//! [`parse_template`] reads the layout, [`to_rows`] writes it. Rows that
//! share a service title are one service; titles containing the sports
//! marker go to `sportsEvents`.

use tracing::debug;

use crate::diagnostics::{Diagnostics, SkipReason};
use crate::grid::{self, cell_or_empty, CellGrid};
use crate::models::{PendingAssignment, Schedule, Service};
use crate::parse::lines::SPORTS_EVENTS_MARKER;
use crate::utils::{contains_folded, strip_prefix_folded, IdSequence};

pub const SERVICE_TITLE: &str = "Título del Servicio";
pub const SERVICE_DESCRIPTION: &str = "Descripción del Servicio";
pub const SERVICE_NOVELTY: &str = "Novedad del Servicio";
pub const ASSIGNMENT_LOCATION: &str = "Ubicación de Asignación";
pub const ASSIGNMENT_TIME: &str = "Horario de Asignación";
pub const ASSIGNMENT_PERSONNEL: &str = "Personal de Asignación";
pub const ASSIGNMENT_UNIT: &str = "Unidad de Asignación";
pub const ASSIGNMENT_DETAILS: &str = "Detalles de Asignación";

/// Column order written by [`to_rows`]
pub const COLUMNS: [&str; 8] = [
    SERVICE_TITLE,
    SERVICE_DESCRIPTION,
    SERVICE_NOVELTY,
    ASSIGNMENT_LOCATION,
    ASSIGNMENT_TIME,
    ASSIGNMENT_PERSONNEL,
    ASSIGNMENT_UNIT,
    ASSIGNMENT_DETAILS,
];

const REQUIRED: [&str; 4] = [
    SERVICE_TITLE,
    ASSIGNMENT_LOCATION,
    ASSIGNMENT_TIME,
    ASSIGNMENT_PERSONNEL,
];

const IMPLEMENTATION_TIME_LABEL: &str = "HORARIO DE IMPLANTACIÓN";

// ============================================================================
// Reading
// ============================================================================

/// Column positions; `None` for absent optional columns
#[derive(Debug, Clone, Copy)]
struct TemplateColumns {
    title: usize,
    description: Option<usize>,
    novelty: Option<usize>,
    location: usize,
    time: usize,
    personnel: usize,
    unit: Option<usize>,
    details: Option<usize>,
}

/// Header cells compare exactly (after trimming)
fn position(header: &[Option<String>], name: &str) -> Option<usize> {
    header.iter().position(|c| c.as_deref() == Some(name))
}

impl TemplateColumns {
    fn from_header(header: &[Option<String>]) -> Result<Self, &'static str> {
        let required = |name: &'static str| position(header, name).ok_or(name);
        Ok(Self {
            title: required(SERVICE_TITLE)?,
            description: position(header, SERVICE_DESCRIPTION),
            novelty: position(header, SERVICE_NOVELTY),
            location: required(ASSIGNMENT_LOCATION)?,
            time: required(ASSIGNMENT_TIME)?,
            personnel: required(ASSIGNMENT_PERSONNEL)?,
            unit: position(header, ASSIGNMENT_UNIT),
            details: position(header, ASSIGNMENT_DETAILS),
        })
    }

    fn required_index(&self, name: &str) -> usize {
        match name {
            SERVICE_TITLE => self.title,
            ASSIGNMENT_LOCATION => self.location,
            ASSIGNMENT_TIME => self.time,
            _ => self.personnel,
        }
    }
}

/// Parse a generic-template sheet. The first non-blank row is the header;
/// `None` when it lacks a required column.
pub fn parse_template(sheet: &CellGrid) -> (Option<Schedule>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let Some((header_index, header)) = sheet.rows().enumerate().find(|(_, row)| !grid::is_blank(row))
    else {
        diagnostics.unrecognized("empty sheet");
        return (None, diagnostics);
    };

    let cols = match TemplateColumns::from_header(header) {
        Ok(cols) => cols,
        Err(missing) => {
            diagnostics.unrecognized(format!("template without '{}' column", missing));
            return (None, diagnostics);
        }
    };

    let mut ids = IdSequence::new();
    let mut services: Vec<Service> = Vec::new();

    for (index, row) in sheet.rows().enumerate().skip(header_index + 1) {
        if grid::is_blank(row) {
            continue;
        }
        if let Some(missing) = REQUIRED
            .iter()
            .find(|name| grid::cell(row, cols.required_index(name)).is_none())
        {
            diagnostics.skip_row(index, SkipReason::MissingColumn(missing.to_string()));
            continue;
        }

        let title = cell_or_empty(row, Some(cols.title));
        let service_index = match services.iter().position(|s| s.title == title) {
            Some(existing) => existing,
            None => {
                let description = cell_or_empty(row, cols.description);
                services.push(Service::new(ids.next("svc"), title, description));
                services.len() - 1
            }
        };
        let service = &mut services[service_index];
        if service.novelty.is_none() {
            service.novelty = cols.novelty.and_then(|c| grid::cell(row, c)).map(str::to_string);
        }

        let mut pending = PendingAssignment {
            location: cell_or_empty(row, Some(cols.location)).to_string(),
            time: cell_or_empty(row, Some(cols.time)).to_string(),
            personnel: cell_or_empty(row, Some(cols.personnel)).to_string(),
            unit: cols.unit.and_then(|c| grid::cell(row, c)).map(str::to_string),
            ..PendingAssignment::default()
        };
        read_details(cell_or_empty(row, cols.details), &mut pending);

        if let Some(assignment) = pending.into_assignment(ids.next("asg")) {
            service.assignments.push(assignment);
        }
    }

    let (sports_events, services): (Vec<Service>, Vec<Service>) = services
        .into_iter()
        .partition(|s| contains_folded(&s.title, SPORTS_EVENTS_MARKER));

    let schedule = Schedule {
        date: None,
        command_staff: Vec::new(),
        services,
        sports_events,
    };
    debug!(
        services = schedule.services.len(),
        sports_events = schedule.sports_events.len(),
        skipped = diagnostics.skipped_count(),
        "Parsed generic template"
    );
    (Some(schedule), diagnostics)
}

/// Split the details cell on `;` or newlines. A line starting with the
/// implantation-time label fills `implementation_time` instead.
fn read_details(cell: &str, pending: &mut PendingAssignment) {
    for line in cell.split([';', '\n']).map(str::trim).filter(|l| !l.is_empty()) {
        match strip_prefix_folded(line, IMPLEMENTATION_TIME_LABEL) {
            Some(rest) => {
                let value = rest.split_once(':').map_or(rest, |(_, v)| v).trim();
                if !value.is_empty() {
                    pending.implementation_time = Some(value.to_string());
                }
            }
            None => pending.details.push(line.to_string()),
        }
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Serialize a schedule into template rows: the header, then one row per
/// assignment. Services without assignments have no row.
pub fn to_rows(schedule: &Schedule) -> Vec<Vec<String>> {
    let mut rows = vec![COLUMNS.iter().map(|c| c.to_string()).collect()];

    let tagged = schedule
        .services
        .iter()
        .map(|s| (s, false))
        .chain(schedule.sports_events.iter().map(|s| (s, true)));

    for (service, is_sports) in tagged {
        let title = if is_sports && !contains_folded(&service.title, SPORTS_EVENTS_MARKER) {
            format!("{} - {}", SPORTS_EVENTS_MARKER, service.title)
        } else {
            service.title.clone()
        };
        let novelty = service.novelty.as_deref().unwrap_or("").trim();

        for assignment in &service.assignments {
            let mut details = Vec::new();
            if let Some(time) = &assignment.implementation_time {
                details.push(format!("{}: {}", IMPLEMENTATION_TIME_LABEL, time));
            }
            details.extend(assignment.details.iter().cloned());

            rows.push(vec![
                title.clone(),
                service.description.clone(),
                novelty.to_string(),
                assignment.location.clone(),
                assignment.time.clone(),
                assignment.personnel.clone(),
                assignment.unit.clone().unwrap_or_default(),
                details.join("; "),
            ]);
        }
    }
    rows
}
