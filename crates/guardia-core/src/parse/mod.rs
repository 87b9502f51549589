//! Word schedule parsing.
//!
//! Lines are classified one at a time ([`lines`]) and folded through the
//! explicit reducer in [`state`]. This module drives the fold and collects
//! the emitted events into a [`Schedule`].

pub mod lines;
pub mod state;

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::models::Schedule;

pub use lines::{classify, is_bare_location, FieldKey, LineKind};
pub use state::{ParseEvent, ParserState, Phase, Section};

/// Parse extracted Word lines into a schedule. Blank lines are ignored and
/// do not count as lookahead.
pub fn parse_schedule_lines<S: AsRef<str>>(lines: &[S]) -> (Schedule, Diagnostics) {
    let mut schedule = Schedule::default();
    let mut diagnostics = Diagnostics::new();
    let mut state = ParserState::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let next = lines[index + 1..]
            .iter()
            .map(|l| l.as_ref().trim())
            .find(|l| !l.is_empty());

        let (next_state, events) = state.step(line, next);
        state = next_state;
        apply_events(&mut schedule, &mut diagnostics, index, events);
    }
    apply_events(&mut schedule, &mut diagnostics, lines.len(), state.finish());

    debug!(
        officers = schedule.command_staff.len(),
        services = schedule.services.len(),
        sports_events = schedule.sports_events.len(),
        skipped = diagnostics.skipped_count(),
        "Parsed schedule lines"
    );
    (schedule, diagnostics)
}

fn apply_events(
    schedule: &mut Schedule,
    diagnostics: &mut Diagnostics,
    index: usize,
    events: Vec<ParseEvent>,
) {
    for event in events {
        match event {
            ParseEvent::Date(label) => schedule.date = Some(label),
            ParseEvent::Officer(officer) => schedule.command_staff.push(officer),
            ParseEvent::ServiceClosed {
                section: Section::Services,
                service,
            } => schedule.services.push(service),
            ParseEvent::ServiceClosed {
                section: Section::SportsEvents,
                service,
            } => schedule.sports_events.push(service),
            ParseEvent::Skipped(reason) => diagnostics.skip_line(index, reason),
        }
    }
}
