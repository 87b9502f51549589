//! Explicit parsing state for Word schedules.
//!
//! [`ParserState::step`] is a pure reducer: it takes the state by value plus
//! one classified line and returns the next state and the events the line
//! produced. Services are emitted when they close (next header, sports
//! marker, end of input), already holding their committed assignments.

use std::mem;

use crate::date;
use crate::diagnostics::SkipReason;
use crate::models::{Officer, PendingAssignment, Service};
use crate::utils::IdSequence;

use super::lines::{self, FieldKey, LineKind};

/// Which list a closed service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Services,
    SportsEvents,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// No current service: before the first header or after the sports marker
    #[default]
    Idle,
    /// A service is open, no assignment pending
    BuildingService(Service),
    /// A service is open and an assignment is being accumulated
    BuildingAssignment {
        service: Service,
        assignment: PendingAssignment,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    Date(String),
    Officer(Officer),
    ServiceClosed { section: Section, service: Service },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParserState {
    phase: Phase,
    /// Once set by the sports-events marker this never resets; there is no
    /// marker that returns to regular services.
    section: Section,
    ids: IdSequence,
    /// True until the first service header; a date is only looked for here
    in_preamble: bool,
    date_found: bool,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            in_preamble: true,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Consume one trimmed, non-empty line. `next` is the following line.
    pub fn step(mut self, line: &str, next: Option<&str>) -> (Self, Vec<ParseEvent>) {
        let mut events = Vec::new();
        let kind = lines::classify(line, next);

        // Only a free-text preamble line can carry the document date; headers
        // and duty lines keep their meaning even when they mention a date.
        if self.in_preamble
            && !self.date_found
            && matches!(kind, LineKind::Text(_) | LineKind::BareLocation(_))
        {
            if let Some(label) = date::find_long_date(line) {
                self.date_found = true;
                events.push(ParseEvent::Date(label));
                return (self, events);
            }
        }

        match kind {
            LineKind::DutyLine { role, text } => {
                let id = self.ids.next("off");
                events.push(ParseEvent::Officer(Officer::from_duty_text(id, role, &text)));
            }
            LineKind::ServicesMarker => {}
            LineKind::SportsEventsMarker => {
                self.close_service(&mut events);
                self.section = Section::SportsEvents;
            }
            LineKind::ServiceHeader { title, description } => {
                self.close_service(&mut events);
                self.in_preamble = false;
                let id = self.ids.next("svc");
                self.phase = Phase::BuildingService(Service::new(id, title, description));
            }
            LineKind::Field { key, value } => self.apply_field(key, value, &mut events),
            LineKind::BareLocation(location) => self.start_location(location, &mut events),
            LineKind::Text(text) => self.push_detail(text, &mut events),
        }

        (self, events)
    }

    /// Close the open service at end of input
    pub fn finish(mut self) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        self.close_service(&mut events);
        events
    }

    /// Take the open service and its pending assignment out of the phase,
    /// leaving `Idle`. `None` when no service is open.
    fn take_service(&mut self) -> Option<(Service, PendingAssignment)> {
        match mem::take(&mut self.phase) {
            Phase::Idle => None,
            Phase::BuildingService(service) => Some((service, PendingAssignment::default())),
            Phase::BuildingAssignment {
                service,
                assignment,
            } => Some((service, assignment)),
        }
    }

    fn commit(&mut self, service: &mut Service, pending: PendingAssignment) {
        if !pending.has_content() {
            return;
        }
        let id = self.ids.next("asg");
        if let Some(assignment) = pending.into_assignment(id) {
            service.assignments.push(assignment);
        }
    }

    fn close_service(&mut self, events: &mut Vec<ParseEvent>) {
        if let Some((mut service, pending)) = self.take_service() {
            self.commit(&mut service, pending);
            events.push(ParseEvent::ServiceClosed {
                section: self.section,
                service,
            });
        }
    }

    fn apply_field(&mut self, key: FieldKey, value: String, events: &mut Vec<ParseEvent>) {
        let Some((mut service, mut pending)) = self.take_service() else {
            events.push(ParseEvent::Skipped(SkipReason::OutsideService));
            return;
        };

        match key {
            FieldKey::Qth => {
                // A second QTH starts the next assignment of the same service
                if !pending.location.is_empty() {
                    self.commit(&mut service, mem::take(&mut pending));
                }
                pending.location = value;
            }
            FieldKey::ImplementationTime => pending.implementation_time = non_empty(value),
            FieldKey::Time => pending.time = value,
            FieldKey::Unit => pending.unit = non_empty(value),
            FieldKey::Personnel => pending.personnel = value,
            FieldKey::CoverageMode => {
                self.commit(&mut service, pending);
                service.append_novelty(&value);
                self.phase = Phase::BuildingService(service);
                return;
            }
        }

        self.phase = Phase::BuildingAssignment {
            service,
            assignment: pending,
        };
    }

    fn start_location(&mut self, location: String, events: &mut Vec<ParseEvent>) {
        let Some((mut service, pending)) = self.take_service() else {
            events.push(ParseEvent::Skipped(SkipReason::OutsideService));
            return;
        };
        self.commit(&mut service, pending);
        self.phase = Phase::BuildingAssignment {
            service,
            assignment: PendingAssignment {
                location,
                ..PendingAssignment::default()
            },
        };
    }

    fn push_detail(&mut self, text: String, events: &mut Vec<ParseEvent>) {
        let Some((service, mut pending)) = self.take_service() else {
            events.push(ParseEvent::Skipped(SkipReason::OutsideService));
            return;
        };
        pending.details.push(text);
        self.phase = Phase::BuildingAssignment {
            service,
            assignment: pending,
        };
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
