//! Domain models for the daily duty schedule.
//!
//! These types are the import result handed to the application state; the
//! wire names match the JSON the browser collaborators already persist.

use serde::{Deserialize, Serialize};

use crate::utils::{strip_word_prefix_folded, text};

/// Placeholder written into an empty location at commit time
pub const LOCATION_PLACEHOLDER: &str = "Ubicación a detallar";
/// Placeholder written into an empty time at commit time
pub const TIME_PLACEHOLDER: &str = "Horario a detallar";
/// Placeholder written into empty personnel at commit time
pub const PERSONNEL_PLACEHOLDER: &str = "Personal a detallar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Schedule {
    pub date: Option<String>,
    #[serde(rename = "commandStaff", default)]
    pub command_staff: Vec<Officer>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(rename = "sportsEvents", default)]
    pub sports_events: Vec<Service>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.command_staff.is_empty() && self.services.is_empty() && self.sports_events.is_empty()
    }

    /// All services, regular ones first
    pub fn all_services(&self) -> impl Iterator<Item = &Service> {
        self.services.iter().chain(self.sports_events.iter())
    }

    pub fn assignment_count(&self) -> usize {
        self.all_services().map(|s| s.assignments.len()).sum()
    }
}

/// The four duty-line positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum DutyRole {
    #[serde(rename = "JEFE DE INSPECCIONES")]
    ChiefOfInspections,
    #[serde(rename = "JEFE DE SERVICIO")]
    ChiefOfService,
    #[serde(rename = "JEFE DE GUARDIA")]
    ChiefOfGuard,
    #[serde(rename = "JEFE DE RESERVA")]
    ChiefOfReserve,
}

impl DutyRole {
    pub const ALL: [DutyRole; 4] = [
        DutyRole::ChiefOfInspections,
        DutyRole::ChiefOfService,
        DutyRole::ChiefOfGuard,
        DutyRole::ChiefOfReserve,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DutyRole::ChiefOfInspections => "JEFE DE INSPECCIONES",
            DutyRole::ChiefOfService => "JEFE DE SERVICIO",
            DutyRole::ChiefOfGuard => "JEFE DE GUARDIA",
            DutyRole::ChiefOfReserve => "JEFE DE RESERVA",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| text::eq_folded(label.trim(), r.label()))
    }
}

impl std::fmt::Display for DutyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rank prefixes recognized in front of an officer's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Rank {
    #[serde(rename = "COMANDANTE GENERAL")]
    ComandanteGeneral,
    #[serde(rename = "COMANDANTE MAYOR")]
    ComandanteMayor,
    #[serde(rename = "COMANDANTE")]
    Comandante,
    #[serde(rename = "SUBCOMANDANTE")]
    Subcomandante,
    #[serde(rename = "CAPITÁN")]
    Capitan,
    #[serde(rename = "TENIENTE PRIMERO")]
    TenientePrimero,
    #[serde(rename = "TENIENTE")]
    Teniente,
    #[serde(rename = "SUBTENIENTE")]
    Subteniente,
    #[serde(rename = "OTRO")]
    Otro,
}

impl Rank {
    /// Known ranks, longest label first so "COMANDANTE MAYOR" wins over "COMANDANTE".
    const PREFIXES: [Rank; 8] = [
        Rank::ComandanteGeneral,
        Rank::ComandanteMayor,
        Rank::TenientePrimero,
        Rank::Subcomandante,
        Rank::Subteniente,
        Rank::Comandante,
        Rank::Teniente,
        Rank::Capitan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::ComandanteGeneral => "COMANDANTE GENERAL",
            Rank::ComandanteMayor => "COMANDANTE MAYOR",
            Rank::Comandante => "COMANDANTE",
            Rank::Subcomandante => "SUBCOMANDANTE",
            Rank::Capitan => "CAPITÁN",
            Rank::TenientePrimero => "TENIENTE PRIMERO",
            Rank::Teniente => "TENIENTE",
            Rank::Subteniente => "SUBTENIENTE",
            Rank::Otro => "OTRO",
        }
    }

    /// Split a leading rank off `text`, returning the rank and the rest.
    pub fn split_prefix(text: &str) -> Option<(Rank, &str)> {
        let text = text.trim_start();
        Self::PREFIXES
            .into_iter()
            .find_map(|rank| strip_word_prefix_folded(text, rank.label()).map(|rest| (rank, rest)))
    }

    /// Rank named by a whole cell, e.g. a roster's JERARQUÍA column
    pub fn from_label(label: &str) -> Rank {
        Self::PREFIXES
            .into_iter()
            .find(|r| text::eq_folded(label.trim(), r.label()))
            .unwrap_or(Rank::Otro)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Officer {
    pub id: String,
    pub role: DutyRole,
    pub name: String,
    pub rank: Rank,
}

impl Officer {
    /// Build an officer from the free text after a duty-line label.
    pub fn from_duty_text(id: String, role: DutyRole, free_text: &str) -> Self {
        let (rank, rest) = Rank::split_prefix(free_text).unwrap_or((Rank::Otro, free_text));
        let name = text::trim_trailing_punctuation(text::strip_trailing_parenthetical(
            text::trim_trailing_punctuation(rest),
        ));
        Self {
            id,
            role,
            name: name.to_string(),
            rank,
        }
    }

    pub fn display_name(&self) -> String {
        match self.rank {
            Rank::Otro => self.name.clone(),
            rank => format!("{} {}", rank, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub novelty: Option<String>,
    #[serde(rename = "isHidden", default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Service {
    pub fn new(id: String, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            novelty: None,
            is_hidden: false,
            assignments: Vec::new(),
        }
    }

    /// Append a coverage-mode value to the novelty, keeping the trailing space
    /// between repeats.
    pub fn append_novelty(&mut self, value: &str) {
        let novelty = self.novelty.get_or_insert_with(String::new);
        novelty.push_str(value);
        novelty.push(' ');
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Assignment {
    pub id: String,
    pub location: String,
    pub time: String,
    #[serde(rename = "implementationTime")]
    pub implementation_time: Option<String>,
    pub personnel: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

/// An assignment still being accumulated by a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAssignment {
    pub location: String,
    pub time: String,
    pub implementation_time: Option<String>,
    pub personnel: String,
    pub unit: Option<String>,
    pub details: Vec<String>,
}

impl PendingAssignment {
    /// Only assignments with a location or at least one detail line are kept.
    pub fn has_content(&self) -> bool {
        !self.location.is_empty() || !self.details.is_empty()
    }

    /// Materialize the assignment, filling empty fields with placeholders.
    pub fn into_assignment(self, id: String) -> Option<Assignment> {
        if !self.has_content() {
            return None;
        }
        Some(Assignment {
            id,
            location: or_placeholder(self.location, LOCATION_PLACEHOLDER),
            time: or_placeholder(self.time, TIME_PLACEHOLDER),
            implementation_time: self.implementation_time,
            personnel: or_placeholder(self.personnel, PERSONNEL_PLACEHOLDER),
            unit: self.unit,
            details: self.details,
        })
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
