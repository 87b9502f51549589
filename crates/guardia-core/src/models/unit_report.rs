//! Domain models for station unit-status reports.

use serde::{Deserialize, Serialize};

use crate::utils::{contains_folded, eq_folded};

/// Units read from one station's sheet, patched into the caller's report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UnitReportImport {
    #[serde(rename = "stationName")]
    pub station_name: String,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum UnitStatus {
    #[serde(rename = "Para Servicio")]
    InService,
    #[serde(rename = "Fuera de Servicio")]
    OutOfService,
    #[serde(rename = "Reserva")]
    Reserve,
    #[serde(rename = "A Préstamo")]
    OnLoan,
    #[serde(rename = "Estado Desconocido")]
    Unknown,
}

impl UnitStatus {
    /// Map a condition code (`P/S`, `F/S`, `RES`) to a status.
    pub fn from_condition(code: &str) -> Self {
        let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        if eq_folded(&compact, "P/S") {
            UnitStatus::InService
        } else if eq_folded(&compact, "F/S") {
            UnitStatus::OutOfService
        } else if eq_folded(&compact, "RES") {
            UnitStatus::Reserve
        } else {
            UnitStatus::Unknown
        }
    }

    /// Status for a unit row: a dependency mentioning a loan overrides the code.
    pub fn resolve(condition: &str, dependency: &str) -> Self {
        if contains_folded(dependency, "PRÉSTAMO") {
            UnitStatus::OnLoan
        } else {
            Self::from_condition(condition)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::InService => "Para Servicio",
            UnitStatus::OutOfService => "Fuera de Servicio",
            UnitStatus::Reserve => "Reserva",
            UnitStatus::OnLoan => "A Préstamo",
            UnitStatus::Unknown => "Estado Desconocido",
        }
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Unit {
    pub id: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    #[serde(rename = "internalId")]
    pub internal_id: String,
    pub status: UnitStatus,
    #[serde(rename = "outOfServiceReason")]
    pub out_of_service_reason: Option<String>,
    #[serde(rename = "officerInCharge")]
    pub officer_in_charge: Option<String>,
    #[serde(rename = "personnelCount")]
    pub personnel_count: Option<u32>,
}

/// Reason recorded for an out-of-service unit, if the dependency cell gives one.
pub fn out_of_service_reason(status: UnitStatus, dependency: &str) -> Option<String> {
    let dependency = dependency.trim();
    if status != UnitStatus::OutOfService || dependency.is_empty() {
        return None;
    }
    if eq_folded(dependency, "en dependencia") {
        return None;
    }
    Some(dependency.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_condition() {
        assert_eq!(UnitStatus::from_condition("P/S"), UnitStatus::InService);
        assert_eq!(UnitStatus::from_condition(" f / s "), UnitStatus::OutOfService);
        assert_eq!(UnitStatus::from_condition("RES"), UnitStatus::Reserve);
        assert_eq!(UnitStatus::from_condition("???"), UnitStatus::Unknown);
        assert_eq!(UnitStatus::from_condition(""), UnitStatus::Unknown);
    }

    #[test]
    fn test_status_loan_overrides_condition() {
        assert_eq!(UnitStatus::resolve("P/S", "A PRÉSTAMO EST. III"), UnitStatus::OnLoan);
        assert_eq!(UnitStatus::resolve("F/S", "en préstamo"), UnitStatus::OnLoan);
        assert_eq!(UnitStatus::resolve("F/S", "Motor roto"), UnitStatus::OutOfService);
    }

    #[test]
    fn test_status_loan_without_accent() {
        assert_eq!(UnitStatus::resolve("P/S", "A PRESTAMO EST. II"), UnitStatus::OnLoan);
        assert_eq!(UnitStatus::resolve("RES", "prestamo"), UnitStatus::OnLoan);
        assert_eq!(UnitStatus::resolve("RES", "Presta servicio"), UnitStatus::Reserve);
    }

    #[test]
    fn test_out_of_service_reason() {
        assert_eq!(
            out_of_service_reason(UnitStatus::OutOfService, "Motor roto"),
            Some("Motor roto".to_string())
        );
        assert_eq!(out_of_service_reason(UnitStatus::OutOfService, "en dependencia"), None);
        assert_eq!(out_of_service_reason(UnitStatus::OutOfService, "  "), None);
        assert_eq!(out_of_service_reason(UnitStatus::InService, "Motor roto"), None);
    }

    #[test]
    fn test_unit_wire_names() {
        let unit = Unit {
            id: "unit-1".to_string(),
            unit_type: "AUTOBOMBA".to_string(),
            internal_id: "1234".to_string(),
            status: UnitStatus::OnLoan,
            out_of_service_reason: None,
            officer_in_charge: None,
            personnel_count: Some(4),
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["type"], "AUTOBOMBA");
        assert_eq!(json["status"], "A Préstamo");
        assert_eq!(json["personnelCount"], 4);
    }
}
