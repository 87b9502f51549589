//! Station unit-status sheet reader.
//!
//! The station name sits at a fixed cell (E4). The unit table starts below
//! the row whose column A reads `UNIDADES` and runs until an empty cell or
//! the `TOTALES` row in that column.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::grid::{self, cell_or_empty, CellGrid};
use crate::models::{out_of_service_reason, Unit, UnitReportImport, UnitStatus};
use crate::utils::{contains_folded, eq_folded, IdSequence};

/// E4 as zero-based (row, column)
const STATION_CELL: (usize, usize) = (3, 4);

const UNITS_HEADER: &str = "UNIDADES";
const TOTALS_ROW: &str = "TOTALES";

fn station_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)^ESTACI[OÓ]N\s+([IVXLCDM]+)\s*['"‘’“”«]\s*([^'"‘’“”»]+?)\s*['"‘’“”»]?$"#)
            .expect("valid station regex")
    })
}

/// `"ESTACION IV 'Norte'"` -> `"ESTACIÓN IV Norte"`
pub fn parse_station_name(text: &str) -> Option<String> {
    let caps = station_re().captures(text.trim())?;
    Some(format!("ESTACIÓN {} {}", caps[1].to_uppercase(), caps[2].trim()))
}

/// Column positions in the unit table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnitColumns {
    unit_type: usize,
    internal_id: usize,
    condition: usize,
    dependency: usize,
    officer: usize,
    personnel: usize,
}

impl UnitColumns {
    /// Locate columns by header keyword, falling back to A..F order
    fn from_header(header: &[Option<String>]) -> Self {
        Self {
            unit_type: 0,
            internal_id: keyword_column(header, &["INTERNO", "MOVIL"], 1),
            condition: keyword_column(header, &["COND"], 2),
            dependency: keyword_column(header, &["DEP"], 3),
            officer: keyword_column(header, &["CARGO", "OFICIAL"], 4),
            personnel: keyword_column(header, &["DOT", "PERSONAL"], 5),
        }
    }
}

/// First header cell after column A containing any keyword
fn keyword_column(header: &[Option<String>], keywords: &[&str], fallback: usize) -> usize {
    header
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, c)| {
            c.as_deref()
                .is_some_and(|text| keywords.iter().any(|k| contains_folded(text, k)))
        })
        .map_or(fallback, |(i, _)| i)
}

/// Parse a unit-status sheet. `None` when the station cell or the
/// `UNIDADES` header cannot be found.
pub fn parse_unit_report(sheet: &CellGrid) -> (Option<UnitReportImport>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let Some(station_name) = sheet
        .cell(STATION_CELL.0, STATION_CELL.1)
        .and_then(parse_station_name)
    else {
        diagnostics.unrecognized("no station name in E4");
        return (None, diagnostics);
    };

    let Some(header_index) = sheet
        .rows()
        .position(|row| grid::cell(row, 0).is_some_and(|c| eq_folded(c, UNITS_HEADER)))
    else {
        diagnostics.unrecognized("no UNIDADES header row");
        return (None, diagnostics);
    };

    let header = sheet.row(header_index).unwrap_or_default();
    let cols = UnitColumns::from_header(header);
    let mut ids = IdSequence::new();
    let mut units = Vec::new();

    for row in sheet.rows().skip(header_index + 1) {
        let Some(unit_type) = grid::cell(row, cols.unit_type) else {
            break;
        };
        if eq_folded(unit_type, TOTALS_ROW) {
            break;
        }
        units.push(unit_from_row(ids.next("unit"), unit_type, row, &cols));
    }

    debug!(station = %station_name, units = units.len(), "Parsed unit report");
    (Some(UnitReportImport { station_name, units }), diagnostics)
}

fn unit_from_row(id: String, unit_type: &str, row: &[Option<String>], cols: &UnitColumns) -> Unit {
    let condition = cell_or_empty(row, Some(cols.condition));
    let dependency = cell_or_empty(row, Some(cols.dependency));
    let status = UnitStatus::resolve(condition, dependency);

    Unit {
        id,
        unit_type: unit_type.to_string(),
        internal_id: cell_or_empty(row, Some(cols.internal_id)).to_string(),
        status,
        out_of_service_reason: out_of_service_reason(status, dependency),
        officer_in_charge: grid::cell(row, cols.officer).map(str::to_string),
        personnel_count: grid::cell(row, cols.personnel).and_then(|c| c.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(units: &[[&str; 6]]) -> CellGrid {
        let mut rows: Vec<Vec<&str>> = vec![
            vec!["PARTE DE UNIDADES", "", "", "", ""],
            vec![""],
            vec![""],
            vec!["", "", "", "", "ESTACION IV 'Norte'"],
            vec![""],
            vec!["UNIDADES", "Nº INTERNO", "COND.", "DEPENDENCIA", "OFICIAL A CARGO", "DOTACIÓN"],
        ];
        rows.extend(units.iter().map(|u| u.to_vec()));
        CellGrid::from_strings(rows)
    }

    #[test]
    fn test_station_name() {
        assert_eq!(parse_station_name("ESTACION IV 'Norte'"), Some("ESTACIÓN IV Norte".to_string()));
        assert_eq!(
            parse_station_name("Estación ii “San Martín”"),
            Some("ESTACIÓN II San Martín".to_string())
        );
        assert_eq!(parse_station_name("ESTACION Norte"), None);
        assert_eq!(parse_station_name("DESTACAMENTO IV 'Norte'"), None);
    }

    #[test]
    fn test_out_of_service_reason_from_dependency() {
        let grid = sheet(&[
            ["Autobomba", "12", "F/S", "Motor roto", "", "0"],
            ["Autobomba", "13", "F/S", "en dependencia", "", "0"],
        ]);
        let (report, diagnostics) = parse_unit_report(&grid);
        let report = report.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(report.station_name, "ESTACIÓN IV Norte");

        assert_eq!(report.units[0].status, UnitStatus::OutOfService);
        assert_eq!(report.units[0].out_of_service_reason.as_deref(), Some("Motor roto"));
        assert_eq!(report.units[1].status, UnitStatus::OutOfService);
        assert_eq!(report.units[1].out_of_service_reason, None);
    }

    #[test]
    fn test_unit_fields() {
        let grid = sheet(&[
            ["Autobomba", "12", "P/S", "Cuartel", "Cap. Díaz", "5"],
            ["Escalera", "7", "RES", "Destacamento a préstamo", "", ""],
            ["Cisterna", "9", "P/S", "", "", "4.5"],
        ]);
        let (report, _) = parse_unit_report(&grid);
        let units = report.unwrap().units;
        assert_eq!(units.len(), 3);

        assert_eq!(units[0].id, "unit-1");
        assert_eq!(units[0].unit_type, "Autobomba");
        assert_eq!(units[0].internal_id, "12");
        assert_eq!(units[0].status, UnitStatus::InService);
        assert_eq!(units[0].officer_in_charge.as_deref(), Some("Cap. Díaz"));
        assert_eq!(units[0].personnel_count, Some(5));

        // a loan overrides the condition code
        assert_eq!(units[1].status, UnitStatus::OnLoan);
        assert_eq!(units[1].officer_in_charge, None);
        assert_eq!(units[1].personnel_count, None);

        assert_eq!(units[2].personnel_count, None);
    }

    #[test]
    fn test_totals_row_ends_table() {
        let grid = sheet(&[
            ["Autobomba", "12", "P/S", "", "", "5"],
            ["TOTALES", "", "", "", "", "5"],
            ["Fantasma", "99", "P/S", "", "", "1"],
        ]);
        let (report, _) = parse_unit_report(&grid);
        let units = report.unwrap().units;
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit_type, "Autobomba");
    }

    #[test]
    fn test_empty_cell_ends_table() {
        let grid = sheet(&[
            ["Autobomba", "12", "P/S", "", "", "5"],
            ["", "", "", "", "", ""],
            ["Fantasma", "99", "P/S", "", "", "1"],
        ]);
        let (report, _) = parse_unit_report(&grid);
        assert_eq!(report.unwrap().units.len(), 1);
    }

    #[test]
    fn test_columns_fall_back_to_fixed_order() {
        let header = CellGrid::from_strings([vec!["UNIDADES", "A", "B", "C", "D", "E"]]);
        let cols = UnitColumns::from_header(header.row(0).unwrap());
        assert_eq!(
            cols,
            UnitColumns {
                unit_type: 0,
                internal_id: 1,
                condition: 2,
                dependency: 3,
                officer: 4,
                personnel: 5,
            }
        );

        let header = CellGrid::from_strings([vec!["UNIDADES", "COND", "MOVIL", "DOT", "DEP", "CARGO"]]);
        let cols = UnitColumns::from_header(header.row(0).unwrap());
        assert_eq!((cols.condition, cols.internal_id, cols.personnel), (1, 2, 3));
        assert_eq!((cols.dependency, cols.officer), (4, 5));
    }

    #[test]
    fn test_unrecognized_layouts() {
        let no_station = CellGrid::from_strings([vec!["UNIDADES", "INTERNO"], vec!["Autobomba", "1"]]);
        let (report, diagnostics) = parse_unit_report(&no_station);
        assert!(report.is_none());
        assert_eq!(diagnostics.len(), 1);

        let mut rows = sheet(&[]).rows().map(|r| r.to_vec()).collect::<Vec<_>>();
        rows.truncate(5);
        let (report, _) = parse_unit_report(&CellGrid::new(rows));
        assert!(report.is_none());
    }
}
