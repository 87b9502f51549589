//! Schedule date labels, e.g. `"5 DE MAYO DE 2025"`.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::utils::fold;

const MONTHS: [&str; 12] = [
    "ENERO", "FEBRERO", "MARZO", "ABRIL", "MAYO", "JUNIO", "JULIO", "AGOSTO", "SEPTIEMBRE",
    "OCTUBRE", "NOVIEMBRE", "DICIEMBRE",
];

fn long_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})\s+DE\s+(\p{L}+)\s+(?:DE(?:L)?\s+)?(\d{4})\b")
            .expect("valid long date regex")
    })
}

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\b").expect("valid numeric date regex")
    })
}

fn parenthesized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^()]*)\)").expect("valid parenthesized regex"))
}

/// Canonical label for a date
pub fn format_label(date: NaiveDate) -> String {
    format!(
        "{} DE {} DE {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

fn month_number(name: &str) -> Option<u32> {
    let name = fold(name);
    if name == "SETIEMBRE" {
        return Some(9);
    }
    MONTHS.iter().position(|m| *m == name).map(|i| i as u32 + 1)
}

/// Find a long-form Spanish date anywhere in `text`
pub fn find_long_date(text: &str) -> Option<String> {
    long_date_re().captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(format_label)
    })
}

/// Find a numeric `dd/mm/yyyy` date anywhere in `text`
pub fn find_numeric_date(text: &str) -> Option<String> {
    numeric_date_re().captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(format_label)
    })
}

/// Date written in parentheses, long or numeric form:
/// `"LÍNEA DE GUARDIA (LUNES 5 DE MAYO DE 2025)"`
pub fn find_parenthesized_date(text: &str) -> Option<String> {
    parenthesized_re().captures_iter(text).find_map(|caps| {
        let inner = caps.get(1)?.as_str();
        find_long_date(inner).or_else(|| find_numeric_date(inner))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_long_date() {
        assert_eq!(find_long_date("LUNES 05 DE MAYO DE 2025"), Some("5 DE MAYO DE 2025".to_string()));
        assert_eq!(find_long_date("guardia del 1 de setiembre del 2024"), Some("1 DE SEPTIEMBRE DE 2024".to_string()));
        assert_eq!(find_long_date("31 DE FEBRERO DE 2025"), None);
        assert_eq!(find_long_date("3 DE LINEA DE 2025"), None);
        assert_eq!(find_long_date("SERVICIOS"), None);
    }

    #[test]
    fn test_find_numeric_date() {
        assert_eq!(find_numeric_date("12/05/2025"), Some("12 DE MAYO DE 2025".to_string()));
        assert_eq!(find_numeric_date("1-1-2026"), Some("1 DE ENERO DE 2026".to_string()));
        assert_eq!(find_numeric_date("13/13/2025"), None);
    }

    #[test]
    fn test_find_parenthesized_date() {
        assert_eq!(
            find_parenthesized_date("LÍNEA DE GUARDIA (MARTES 6 DE MAYO DE 2025)"),
            Some("6 DE MAYO DE 2025".to_string())
        );
        assert_eq!(
            find_parenthesized_date("LÍNEA DE GUARDIA (06/05/2025)"),
            Some("6 DE MAYO DE 2025".to_string())
        );
        assert_eq!(find_parenthesized_date("LÍNEA DE GUARDIA 6 DE MAYO DE 2025"), None);
        assert_eq!(find_parenthesized_date("LÍNEA DE GUARDIA (sin fecha)"), None);
    }
}
