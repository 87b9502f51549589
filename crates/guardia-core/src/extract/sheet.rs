//! Spreadsheet (.xlsx / .xls / .ods) extraction using calamine.
//!
//! Only the first sheet is read. Cells keep their absolute coordinates so
//! fixed positions (e.g. E4 in unit reports) stay addressable even when the
//! sheet's used range does not start at A1.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::debug;

use crate::error::DecodeError;
use crate::grid::CellGrid;

/// Extract the first sheet of a workbook as a cell grid
pub fn extract_first_sheet(bytes: &[u8]) -> Result<CellGrid, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoSheets)??;

    let grid = grid_from_range(&range);
    debug!(rows = grid.row_count(), "Extracted first sheet");
    Ok(grid)
}

fn grid_from_range(range: &Range<Data>) -> CellGrid {
    let Some((end_row, end_col)) = range.end() else {
        return CellGrid::default();
    };

    let rows = (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).and_then(cell_text))
                .collect()
        })
        .collect();
    CellGrid::new(rows)
}

/// Text of a cell; `None` for empty and error cells
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    Some(text)
}

/// Integral floats render without a decimal part (12345.0 -> "12345")
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Assemble a minimal .xlsx with one worksheet per `(name, rows)` entry.
    /// Cells that parse as numbers are written as numeric values, the rest
    /// as inline strings; empty cells are left out.
    pub(crate) fn xlsx_with_sheets(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
        let mut files: Vec<(String, String)> = Vec::new();

        let overrides: String = (1..=sheets.len())
            .map(|n| {
                format!(
                    "<Override PartName=\"/xl/worksheets/sheet{}.xml\" \
                     ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
                    n
                )
            })
            .collect();
        files.push((
            "[Content_Types].xml".to_string(),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
                 <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
                 <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
                 <Override PartName=\"/xl/workbook.xml\" \
                 ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
                 {}</Types>",
                overrides
            ),
        ));
        files.push((
            "_rels/.rels".to_string(),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <Relationships xmlns=\"{}\">\
                 <Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"xl/workbook.xml\"/>\
                 </Relationships>",
                PKG_REL_NS, REL_NS
            ),
        ));

        let sheet_entries: String = sheets
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                format!(
                    "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                    escape(name),
                    i + 1,
                    i + 1
                )
            })
            .collect();
        files.push((
            "xl/workbook.xml".to_string(),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <workbook xmlns=\"{}\" xmlns:r=\"{}\"><sheets>{}</sheets></workbook>",
                SHEET_NS, REL_NS, sheet_entries
            ),
        ));

        let relationships: String = (1..=sheets.len())
            .map(|n| {
                format!(
                    "<Relationship Id=\"rId{}\" Type=\"{}/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                    n, REL_NS, n
                )
            })
            .collect();
        files.push((
            "xl/_rels/workbook.xml.rels".to_string(),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <Relationships xmlns=\"{}\">{}</Relationships>",
                PKG_REL_NS, relationships
            ),
        ));

        for (i, (_, rows)) in sheets.iter().enumerate() {
            files.push((format!("xl/worksheets/sheet{}.xml", i + 1), worksheet_xml(rows)));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in &files {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("start xlsx part");
            writer.write_all(xml.as_bytes()).expect("write xlsx part");
        }
        writer.finish().expect("finish zip").into_inner()
    }

    fn worksheet_xml(rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .enumerate()
            .map(|(r, cells)| {
                let cells: String = cells
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(c, value)| {
                        let reference = format!("{}{}", column_name(c), r + 1);
                        if value.parse::<f64>().is_ok() {
                            format!("<c r=\"{}\"><v>{}</v></c>", reference, value)
                        } else {
                            format!(
                                "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                                reference,
                                escape(value)
                            )
                        }
                    })
                    .collect();
                format!("<row r=\"{}\">{}</row>", r + 1, cells)
            })
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <worksheet xmlns=\"{}\"><sheetData>{}</sheetData></worksheet>",
            SHEET_NS, body
        )
    }

    /// Zero-based column index to its letters (0 -> A, 27 -> AB)
    fn column_name(index: usize) -> String {
        let mut n = index + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12345.0), "12345");
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(-2.0), "-2");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("LUGAR".to_string())), Some("LUGAR".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&Data::Float(3.0)), Some("3".to_string()));
    }

    #[test]
    fn test_grid_keeps_absolute_coordinates() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("UNIDADES".to_string()));
        range.set_value((3, 2), Data::Float(4.0));
        let grid = grid_from_range(&range);
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.cell(2, 1), Some("UNIDADES"));
        assert_eq!(grid.cell(3, 2), Some("4"));
        assert_eq!(grid.cell(0, 0), None);
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(4), "E");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(27), "AB");
    }

    #[test]
    fn test_only_first_sheet_is_read() {
        let first: &[&[&str]] = &[&["LUGAR", "LP"], &["Puerta & Hall", "5"], &["", "", "4.5"]];
        let second: &[&[&str]] = &[&["NO LEER", "99"]];
        let bytes = xlsx_with_sheets(&[("Guardia", first), ("Otra", second)]);
        let grid = extract_first_sheet(&bytes).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(0, 0), Some("LUGAR"));
        assert_eq!(grid.cell(1, 0), Some("Puerta & Hall"));
        // numeric cells come back as numbers and render without ".0"
        assert_eq!(grid.cell(1, 1), Some("5"));
        assert_eq!(grid.cell(2, 2), Some("4.5"));
        assert_eq!(grid.cell(2, 0), None);
        assert!(grid.rows().flatten().flatten().all(|c| c.as_str() != "NO LEER"));
    }

    #[test]
    fn test_used_range_offset_keeps_fixed_cells() {
        // nothing in row 1 or column A: E4 must still be addressed as (3, 4)
        let rows: &[&[&str]] = &[&[], &[], &[], &["", "", "", "", "ESTACION IV 'Norte'"]];
        let bytes = xlsx_with_sheets(&[("Estado", rows)]);
        let grid = extract_first_sheet(&bytes).unwrap();
        assert_eq!(grid.cell(3, 4), Some("ESTACION IV 'Norte'"));
    }

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let result = extract_first_sheet(b"not a workbook at all");
        assert!(result.is_err());
    }
}
