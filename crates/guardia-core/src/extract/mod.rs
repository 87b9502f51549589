//! Document text/table extraction.
//!
//! Word documents become an ordered list of text lines; spreadsheets become
//! a [`CellGrid`](crate::grid::CellGrid) of their first sheet. The file
//! extension selects the branch.

pub mod docx;
pub mod sheet;

pub use docx::extract_lines;
pub use sheet::extract_first_sheet;

/// Kind of document, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Word,
    Spreadsheet,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "docx" => Some(DocumentKind::Word),
            "xlsx" | "xls" | "ods" => Some(DocumentKind::Spreadsheet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("guardia.docx"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_filename("Guardia 12-05.DOCX"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_filename("estado.xlsx"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_filename("estado.xls"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_filename("estado.ods"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_filename("notas.doc"), None);
        assert_eq!(DocumentKind::from_filename("sin_extension"), None);
    }
}
