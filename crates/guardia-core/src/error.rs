use thiserror::Error;

/// The document bytes could not be decoded as the declared kind.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Unreadable spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook has no sheets")]
    NoSheets,
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Word documents cannot be imported as a unit report: {0}")]
    WordNotSupported(String),

    #[error("File unreadable: {0}")]
    Decode(#[from] DecodeError),
}

impl ImportError {
    /// Short message suitable for the file-picker prompt
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFile(_) | ImportError::WordNotSupported(_) => {
                "Tipo de archivo no soportado"
            }
            ImportError::Decode(_) => "No se pudo leer el archivo",
        }
    }
}
