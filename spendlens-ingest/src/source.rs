//! Input routing: decide how a statement file enters the pipeline.

use std::path::Path;

use crate::error::IngestError;

/// How an input file is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Plain text handled by the CSV normalizer.
    Csv,
    /// Binary document routed through the extraction call, tagged with
    /// the MIME type that call expects.
    Document(&'static str),
}

impl InputKind {
    /// Classify a file by extension. Unknown extensions are rejected
    /// before any bytes are read.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(InputKind::Csv),
            "pdf" => Ok(InputKind::Document("application/pdf")),
            "png" => Ok(InputKind::Document("image/png")),
            "jpg" | "jpeg" => Ok(InputKind::Document("image/jpeg")),
            "webp" => Ok(InputKind::Document("image/webp")),
            _ => Err(IngestError::UnsupportedFileType(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_text_extensions_are_csv() {
        assert_eq!(InputKind::from_path(&PathBuf::from("a.csv")).unwrap(), InputKind::Csv);
        assert_eq!(InputKind::from_path(&PathBuf::from("a.TXT")).unwrap(), InputKind::Csv);
    }

    #[test]
    fn test_documents_carry_mime_type() {
        assert_eq!(
            InputKind::from_path(&PathBuf::from("statement.pdf")).unwrap(),
            InputKind::Document("application/pdf")
        );
        assert_eq!(
            InputKind::from_path(&PathBuf::from("scan.JPEG")).unwrap(),
            InputKind::Document("image/jpeg")
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = InputKind::from_path(&PathBuf::from("data.xlsx")).unwrap_err();
        assert_eq!(err, IngestError::UnsupportedFileType("xlsx".to_string()));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        assert!(InputKind::from_path(&PathBuf::from("statement")).is_err());
    }
}
