use serde::Serialize;
use thiserror::Error;

/// File formats accepted by the upload form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Pdf,
    Text,
    Doc,
    Docx,
    Xls,
    Xlsx,
    Csv,
}

pub const SUPPORTED_KINDS: [UploadKind; 7] = [
    UploadKind::Pdf,
    UploadKind::Text,
    UploadKind::Doc,
    UploadKind::Docx,
    UploadKind::Xls,
    UploadKind::Xlsx,
    UploadKind::Csv,
];

impl UploadKind {
    /// Extension without the dot, lowercase
    pub fn extension(&self) -> &'static str {
        match self {
            UploadKind::Pdf => "pdf",
            UploadKind::Text => "txt",
            UploadKind::Doc => "doc",
            UploadKind::Docx => "docx",
            UploadKind::Xls => "xls",
            UploadKind::Xlsx => "xlsx",
            UploadKind::Csv => "csv",
        }
    }

    /// MIME type the upload form lists for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            UploadKind::Pdf => "application/pdf",
            UploadKind::Text => "text/plain",
            UploadKind::Doc => "application/msword",
            UploadKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            UploadKind::Xls => "application/vnd.ms-excel",
            UploadKind::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            UploadKind::Csv => "text/csv",
        }
    }

    /// Case-insensitive lookup by extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        SUPPORTED_KINDS
            .iter()
            .copied()
            .find(|kind| kind.extension() == ext)
    }
}

/// Result of a successful check, as printed by the CLI and returned over HTTP
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCheck {
    pub kind: UploadKind,
    pub extension: &'static str,
    pub mime_type: &'static str,
}

impl From<UploadKind> for UploadCheck {
    fn from(kind: UploadKind) -> Self {
        UploadCheck {
            kind,
            extension: kind.extension(),
            mime_type: kind.mime_type(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select a file to upload")]
    NoFileSelected,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

/// Check a selected file name against the accepted formats
///
/// The extension is whatever follows the last `.`, so a bare `.pdf` counts as
/// a PDF while `README` and `notes.` are rejected.
///
/// # Arguments
/// * `filename` - Name of the selected file; surrounding whitespace is ignored
///
/// # Returns
/// * `Result<UploadKind, UploadError>` - The matched format, or why the name
///   was refused
///
/// # Examples
/// ```
/// use brd_viewer::upload::{validate_upload, UploadError, UploadKind};
///
/// assert_eq!(validate_upload("Requirements.DOCX"), Ok(UploadKind::Docx));
/// assert_eq!(validate_upload(""), Err(UploadError::NoFileSelected));
/// assert!(validate_upload("slides.pptx").is_err());
/// ```
pub fn validate_upload(filename: &str) -> Result<UploadKind, UploadError> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(UploadError::NoFileSelected);
    }

    filename
        .rsplit_once('.')
        .and_then(|(_, ext)| UploadKind::from_extension(ext))
        .ok_or_else(|| UploadError::UnsupportedType(filename.to_string()))
}

/// Human-readable list for the upload form, e.g. "PDF, TXT, DOC"
pub fn supported_formats_label() -> String {
    SUPPORTED_KINDS
        .iter()
        .map(|kind| kind.extension().to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}
