use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    // Generic URI split: scheme, authority, path, query, fragment
    static ref URL_REGEX: Regex =
        Regex::new(r"^([^:/?#]+):(//([^/?#]*))?([^?#]*)(\?[^#]*)?(#.*)?$").unwrap();
    static ref SCHEME_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").unwrap();
}

const DOCUMENT_MARKER: &str = "docs.google.com/document";
const SPREADSHEET_MARKER: &str = "docs.google.com/spreadsheets";

/// Schemes that must carry a host to be considered a valid URL
const HOST_SCHEMES: [&str; 5] = ["http", "https", "ftp", "ws", "wss"];

/// Kind of Google file a URL points at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Google Docs document
    Document,

    /// Google Sheets spreadsheet
    Spreadsheet,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Document => "document",
            FileType::Spreadsheet => "spreadsheet",
        }
    }
}

/// File id and type pulled out of a Google Docs/Sheets URL
///
/// Serialized with the field names the processing service expects
/// (`fileId`, `fileType`), so it can be forwarded as-is in a request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub file_id: String,
    pub file_type: FileType,
}

impl FileReference {
    /// Source tag stored alongside a BRD generated from this file
    ///
    /// # Examples
    /// ```
    /// use brd_viewer::file_info::extract;
    ///
    /// let reference = extract("https://docs.google.com/document/d/ABC123/edit").unwrap();
    /// assert_eq!(reference.source_label(), "google_document_ABC123");
    /// ```
    pub fn source_label(&self) -> String {
        format!("google_{}_{}", self.file_type.as_str(), self.file_id)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileInfoError {
    #[error("Invalid Google file URL")]
    InvalidUrlFormat,

    #[error("Only Google Docs and Google Sheets URLs are supported")]
    UnsupportedHost,
}

/// Parse a Google Docs or Sheets URL into a file reference
///
/// The checks run in a fixed order: the string must be a syntactically valid
/// URL, it must point at `docs.google.com/document` or
/// `docs.google.com/spreadsheets`, and its path must contain a `d` segment
/// followed by a non-empty file id.
///
/// # Arguments
/// * `url` - Raw string as typed by the user
///
/// # Returns
/// * `Result<FileReference, FileInfoError>` - The reference or the reason it was rejected
///
/// # Examples
/// ```
/// use brd_viewer::file_info::{parse_file_url, FileInfoError, FileType};
///
/// let reference = parse_file_url("https://docs.google.com/spreadsheets/d/XYZ789/edit").unwrap();
/// assert_eq!(reference.file_id, "XYZ789");
/// assert_eq!(reference.file_type, FileType::Spreadsheet);
///
/// assert_eq!(parse_file_url("https://example.com/foo"), Err(FileInfoError::UnsupportedHost));
/// assert_eq!(parse_file_url("not a url"), Err(FileInfoError::InvalidUrlFormat));
/// ```
pub fn parse_file_url(url: &str) -> Result<FileReference, FileInfoError> {
    let path = url_path(url).ok_or(FileInfoError::InvalidUrlFormat)?;

    let file_type = if url.contains(DOCUMENT_MARKER) {
        FileType::Document
    } else if url.contains(SPREADSHEET_MARKER) {
        FileType::Spreadsheet
    } else {
        log::debug!("rejected non-Google URL: {}", url);
        return Err(FileInfoError::UnsupportedHost);
    };

    let segments: Vec<&str> = path.split('/').collect();
    let file_id = segments
        .iter()
        .position(|segment| *segment == "d")
        .and_then(|index| segments.get(index + 1))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            log::debug!("no file id in Google URL: {}", url);
            FileInfoError::InvalidUrlFormat
        })?;

    Ok(FileReference {
        file_id: file_id.to_string(),
        file_type,
    })
}

/// Extract the file reference from a URL, or `None` if it cannot be used
///
/// Same as [`parse_file_url`] with the error kind discarded, so callers can
/// show a single "try again" message.
pub fn extract(url: &str) -> Option<FileReference> {
    parse_file_url(url).ok()
}

// Returns the path component if the string is a well-formed absolute URL
fn url_path(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    let caps = URL_REGEX.captures(url)?;
    let scheme = caps.get(1)?.as_str();
    if !SCHEME_REGEX.is_match(scheme) {
        return None;
    }

    let host = caps
        .get(3)
        .map(|authority| host_of(authority.as_str()))
        .unwrap_or("");
    let scheme = scheme.to_ascii_lowercase();
    if HOST_SCHEMES.contains(&scheme.as_str()) && host.is_empty() {
        return None;
    }

    Some(caps.get(4).map(|m| m.as_str()).unwrap_or(""))
}

// Strips userinfo and port from an authority
fn host_of(authority: &str) -> &str {
    let host = authority.rsplit('@').next().unwrap_or(authority);
    if host.starts_with('[') {
        return host;
    }
    host.split(':').next().unwrap_or(host)
}
