use crate::document::DocumentNode;
use crate::render::{DisplayBlock, Renderer, format_key, scalar_text, to_html};
use chrono::{DateTime, NaiveDateTime};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PAGE_TEMPLATE_NAME: &str = "brd_page";
const EXECUTIVE_SUMMARY_KEY: &str = "executiveSummary";
const NO_SUMMARY: &str = "No executive summary provided.";
const UNKNOWN_SOURCE: &str = "Unknown";
const JSON_DATA_URI: &str = "data:application/json;charset=utf-8,";

/// A stored BRD as returned by `GET /api/brd/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrdRecord {
    /// Identifier assigned by the backend
    pub id: String,

    /// Generated document body
    #[serde(default)]
    pub brd: DocumentNode,

    /// ISO-8601 creation time
    #[serde(default)]
    pub created_at: String,

    /// Name of the uploaded file, for upload-sourced BRDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,

    /// `google_<type>_<id>` tag, for Drive-sourced BRDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_source: Option<String>,
}

/// One collapsible section of the BRD page
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub blocks: Vec<DisplayBlock>,
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Invalid page template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Failed to serialize BRD: {0}")]
    Export(#[from] serde_json::Error),
}

impl BrdRecord {
    /// Parse a stored record as the backend returns it
    ///
    /// Only `id` is required; a missing `brd` becomes null and a missing
    /// `created_at` an empty string.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Where the BRD came from: file name, then source tag, then "Unknown"
    pub fn source_label(&self) -> &str {
        self.original_filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.original_source
                    .as_deref()
                    .filter(|source| !source.is_empty())
            })
            .unwrap_or(UNKNOWN_SOURCE)
    }

    /// Text shown under the "Executive Summary" heading
    ///
    /// # Returns
    /// The `executiveSummary` value when it is non-empty text, a non-zero
    /// number or `true`. Anything else (missing, null, `""`, `0`, `false`, or a
    /// mapping or sequence) gives "No executive summary provided."
    pub fn executive_summary(&self) -> String {
        match self.brd.get(EXECUTIVE_SUMMARY_KEY) {
            Some(DocumentNode::Text(text)) if !text.is_empty() => text.clone(),
            Some(number @ DocumentNode::Number(n)) if n.as_f64() != Some(0.0) => {
                scalar_text(number)
            }
            Some(DocumentNode::Bool(true)) => true.to_string(),
            _ => NO_SUMMARY.to_string(),
        }
    }

    /// Every top-level entry except the executive summary, in document order
    ///
    /// Entries with blank values still produce a section; only their body is
    /// empty.
    pub fn sections(&self, renderer: &Renderer) -> Vec<Section> {
        match &self.brd {
            DocumentNode::Map(entries) => entries
                .iter()
                .filter(|(key, _)| key != EXECUTIVE_SUMMARY_KEY)
                .map(|(key, value)| Section {
                    key: key.clone(),
                    title: format_key(key),
                    blocks: renderer.render(value),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Creation time as `M/D/YYYY, h:mm:ss AM`, or the raw value if unparsable
    pub fn created_display(&self) -> String {
        let raw = self.created_at.trim();
        let parsed = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"));

        match parsed {
            Ok(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }

    /// File name offered for the JSON download, `BRD_<id>.json`
    pub fn download_filename(&self) -> String {
        format!("BRD_{}.json", self.id)
    }

    /// The BRD body as pretty JSON, two-space indent
    pub fn export_json(&self) -> Result<String, ViewError> {
        Ok(serde_json::to_string_pretty(&self.brd)?)
    }

    /// Link target for the page's Download button
    ///
    /// # Returns
    /// A `data:application/json` URI holding [`BrdRecord::export_json`],
    /// percent-encoded, so the browser saves the BRD body itself
    ///
    /// # Examples
    /// ```
    /// use brd_viewer::view::BrdRecord;
    ///
    /// let record = BrdRecord::from_json_str(r#"{"id": "1", "brd": {"a": 1}}"#).unwrap();
    /// assert_eq!(
    ///     record.download_href().unwrap(),
    ///     "data:application/json;charset=utf-8,%7B%0A%20%20%22a%22%3A%201%0A%7D"
    /// );
    /// ```
    pub fn download_href(&self) -> Result<String, ViewError> {
        let body = self.export_json()?;
        Ok(format!("{}{}", JSON_DATA_URI, urlencoding::encode(&body)))
    }
}

#[derive(Serialize)]
struct SectionContext {
    title: String,
    body: String,
}

#[derive(Serialize)]
struct PageContext {
    id: String,
    download_filename: String,
    download_href: String,
    executive_summary: String,
    sections: Vec<SectionContext>,
    created: String,
    source: String,
}

/// Renders full BRD pages from the bundled template
pub struct PageRenderer {
    registry: Handlebars<'static>,
    renderer: Renderer,
}

impl PageRenderer {
    /// Compile the bundled page template
    ///
    /// # Arguments
    /// * `renderer` - Renderer used for each section body
    ///
    /// # Returns
    /// * `Result<Self, ViewError>` - The page renderer, or the template error
    pub fn new(renderer: Renderer) -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(PAGE_TEMPLATE_NAME, include_str!("./static/brd_page.hbs"))
            .map_err(Box::new)?;

        Ok(PageRenderer { registry, renderer })
    }

    /// Render one record as a complete HTML page
    pub fn render(&self, record: &BrdRecord) -> Result<String, ViewError> {
        let context = PageContext {
            id: record.id.clone(),
            download_filename: record.download_filename(),
            download_href: record.download_href()?,
            executive_summary: record.executive_summary(),
            sections: record
                .sections(&self.renderer)
                .into_iter()
                .map(|section| SectionContext {
                    title: section.title,
                    body: to_html(&section.blocks),
                })
                .collect(),
            created: record.created_display(),
            source: record.source_label().to_string(),
        };

        log::debug!("rendering BRD page {}", record.id);
        Ok(self.registry.render(PAGE_TEMPLATE_NAME, &context)?)
    }
}

/// Render a BRD page with the default renderer
///
/// # Examples
/// ```
/// use brd_viewer::view::{BrdRecord, render_page};
///
/// let record = BrdRecord::from_json_str(
///     r#"{"id": "42", "brd": {"executiveSummary": "Automate invoicing"}, "created_at": ""}"#,
/// ).unwrap();
/// let html = render_page(&record).unwrap();
/// assert!(html.contains("Automate invoicing"));
/// assert!(html.contains("Source: Unknown"));
/// ```
pub fn render_page(record: &BrdRecord) -> Result<String, ViewError> {
    PageRenderer::new(Renderer::new())?.render(record)
}
