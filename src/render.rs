use crate::document::DocumentNode;
use handlebars::html_escape;
use serde::Serialize;

/// Nesting level at which the renderer stops descending
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// One labelled piece of display content
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayBlock {
    /// Humanized key, see [`format_key`]
    pub label: String,

    pub content: BlockContent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum BlockContent {
    /// Scalar shown as a paragraph
    Text(String),

    /// Mapping shown as an indented sub-tree
    Section(Vec<DisplayBlock>),

    /// Sequence shown as a bulleted list
    List(Vec<ListItem>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ListItem {
    Text(String),

    /// Mapping (or nested sequence) expanded in place
    Blocks(Vec<DisplayBlock>),
}

/// Turns a [`DocumentNode`] into display blocks
///
/// Keys keep their original order, and keys whose value is null, `""` or
/// `[]` are left out. The input is never modified, so rendering the same node
/// twice gives the same output.
///
/// # Examples
/// ```
/// use brd_viewer::document::DocumentNode;
/// use brd_viewer::render::{BlockContent, Renderer};
///
/// let node = DocumentNode::from_json_str(
///     r#"{"executiveSummary": "x", "teamSize": null, "goals": []}"#,
/// ).unwrap();
///
/// let blocks = Renderer::new().render(&node);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].label, "Executive Summary");
/// assert_eq!(blocks[0].content, BlockContent::Text("x".to_string()));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that stops at `max_depth` nesting levels (at least 1)
    ///
    /// Anything below the limit is shown as compact JSON text instead of
    /// being expanded.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn render(&self, node: &DocumentNode) -> Vec<DisplayBlock> {
        if node.is_blank() {
            return Vec::new();
        }

        match node {
            DocumentNode::Map(_) | DocumentNode::List(_) => self.render_children(node, 0),
            scalar => vec![DisplayBlock {
                label: String::new(),
                content: BlockContent::Text(scalar_text(scalar)),
            }],
        }
    }

    // Entries of a mapping, or elements of a sequence keyed by index
    fn render_children(&self, node: &DocumentNode, depth: usize) -> Vec<DisplayBlock> {
        match node {
            DocumentNode::Map(entries) => entries
                .iter()
                .filter_map(|(key, value)| self.render_entry(key, value, depth))
                .collect(),
            DocumentNode::List(items) => items
                .iter()
                .enumerate()
                .filter_map(|(index, value)| self.render_entry(&index.to_string(), value, depth))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn render_entry(&self, key: &str, value: &DocumentNode, depth: usize) -> Option<DisplayBlock> {
        if value.is_blank() {
            return None;
        }

        let content = match value {
            DocumentNode::Map(_) => match self.descend(value, depth + 1) {
                Some(blocks) => BlockContent::Section(blocks),
                None => BlockContent::Text(compact_json(value)),
            },
            DocumentNode::List(items) => {
                if depth + 1 >= self.max_depth {
                    log::warn!("render depth limit {} reached at {:?}", self.max_depth, key);
                    BlockContent::Text(compact_json(value))
                } else {
                    BlockContent::List(
                        items
                            .iter()
                            .map(|item| self.render_item(item, depth + 1))
                            .collect(),
                    )
                }
            }
            scalar => BlockContent::Text(scalar_text(scalar)),
        };

        Some(DisplayBlock {
            label: format_key(key),
            content,
        })
    }

    fn render_item(&self, item: &DocumentNode, depth: usize) -> ListItem {
        match item {
            DocumentNode::Map(_) | DocumentNode::List(_) => match self.descend(item, depth + 1) {
                Some(blocks) => ListItem::Blocks(blocks),
                None => ListItem::Text(compact_json(item)),
            },
            other => ListItem::Text(scalar_text(other)),
        }
    }

    fn descend(&self, node: &DocumentNode, depth: usize) -> Option<Vec<DisplayBlock>> {
        if depth >= self.max_depth {
            log::warn!("render depth limit {} reached", self.max_depth);
            return None;
        }
        Some(self.render_children(node, depth))
    }
}

/// Render with the default depth limit
pub fn render(node: &DocumentNode) -> Vec<DisplayBlock> {
    Renderer::new().render(node)
}

/// Humanize a camelCase/PascalCase key
///
/// Puts a space before every uppercase ASCII letter that is not the first
/// character, then uppercases the first character.
///
/// # Examples
/// ```
/// use brd_viewer::render::format_key;
///
/// assert_eq!(format_key("executiveSummary"), "Executive Summary");
/// assert_eq!(format_key("projectScope"), "Project Scope");
/// assert_eq!(format_key("ID"), "I D");
/// ```
pub fn format_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display string of a scalar value
///
/// Numbers print the way a browser shows them: integral floats without a
/// fraction (`3.0` shows as `3`), and exponent form below `1e-6` or from
/// `1e21` up (`1e+300`, `1.5e-7`). Null shows as an empty string.
pub fn scalar_text(node: &DocumentNode) -> String {
    match node {
        DocumentNode::Null => String::new(),
        DocumentNode::Bool(flag) => flag.to_string(),
        DocumentNode::Text(text) => text.clone(),
        DocumentNode::Number(number) if number.is_f64() => match number.as_f64() {
            Some(f) => float_text(f),
            None => number.to_string(),
        },
        DocumentNode::Number(number) => number.to_string(),
        nested => compact_json(nested),
    }
}

/// Shortest round-trip form, switching to `1e+21` style outside [1e-6, 1e21)
fn float_text(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 {
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", f);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

fn compact_json(node: &DocumentNode) -> String {
    node.to_json().to_string()
}

/// Plain-text outline, two spaces of indent per level
pub fn to_outline(blocks: &[DisplayBlock]) -> String {
    let mut out = String::new();
    write_outline(blocks, 0, &mut out);
    out
}

fn write_outline(blocks: &[DisplayBlock], indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for block in blocks {
        match &block.content {
            BlockContent::Text(text) => {
                out.push_str(&pad);
                if !block.label.is_empty() {
                    out.push_str(&block.label);
                    out.push_str(": ");
                }
                push_lines(text, &format!("{}  ", pad), out);
            }
            BlockContent::Section(children) => {
                out.push_str(&format!("{}{}:\n", pad, block.label));
                write_outline(children, indent + 1, out);
            }
            BlockContent::List(items) => {
                out.push_str(&format!("{}{}:\n", pad, block.label));
                for item in items {
                    match item {
                        ListItem::Text(text) => {
                            out.push_str(&format!("{}  - ", pad));
                            push_lines(text, &format!("{}    ", pad), out);
                        }
                        ListItem::Blocks(children) => {
                            out.push_str(&format!("{}  -\n", pad));
                            write_outline(children, indent + 2, out);
                        }
                    }
                }
            }
        }
    }
}

// Continuation lines of multi-line text get the hanging indent
fn push_lines(text: &str, hanging: &str, out: &mut String) {
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push_str(hanging);
        }
        out.push_str(line);
        out.push('\n');
    }
    if text.lines().next().is_none() {
        out.push('\n');
    }
}

/// Nested HTML markup for the blocks, all text escaped
pub fn to_html(blocks: &[DisplayBlock]) -> String {
    let mut out = String::new();
    write_html(blocks, &mut out);
    out
}

fn write_html(blocks: &[DisplayBlock], out: &mut String) {
    for block in blocks {
        out.push_str("<div class=\"brd-block\">");
        if !block.label.is_empty() {
            out.push_str(&format!(
                "<h4 class=\"brd-label\">{}</h4>",
                html_escape(&block.label)
            ));
        }
        match &block.content {
            BlockContent::Text(text) => {
                out.push_str(&format!("<p class=\"brd-text\">{}</p>", html_escape(text)));
            }
            BlockContent::Section(children) => {
                out.push_str("<div class=\"brd-section\">");
                write_html(children, out);
                out.push_str("</div>");
            }
            BlockContent::List(items) => {
                out.push_str("<ul class=\"brd-list\">");
                for item in items {
                    out.push_str("<li>");
                    match item {
                        ListItem::Text(text) => out.push_str(&html_escape(text)),
                        ListItem::Blocks(children) => write_html(children, out),
                    }
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
        }
        out.push_str("</div>");
    }
}
