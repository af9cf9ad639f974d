/*!
# BRD Viewer

Client-side core of the Business Requirements Document (BRD) generator, built in Rust.

## Overview

Users upload a document or point at a Google Doc/Sheet; a separate backend service
analyzes it and returns a generated BRD as JSON. This crate holds the logic the viewer
needs on its side of that exchange: turning a pasted Google URL into the file id and type
the backend expects, and turning an arbitrary BRD JSON body into labelled display content.

## Architecture

### Core (always built)
- **file_info**: Google Docs/Sheets URL → `FileReference { fileId, fileType }`
- **document**: `DocumentNode`, an order-preserving JSON value model
- **render**: recursive BRD renderer producing `DisplayBlock` trees, plus text and HTML output
- **view**: the BRD page (executive summary, one section per top-level key, metadata footer)
- **upload**: accepted upload formats and file-name validation
- **config**: environment-driven settings

### Web layer (`web` feature)
- **app**: axum router exposing the core over HTTP

## REST API Endpoints (`web` feature)

- `POST /api/file-info` - Resolves a Google URL to `{fileId, fileType}`
- `POST /api/upload/check` - Checks a file name against the accepted upload formats
- `POST /api/render` - Renders a BRD body to display blocks
- `POST /api/brd/view` - Renders a stored BRD record as an HTML page
- `POST /api/brd/download` - Returns the BRD body as `BRD_<id>.json`
- `GET /health` - Liveness check
*/

pub mod app;
pub mod config;
pub mod document;
pub mod file_info;
pub mod render;
pub mod upload;
pub mod view;

pub use document::DocumentNode;
pub use file_info::{FileInfoError, FileReference, FileType, extract, parse_file_url};
pub use render::{BlockContent, DisplayBlock, ListItem, Renderer, format_key, render};
pub use view::{BrdRecord, PageRenderer, render_page};
