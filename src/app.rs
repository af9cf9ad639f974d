#![cfg(not(tarpaulin_include))]
#![cfg(feature = "web")]

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::config::Config;
use crate::document::DocumentNode;
use crate::file_info::{FileInfoError, FileReference, parse_file_url};
use crate::render::{DisplayBlock, Renderer};
use crate::upload::{UploadCheck, UploadError, validate_upload};
use crate::view::{BrdRecord, PageRenderer, ViewError};

pub struct AppState {
    renderer: Renderer,
    pages: PageRenderer,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ViewError> {
        let renderer = Renderer::with_max_depth(config.max_depth);
        Ok(AppState {
            renderer,
            pages: PageRenderer::new(renderer)?,
        })
    }
}

#[derive(Deserialize)]
struct FileInfoRequest {
    url: String,
}

#[derive(Deserialize)]
struct UploadCheckRequest {
    #[serde(default)]
    filename: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    FileInfo(#[from] FileInfoError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::FileInfo(FileInfoError::InvalidUrlFormat) => {
                (StatusCode::BAD_REQUEST, "invalid_url_format")
            }
            AppError::FileInfo(FileInfoError::UnsupportedHost) => {
                (StatusCode::BAD_REQUEST, "unsupported_host")
            }
            AppError::Upload(UploadError::NoFileSelected) => {
                (StatusCode::BAD_REQUEST, "no_file_selected")
            }
            AppError::Upload(UploadError::UnsupportedType(_)) => {
                (StatusCode::BAD_REQUEST, "unsupported_type")
            }
            AppError::View(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        if status.is_server_error() {
            log::error!("{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            kind,
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router over a prepared state
pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/file-info", post(file_info))
        .route("/api/upload/check", post(check_upload))
        .route("/api/render", post(render_document))
        .route("/api/brd/view", post(view_brd))
        .route("/api/brd/download", post(download_brd))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&config)?);
    let app = router(state, &config.static_dir);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn file_info(Json(payload): Json<FileInfoRequest>) -> Result<Json<FileReference>, AppError> {
    let reference = parse_file_url(&payload.url)?;
    log::info!(
        "resolved {} {}",
        reference.file_type.as_str(),
        reference.file_id
    );
    Ok(Json(reference))
}

async fn check_upload(
    Json(payload): Json<UploadCheckRequest>,
) -> Result<Json<UploadCheck>, AppError> {
    let kind = validate_upload(&payload.filename)?;
    log::debug!("accepted upload {} as {}", payload.filename, kind.extension());
    Ok(Json(UploadCheck::from(kind)))
}

async fn render_document(
    State(state): State<Arc<AppState>>,
    Json(node): Json<DocumentNode>,
) -> Json<Vec<DisplayBlock>> {
    Json(state.renderer.render(&node))
}

async fn view_brd(
    State(state): State<Arc<AppState>>,
    Json(record): Json<BrdRecord>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(&record)?))
}

async fn download_brd(Json(record): Json<BrdRecord>) -> Result<Response, AppError> {
    let body = record.export_json()?;
    let disposition = format!("attachment; filename=\"{}\"", record.download_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
