use crate::ingest::{self, ParseError};
use crate::models::{DisplayOrder, SharePrice};
use crate::query;
use crate::server::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

// ── Read path errors ──────────────────────────────────────────────────────────

/// Everything that can go wrong serving a read request. All variants are
/// recovered into a 400 with a human-readable body; none are fatal.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("No data found. Please upload a data file.")]
    NoData,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0:#}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        warn!("Read request rejected: {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

// ── Upload path errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Malformed multipart body: {0}")]
    Body(#[from] MultipartError),

    #[error("Failed to store uploaded file")]
    Storage(#[source] anyhow::Error),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::Body(e) => {
                warn!("Upload rejected: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            UploadError::Storage(e) => {
                error!("Upload failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store uploaded file").into_response()
            }
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ShareDataParams {
    #[serde(rename = "displayOrder")]
    display_order: Option<String>,
}

/// GET /sharedata?displayOrder={none|mostExpensive|leastExpensive}
///
/// Reads the stored CSV, runs the minimum-data checks, then sorts/filters
/// per the requested display order.
pub async fn get_share_data(
    State(state): State<AppState>,
    Query(params): Query<ShareDataParams>,
) -> Result<Json<Vec<SharePrice>>, ReadError> {
    let raw = state.store.read().await?.ok_or(ReadError::NoData)?;

    let records = ingest::parse_share_data(&raw)?;

    let check = ingest::check_minimum_requirements(&records);
    if !check.passed {
        return Err(ReadError::Validation(check.comments));
    }

    let order = params
        .display_order
        .as_deref()
        .map(DisplayOrder::parse)
        .unwrap_or_default();

    debug!("Serving {} records, order {:?}", records.len(), order);
    Ok(Json(query::apply_display_order(records, order)))
}

/// POST /sharedata — multipart upload, field name `file`.
///
/// Replaces the stored CSV wholly. Zero-length files are ignored without
/// an error, so an accidental empty upload cannot wipe existing data.
pub async fn upload_share_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let data = field.bytes().await?;
        if data.is_empty() {
            info!("Ignoring zero-length upload");
            continue;
        }

        state
            .store
            .write(&data)
            .await
            .map_err(UploadError::Storage)?;
        info!("Upload accepted ({} bytes)", data.len());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET / — the self-contained upload-and-view page.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
