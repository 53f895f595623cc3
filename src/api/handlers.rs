//! HTTP request handlers for the Member Import Engine API.

use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use chrono::Utc;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ImportError, ImportResult};
use crate::export::{ExportFilter, render_csv};
use crate::import::{self, ImportEvent};
use crate::models::{MemberCategory, MembershipStatus, RenewalStatus};

use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().max_upload_bytes;
    Router::new()
        .route("/import/validate", post(validate_handler))
        .route("/import/execute", post(execute_handler))
        .route("/export/csv", get(export_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Reads the uploaded file out of the multipart body as UTF-8 text.
async fn read_upload(mut multipart: Multipart, limit: usize) -> ImportResult<String> {
    let mut data = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ImportError::invalid_upload(format!("Invalid multipart request: {e}"))
    })? {
        let name = field.name().map(str::to_string);
        if matches!(name.as_deref(), Some("file") | Some("") | None) {
            let bytes = field.bytes().await.map_err(|e| {
                ImportError::invalid_upload(format!("Failed to read upload: {e}"))
            })?;
            data = Some(bytes);
            break;
        }
    }

    let bytes =
        data.ok_or_else(|| ImportError::invalid_upload("No 'file' field found in upload"))?;

    if bytes.is_empty() {
        return Err(ImportError::EmptyUpload);
    }
    if bytes.len() > limit {
        return Err(ImportError::UploadTooLarge {
            size: bytes.len(),
            limit,
        });
    }

    String::from_utf8(bytes.to_vec()).map_err(|_| ImportError::InvalidEncoding)
}

/// Handler for POST /import/validate.
///
/// Parses and validates the uploaded file without persisting anything and
/// returns the full report.
async fn validate_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "processing validate request");

    let content = match read_upload(multipart, state.config().max_upload_bytes).await {
        Ok(content) => content,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "validate request rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match import::validate(state.store().as_ref(), state.config(), &content).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                total_rows = report.total_rows,
                valid = report.valid_count,
                errors = report.error_count,
                "validate request completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "validate request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn to_sse_event(event: &ImportEvent) -> Event {
    Event::default()
        .event(event.name())
        .json_data(event)
        .unwrap_or_else(|_| Event::default().comment("serialization error"))
}

/// Handler for POST /import/execute.
///
/// Re-validates the uploaded file and, when it is clean, persists accepted
/// rows in batches while streaming `progress` events, ending with a single
/// `complete` (or `error`) event. Structural upload failures are rejected
/// with a plain HTTP error before the stream starts.
async fn execute_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "processing execute request");

    let content = match read_upload(multipart, state.config().max_upload_bytes).await {
        Ok(content) => content,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "execute request rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match import::execute(state.store().clone(), state.config(), &content).await {
        Ok(events) => {
            let stream = events.map(|event| Ok::<Event, Infallible>(to_sse_event(&event)));
            Sse::new(stream)
                .keep_alive(KeepAlive::default())
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "execute request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Query parameters for the export endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportQuery {
    search: Option<String>,
    status: Option<String>,
    category: Option<String>,
    renewal_status: Option<String>,
}

fn parse_enum_filter<T>(
    field: &str,
    value: Option<String>,
    expected: &str,
    lookup: impl Fn(&str) -> Option<T>,
) -> ImportResult<Option<T>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            lookup(raw.trim())
                .map(Some)
                .ok_or_else(|| ImportError::InvalidFilter {
                    field: field.to_string(),
                    value: raw,
                    expected: expected.to_string(),
                })
        }
        _ => Ok(None),
    }
}

fn parse_export_filter(query: ExportQuery) -> ImportResult<ExportFilter> {
    Ok(ExportFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        status: parse_enum_filter(
            "status",
            query.status,
            MembershipStatus::EXPECTED,
            MembershipStatus::from_name,
        )?,
        category: parse_enum_filter(
            "category",
            query.category,
            MemberCategory::EXPECTED,
            MemberCategory::from_name,
        )?,
        renewal_status: parse_enum_filter(
            "renewalStatus",
            query.renewal_status,
            RenewalStatus::EXPECTED,
            RenewalStatus::from_name,
        )?,
    })
}

/// Handler for GET /export/csv.
///
/// Renders the filtered members as a CSV download.
async fn export_handler(State(state): State<AppState>, Query(query): Query<ExportQuery>) -> Response {
    let filter = match parse_export_filter(query) {
        Ok(filter) => filter,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    match state.store().members_with_latest_membership().await {
        Ok(rows) => {
            let csv = render_csv(&rows, &filter);
            let filename = format!("members-export-{}.csv", Utc::now().format("%Y%m%d-%H%M%S"));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "export request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
