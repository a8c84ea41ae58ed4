//! HTTP API over the cached snapshot.
//!
//! | Route | |
//! |-------|--|
//! | `GET /healthz` | liveness |
//! | `GET /api/ledger?q=` | ledger columns and matching rows |
//! | `GET /api/status?date=&member=` | status records; `member` is comma-separated |
//! | `GET /api/dates` | section dates, newest first |
//! | `GET /api/members` | distinct members |
//! | `GET /api/vocabulary` | suggestion lists for editable fields |
//! | `GET /api/diagnostics` | load and row diagnostics of the current snapshot |
//! | `POST /api/status/export?format=` | posted records as a CSV/JSONL download |
//! | `POST /api/refresh` | drop the cache and reload |
//!
//! Workbook loads run on the blocking pool.

use crate::store::SnapshotStore;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use statusboard_core::config::Vocabulary;
use statusboard_core::export::{self, ExportFormat};
use statusboard_core::search::StatusFilter;
use statusboard_core::{DailyStatusRecord, LedgerRow, LoadDiagnostic, RowDiagnostic, Snapshot};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SnapshotStore>>,
    vocabulary: Arc<Vocabulary>,
}

impl AppState {
    pub fn new(store: SnapshotStore, vocabulary: Vocabulary) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            vocabulary: Arc::new(vocabulary),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/ledger", get(ledger))
        .route("/api/status", get(status))
        .route("/api/dates", get(dates))
        .route("/api/members", get(members))
        .route("/api/vocabulary", get(vocabulary))
        .route("/api/diagnostics", get(diagnostics))
        .route("/api/status/export", post(export_status))
        .route("/api/refresh", post(refresh))
        .with_state(state)
}

/// Serve the API on `bind` until the process is stopped.
pub async fn run(bind: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "statusboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

async fn current_snapshot(state: &AppState, refresh: bool) -> Result<Arc<Snapshot>, ApiError> {
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || -> Result<Arc<Snapshot>, ApiError> {
        let mut store = store
            .lock()
            .map_err(|_| ApiError::internal("snapshot store lock poisoned"))?;
        Ok(if refresh { store.refresh() } else { store.get() })
    })
    .await
    .map_err(|e| ApiError::internal(format!("workbook load task failed: {e}")))?
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Debug, Default, Deserialize)]
struct LedgerQuery {
    q: Option<String>,
}

#[derive(Serialize)]
struct LedgerBody<'a> {
    columns: &'a [String],
    rows: Vec<&'a LedgerRow>,
}

async fn ledger(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Response, ApiError> {
    let snapshot = current_snapshot(&state, false).await?;
    let body = LedgerBody {
        columns: &snapshot.ledger.columns,
        rows: snapshot.ledger.search(query.q.as_deref().unwrap_or("")),
    };
    Ok(Json(body).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct StatusQuery {
    date: Option<String>,
    member: Option<String>,
}

impl StatusQuery {
    fn filter(&self) -> Result<StatusFilter, ApiError> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map_err(|_| ApiError::bad_request(format!("invalid date {text:?}, expected YYYY-MM-DD")))?,
            ),
        };
        let members = self
            .member
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        Ok(StatusFilter { date, members })
    }
}

async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Response, ApiError> {
    let filter = query.filter()?;
    let snapshot = current_snapshot(&state, false).await?;
    Ok(Json(snapshot.status.filter(&filter)).into_response())
}

async fn dates(State(state): State<AppState>) -> Result<Json<Vec<NaiveDate>>, ApiError> {
    let snapshot = current_snapshot(&state, false).await?;
    Ok(Json(snapshot.status.dates_desc()))
}

async fn members(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let snapshot = current_snapshot(&state, false).await?;
    Ok(Json(snapshot.status.members()))
}

async fn vocabulary(State(state): State<AppState>) -> Json<Vocabulary> {
    Json(state.vocabulary.as_ref().clone())
}

#[derive(Serialize)]
struct DiagnosticsBody<'a> {
    loaded_at: DateTime<Utc>,
    diagnostics: &'a [LoadDiagnostic],
    skipped_rows: &'a [RowDiagnostic],
}

fn diagnostics_body(snapshot: &Snapshot) -> DiagnosticsBody<'_> {
    DiagnosticsBody {
        loaded_at: snapshot.loaded_at,
        diagnostics: &snapshot.diagnostics,
        skipped_rows: &snapshot.skipped_rows,
    }
}

async fn diagnostics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = current_snapshot(&state, false).await?;
    Ok(Json(diagnostics_body(&snapshot)).into_response())
}

async fn refresh(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = current_snapshot(&state, true).await?;
    tracing::info!(
        ledger_rows = snapshot.ledger.len(),
        status_records = snapshot.status.len(),
        "snapshot refreshed"
    );
    Ok(Json(diagnostics_body(&snapshot)).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

async fn export_status(
    Query(query): Query<ExportQuery>,
    Json(records): Json<Vec<DailyStatusRecord>>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(text) => text.parse().map_err(ApiError::bad_request)?,
    };
    let body = export::status_to_string(&records, format)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let disposition = format!("attachment; filename=\"daily_status.{}\"", format.extension());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
