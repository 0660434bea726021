//! Request handlers and their JSON bodies.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use factcheck_types::{Report, VerdictResult, VerdictSource};

use crate::error::RpcError;
use crate::server::RpcState;

pub const MISSING_VERIFY_TEXT: &str = "Missing `text` in body";
pub const MISSING_REPORT_TEXT: &str = "Missing `text`";

// ── Bodies ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyRequest {
    pub text: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportRequest {
    pub text: Option<String>,
    pub source_url: Option<String>,
    pub reporter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub ok: bool,
    pub item: Report,
}

#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decode a JSON body, treating an empty body as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, RpcError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| RpcError::InvalidBody(e.to_string()))
}

fn required_text(text: Option<String>, message: &str) -> Result<String, RpcError> {
    text.filter(|t| !t.is_empty())
        .ok_or_else(|| RpcError::InvalidRequest(message.to_string()))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /api/verify`
pub async fn verify(
    State(state): State<Arc<RpcState>>,
    body: Bytes,
) -> Result<Json<VerdictResult>, RpcError> {
    let request: VerifyRequest = parse_body(&body)?;
    let text = required_text(request.text, MISSING_VERIFY_TEXT)?;

    let started = Instant::now();
    state.metrics.verify_requests.inc();

    let outcome = state
        .verifier
        .verify(&text, request.source_url.as_deref())
        .await;

    if outcome.provider_error.is_some() {
        state.metrics.provider_failures.inc();
    }
    match outcome.result.source() {
        VerdictSource::ExternalProvider => state.metrics.verify_provider.inc(),
        VerdictSource::Heuristic => state.metrics.verify_heuristic.inc(),
    }
    state
        .metrics
        .verify_duration_ms
        .observe(started.elapsed().as_secs_f64() * 1000.0);
    debug!(source = %outcome.result.source(), "verify answered");

    Ok(Json(outcome.result))
}

/// `POST /api/report`
pub async fn submit_report(
    State(state): State<Arc<RpcState>>,
    body: Bytes,
) -> Result<Json<ReportResponse>, RpcError> {
    let request: ReportRequest = parse_body(&body)?;
    let text = required_text(request.text, MISSING_REPORT_TEXT)?;

    let report = Report::new(text, request.source_url, request.reporter, state.clock.now());

    // The file backend rewrites the whole store; keep that off the async workers.
    let store = Arc::clone(&state.store);
    let (item, stored) = tokio::task::spawn_blocking(move || {
        let item = store.append(report)?;
        let stored = store.len()?;
        Ok::<_, RpcError>((item, stored))
    })
    .await
    .map_err(|e| RpcError::Server(format!("report task failed: {e}")))??;

    state.metrics.reports_submitted.inc();
    state
        .metrics
        .reports_stored
        .set(i64::try_from(stored).unwrap_or(i64::MAX));
    info!(id = %item.id, stored, "report stored");

    Ok(Json(ReportResponse { ok: true, item }))
}

/// `GET /api/reports`
pub async fn list_reports(
    State(state): State<Arc<RpcState>>,
) -> Result<Json<ReportsResponse>, RpcError> {
    // Shares the store lock with appends, which hold it across a file rewrite.
    let store = Arc::clone(&state.store);
    let reports = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(|e| RpcError::Server(format!("list task failed: {e}")))??;
    Ok(Json(ReportsResponse { reports }))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<Arc<RpcState>>) -> Result<impl IntoResponse, RpcError> {
    let text = state
        .metrics
        .encode()
        .map_err(|e| RpcError::Server(format!("metrics encoding failed: {e}")))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_as_default() {
        let req: VerifyRequest = parse_body(&Bytes::from_static(b"  \n")).unwrap();
        assert!(req.text.is_none());
    }

    #[test]
    fn camel_case_fields_are_read() {
        let req: ReportRequest = parse_body(&Bytes::from_static(
            br#"{"text":"t","sourceUrl":"u","reporter":"r","extra":1}"#,
        ))
        .unwrap();
        assert_eq!(req.text.as_deref(), Some("t"));
        assert_eq!(req.source_url.as_deref(), Some("u"));
        assert_eq!(req.reporter.as_deref(), Some("r"));
    }

    #[test]
    fn malformed_body_is_invalid_body() {
        let err = parse_body::<VerifyRequest>(&Bytes::from_static(b"{text:")).unwrap_err();
        assert!(matches!(err, RpcError::InvalidBody(_)));
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let err = required_text(Some(String::new()), MISSING_REPORT_TEXT).unwrap_err();
        assert_eq!(err.to_string(), MISSING_REPORT_TEXT);
        assert!(required_text(None, MISSING_VERIFY_TEXT).is_err());
    }
}
