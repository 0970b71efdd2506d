use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connector::api::Container;
use crate::domain::{AnalysisResult, ChatReply, DomainError, ReportAnalysis, SymptomInput};

use super::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct AnalysesResponse {
    pub analyses: Vec<AnalysisResult>,
}

/// `GET /health-check`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

/// `POST /api/analyze/symptoms`
pub async fn analyze_symptoms(
    State(state): State<AppState>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let use_case = state.container.analyze_symptoms_use_case();
    Ok(Json(use_case.execute(input).await?))
}

/// `POST /api/analyze/report` with a multipart `file` field.
pub async fn analyze_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReportAnalysis>, ApiError> {
    let limit = state.container.max_upload_bytes();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Uploaded file has no filename".into()))?;
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        let use_case = state.container.analyze_report_use_case();
        return Ok(Json(use_case.execute(&filename, &bytes).await?));
    }

    Err(ApiError::BadRequest("Missing multipart field 'file'".into()))
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let use_case = state.container.chat_use_case();
    let reply = use_case
        .execute_in_session(request.session_id.as_deref(), &request.message)
        .await?;
    Ok(Json(reply))
}

/// `GET /api/analyses`
pub async fn list_analyses(
    State(state): State<AppState>,
) -> Result<Json<AnalysesResponse>, ApiError> {
    let analyses = state.container.list_analyses_use_case().execute().await?;
    Ok(Json(AnalysesResponse { analyses }))
}

/// `GET /api/analyses/{id}`
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let analysis = state.container.list_analyses_use_case().get_by_id(&id).await?;
    Ok(Json(analysis))
}

/// Bodies cut off by the transport limit are reported like any other
/// oversized upload.
fn multipart_error(e: MultipartError, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        DomainError::invalid_input(format!(
            "Uploaded file is too large: the limit is {limit} bytes"
        ))
        .into()
    } else {
        ApiError::BadRequest(e.body_text())
    }
}
