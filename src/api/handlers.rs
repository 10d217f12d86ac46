//! HTTP handlers for the critique API.

use super::types::*;
use super::AppState;
use crate::critique::{build_critique_request, extract_critique, normalize_image_url};
use crate::error::CriticError;
use crate::time::now_iso8601;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use std::sync::Arc;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: now_iso8601(),
    })
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, CriticError> {
    let Json(request) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => CriticError::PayloadTooLarge(e.body_text()),
        _ => CriticError::MalformedInput(e.body_text()),
    })?;
    request.validate()?;

    let image_url = normalize_image_url(&request.image);
    tracing::info!(image_len = request.image.len(), model = %state.model, "analyzing image");

    let upstream_request = build_critique_request(&state.model, image_url);
    let response = state.upstream.create_chat_completion(&upstream_request).await?;
    let critique = extract_critique(response)?;

    tracing::debug!(critique_len = critique.len(), "critique ready");

    Ok(Json(AnalyzeResponse {
        status: "success",
        critique,
        timestamp: now_iso8601(),
    }))
}

pub async fn not_found(uri: Uri) -> CriticError {
    CriticError::NotFound(uri.path().to_string())
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> CriticError {
    CriticError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
