//! JSON API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::super::AppState;
use crate::error::AnalyzeError;
use crate::input::AnalysisForm;
use crate::models::{AnalysisResult, InputMode};
use crate::pipeline;
use crate::render::{render_error, render_text};

/// Request body for URL analysis. Missing fields read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiAnalyzeRequest {
    pub endpoint: String,
    pub key: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub result: AnalysisResult,
    /// Plain-text rendering of `result`.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/// Analyze a document URL and return the typed result.
pub async fn api_analyze(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> impl IntoResponse {
    let form = AnalysisForm {
        endpoint: request.endpoint,
        key: request.key,
        mode: Some(InputMode::Url),
        file: None,
        url: Some(request.url),
    };

    match pipeline::run(state.analyzer.as_ref(), form).await {
        Ok(result) => {
            let text = render_text(&result);
            (StatusCode::OK, Json(ApiAnalyzeResponse { result, text })).into_response()
        }
        Err(e) => {
            let status = match e {
                AnalyzeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AnalyzeError::RemoteFailure(_) => StatusCode::BAD_GATEWAY,
            };
            (
                status,
                Json(ApiErrorResponse {
                    error: render_error(&e),
                    kind: e.kind(),
                }),
            )
                .into_response()
        }
    }
}

/// Liveness check.
pub async fn health() -> &'static str {
    "ok"
}
