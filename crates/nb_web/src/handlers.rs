use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nb_core::{AnalysisRequest, AnalysisResult, Error};
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error payload returned to the caller as `{"error": "..."}` with a 400
/// status for client-correctable input and 500 for everything else.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = match &err {
            Error::Configuration(_) | Error::Upstream { .. } => err.to_string(),
            other => format!("An error occurred while analyzing the article: {other}"),
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub async fn analyze_news(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    // An absent or unparseable body is the same client mistake as a missing
    // field: no URL to analyze.
    let Ok(Json(request)) = payload else {
        return Err(ApiError::bad_request("URL is required"));
    };
    if request.url.trim().is_empty() {
        return Err(ApiError::bad_request("URL is required"));
    }
    if Url::parse(&request.url).is_err() {
        return Err(ApiError::bad_request("Invalid URL format"));
    }

    info!(url = %request.url, "starting analysis");

    let article = state.extractor.extract(&request.url).await;
    info!(
        length = article.length,
        fallback = article.is_fallback,
        "content ready for analysis"
    );

    let result = state.model.analyze(&article.text).await.map_err(|e| {
        error!(error = %e, "analysis failed");
        ApiError::from(e)
    })?;

    Ok(Json(result))
}
