//! JSON API for the assistant.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::assistant::AskFailure;
use crate::db::SqlValue;
use crate::types::{ErrorKind, IntelliSqlError};
use crate::web::AppState;

/// Ask request.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Ask response.
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub id: String,
    pub sql: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
    pub row_count: usize,
    pub execution_ms: u64,
}

/// Error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
}

/// Failed ask, with the SQL when translation got that far.
#[derive(Debug)]
pub struct ApiError {
    error: IntelliSqlError,
    sql: Option<String>,
}

impl From<IntelliSqlError> for ApiError {
    fn from(error: IntelliSqlError) -> Self {
        Self { error, sql: None }
    }
}

impl From<AskFailure> for ApiError {
    fn from(failure: AskFailure) -> Self {
        Self {
            error: failure.error,
            sql: failure.sql,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match self.error.kind() {
            ErrorKind::Input => (StatusCode::BAD_REQUEST, "input"),
            ErrorKind::Service => (StatusCode::BAD_GATEWAY, "service"),
            ErrorKind::Database => (StatusCode::UNPROCESSABLE_ENTITY, "database"),
            ErrorKind::Config => (StatusCode::INTERNAL_SERVER_ERROR, "config"),
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        let body = ErrorResponse {
            error: self.error.to_string(),
            kind,
            sql: self.sql,
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/v1/ask
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answer = state.assistant.try_ask(&request.question).await?;

    Ok(Json(AskResponse {
        id: answer.id.to_string(),
        sql: answer.sql,
        columns: answer.output.columns,
        row_count: answer.output.rows.len(),
        rows: answer.output.rows,
        execution_ms: answer.execution_ms,
    }))
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model_label,
        "read_only": state.assistant.executor().policy().is_read_only(),
    }))
}
