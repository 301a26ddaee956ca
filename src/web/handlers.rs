//! Web UI route handlers.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::assistant::AskFailure;
use crate::db::fixture;
use crate::types::IntelliSqlError;
use crate::web::pages::{render_about, render_home, render_query, QueryOutcome};
use crate::web::AppState;

/// Query form body.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub question: String,
}

/// GET / - Home with live fixture metrics.
pub async fn home_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let path = state.assistant.executor().path().to_path_buf();
    let summary = match tokio::task::spawn_blocking(move || fixture::summary(&path)).await {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to read fixture summary");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Fixture summary task failed");
            None
        }
    };

    Html(render_home(&state.model_label, summary.as_ref()))
}

/// GET /about
pub async fn about_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_about(&state.model_label))
}

/// GET /query - empty form.
pub async fn query_page_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_query(&state.model_label, "", &QueryOutcome::Idle))
}

/// POST /query - translate, execute, render.
///
/// A blank question renders a notice without calling the model.
pub async fn query_submit_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> impl IntoResponse {
    let question = form.question;
    let outcome = answer_question(&state, &question).await;
    Html(render_query(&state.model_label, &question, &outcome))
}

async fn answer_question(state: &AppState, question: &str) -> QueryOutcome {
    match state.assistant.try_ask(question).await {
        Ok(answer) => QueryOutcome::Answered(answer),
        Err(AskFailure {
            error: IntelliSqlError::EmptyQuestion,
            ..
        }) => QueryOutcome::Blank,
        Err(AskFailure { error, sql }) => {
            tracing::warn!(error = %error, sql = sql.as_deref().unwrap_or(""), "Question failed");
            QueryOutcome::Failed {
                sql,
                message: error.to_string(),
            }
        }
    }
}
