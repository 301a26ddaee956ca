//! Web UI and JSON API.
//!
//! Routes:
//! - GET  /              - Home
//! - GET  /about         - About
//! - GET  /query         - Query Assistant form
//! - POST /query         - Submit a question (form)
//! - GET  /style.css     - CSS styles
//! - POST /api/v1/ask    - Submit a question (JSON)
//! - GET  /health        - Liveness and model info

mod api;
mod handlers;
pub mod pages;
mod static_files;

pub use api::{ApiError, AskRequest, AskResponse, ErrorResponse};
pub use handlers::QueryForm;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::assistant::QueryAssistant;

/// Shared state for all handlers.
pub struct AppState {
    pub assistant: QueryAssistant,
    /// Shown in the sidebar footer ("Powered by ...")
    pub model_label: String,
}

impl AppState {
    pub fn new(assistant: QueryAssistant) -> Self {
        let model_label = assistant.translator().model_label();
        Self {
            assistant,
            model_label,
        }
    }
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    let api_routes = Router::new()
        .route("/ask", post(api::ask_handler))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/about", get(handlers::about_handler))
        .route(
            "/query",
            get(handlers::query_page_handler).post(handlers::query_submit_handler),
        )
        .route("/style.css", get(static_files::serve_css))
        .route("/health", get(api::health_handler))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("IntelliSQL listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
