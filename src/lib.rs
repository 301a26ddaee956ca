//! IntelliSQL - natural language questions over a small SQLite database.
//!
//! A question goes through three steps:
//! - a fixed instruction prompt plus the question is sent to a hosted model
//! - markdown code fences are stripped from the reply
//! - the resulting SQL runs against the `Students` fixture and the rows are
//!   rendered in a three-page web UI (or printed by the CLI)

pub mod assistant;
pub mod config;
pub mod db;
pub mod llm;
pub mod otel;
pub mod types;
pub mod web;

pub use assistant::{Answer, AskFailure, QueryAssistant};
pub use config::{LlmProvider, Settings};
pub use db::{Executor, QueryOutput, SqlValue, StatementPolicy};
pub use llm::{LlmClient, SqlTranslator, TextGenerator};
pub use types::{ErrorKind, IntelliSqlError, Result};

use std::sync::Arc;

/// Wire the assistant from settings.
///
/// # Errors
///
/// Returns `ConfigError` if the model client cannot be created
pub fn build_assistant(settings: &Settings) -> Result<QueryAssistant> {
    let client = LlmClient::new(&settings.llm)?;
    let translator = SqlTranslator::new(Arc::new(client));
    let executor = Executor::new(
        settings.database.path.clone(),
        StatementPolicy::from_allow_writes(settings.database.allow_writes),
    );
    Ok(QueryAssistant::new(translator, executor))
}
