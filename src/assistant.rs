//! Question → SQL → rows pipeline.
//!
//! Strictly linear: the translator finishes before the executor starts, and
//! nothing is kept between calls.

use crate::db::{Executor, QueryOutput};
use crate::llm::SqlTranslator;
use crate::types::{IntelliSqlError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// One answered question.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// Request id (appears in logs)
    pub id: Uuid,

    pub question: String,

    /// SQL after fence-stripping, as executed
    pub sql: String,

    pub output: QueryOutput,

    pub generated_at: DateTime<Utc>,

    /// Wall time spent in the executor
    pub execution_ms: u64,
}

/// Translator plus executor.
#[derive(Clone)]
pub struct QueryAssistant {
    translator: SqlTranslator,
    executor: Executor,
}

impl QueryAssistant {
    pub fn new(translator: SqlTranslator, executor: Executor) -> Self {
        Self {
            translator,
            executor,
        }
    }

    pub fn translator(&self) -> &SqlTranslator {
        &self.translator
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Translate a question and run the resulting SQL.
    ///
    /// # Errors
    ///
    /// - `EmptyQuestion` for blank input; the model is not called
    /// - any translator error (service side)
    /// - any executor error (database side)
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        self.try_ask(question).await.map_err(|failure| failure.error)
    }

    /// Like [`ask`](Self::ask), but a failed execution keeps the SQL that was
    /// tried, for display.
    ///
    /// Translation and execution both run inside one `ask` span carrying the
    /// request id.
    pub async fn try_ask(&self, question: &str) -> std::result::Result<Answer, AskFailure> {
        let id = Uuid::new_v4();

        async {
            let sql = self.generate_sql(question).await?;
            let answer = self
                .execute(id, question, sql.clone())
                .await
                .map_err(|error| AskFailure {
                    error,
                    sql: Some(sql),
                })?;
            Ok::<_, AskFailure>(answer)
        }
        .instrument(request_span(id))
        .await
    }

    /// Translate only; returns the SQL without executing it.
    pub async fn generate_sql(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(IntelliSqlError::EmptyQuestion);
        }
        self.translator.translate(question).await
    }

    /// Execute SQL produced earlier for `question`.
    pub async fn run(&self, question: &str, sql: String) -> Result<Answer> {
        let id = Uuid::new_v4();
        self.execute(id, question, sql)
            .instrument(request_span(id))
            .await
    }

    async fn execute(&self, id: Uuid, question: &str, sql: String) -> Result<Answer> {
        let started = Instant::now();
        let output = self.executor.execute_async(&sql).await?;
        let execution_ms = started.elapsed().as_millis() as u64;

        tracing::info!(rows = output.row_count(), execution_ms, "Question answered");

        Ok(Answer {
            id,
            question: question.trim().to_string(),
            sql,
            output,
            generated_at: Utc::now(),
            execution_ms,
        })
    }
}

/// Failed question.
#[derive(Debug)]
pub struct AskFailure {
    pub error: IntelliSqlError,

    /// SQL that failed to execute; `None` if translation failed
    pub sql: Option<String>,
}

impl From<IntelliSqlError> for AskFailure {
    fn from(error: IntelliSqlError) -> Self {
        Self { error, sql: None }
    }
}

fn request_span(id: Uuid) -> Span {
    tracing::info_span!("ask", request_id = %id)
}
