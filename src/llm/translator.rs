//! Natural language to SQL translator.

use crate::llm::client::TextGenerator;
use crate::llm::fence::strip_code_fences;
use crate::llm::prompt::SYSTEM_PROMPT;
use crate::types::{IntelliSqlError, Result};
use std::sync::Arc;

/// Turns a question into a candidate SQL string via a text generator.
///
/// The output is best-effort: nothing checks that it is runnable SQL.
#[derive(Clone)]
pub struct SqlTranslator {
    generator: Arc<dyn TextGenerator>,
}

impl SqlTranslator {
    /// Create new translator.
    ///
    /// # Arguments
    ///
    /// * `generator` - Model client (or any stand-in implementing `TextGenerator`)
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Label of the underlying model.
    pub fn model_label(&self) -> String {
        self.generator.label()
    }

    /// Convert natural language question to SQL.
    ///
    /// # Arguments
    ///
    /// * `question` - Natural language question
    ///
    /// # Returns
    ///
    /// Model output with code fences and surrounding whitespace removed
    ///
    /// # Errors
    ///
    /// - `EmptyQuestion` if `question` is blank (no request is sent)
    /// - `LlmError` / `HttpError` from the provider, or if the model returned
    ///   nothing but fences and statement separators
    pub async fn translate(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(IntelliSqlError::EmptyQuestion);
        }

        let raw = self.generator.generate(SYSTEM_PROMPT, question).await?;
        let sql = strip_code_fences(&raw);

        if sql.chars().all(|c| c == ';' || c.is_whitespace()) {
            return Err(IntelliSqlError::llm("Model returned no SQL"));
        }

        tracing::info!(%sql, "Generated SQL");
        Ok(sql)
    }
}
