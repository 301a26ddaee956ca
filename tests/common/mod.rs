//! Shared test helpers: a seeded fixture file and a scripted model.

#![allow(dead_code)]

use async_trait::async_trait;
use intellisql::db::fixture;
use intellisql::{Executor, IntelliSqlError, QueryAssistant, SqlTranslator, StatementPolicy, TextGenerator};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Temp dir holding a freshly seeded `data.db`.
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn seeded_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    fixture::seed(&path, false).unwrap();
    Fixture { dir, path }
}

/// Model stand-in answering from a question → reply table.
///
/// Unknown questions fail the way a provider quota error would.
pub struct ScriptedModel {
    replies: HashMap<String, String>,
    calls: AtomicUsize,
    spans: Mutex<Vec<Option<String>>>,
}

impl ScriptedModel {
    pub fn new(replies: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            replies: replies
                .iter()
                .map(|(q, r)| (q.to_string(), r.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
            spans: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Name of the span current at each call, in call order.
    pub fn spans(&self) -> Vec<Option<String>> {
        self.spans.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> intellisql::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = tracing::Span::current()
            .metadata()
            .map(|meta| meta.name().to_string());
        self.spans.lock().unwrap().push(current);
        self.replies.get(user_prompt).cloned().ok_or_else(|| {
            IntelliSqlError::llm("Google Gemini API error 429 Too Many Requests: quota exceeded")
        })
    }

    fn label(&self) -> String {
        "Scripted model".to_string()
    }
}

/// Replies matching the worked examples in the prompt, wrapped the way
/// models tend to wrap them.
pub fn standard_replies() -> Vec<(&'static str, &'static str)> {
    vec![
        ("How many students?", "```sql\nSELECT COUNT(*) FROM STUDENTS;\n```"),
        ("Highest marks?", "SELECT * FROM STUDENTS ORDER BY marks DESC LIMIT 1;"),
        ("Who works at INFOSYS?", "```\nSELECT * FROM STUDENTS WHERE company='INFOSYS';\n```"),
        ("Anyone at Google?", "SELECT * FROM STUDENTS WHERE company='GOOGLE';"),
        ("Typo please", "SELEKT * FROM STUDENTS"),
        ("Remove everyone", "DROP TABLE STUDENTS;"),
        ("Count then clear", "SELECT COUNT(*) FROM STUDENTS; DELETE FROM STUDENTS;"),
        (
            "Count with a note",
            "```sql\nSELECT COUNT(*) FROM STUDENTS;\n```\nThis counts all students.",
        ),
    ]
}

pub fn assistant(model: Arc<ScriptedModel>, path: &Path, policy: StatementPolicy) -> QueryAssistant {
    QueryAssistant::new(SqlTranslator::new(model), Executor::new(path, policy))
}
