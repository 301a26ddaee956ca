//! SQL executor over the fixture database file.

use crate::db::policy::StatementPolicy;
use crate::db::value::{QueryOutput, SqlValue};
use crate::otel::{db_query_span, record_db_metrics};
use crate::types::{IntelliSqlError, Result};
use rusqlite::{Batch, Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Runs SQL text against one SQLite file.
///
/// Holds no connection: every call opens the file, runs one statement and
/// closes it again. Mutations (when the policy allows them) persist with
/// SQLite autocommit semantics.
#[derive(Debug, Clone)]
pub struct Executor {
    path: PathBuf,
    policy: StatementPolicy,
}

impl Executor {
    /// Create new executor.
    ///
    /// # Arguments
    ///
    /// * `path` - SQLite database file
    /// * `policy` - Which statements may run
    pub fn new(path: impl Into<PathBuf>, policy: StatementPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> StatementPolicy {
        self.policy
    }

    /// Execute one statement and fetch all rows.
    ///
    /// # Arguments
    ///
    /// * `sql` - Statement text, executed without parameters
    ///
    /// # Returns
    ///
    /// Column names from the statement metadata and every row
    ///
    /// # Errors
    ///
    /// - `PolicyViolation` if the policy refuses the statement
    /// - `EmptyStatement` if the text holds only separators or comments
    /// - `QueryError` if SQLite cannot open the file or prepare or step the
    ///   statement, or if the text holds more than one statement
    pub fn execute(&self, sql: &str) -> Result<QueryOutput> {
        let span = db_query_span(sql, &self.path.to_string_lossy());
        let _guard = span.enter();

        self.policy.check(sql)?;

        let conn = self.open()?;
        let mut batch = Batch::new(&conn, sql);
        let mut stmt = batch.next()?.ok_or(IntelliSqlError::EmptyStatement)?;

        // Nothing runs unless the text is exactly one statement.
        if batch.next()?.is_some() {
            return Err(rusqlite::Error::MultipleStatement.into());
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let mut cursor = stmt.query([])?;
        let mut rows = Vec::new();
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(SqlValue::from(row.get_ref(idx)?));
            }
            rows.push(values);
        }

        record_db_metrics(rows.len());
        tracing::debug!(rows = rows.len(), columns = width, "Statement executed");

        Ok(QueryOutput { columns, rows })
    }

    /// Run [`execute`](Self::execute) on the blocking pool.
    pub async fn execute_async(&self, sql: &str) -> Result<QueryOutput> {
        let executor = self.clone();
        let sql = sql.to_string();

        tokio::task::spawn_blocking(move || executor.execute(&sql))
            .await
            .map_err(|e| IntelliSqlError::InternalError(format!("Executor task failed: {}", e)))?
    }

    fn open(&self) -> Result<Connection> {
        let conn = if self.policy.is_read_only() {
            Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            Connection::open(&self.path)?
        };
        Ok(conn)
    }
}
