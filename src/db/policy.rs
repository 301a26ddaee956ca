//! Statement policy for generated SQL.
//!
//! Model output is untrusted. `ReadOnly` refuses anything that is not a query
//! before it reaches SQLite, and the executor additionally opens the file
//! read-only so statements `sqlparser` cannot classify still cannot write.

use crate::types::{IntelliSqlError, Result};
use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

/// Which generated statements may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementPolicy {
    /// Execute whatever the model produced, verbatim
    Unrestricted,
    /// Only queries (`SELECT`, `WITH`, `VALUES`, `EXPLAIN`)
    #[default]
    ReadOnly,
}

impl StatementPolicy {
    /// Policy matching the `allow_writes` setting.
    pub fn from_allow_writes(allow_writes: bool) -> Self {
        if allow_writes {
            StatementPolicy::Unrestricted
        } else {
            StatementPolicy::ReadOnly
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, StatementPolicy::ReadOnly)
    }

    /// Check a statement against the policy.
    ///
    /// Text that does not parse is let through: SQLite then reports the
    /// syntax error itself, which is the error users should see.
    ///
    /// # Errors
    ///
    /// Returns `PolicyViolation` naming the first refused statement
    pub fn check(&self, sql: &str) -> Result<()> {
        if !self.is_read_only() {
            return Ok(());
        }

        let statements = match Parser::parse_sql(&SQLiteDialect {}, sql) {
            Ok(statements) => statements,
            Err(e) => {
                tracing::debug!(error = %e, "Statement did not parse, deferring to SQLite");
                return Ok(());
            }
        };

        for statement in &statements {
            if !is_query(statement) {
                return Err(IntelliSqlError::PolicyViolation(format!(
                    "{} statements are disabled (read-only mode)",
                    leading_verb(statement)
                )));
            }
        }

        Ok(())
    }
}

fn is_query(statement: &Statement) -> bool {
    matches!(statement, Statement::Query(_) | Statement::Explain { .. })
}

fn leading_verb(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or("Unknown")
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_allows_queries() {
        let policy = StatementPolicy::ReadOnly;
        assert!(policy.check("SELECT COUNT(*) FROM STUDENTS;").is_ok());
        assert!(policy.check("SELECT * FROM STUDENTS ORDER BY marks DESC LIMIT 1;").is_ok());
        assert!(policy
            .check("WITH top AS (SELECT * FROM STUDENTS) SELECT name FROM top")
            .is_ok());
    }

    #[test]
    fn test_read_only_refuses_writes() {
        let policy = StatementPolicy::ReadOnly;

        let err = policy.check("DROP TABLE STUDENTS").unwrap_err();
        assert!(matches!(err, IntelliSqlError::PolicyViolation(_)));
        assert!(err.to_string().contains("DROP"));

        assert!(policy.check("DELETE FROM STUDENTS WHERE marks < 70").is_err());
        assert!(policy.check("UPDATE STUDENTS SET marks = 100").is_err());
        assert!(policy.check("SELECT 1; DELETE FROM STUDENTS").is_err());
    }

    #[test]
    fn test_unparseable_is_deferred() {
        assert!(StatementPolicy::ReadOnly.check("SELEKT * FROM STUDENTS").is_ok());
    }

    #[test]
    fn test_unrestricted_allows_everything() {
        assert!(StatementPolicy::Unrestricted.check("DROP TABLE STUDENTS").is_ok());
        assert_eq!(StatementPolicy::from_allow_writes(true), StatementPolicy::Unrestricted);
        assert_eq!(StatementPolicy::from_allow_writes(false), StatementPolicy::ReadOnly);
    }
}
