//! Executor behavior against the seeded Students fixture.

mod common;

use common::seeded_fixture;
use intellisql::{Executor, IntelliSqlError, SqlValue, StatementPolicy};

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

#[test]
fn test_count_returns_five() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let output = executor.execute("SELECT COUNT(*) FROM STUDENTS;").unwrap();
    assert_eq!(output.row_count(), 1);
    assert_eq!(output.rows[0], vec![SqlValue::Integer(5)]);
}

#[test]
fn test_highest_marks_is_dilsha() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let output = executor
        .execute("SELECT * FROM STUDENTS ORDER BY marks DESC LIMIT 1;")
        .unwrap();

    assert_eq!(output.columns, vec!["name", "class", "marks", "company"]);
    assert_eq!(
        output.rows,
        vec![vec![text("Dilsha"), text("MCom"), SqlValue::Integer(99), text("Cyient")]]
    );
}

#[test]
fn test_company_filter_round_trip() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let output = executor
        .execute("SELECT * FROM STUDENTS WHERE company='INFOSYS'")
        .unwrap();

    assert_eq!(
        output.rows,
        vec![vec![text("Sibin"), text("MSc"), SqlValue::Integer(89), text("INFOSYS")]]
    );
}

#[test]
fn test_average_marks() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let output = executor.execute("SELECT AVG(marks) FROM STUDENTS;").unwrap();
    assert_eq!(output.columns, vec!["AVG(marks)"]);
    match output.scalar() {
        Some(SqlValue::Real(avg)) => assert!((avg - 82.2).abs() < 1e-9),
        other => panic!("unexpected average: {:?}", other),
    }
}

#[test]
fn test_no_match_is_empty_not_error() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let output = executor
        .execute("SELECT * FROM STUDENTS WHERE company='GOOGLE'")
        .unwrap();
    assert!(output.is_empty());
    assert_eq!(output.columns.len(), 4);
}

#[test]
fn test_malformed_sql_is_syntax_error() {
    let fx = seeded_fixture();

    for policy in [StatementPolicy::ReadOnly, StatementPolicy::Unrestricted] {
        let executor = Executor::new(&fx.path, policy);
        let err = executor.execute("SELEKT * FROM STUDENTS").unwrap_err();
        assert!(matches!(err, IntelliSqlError::QueryError(_)), "{:?}", err);
        assert!(err.is_syntax_error(), "{}", err);
    }
}

#[test]
fn test_unknown_column_is_database_error() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let err = executor.execute("SELECT salary FROM STUDENTS").unwrap_err();
    assert!(matches!(err, IntelliSqlError::QueryError(_)));
    assert!(err.to_string().contains("no such column"));
}

#[test]
fn test_read_only_policy_blocks_delete() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let err = executor.execute("DELETE FROM STUDENTS").unwrap_err();
    assert!(matches!(err, IntelliSqlError::PolicyViolation(_)));

    let count = executor.execute("SELECT COUNT(*) FROM STUDENTS").unwrap();
    assert_eq!(count.scalar(), Some(&SqlValue::Integer(5)));
}

#[test]
fn test_unrestricted_mutation_persists() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::Unrestricted);

    let output = executor
        .execute("DELETE FROM STUDENTS WHERE marks < 70")
        .unwrap();
    assert!(output.columns.is_empty());
    assert!(output.is_empty());

    // New executor, new connection: the delete was committed
    let reader = Executor::new(&fx.path, StatementPolicy::ReadOnly);
    let count = reader.execute("SELECT COUNT(*) FROM STUDENTS").unwrap();
    assert_eq!(count.scalar(), Some(&SqlValue::Integer(4)));
}

#[tokio::test]
async fn test_execute_async_matches_sync() {
    let fx = seeded_fixture();
    let executor = Executor::new(&fx.path, StatementPolicy::ReadOnly);

    let sql = "SELECT name FROM STUDENTS WHERE class = 'BTech'";
    let sync = executor.execute(sql).unwrap();
    let async_output = executor.execute_async(sql).await.unwrap();
    assert_eq!(sync, async_output);
    assert_eq!(async_output.rows, vec![vec![text("Sijo")]]);
}
