//! Question → SQL → rows pipeline with a scripted model.

mod common;

use common::{assistant, seeded_fixture, standard_replies, ScriptedModel};
use intellisql::{ErrorKind, IntelliSqlError, SqlValue, StatementPolicy};

#[tokio::test]
async fn test_how_many_students() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model.clone(), &fx.path, StatementPolicy::ReadOnly);

    let answer = assistant.ask("How many students?").await.unwrap();

    assert_eq!(answer.sql, "SELECT COUNT(*) FROM STUDENTS;");
    assert_eq!(answer.output.row_count(), 1);
    assert_eq!(answer.output.scalar(), Some(&SqlValue::Integer(5)));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_highest_marks() {
    let fx = seeded_fixture();
    let assistant = assistant(
        ScriptedModel::new(&standard_replies()),
        &fx.path,
        StatementPolicy::ReadOnly,
    );

    let answer = assistant.ask("Highest marks?").await.unwrap();
    let row = &answer.output.rows[0];
    assert_eq!(answer.output.row_count(), 1);
    assert_eq!(row[0], SqlValue::Text("Dilsha".into()));
    assert_eq!(row[2], SqlValue::Integer(99));
}

#[tokio::test]
async fn test_blank_question_never_reaches_model() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model.clone(), &fx.path, StatementPolicy::ReadOnly);

    for question in ["", "   ", "\n\t"] {
        let err = assistant.ask(question).await.unwrap_err();
        assert!(matches!(err, IntelliSqlError::EmptyQuestion));
        assert_eq!(err.kind(), ErrorKind::Input);
    }
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_service_error_propagates() {
    let fx = seeded_fixture();
    let assistant = assistant(
        ScriptedModel::new(&standard_replies()),
        &fx.path,
        StatementPolicy::ReadOnly,
    );

    let err = assistant.ask("Something the model chokes on").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(err.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn test_malformed_generated_sql() {
    let fx = seeded_fixture();
    let assistant = assistant(
        ScriptedModel::new(&standard_replies()),
        &fx.path,
        StatementPolicy::ReadOnly,
    );

    let err = assistant.ask("Typo please").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Database);
    assert!(err.is_syntax_error());
}

#[tokio::test]
async fn test_destructive_sql_blocked_when_read_only() {
    let fx = seeded_fixture();
    let assistant = assistant(
        ScriptedModel::new(&standard_replies()),
        &fx.path,
        StatementPolicy::ReadOnly,
    );

    let err = assistant.ask("Remove everyone").await.unwrap_err();
    assert!(matches!(err, IntelliSqlError::PolicyViolation(_)));

    // Table is still there
    let answer = assistant.ask("How many students?").await.unwrap();
    assert_eq!(answer.output.scalar(), Some(&SqlValue::Integer(5)));
}

#[tokio::test]
async fn test_destructive_sql_runs_when_unrestricted() {
    let fx = seeded_fixture();
    let assistant = assistant(
        ScriptedModel::new(&standard_replies()),
        &fx.path,
        StatementPolicy::Unrestricted,
    );

    assistant.ask("Remove everyone").await.unwrap();

    let err = assistant.ask("How many students?").await.unwrap_err();
    assert!(err.to_string().contains("no such table"));
}

#[tokio::test]
async fn test_generate_sql_does_not_execute() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model.clone(), &fx.path, StatementPolicy::Unrestricted);

    let sql = assistant.generate_sql("Remove everyone").await.unwrap();
    assert_eq!(sql, "DROP TABLE STUDENTS;");

    let answer = assistant.ask("Who works at INFOSYS?").await.unwrap();
    assert_eq!(answer.output.row_count(), 1);
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_model_call_runs_inside_request_span() {
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry());

    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model.clone(), &fx.path, StatementPolicy::ReadOnly);

    assistant.ask("How many students?").await.unwrap();
    assert_eq!(model.spans(), vec![Some("ask".to_string())]);
}

#[tokio::test]
async fn test_trailing_statement_fails_without_running() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model, &fx.path, StatementPolicy::Unrestricted);

    let failure = assistant.try_ask("Count then clear").await.unwrap_err();
    assert_eq!(failure.error.kind(), ErrorKind::Database);
    assert_eq!(
        failure.sql.as_deref(),
        Some("SELECT COUNT(*) FROM STUDENTS; DELETE FROM STUDENTS;")
    );

    let answer = assistant.ask("How many students?").await.unwrap();
    assert_eq!(answer.output.scalar(), Some(&SqlValue::Integer(5)));
}

#[tokio::test]
async fn test_trailing_prose_fails() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&standard_replies());
    let assistant = assistant(model, &fx.path, StatementPolicy::ReadOnly);

    let err = assistant.ask("Count with a note").await.unwrap_err();
    assert!(err.is_syntax_error());
}

#[tokio::test]
async fn test_translation_failure_has_no_sql() {
    let fx = seeded_fixture();
    let model = ScriptedModel::new(&[]);
    let assistant = assistant(model, &fx.path, StatementPolicy::ReadOnly);

    let failure = assistant.try_ask("Unscripted").await.unwrap_err();
    assert_eq!(failure.error.kind(), ErrorKind::Service);
    assert_eq!(failure.sql, None);
}
