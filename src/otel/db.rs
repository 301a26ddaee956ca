//! Database operation instrumentation.

use tracing::{field, span, Level, Span};

/// Create a span for one ad-hoc SQL statement.
///
/// # Arguments
///
/// * `query_text` - SQL text as generated (not sanitized)
/// * `namespace` - Database file path
///
/// # Returns
///
/// Tracing span with query attributes; row count is filled in later by
/// [`record_db_metrics`].
pub fn db_query_span(query_text: &str, namespace: &str) -> Span {
    let operation = operation_name(query_text);

    span!(
        Level::INFO,
        "db.query",
        otel.name = %operation,
        otel.kind = "client",
        db.system.name = "sqlite",
        db.operation.name = %operation,
        db.namespace = namespace,
        db.query.text = query_text,
        db.response.returned_rows = field::Empty,
    )
}

/// Record rows returned on the current span.
pub fn record_db_metrics(rows_returned: usize) {
    Span::current().record("db.response.returned_rows", rows_returned);
}

/// Leading SQL verb, lowercased (`select`, `delete`, ...).
fn operation_name(query_text: &str) -> String {
    query_text
        .split_whitespace()
        .next()
        .map(|verb| verb.trim_end_matches(';').to_ascii_lowercase())
        .filter(|verb| !verb.is_empty())
        .unwrap_or_else(|| "query".to_string())
}
