//! Tracing instrumentation for IntelliSQL.
//!
//! Spans follow the OpenTelemetry semantic conventions so they can be
//! exported unchanged by any `tracing` subscriber:
//!
//! - Database spans: `db.system.name = "sqlite"`, `db.operation.name`,
//!   `db.query.text`, `db.namespace` (file path)
//! - Model spans: `gen_ai.system`, `gen_ai.request.model`
//!
//! # Example
//!
//! ```rust,ignore
//! use intellisql::otel::db_query_span;
//!
//! let span = db_query_span("SELECT COUNT(*) FROM STUDENTS;", "data.db");
//! let _guard = span.entered();
//! ```

pub mod db;
pub mod llm;
pub mod subscriber;

pub use db::{db_query_span, record_db_metrics};
pub use llm::{llm_span, record_llm_response};
pub use subscriber::init_tracing;
