//! Core types shared across IntelliSQL.
//!
//! - `IntelliSqlError`: error type for all operations
//! - `ErrorKind`: coarse category used by the presentation layer
//! - `Result`: convenient result type alias

pub mod error;

pub use error::{ErrorKind, IntelliSqlError, Result};
