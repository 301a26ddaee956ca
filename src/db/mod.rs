//! Fixture database access: executor, statement policy, seeding.

pub mod executor;
pub mod fixture;
pub mod policy;
pub mod value;

pub use executor::Executor;
pub use fixture::FixtureSummary;
pub use policy::StatementPolicy;
pub use value::{QueryOutput, SqlValue};
