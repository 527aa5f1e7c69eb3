//! Shared helpers for the PostgreSQL-backed integration suites.
//!
//! Integration tests compile as separate crates, so helpers shared between
//! suites live here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;
mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{TestDatabase, provision_database};

/// Render a `postgres` error with the SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`,
/// which hides the cause in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
