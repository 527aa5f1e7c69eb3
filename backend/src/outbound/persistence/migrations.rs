//! Embedded schema migrations.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("failed to connect for migrations: {message}")]
    Connection {
        /// Diagnostic text from Diesel.
        message: String,
    },

    /// A migration failed and was rolled back.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Diagnostic text from Diesel.
        message: String,
    },
}

/// Apply every pending migration and return the versions applied.
///
/// Uses a blocking `PgConnection`; async callers should run it on a
/// blocking thread.
///
/// # Errors
///
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Apply`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connection {
            message: err.to_string(),
        }
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.into_iter().map(|version| version.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;
    use rstest::rstest;

    #[rstest]
    fn social_core_migration_is_embedded() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded");
        let names: Vec<String> = migrations
            .iter()
            .map(|migration| migration.name().to_string())
            .collect();

        assert!(
            names.iter().any(|name| name.contains("create_social_core")),
            "found {names:?}"
        );
    }

    #[rstest]
    fn events_foreign_key_restricts_user_deletion() {
        let up = include_str!("../../../migrations/2026-01-05-120000_create_social_core/up.sql");
        let events_fk = up
            .split("CONSTRAINT events_user_id_fkey")
            .nth(1)
            .and_then(|rest| rest.split(',').next())
            .expect("events foreign key declared");

        assert!(events_fk.contains("ON DELETE RESTRICT"), "found {events_fk}");
    }

    #[rstest]
    fn unreachable_database_reports_connection_error() {
        let error = run_migrations("postgres://127.0.0.1:1/filmorate").expect_err("no server");
        assert!(matches!(error, MigrationError::Connection { .. }));
    }
}
