//! Shared Diesel error mapping for the social core adapters.
//!
//! Adapters pass constructors for their own port error variants, so each
//! port keeps its typed error while the classification lives in one place.

use diesel::result::{DatabaseErrorKind, DatabaseErrorInformation, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            error = %error,
            "diesel operation failed"
        ),
    }
}

/// Map Diesel errors into query/connection constructors.
///
/// `NotFound` and query-builder failures are query errors; a closed
/// connection is a connection error.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], but reports foreign key violations
/// through `missing` with a description of the referenced row.
pub(crate) fn map_referential_diesel_error<E, Q, C, M>(
    error: DieselError,
    query: Q,
    connection: C,
    missing: M,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    M: FnOnce(String) -> E,
{
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(message = info.message(), "foreign key violation");
            missing(describe_foreign_key(info.as_ref()))
        }
        other => map_basic_diesel_error(other, query, connection),
    }
}

/// Name the referenced entity from the violated constraint.
fn describe_foreign_key(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> String {
    let constraint = info
        .constraint_name()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let entity = if constraint.contains("review_id") {
        "review"
    } else if constraint.contains("film_id") {
        "film"
    } else if constraint.contains("user_id")
        || constraint.contains("following_id")
        || constraint.contains("followed_id")
    {
        "user"
    } else {
        warn!(
            message = info.message(),
            constraint_name = ?info.constraint_name(),
            "unrecognised foreign key violation"
        );
        "referenced row"
    };
    format!("{entity} not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
        Missing(String),
    }

    struct ViolationInfo(Option<&'static str>);

    impl DatabaseErrorInformation for ViolationInfo {
        fn message(&self) -> &str {
            "insert or update violates foreign key constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn map(error: DieselError) -> Mapped {
        map_referential_diesel_error(
            error,
            Mapped::Query,
            |message| Mapped::Connection(message.to_owned()),
            Mapped::Missing,
        )
    }

    fn violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(ViolationInfo(constraint)),
        )
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    #[case(Some("reviews_rates_review_id_fkey"), "review not found")]
    #[case(Some("reviews_film_id_fkey"), "film not found")]
    #[case(Some("follows_followed_id_fkey"), "user not found")]
    #[case(Some("events_user_id_fkey"), "user not found")]
    #[case(None, "referenced row not found")]
    fn foreign_key_violations_name_the_missing_row(
        #[case] constraint: Option<&'static str>,
        #[case] expected: &str,
    ) {
        assert_eq!(map(violation(constraint)), Mapped::Missing(expected.to_owned()));
    }
}
