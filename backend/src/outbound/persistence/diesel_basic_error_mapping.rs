//! Shared Diesel error mapping for the profile and favourite repositories.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Primary key constraint on `profiles`; a second profile for one account.
pub(crate) const PROFILES_PKEY: &str = "profiles_pkey";

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("check constraint violated")
        }
        _ => query("database error"),
    }
}

/// Constraint name of a unique violation, if `error` is one.
pub(crate) fn unique_violation_constraint(error: &DieselError) -> Option<String> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Some(
            info.constraint_name()
                .map_or_else(String::new, str::to_owned),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
        Pool(String),
    }

    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("profiles")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let mapped = map_basic_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection, None),
            Mapped::Query,
            Mapped::Connection,
        );
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::CheckViolation, None), "check constraint violated")]
    #[case(database_error(DatabaseErrorKind::SerializationFailure, None), "database error")]
    fn other_errors_map_to_query(#[case] error: DieselError, #[case] expected: &'static str) {
        let mapped = map_basic_diesel_error(error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Query(expected));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Pool);
        assert_eq!(mapped, Mapped::Pool("timed out".to_owned()));
    }

    #[rstest]
    #[case(Some(PROFILES_PKEY), Some(PROFILES_PKEY.to_owned()))]
    #[case(None, Some(String::new()))]
    fn unique_violation_reports_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: Option<String>,
    ) {
        let error = database_error(DatabaseErrorKind::UniqueViolation, constraint);
        assert_eq!(unique_violation_constraint(&error), expected);
    }

    #[rstest]
    fn non_unique_errors_have_no_constraint() {
        assert_eq!(unique_violation_constraint(&DieselError::NotFound), None);
    }
}
