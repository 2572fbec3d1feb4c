//! Translation of pool and Diesel failures into liqueur repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::LiqueurRepositoryError;

use super::pool::PoolError;

/// Pool failures always mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> LiqueurRepositoryError {
    LiqueurRepositoryError::connection(error.into_message())
}

/// Map Diesel errors onto the port taxonomy.
///
/// Closed connections become `Connection`, constraint violations on the
/// written values become `Rejected`, and everything else is a `Query` error.
pub(super) fn map_diesel_error(error: DieselError) -> LiqueurRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => LiqueurRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => LiqueurRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LiqueurRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation,
            info,
        ) => LiqueurRepositoryError::rejected(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            LiqueurRepositoryError::rejected("duplicate liqueur identifier")
        }
        DieselError::DatabaseError(_, _) => LiqueurRepositoryError::query("database error"),
        _ => LiqueurRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, LiqueurRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, "server closed"),
        LiqueurRepositoryError::connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::NotNullViolation, "null value in column \"name\""),
        LiqueurRepositoryError::rejected("null value in column \"name\"")
    )]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, "check failed"),
        LiqueurRepositoryError::rejected("check failed")
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation, "duplicate key"),
        LiqueurRepositoryError::rejected("duplicate liqueur identifier")
    )]
    #[case(
        database_error(DatabaseErrorKind::SerializationFailure, "retry"),
        LiqueurRepositoryError::query("database error")
    )]
    #[case(DieselError::NotFound, LiqueurRepositoryError::query("record not found"))]
    #[case(DieselError::RollbackTransaction, LiqueurRepositoryError::query("database error"))]
    fn diesel_errors_map_to_port_taxonomy(
        #[case] error: DieselError,
        #[case] expected: LiqueurRepositoryError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }
}
