//! Shared mapping from pool and Diesel failures to port error types.
//!
//! Raw driver messages are logged at debug level and replaced with stable
//! wording so they never leak into API responses.

use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{RecordPersistenceError, TechnicianPersistenceError};

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &diesel::result::Error) {
    use diesel::result::Error as DieselError;

    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }
}

/// Map Diesel errors raised by technician queries.
///
/// Unique violations can only come from the username index, so they map to
/// `DuplicateUsername` with the offending name.
pub(super) fn map_technician_diesel_error(
    error: diesel::result::Error,
    username: &str,
) -> TechnicianPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    log_diesel_error(&error);

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TechnicianPersistenceError::duplicate_username(username)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TechnicianPersistenceError::connection("database connection error")
        }
        _ => TechnicianPersistenceError::query("database error"),
    }
}

/// Map Diesel errors raised by record queries.
///
/// Foreign-key violations can only come from the technician reference, so
/// they map to `MissingTechnician`.
pub(super) fn map_record_diesel_error(
    error: diesel::result::Error,
    technician_id: &str,
) -> RecordPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    log_diesel_error(&error);

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            RecordPersistenceError::missing_technician(technician_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordPersistenceError::connection("database connection error")
        }
        _ => RecordPersistenceError::query("database error"),
    }
}

/// Map technician persistence failures into the HTTP-safe domain error.
pub(super) fn map_technician_persistence_error(error: TechnicianPersistenceError) -> Error {
    match error {
        TechnicianPersistenceError::Connection { message } => Error::service_unavailable(message),
        TechnicianPersistenceError::Query { message } => Error::internal(message),
        TechnicianPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already registered"))
        }
    }
}
