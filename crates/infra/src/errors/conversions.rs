//! Conversions from external infrastructure errors into domain errors.

use keystone_common::storage::StorageError;
use keystone_domain::CrmError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CrmError);

impl From<InfraError> for CrmError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CrmError> for InfraError {
    fn from(value: CrmError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCrmError {
    fn into_crm(self) -> CrmError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CrmError */
/* -------------------------------------------------------------------------- */

// Extended result codes for constraint failures.
const SQLITE_CONSTRAINT_CHECK: i32 = 275;
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
const SQLITE_CONSTRAINT_NOTNULL: i32 = 1299;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

impl IntoCrmError for SqlError {
    fn into_crm(self) -> CrmError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => CrmError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        CrmError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_FOREIGNKEY) => {
                        CrmError::InvalidInput("referenced record does not exist".into())
                    }
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_NOTNULL) => {
                        CrmError::InvalidInput(format!("missing required value: {message}"))
                    }
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_CHECK) => {
                        CrmError::InvalidInput(format!("value out of range: {message}"))
                    }
                    (
                        ErrorCode::ConstraintViolation,
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY,
                    ) => CrmError::Database("unique constraint violation".into()),
                    _ => CrmError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CrmError::Database("query returned no rows".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CrmError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                CrmError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidColumnName(name) => {
                CrmError::Database(format!("invalid column name: {name}"))
            }
            RE::InvalidPath(path) => CrmError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => CrmError::Database("invalid SQL query".into()),
            other => CrmError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_crm())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → CrmError */
/* -------------------------------------------------------------------------- */

impl IntoCrmError for StorageError {
    fn into_crm(self) -> CrmError {
        match self {
            StorageError::Rusqlite(err) => err.into_crm(),
            StorageError::InvalidConfig(msg) => CrmError::Config(msg),
            other => CrmError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_crm())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CrmError */
/* -------------------------------------------------------------------------- */

impl IntoCrmError for HttpError {
    fn into_crm(self) -> CrmError {
        if self.is_timeout() {
            return CrmError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CrmError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => CrmError::NotFound(message),
                400..=499 if code != 429 => CrmError::InvalidInput(message),
                _ => CrmError::Network(message),
            };
        }

        if self.is_decode() {
            return CrmError::Network(format!("invalid response body: {self}"));
        }

        CrmError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_crm())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → CrmError */
/* -------------------------------------------------------------------------- */

impl IntoCrmError for JoinError {
    fn into_crm(self) -> CrmError {
        if self.is_cancelled() {
            CrmError::Internal("blocking task cancelled".into())
        } else {
            CrmError::Internal(format!("blocking task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_crm())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
