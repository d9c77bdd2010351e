use thiserror::Error;

use crate::schema::FieldType;

/// Category of a storage-layer failure.
///
/// Drivers map their native error codes onto one of these so callers can
/// branch without knowing which backend produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionErrorKind {
    /// The connection was lost, could not be opened, or the database is busy
    Connectivity,
    /// The statement was rejected by the parser or references unknown objects
    Syntax,
    /// A constraint (unique, foreign key, not null, check) was violated
    Constraint,
    /// Anything else the backend reported
    Other,
}

#[derive(Debug, Error)]
pub enum ProwlError {
    /// Pseudo-method or explicit field name not declared on the schema
    #[error("Unknown field `{field}` on `{table}`")]
    UnknownField { table: String, field: String },

    /// Unrecognised verb or date-part keyword
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// Operand arity does not match the operator
    #[error("`{verb}` on `{field}` expects {expected} operand(s), got {got}")]
    InvalidOperandCount {
        verb: &'static str,
        field: String,
        expected: &'static str,
        got: usize,
    },

    /// Operation not supported by the field's declared type
    #[error("Field `{field}` of type {field_type} does not support {operation}")]
    UnsupportedFieldType {
        field: String,
        field_type: FieldType,
        operation: &'static str,
    },

    /// Invalid limit / offset / page combination
    #[error("Invalid bounds: {0}")]
    InvalidBounds(&'static str),

    /// The storage layer rejected the compiled statement
    #[error("Execution error [{}]: {message}", .code.as_deref().unwrap_or("-"))]
    QueryExecution {
        kind: ExecutionErrorKind,
        code: Option<String>,
        message: String,
    },

    /// Pull after an explicit close
    #[error("Iterator is closed")]
    IteratorClosed,

    /// Pull after the iterator already returned a storage or mapping error
    #[error("Iterator failed on a previous pull")]
    IteratorFailed,

    /// A values query was requested without selecting any field
    #[error("No select fields were set")]
    NoSelection,

    /// Insert or update without any field assignment
    #[error("No fields were set for {0}")]
    NoAssignments(&'static str),

    /// The schema does not declare a primary key
    #[error("Schema `{0}` has no primary key")]
    NoPrimaryKey(String),

    /// Error mapping row data into Rust values
    #[error("Mapping error: {0}")]
    Mapping(String),
}

/// Result type for query building and execution
pub type Result<T> = std::result::Result<T, ProwlError>;

const PG_UNIQUE_VIOLATION: &str = "23505";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

impl ProwlError {
    /// Builds a [`ProwlError::QueryExecution`].
    pub fn execution(
        kind: ExecutionErrorKind,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        ProwlError::QueryExecution {
            kind,
            code,
            message: message.into(),
        }
    }

    /// The execution category, if this is a storage error.
    pub fn execution_kind(&self) -> Option<ExecutionErrorKind> {
        match self {
            ProwlError::QueryExecution { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The backend's native error code, if this is a storage error.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProwlError::QueryExecution { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True for unique / primary-key violations on either backend.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self.code(),
            Some(PG_UNIQUE_VIOLATION | SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE)
        )
    }
}

#[cfg(feature = "rusqlite")]
impl From<rusqlite::Error> for ProwlError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &err {
            rusqlite::Error::SqliteFailure(failure, message) => {
                let kind = match failure.code {
                    ErrorCode::ConstraintViolation => ExecutionErrorKind::Constraint,
                    ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::SystemIoFailure => ExecutionErrorKind::Connectivity,
                    _ if message.as_deref().is_some_and(|m| {
                        m.contains("syntax error") || m.starts_with("no such")
                    }) =>
                    {
                        ExecutionErrorKind::Syntax
                    }
                    _ => ExecutionErrorKind::Other,
                };
                ProwlError::execution(kind, Some(failure.extended_code.to_string()), err.to_string())
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
            | rusqlite::Error::InvalidColumnType(..) => ProwlError::Mapping(err.to_string()),
            _ => ProwlError::execution(ExecutionErrorKind::Other, None, err.to_string()),
        }
    }
}

#[cfg(feature = "tokio-postgres")]
impl From<tokio_postgres::Error> for ProwlError {
    fn from(err: tokio_postgres::Error) -> Self {
        let code = err.code().map(|state| state.code().to_string());
        let kind = match code.as_deref() {
            Some(c) if c.starts_with("23") => ExecutionErrorKind::Constraint,
            Some(c) if c.starts_with("42") => ExecutionErrorKind::Syntax,
            Some(c) if c.starts_with("08") => ExecutionErrorKind::Connectivity,
            Some(_) => ExecutionErrorKind::Other,
            None if err.is_closed() => ExecutionErrorKind::Connectivity,
            None => ExecutionErrorKind::Other,
        };
        let message = match err.as_db_error() {
            Some(db) => db.message().to_string(),
            None => err.to_string(),
        };
        ProwlError::execution(kind, code, message)
    }
}
