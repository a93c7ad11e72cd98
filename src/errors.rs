use axum::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::EmptyName => Self::bad_request(err.to_string()),
            TrackerError::IdsExhausted => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failures reading or writing the persisted state blob.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// The blob is not JSON or does not match the schema.
    Malformed(serde_json::Error),
    /// The blob parsed but breaks an invariant.
    Invalid(String),
    /// The background file writer has stopped.
    WriterClosed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage i/o failed: {err}"),
            StorageError::Malformed(err) => write!(f, "stored state is malformed: {err}"),
            StorageError::Invalid(reason) => write!(f, "stored state is invalid: {reason}"),
            StorageError::WriterClosed => f.write_str("state file writer has stopped"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Malformed(err) => Some(err),
            StorageError::Invalid(_) | StorageError::WriterClosed => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    EmptyName,
    /// The largest stored habit id leaves no room for another.
    IdsExhausted,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::EmptyName => f.write_str("habit name must not be empty"),
            TrackerError::IdsExhausted => f.write_str("no habit ids left to assign"),
        }
    }
}

impl std::error::Error for TrackerError {}
