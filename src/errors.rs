use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Failures from the pure ledger/streak core. Nothing here is transient,
/// so nothing is retried; callers translate into HTTP responses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid day: {0}")]
    InvalidDay(String),

    #[error("day {0} is in the future")]
    FutureDay(NaiveDate),

    #[error("unknown user: {0}")]
    UnknownUser(Uuid),
}

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

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
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

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidDay(_) | LedgerError::FutureDay(_) => {
                Self::bad_request(err.to_string())
            }
            LedgerError::UnknownUser(_) => Self::not_found(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
