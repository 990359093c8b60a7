use axum::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
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

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::internal(err)
    }
}

/// Failure of the initial `GET /summaries` fetch.
#[derive(Debug)]
pub enum LoadError {
    Transport(reqwest::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "failed to load summaries: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

/// Failure of a `POST /refresh` call.
#[derive(Debug)]
pub enum RefreshError {
    /// The backend answered with a non-2xx status. `message` already has the
    /// instructions appended, ready for display.
    Rejected { status: StatusCode, message: String },
    /// Non-2xx with a `null` body: nothing to show but the generic failure.
    Unreadable { status: StatusCode },
    /// The request never completed, or the success body was unreadable.
    Transport(reqwest::Error),
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, message } => {
                write!(f, "backend rejected refresh ({status}): {message}")
            }
            Self::Unreadable { status } => {
                write!(f, "backend rejected refresh ({status}) with a null error body")
            }
            Self::Transport(err) => write!(f, "refresh request failed: {err}"),
        }
    }
}

impl std::error::Error for RefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected { .. } | Self::Unreadable { .. } => None,
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
