use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::Serialize;

use thiserror::Error;

use crate::repo::RepoError;

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Body of every intake response
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub success: bool,
    pub message: String,
}

impl IntakeResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IntakeError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// The submission was already received
    #[error("{0}")]
    Duplicate(String),

    #[error("Server error")]
    Repo(#[from] RepoError),
}

impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate(_) => StatusCode::BAD_REQUEST,
            Self::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Repo(e) = self {
            tracing::error!(error.cause_chain = ?e, "Failed to handle submission");
        }
        HttpResponse::build(self.status_code()).json(IntakeResponse::failure(self.to_string()))
    }
}
