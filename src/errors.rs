use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failures of the backing store. None of them are retried.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to create connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("failed to check out a connection: {0}")]
    Connection(#[source] diesel::r2d2::PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("todo store lock was poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Todo with ID {0} does not exist.")]
    NotFound(i32),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Percent complete must be an integer between 0 and 100, got {0}.")]
    PercentOutOfRange(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::PercentOutOfRange(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Repository(_)) | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorResponse { error })
    }
}
