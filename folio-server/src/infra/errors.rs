use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::{FolioError, api::types::ErrorResponse, reconcile::ReconcileError};
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });

        (self.status, body).into_response()
    }
}

impl From<ReconcileError> for AppError {
    fn from(err: ReconcileError) -> Self {
        let message = err.to_string();
        match err {
            ReconcileError::Unauthorized => Self::unauthorized(message),
            ReconcileError::MissingInput(_)
            | ReconcileError::InvalidFolderUrl => Self::bad_request(message),
            ReconcileError::IntegrationNotConfigured
            | ReconcileError::ExternalService(_)
            | ReconcileError::Storage(_) => Self::internal(message),
        }
    }
}

impl From<FolioError> for AppError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::NotFound(msg) => Self::not_found(msg),
            FolioError::Database(msg) => {
                tracing::error!(error = %msg, "database operation failed");
                Self::internal(format!("Storage error: {msg}"))
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_errors_map_to_http_status() {
        let cases = [
            (ReconcileError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ReconcileError::MissingInput("folderUrl".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ReconcileError::InvalidFolderUrl, StatusCode::BAD_REQUEST),
            (
                ReconcileError::IntegrationNotConfigured,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ReconcileError::ExternalService("timeout".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ReconcileError::Storage("constraint".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn underlying_messages_are_propagated() {
        let err = AppError::from(ReconcileError::ExternalService(
            "File not found: abc".into(),
        ));
        assert!(err.message.contains("File not found: abc"));
    }
}
