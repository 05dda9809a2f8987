use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

use campground_services::{StoreError, ValidationFailure};

use crate::views;

/// Message shown when nothing more specific can be said
pub const GENERIC_ERROR_MESSAGE: &str = "Error, Something Went Wrong!";

/// Every failure a handler can produce.
///
/// Its [`ResponseError`] implementation is the single place errors turn into
/// pages: it resolves the status code and message and renders the error view.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted body did not satisfy its schema
    #[error("{0}")]
    Validation(String),

    /// The route or the record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Persistence failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Error for paths no route matches
    pub fn page_not_found() -> Self {
        AppError::NotFound("Page Not Found".to_string())
    }

    /// Error for a campground id that resolves to nothing
    pub fn campground_not_found() -> Self {
        AppError::NotFound("Campground Not Found".to_string())
    }

    /// Error for a review id that resolves to nothing under its campground
    pub fn review_not_found() -> Self {
        AppError::NotFound("Review Not Found".to_string())
    }

    /// The message shown to the user
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) if !msg.is_empty() => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        log::debug!("Rejected submission: {}", failure);
        AppError::Validation(failure.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(views::error_page(status, &self.public_message()).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("\"title\" is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::page_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(StoreError::Database(sqlx_pool_closed())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_their_cause() {
        let error = AppError::Store(StoreError::Database(sqlx_pool_closed()));
        assert_eq!(error.public_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_empty_messages_fall_back_to_generic() {
        assert_eq!(
            AppError::NotFound(String::new()).public_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_validation_failure_keeps_joined_messages() {
        let error = AppError::from(ValidationFailure::single("\"body\" is required"));
        assert_eq!(error.public_message(), "\"body\" is required");
    }

    fn sqlx_pool_closed() -> sqlx::Error {
        sqlx::Error::PoolClosed
    }
}
