//! Server Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures a handler can bubble up with `?`.
///
/// These are the unexpected ones (database, template, IO). Expected
/// outcomes like a bad password or a duplicate email are not errors;
/// they become flash notices and redirects in the handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] abonflow_store::StoreError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Une erreur interne est survenue.",
        )
            .into_response()
    }
}
