use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::services::render;

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// Edit or delete target is gone. Answered with a redirect to the list.
    #[error("entry not found")]
    NotFound,
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}

/// Undecodable form bodies (duplicate fields, wrong content type) get the same 400 page.
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                tracing::debug!("entry not found, redirecting to /entries");
                Redirect::to("/entries").into_response()
            }
            AppError::MalformedInput(msg) => {
                tracing::warn!("rejected submission: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Html(render::error_page("Invalid input", &msg)),
                )
                    .into_response()
            }
            AppError::Storage(e) => {
                tracing::error!("storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::error_page(
                        "Something went wrong",
                        "The journal could not be read or written. Please try again.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
