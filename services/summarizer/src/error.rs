use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::models::ErrorBody;

pub const EMPTY_INPUT_DETAIL: &str = "Text cannot be empty";
pub const UPSTREAM_ERROR_DETAIL: &str = "AI Service Error";
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// Outcome of a failed summarization, independent of the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Text cannot be empty")]
    EmptyInput,
    #[error("Upstream service returned HTTP {status}: {body}")]
    UpstreamServiceError { status: u16, body: String },
    #[error("Unexpected failure: {0}")]
    UnexpectedFailure(String),
}

impl SummarizeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::EmptyInput => StatusCode::BAD_REQUEST,
            SummarizeError::UpstreamServiceError { .. } | SummarizeError::UnexpectedFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show callers. Upstream bodies and error text never leave the process.
    pub fn public_detail(&self) -> &'static str {
        match self {
            SummarizeError::EmptyInput => EMPTY_INPUT_DETAIL,
            SummarizeError::UpstreamServiceError { .. } => UPSTREAM_ERROR_DETAIL,
            SummarizeError::UnexpectedFailure(_) => INTERNAL_ERROR_DETAIL,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Summarize(err) => (err.status_code(), err.public_detail().to_string()),
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
