use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_types::errors::{ApiError, ApplicationErrorResponse};
use serde::Serialize;

use crate::logger;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid host for socket: {0}")]
    AddressError(#[from] std::net::AddrParseError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error while opening the session store: {0}")]
    StorageError(String),
}

/// Application error rendered as an HTTP response.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    code: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: ErrorDetail {
                message: self.message.clone(),
                code: format!("{}", self.status.as_u16()),
            },
        });
        (self.status, body).into_response()
    }
}

impl From<ApplicationErrorResponse> for HttpError {
    fn from(error: ApplicationErrorResponse) -> Self {
        let (status, api_error) = match error {
            ApplicationErrorResponse::Unauthorized(e) => (StatusCode::UNAUTHORIZED, e),
            ApplicationErrorResponse::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
            ApplicationErrorResponse::NotFound(e) => (StatusCode::NOT_FOUND, e),
            ApplicationErrorResponse::InternalServerError(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e)
            }
        };
        Self {
            status,
            message: api_error.error_message,
        }
    }
}

impl From<error_stack::Report<ApplicationErrorResponse>> for HttpError {
    fn from(report: error_stack::Report<ApplicationErrorResponse>) -> Self {
        logger::error!(error = ?report);
        report.current_context().clone().into()
    }
}

/// Shorthand for the 500 every storage failure collapses into.
pub fn internal_error(message: impl Into<String>) -> ApplicationErrorResponse {
    ApplicationErrorResponse::InternalServerError(ApiError {
        sub_code: "INTERNAL_SERVER_ERROR".to_string(),
        error_identifier: 500,
        error_message: message.into(),
        error_object: None,
    })
}

pub fn unauthorized(message: impl Into<String>) -> ApplicationErrorResponse {
    ApplicationErrorResponse::Unauthorized(ApiError {
        sub_code: "UNAUTHORIZED".to_string(),
        error_identifier: 401,
        error_message: message.into(),
        error_object: None,
    })
}
