use crate::errors::Error;
use crate::validation::ValidationError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

const STORE_FAILURE_MESSAGE: &str = "Error while accessing the student database";

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError({}, {})", self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

/// Helper function to create API errors
pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    ApiError {
        message: message.to_string(),
        code: status.as_u16(),
    }
}

/// Single translation point from crate errors to HTTP responses
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Validation(_) => {
                warn!("Rejected input: {}", err);
                api_error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
            }
            Error::InvalidName(_) | Error::NotFound(_) => {
                warn!("{}", err);
                api_error(StatusCode::NOT_FOUND, &err.to_string())
            }
            Error::InvalidRange(_) => {
                warn!("{}", err);
                api_error(StatusCode::BAD_REQUEST, &err.to_string())
            }
            Error::DieselError(_) => {
                error!("Store failure: {}", err);
                api_error(StatusCode::BAD_REQUEST, STORE_FAILURE_MESSAGE)
            }
            Error::PoolError(_) => {
                error!("Store unavailable: {}", err);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE_MESSAGE)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Error::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        api_error(rejection.status(), &rejection.body_text())
    }
}
