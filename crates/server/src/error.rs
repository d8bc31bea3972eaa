use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use textconvert_common::ConverterError;
use tracing::error;

use crate::types::ErrorResponse;

/// HTTP-facing wrapper around the converter error taxonomy
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ConverterError);

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self(ConverterError::invalid_input(format!("Invalid form data: {}", e)))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            detail: self.0.to_string(),
        })
    }
}
