use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shortest_core::ShortenerError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            AppError::Unavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
            }
            AppError::Internal(message) => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        match value {
            ShortenerError::NotFound(_) => AppError::NotFound("resource not found".to_string()),
            ShortenerError::InvalidShortCode(_) => AppError::Validation(value.to_string()),
            ShortenerError::GenerationExhausted { .. } => AppError::Unavailable(value.to_string()),
            ShortenerError::Storage(_) => AppError::Internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortener_errors_map_to_status_codes() {
        let cases = [
            (ShortenerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ShortenerError::InvalidShortCode("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShortenerError::GenerationExhausted { attempts: 3 },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ShortenerError::Storage("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
