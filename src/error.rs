use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every API error, e.g.
/// `{"error": "Beach not found: Atlantis", "code": "BEACH_NOT_FOUND"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl<E: HttpError> From<&E> for ErrorResponse {
    fn from(err: &E) -> Self {
        Self {
            error: err.to_string(),
            code: err.error_code().to_string(),
        }
    }
}

/// Errors the API reports to clients: a status plus a stable machine code
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;
}

/// Render an `HttpError`. Upstream and server faults log at error, client
/// mistakes at warn.
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let body = ErrorResponse::from(&err);

    if status.is_server_error() {
        tracing::error!(error = %body.error, status = %status, code = %body.code, "API error");
    } else {
        tracing::warn!(error = %body.error, status = %status, code = %body.code, "API error");
    }

    (status, Json(body)).into_response()
}

/// Implement `IntoResponse` for an `HttpError` type
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("Beach closed: {0}")]
    struct BeachClosed(&'static str);

    impl HttpError for BeachClosed {
        fn status_code(&self) -> StatusCode {
            StatusCode::CONFLICT
        }

        fn error_code(&self) -> &'static str {
            "BEACH_CLOSED"
        }
    }

    impl_into_response!(BeachClosed);

    #[test]
    fn test_error_response_from_error() {
        let body = ErrorResponse::from(&BeachClosed("Binz"));
        assert_eq!(body.error, "Beach closed: Binz");
        assert_eq!(body.code, "BEACH_CLOSED");
    }

    #[test]
    fn test_into_response_status() {
        let response = BeachClosed("Sellin").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
