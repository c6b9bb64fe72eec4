use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roadflow_core::Error;
use tracing::error;

use super::responses::Failure;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Everything a handler can fail with. Request-level failures keep the
/// 200 `success: false` envelope the front end reads; internal faults are
/// logged in full and answered with a generic message.
#[derive(Debug)]
pub enum ApiError {
    Engine(Error),
    InvalidRequest(String),
    NotFound(String),
    Timeout,
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Cancelled => ApiError::Timeout,
            err => ApiError::Engine(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Engine(err) if err.is_request_error() => (StatusCode::OK, err.to_string()),
            ApiError::Engine(err) => {
                error!(error = %err, "engine fault while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_owned())
            }
            ApiError::InvalidRequest(message) => (StatusCode::OK, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_owned()),
            ApiError::Internal(detail) => {
                error!(%detail, "internal fault while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_owned())
            }
        };
        (status, Json(Failure::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_keep_ok_status() {
        let response = ApiError::from(Error::SameJunction(4)).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ApiError::InvalidRequest("Missing field 'to'".into()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn faults_map_to_server_statuses() {
        let response = ApiError::from(Error::InvalidData("secret path".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::from(Error::Cancelled).into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let response = ApiError::NotFound("Junction 9 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
