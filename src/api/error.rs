use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::error::BalanceError;

/// Error returned by API handlers. Upstream detail is logged, never sent.
#[derive(Debug)]
pub enum ApiError {
    MissingAddress,
    InvalidQuery(String),
    Balance(BalanceError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<BalanceError> for ApiError {
    fn from(error: BalanceError) -> Self {
        ApiError::Balance(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingAddress | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Balance(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Balance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingAddress => "Address is required".to_string(),
            ApiError::InvalidQuery(detail) => detail.clone(),
            ApiError::Balance(BalanceError::Fetch(_)) => "Failed to fetch balances".to_string(),
            ApiError::Balance(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
