//! Client-visible API errors.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("District not found")]
    DistrictNotFound,
    #[error("Year not found")]
    YearNotFound,
    #[error("No data available")]
    NoData,
    #[error("Not found")]
    RouteNotFound,
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ApiError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ApiError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DistrictNotFound
            | ApiError::YearNotFound
            | ApiError::NoData
            | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid("path", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid("query", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::DistrictNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NoData.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::invalid("year", "not an integer").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::YearNotFound.to_string(), "Year not found");
        assert_eq!(
            ApiError::invalid("year", "expected an integer").to_string(),
            "Invalid parameter 'year': expected an integer"
        );
    }
}
