//! Error → JSON response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::FinderError;

impl FinderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FinderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FinderError::NotFound(_) => StatusCode::NOT_FOUND,
            FinderError::Configuration(_) | FinderError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for FinderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            FinderError::Configuration(msg) => error!("Configuration error: {}", msg),
            FinderError::Upstream(msg) => error!("Geocoding failed: {}", msg),
            FinderError::InvalidRequest(msg) | FinderError::NotFound(msg) => {
                warn!("Search rejected ({}): {}", status, msg)
            }
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
