//! API error type with HTTP status mapping.
//!
//! Missing contacts are not errors here; handlers answer those with a 200
//! payload. Only storage faults reach this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error")]
    Database(#[source] StoreError),

    #[error("connection pool error")]
    Pool(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_unavailable() {
            Self::Pool(err)
        } else {
            Self::Database(err)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Pool(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                "internal error"
            }
            Self::Pool(e) => {
                tracing::error!(error = %e, "no database connection available");
                "database unavailable"
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
