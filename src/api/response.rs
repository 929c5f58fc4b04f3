//! Response types for the Fair Share API.
//!
//! Calculation endpoints answer errors with [`ApiError`]; the share
//! endpoints mirror the share store and answer with a bare `{error}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::codec::{LinkKind, ShareId, StateSource};
use crate::error::{FairShareError, FieldError, StoreError};
use crate::models::ShareInput;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            fields: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response listing every failing field.
    pub fn validation_error(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::new("VALIDATION_ERROR", message)
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<FairShareError> for ApiErrorResponse {
    fn from(error: FairShareError) -> Self {
        match error {
            FairShareError::Validation(validation) => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::validation_error(validation.message, validation.fields),
            },
            FairShareError::RateLimited => ApiErrorResponse {
                status: StatusCode::TOO_MANY_REQUESTS,
                error: ApiError::new("RATE_LIMITED", error.to_string()),
            },
            FairShareError::Decode(decode) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("DECODE_ERROR", "Invalid share link", decode.to_string()),
            },
            FairShareError::Store(store) => ApiErrorResponse {
                status: store_status(&store),
                error: ApiError::with_details("STORE_ERROR", "Share store error", store.to_string()),
            },
            FairShareError::ConfigNotFound { .. } | FairShareError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
        }
    }
}

/// Error body used by the share endpoints, matching the share store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareErrorBody {
    /// Human-readable reason.
    pub error: String,
}

/// Share endpoint error with HTTP status code.
pub struct ShareErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub body: ShareErrorBody,
}

impl ShareErrorResponse {
    /// Creates a `400 Bad Request` with the given reason.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ShareErrorBody {
                error: error.into(),
            },
        }
    }
}

impl IntoResponse for ShareErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<StoreError> for ShareErrorResponse {
    fn from(error: StoreError) -> Self {
        let message = match &error {
            StoreError::NotFound { .. } => "Share not found".to_string(),
            StoreError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self {
            status: store_status(&error),
            body: ShareErrorBody { error: message },
        }
    }
}

/// HTTP status for a store failure.
fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        StoreError::Rejected { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        StoreError::Unreachable { .. } | StoreError::MalformedBody { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// Body of a successful `POST /share`.
#[derive(Debug, Clone, Serialize)]
pub struct ShareCreated {
    /// The new share id.
    pub id: ShareId,
    /// A link that opens the shared state.
    pub url: String,
    /// Always `short` for links issued by this server.
    pub kind: LinkKind,
}

/// Body of `GET /restore`.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreResponse {
    /// Where the state came from.
    pub source: StateSource,
    /// The restored input.
    pub input: ShareInput,
    /// True if the input can be computed without changes.
    pub computable: bool,
    /// Why a preferred source could not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldIssue, ValidationError};

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("fields"));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let error: ApiErrorResponse = FairShareError::from(ValidationError::new(vec![
            FieldError::IncomeA {
                issue: FieldIssue::Missing,
            },
            FieldError::NoExpenses,
        ]))
        .into();

        assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.error.code, "VALIDATION_ERROR");
        assert_eq!(error.error.fields.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_rate_limited_maps_to_429() {
        let error: ApiErrorResponse = FairShareError::RateLimited.into();
        assert_eq!(error.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(error.error.code, "RATE_LIMITED");
    }

    #[test]
    fn test_store_errors_map_to_share_statuses() {
        let not_found: ShareErrorResponse = StoreError::NotFound {
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.body.error, "Share not found");

        let rejected: ShareErrorResponse = StoreError::Rejected {
            status: 400,
            message: "Invalid data format".to_string(),
        }
        .into();
        assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejected.body.error, "Invalid data format");

        let invalid: ShareErrorResponse = StoreError::InvalidId {
            id: "../x".to_string(),
        }
        .into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    }
}
