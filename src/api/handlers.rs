//! HTTP request handlers for the Fair Share API.
//!
//! This module contains the handler functions for all API endpoints.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, RawQuery, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::codec::{
    LinkKind, MemoryCache, ShareId, ShareStore, build_share_url, check_input_limits,
    restore_state,
};
use crate::models::ShareInput;

use super::response::{
    ApiError, ApiErrorResponse, RestoreResponse, ShareCreated, ShareErrorResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/share", post(create_share_handler))
        .route("/share/:id", get(get_share_handler))
        .route("/restore", get(restore_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a [`ShareInput`] and returns the share breakdown, or every
/// validation failure at once. Rate limiting is per client address;
/// requests without connection info share one window.
async fn calculate_handler(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<ShareInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let caller = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match state.calculator().compute_for(caller, &input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                expense_count = result.expenses.len(),
                total = %result.totals.total,
                percent_a = result.totals.percent_a,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /share endpoint.
///
/// Stores the submitted state and answers `201` with its id and a short
/// link on the configured public URL.
async fn create_share_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShareInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Rejected share body"
            );
            return ShareErrorResponse::bad_request("Invalid data format").into_response();
        }
    };

    if let Err(err) = check_input_limits(&input, &state.config().limits) {
        warn!(correlation_id = %correlation_id, error = %err, "Share body over limits");
        return ShareErrorResponse::bad_request(err.to_string()).into_response();
    }

    match state.codec().publish(&input).await {
        Ok(id) => {
            let url = build_share_url(&state.config().server.public_url, &id);
            info!(correlation_id = %correlation_id, share_id = %id, "Share created");
            (
                StatusCode::CREATED,
                Json(ShareCreated {
                    id,
                    url,
                    kind: LinkKind::Short,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Failed to store share");
            ShareErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /share/{id} endpoint.
///
/// Returns the stored body exactly as it was submitted.
async fn get_share_handler(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let fetched = match ShareId::parse(&raw_id) {
        Ok(id) => state.codec().store().fetch(&id).await,
        Err(err) => Err(err),
    };

    match fetched {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            info!(error = %err, "Share lookup failed");
            ShareErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /restore endpoint.
///
/// Applies the startup selection policy to the request's query string and
/// reports which source won. The server has no form cache.
async fn restore_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let reference = format!("?{}", query.unwrap_or_default());
    let restored = restore_state::<_, MemoryCache>(
        &reference,
        state.codec(),
        None,
        &state.config().limits,
    )
    .await;

    let error = restored
        .decode_error
        .map(|err| err.to_string())
        .or_else(|| restored.store_error.map(|err| err.to_string()));

    Json(RestoreResponse {
        source: restored.source,
        input: restored.input,
        computable: restored.computable,
        error,
    })
    .into_response()
}
