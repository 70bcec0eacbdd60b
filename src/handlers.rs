// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS record API handlers
//!
//! Every route takes its parameters from the path and answers with a
//! `{"message": ...}` body: 200 on success, 400 on any failure.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use crate::{
    records::{Operation, RecordRequest},
    types::{outcome_response, ApiError, AppState, MessageResponse},
};

/// Message returned by `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to the Windows DNS API";

/// Build the record API router
///
/// Unmatched routes fall through to [`not_found`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route(
            "/dns/{zone_name}/{dns_type}/{node_name}/set/{address}",
            post(set_record),
        )
        .route(
            "/dns/{zone_name}/{dns_type}/{node_name}/edit/{address}",
            post(edit_record),
        )
        .route(
            "/dns/{zone_name}/{dns_type}/{node_name}/remove",
            post(remove_record),
        )
        .fallback(not_found)
        .with_state(state)
}

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    ),
    tag = "server"
)]
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(WELCOME_MESSAGE))
}

/// Set a record
///
/// Adds the record, or replaces existing records of the same type at the
/// node, depending on the configured set mode.
#[utoipa::path(
    post,
    path = "/dns/{zone_name}/{dns_type}/{node_name}/set/{address}",
    params(
        ("zone_name" = String, Path, description = "Zone name"),
        ("dns_type" = String, Path, description = "Record type (e.g., A, CNAME)"),
        ("node_name" = String, Path, description = "Node name within the zone"),
        ("address" = String, Path, description = "Record data (IPv4 address for A records)")
    ),
    responses(
        (status = 200, description = "Record set", body = MessageResponse),
        (status = 400, description = "Invalid input or dnscmd failure", body = MessageResponse)
    ),
    tag = "records"
)]
pub async fn set_record(
    State(state): State<AppState>,
    Path((zone_name, dns_type, node_name, address)): Path<(String, String, String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!("set route running in {} mode", state.set_mode);
    let request = RecordRequest::new(zone_name, dns_type, node_name, Some(address));
    let outcome = state
        .mutator
        .mutate(state.set_mode.operation(), &request)
        .await;
    outcome_response(outcome)
}

/// Replace a record
///
/// Deletes every record of the type at the node, then adds the new one.
#[utoipa::path(
    post,
    path = "/dns/{zone_name}/{dns_type}/{node_name}/edit/{address}",
    params(
        ("zone_name" = String, Path, description = "Zone name"),
        ("dns_type" = String, Path, description = "Record type (e.g., A, CNAME)"),
        ("node_name" = String, Path, description = "Node name within the zone"),
        ("address" = String, Path, description = "Record data (IPv4 address for A records)")
    ),
    responses(
        (status = 200, description = "Record replaced", body = MessageResponse),
        (status = 400, description = "Invalid input, dnscmd failure, or old record removed but new one not added", body = MessageResponse)
    ),
    tag = "records"
)]
pub async fn edit_record(
    State(state): State<AppState>,
    Path((zone_name, dns_type, node_name, address)): Path<(String, String, String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = RecordRequest::new(zone_name, dns_type, node_name, Some(address));
    let outcome = state.mutator.mutate(Operation::Replace, &request).await;
    outcome_response(outcome)
}

/// Remove a record
#[utoipa::path(
    post,
    path = "/dns/{zone_name}/{dns_type}/{node_name}/remove",
    params(
        ("zone_name" = String, Path, description = "Zone name"),
        ("dns_type" = String, Path, description = "Record type (e.g., A, CNAME)"),
        ("node_name" = String, Path, description = "Node name within the zone")
    ),
    responses(
        (status = 200, description = "Record removed", body = MessageResponse),
        (status = 400, description = "Invalid input or dnscmd failure", body = MessageResponse)
    ),
    tag = "records"
)]
pub async fn remove_record(
    State(state): State<AppState>,
    Path((zone_name, dns_type, node_name)): Path<(String, String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = RecordRequest::new(zone_name, dns_type, node_name, None);
    let outcome = state.mutator.mutate(Operation::Remove, &request).await;
    outcome_response(outcome)
}

/// Fallback for unmatched routes
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    info!("No route for {}", uri.path());
    ApiError::RouteNotFound
}
