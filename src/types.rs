// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common types and errors used throughout the windns-api library

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    config::SetMode,
    records::{MutationOutcome, OutcomeStatus, RecordMutator},
};

/// Message returned for requests that match no route
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Could not get the requested route.";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Record workflow runner
    pub mutator: Arc<RecordMutator>,
    /// Operation performed by the `/set/` route
    pub set_mode: SetMode,
}

/// JSON envelope for every response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// API error type
///
/// The display text is the exact message sent to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Failed(String),

    #[error("{0}")]
    PartiallyFailed(String),

    #[error("{}", ROUTE_NOT_FOUND_MESSAGE)]
    RouteNotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // no distinction between caller and server faults
        let status = match &self {
            ApiError::Failed(_) => StatusCode::BAD_REQUEST,
            ApiError::PartiallyFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::BAD_REQUEST,
        };

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

/// Convert a workflow outcome into a handler result
pub fn outcome_response(outcome: MutationOutcome) -> Result<Json<MessageResponse>, ApiError> {
    match outcome.status {
        OutcomeStatus::Succeeded => Ok(Json(MessageResponse::new(outcome.message))),
        OutcomeStatus::Failed => Err(ApiError::Failed(outcome.message)),
        OutcomeStatus::PartiallyFailed => Err(ApiError::PartiallyFailed(outcome.message)),
    }
}
