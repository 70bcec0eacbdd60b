// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Windows DNS API Server
//!
//! A lightweight HTTP REST API server that manages Windows DNS records by
//! running local dnscmd commands. Zone data lives on the DNS server; this
//! process keeps no state of its own.

use anyhow::Context;
use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Import from the library
use windns_api::{
    config::Config,
    dnscmd::DnscmdExecutor,
    handlers, metrics, middleware,
    records::RecordMutator,
    types::{AppState, MessageResponse},
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::welcome,
        handlers::set_record,
        handlers::edit_record,
        handlers::remove_record,
    ),
    components(
        schemas(
            windns_api::types::MessageResponse,
        )
    ),
    tags(
        (name = "records", description = "Record management endpoints"),
        (name = "server", description = "Server endpoints")
    ),
    info(
        title = "Windows DNS API",
        version = "0.1.0",
        description = "HTTP REST API for managing Windows DNS records via dnscmd",
        license(name = "MIT")
    )
)]
struct ApiDoc;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Metrics endpoint for Prometheus scraping
async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(metrics_text) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            metrics_text,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new(format!(
                "Failed to gather metrics: {}",
                e
            ))),
        )
            .into_response(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("starting windows dns api server v{}", env!("CARGO_PKG_VERSION"));

    // initialize metrics
    metrics::init_metrics();

    // get configuration from environment
    let config = match Config::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return Err(anyhow::anyhow!("invalid configuration: {}", e));
        }
    };

    info!("api port: {}", config.api_port);
    info!(
        "dnscmd path: {}",
        config.dnscmd_path.as_deref().unwrap_or("dnscmd")
    );
    info!(
        "dns server: {}",
        config.dns_server.as_deref().unwrap_or("(local)")
    );
    info!("dnscmd timeout: {:?}", config.dnscmd_timeout);
    info!("set route mode: {}", config.set_mode);

    // create dnscmd executor and record workflows
    let executor = DnscmdExecutor::new(
        config.dnscmd_path.clone(),
        config.dns_server.clone(),
        config.dnscmd_timeout,
    );
    let mutator = Arc::new(RecordMutator::new(Arc::new(executor)));

    // create application state
    let state = AppState {
        mutator,
        set_mode: config.set_mode,
    };

    // build main router
    let app = handlers::router(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(axum_middleware::from_fn(middleware::track_metrics))
        .layer(TraceLayer::new_for_http());

    // start server
    let addr = format!("0.0.0.0:{}", config.api_port);

    info!("windows dns api server listening on {}", addr);
    info!("swagger ui available at http://{}/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
