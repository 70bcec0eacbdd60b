// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for windns-api
//!
//! This module provides metrics for monitoring the Windows DNS API server:
//! - HTTP request metrics (count, duration, status codes)
//! - Record operation metrics (adds, replaces, removes and how they ended)
//! - dnscmd command execution metrics

use lazy_static::lazy_static;
use prometheus::{
    opts, register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec,
    TextEncoder,
};

use crate::records::{Operation, OutcomeStatus};

/// How a record operation ended, exported as the `result` label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    Success,
    Error,
    /// A replace that removed the old record but failed to add the new one
    Partial,
    /// Rejected before any dnscmd invocation
    Invalid,
}

impl OperationResult {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationResult::Success => "success",
            OperationResult::Error => "error",
            OperationResult::Partial => "partial",
            OperationResult::Invalid => "invalid",
        }
    }
}

impl From<OutcomeStatus> for OperationResult {
    fn from(status: OutcomeStatus) -> Self {
        match status {
            OutcomeStatus::Succeeded => OperationResult::Success,
            OutcomeStatus::Failed => OperationResult::Error,
            OutcomeStatus::PartiallyFailed => OperationResult::Partial,
        }
    }
}

lazy_static! {
    /// HTTP request counter by method, path, and status code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "windns_http_requests_total",
            "Total number of HTTP requests processed"
        ),
        &["method", "path", "status"]
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration histogram
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "windns_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    /// Record operations counter by operation and result
    pub static ref RECORD_OPERATIONS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "windns_record_operations_total",
            "Total number of record operations"
        ),
        &["operation", "result"]
    )
    .expect("Failed to create RECORD_OPERATIONS_TOTAL metric");

    /// dnscmd command counter by command and result
    pub static ref DNSCMD_COMMANDS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "windns_dnscmd_commands_total",
            "Total number of dnscmd commands executed"
        ),
        &["command", "result"]
    )
    .expect("Failed to create DNSCMD_COMMANDS_TOTAL metric");

    /// dnscmd command duration histogram
    pub static ref DNSCMD_COMMAND_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "windns_dnscmd_command_duration_seconds",
        "dnscmd command execution duration in seconds",
        &["command"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create DNSCMD_COMMAND_DURATION_SECONDS metric");

    /// Application info metric
    pub static ref APP_INFO: CounterVec = register_counter_vec!(
        opts!(
            "windns_app_info",
            "Application information"
        ),
        &["version"]
    )
    .expect("Failed to create APP_INFO metric");
}

/// Initialize metrics with application info
pub fn init_metrics() {
    APP_INFO
        .with_label_values(&[env!("CARGO_PKG_VERSION")])
        .inc();
}

/// Generate metrics output in Prometheus format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration);
}

/// Record the end of a record operation
pub fn record_record_operation(operation: Operation, result: OperationResult) {
    RECORD_OPERATIONS_TOTAL
        .with_label_values(&[operation.as_str(), result.as_str()])
        .inc();
}

/// Record a dnscmd command execution
pub fn record_dnscmd_command(command: &str, success: bool, duration: f64) {
    let result = if success { "success" } else { "error" };
    DNSCMD_COMMANDS_TOTAL
        .with_label_values(&[command, result])
        .inc();
    DNSCMD_COMMAND_DURATION_SECONDS
        .with_label_values(&[command])
        .observe(duration);
}
