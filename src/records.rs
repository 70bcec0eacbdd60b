// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS record mutation workflows
//!
//! This module drives the three record operations end to end:
//! - Adding a record (`dnscmd /recordadd`)
//! - Replacing a record (forced `/recorddelete`, then `/recordadd`)
//! - Removing a record (forced `/recorddelete`)
//!
//! Each workflow validates its input, builds the dnscmd invocations once, and
//! runs them in order while holding the lock for the record. The first failing
//! invocation ends the workflow. A replace whose delete went through but whose
//! add failed is reported as [`OutcomeStatus::PartiallyFailed`], since the old
//! record no longer exists at that point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    commands,
    dnscmd::{CommandRunner, DnscmdError},
    locks::{RecordKey, RecordLocks},
    metrics::{self, OperationResult},
    validation,
};

/// A requested change to a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Zone name (e.g., "example.com")
    pub zone_name: String,

    /// Record type (e.g., "A", "CNAME")
    pub record_type: String,

    /// Node name within the zone (e.g., "www")
    pub host_name: String,

    /// Record data; required to add or replace, ignored on remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl RecordRequest {
    pub fn new(
        zone_name: impl Into<String>,
        record_type: impl Into<String>,
        host_name: impl Into<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            zone_name: zone_name.into(),
            record_type: record_type.into(),
            host_name: host_name.into(),
            address,
        }
    }

    fn key(&self) -> RecordKey {
        RecordKey::new(&self.zone_name, &self.host_name, &self.record_type)
    }

    fn address_or_empty(&self) -> &str {
        self.address.as_deref().unwrap_or_default()
    }
}

/// Record operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Add a record alongside whatever already exists
    Add,
    /// Delete every record of the type at the node, then add the new one
    Replace,
    /// Delete every record of the type at the node
    Remove,
}

impl Operation {
    /// Whether this operation needs a record address
    pub fn requires_address(self) -> bool {
        matches!(self, Operation::Add | Operation::Replace)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Replace => "replace",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    /// A replace removed the old record but could not add the new one
    PartiallyFailed,
}

/// Result of one workflow, as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl MutationOutcome {
    fn succeeded(message: String) -> Self {
        Self {
            status: OutcomeStatus::Succeeded,
            message,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            message,
        }
    }

    fn partially_failed(message: String) -> Self {
        Self {
            status: OutcomeStatus::PartiallyFailed,
            message,
        }
    }

    pub fn success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }
}

/// Confirmation returned when a workflow completes
fn success_message(operation: Operation, request: &RecordRequest) -> String {
    match operation {
        Operation::Add | Operation::Replace => format!(
            "The alias {} record {}.{} was successfully updated to '{}'.",
            request.record_type,
            request.host_name,
            request.zone_name,
            request.address_or_empty()
        ),
        Operation::Remove => format!(
            "The {} record {}.{} was successfully removed.",
            request.record_type, request.host_name, request.zone_name
        ),
    }
}

/// Error text returned when step `step` (zero-based) of a workflow fails
fn failure_outcome(
    operation: Operation,
    step: usize,
    request: &RecordRequest,
    err: &DnscmdError,
) -> MutationOutcome {
    match operation {
        Operation::Add => {
            MutationOutcome::failed(format!("Add record failed, error was: {}", err))
        }
        Operation::Replace if step == 0 => {
            MutationOutcome::failed(format!("Edit record failed, error was: {}", err))
        }
        Operation::Replace => MutationOutcome::partially_failed(format!(
            "Edit record partially failed, the existing {} record {}.{} was removed but the new record could not be added, error was: {}",
            request.record_type, request.host_name, request.zone_name, err
        )),
        Operation::Remove => MutationOutcome::failed(err.to_string()),
    }
}

/// Runs record workflows against a [`CommandRunner`]
pub struct RecordMutator {
    runner: Arc<dyn CommandRunner>,
    locks: RecordLocks,
}

impl RecordMutator {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            locks: RecordLocks::new(),
        }
    }

    /// Add a record
    pub async fn set(&self, request: &RecordRequest) -> MutationOutcome {
        self.mutate(Operation::Add, request).await
    }

    /// Replace whatever exists at the node and type with the new address
    pub async fn edit(&self, request: &RecordRequest) -> MutationOutcome {
        self.mutate(Operation::Replace, request).await
    }

    /// Remove every record of the type at the node
    pub async fn remove(&self, request: &RecordRequest) -> MutationOutcome {
        self.mutate(Operation::Remove, request).await
    }

    /// Validate, build and execute one workflow
    pub async fn mutate(&self, operation: Operation, request: &RecordRequest) -> MutationOutcome {
        info!(
            "{} {} record {}.{} {}",
            operation,
            request.record_type,
            request.host_name,
            request.zone_name,
            request.address_or_empty()
        );

        if let Err(e) = validation::validate_request(operation, request) {
            warn!("Rejected {} request: {}", operation, e);
            metrics::record_record_operation(operation, OperationResult::Invalid);
            return MutationOutcome::failed(e.to_string());
        }

        let sequence = commands::build(operation, request);
        let _guard = self.locks.lock(request.key()).await;

        for (step, command) in sequence.iter().enumerate() {
            if let Err(e) = self.runner.run(command).await {
                error!(
                    "dnscmd {} failed at step {} of {} for {}.{}: {}",
                    command.name(),
                    step + 1,
                    sequence.len(),
                    request.host_name,
                    request.zone_name,
                    e
                );
                let outcome = failure_outcome(operation, step, request, &e);
                metrics::record_record_operation(operation, outcome.status.into());
                return outcome;
            }
        }

        info!(
            "{} of {} record {}.{} succeeded",
            operation, request.record_type, request.host_name, request.zone_name
        );
        let outcome = MutationOutcome::succeeded(success_message(operation, request));
        metrics::record_record_operation(operation, outcome.status.into());
        outcome
    }
}
