// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! dnscmd command construction
//!
//! Turns a validated [`RecordRequest`] into the ordered list of dnscmd
//! invocations needed to carry out an [`Operation`]. dnscmd has no update
//! primitive, so a replace is a forced delete followed by an add.

use crate::records::{Operation, RecordRequest};

/// A single dnscmd invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsCommand {
    /// `dnscmd /recordadd <zone> <node> <type> <data>`
    RecordAdd {
        zone: String,
        node: String,
        record_type: String,
        data: String,
    },

    /// `dnscmd /recorddelete <zone> <node> <type> /f`
    ///
    /// Removes every record of `record_type` at `node` without prompting.
    RecordDelete {
        zone: String,
        node: String,
        record_type: String,
    },
}

impl DnsCommand {
    /// dnscmd sub-command name, used for logging and metrics labels
    pub fn name(&self) -> &'static str {
        match self {
            DnsCommand::RecordAdd { .. } => "recordadd",
            DnsCommand::RecordDelete { .. } => "recorddelete",
        }
    }

    /// Argument vector passed to dnscmd, excluding any server name
    pub fn args(&self) -> Vec<String> {
        match self {
            DnsCommand::RecordAdd {
                zone,
                node,
                record_type,
                data,
            } => vec![
                "/recordadd".to_string(),
                zone.clone(),
                node.clone(),
                record_type.clone(),
                data.clone(),
            ],
            DnsCommand::RecordDelete {
                zone,
                node,
                record_type,
            } => vec![
                "/recorddelete".to_string(),
                zone.clone(),
                node.clone(),
                record_type.clone(),
                "/f".to_string(),
            ],
        }
    }
}

/// Ordered dnscmd invocations making up one mutation
pub type MutationCommand = Vec<DnsCommand>;

fn record_add(request: &RecordRequest) -> DnsCommand {
    DnsCommand::RecordAdd {
        zone: request.zone_name.clone(),
        node: request.host_name.clone(),
        record_type: request.record_type.clone(),
        // validation guarantees an address for add and replace
        data: request.address.clone().unwrap_or_default(),
    }
}

fn record_delete(request: &RecordRequest) -> DnsCommand {
    DnsCommand::RecordDelete {
        zone: request.zone_name.clone(),
        node: request.host_name.clone(),
        record_type: request.record_type.clone(),
    }
}

/// Build the dnscmd invocations for an operation
///
/// The request must already have passed validation.
pub fn build(operation: Operation, request: &RecordRequest) -> MutationCommand {
    match operation {
        Operation::Add => vec![record_add(request)],
        Operation::Replace => vec![record_delete(request), record_add(request)],
        Operation::Remove => vec![record_delete(request)],
    }
}
