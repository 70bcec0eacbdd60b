// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! windns-api - HTTP REST API for managing Windows DNS records via dnscmd
//!
//! A lightweight library that adds, replaces and removes records on a
//! Windows DNS server by running the `dnscmd` administration tool.
//!
//! # Features
//!
//! - Strict validation of zone names, node names and A record addresses
//! - Add, replace (delete then add) and remove workflows
//! - Per-record serialization of concurrent mutations
//! - Bounded dnscmd execution with a configurable timeout
//! - Prometheus metrics integration
//!
//! # Usage
//!
//! This crate can be used as both a library and a standalone binary:
//!
//! ## As a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use windns_api::{DnscmdExecutor, RecordMutator, RecordRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let executor = DnscmdExecutor::new(None, None, Duration::from_secs(30));
//!     let mutator = RecordMutator::new(Arc::new(executor));
//!
//!     let request = RecordRequest::new("example.com", "A", "www", Some("192.0.2.1".to_string()));
//!     let outcome = mutator.set(&request).await;
//!     println!("{}: {}", outcome.success(), outcome.message);
//! }
//! ```
//!
//! ## Validation Only
//!
//! ```rust
//! use windns_api::validation::{is_valid_dns_name, is_valid_ipv4};
//!
//! assert!(is_valid_dns_name("example.com"));
//! assert!(!is_valid_dns_name("bad zone!"));
//! assert!(is_valid_ipv4("10.0.0.5"));
//! assert!(!is_valid_ipv4("192.168.01.1"));
//! ```
//!
//! ## As a Binary
//!
//! ```bash
//! cargo install windns-api
//! windns-api
//! ```

pub mod commands;
pub mod config;
pub mod dnscmd;
pub mod handlers;
pub mod locks;
pub mod metrics;
pub mod middleware;
pub mod records;
pub mod types;
pub mod validation;

// dnscmd execution
pub use dnscmd::{CommandRunner, DnscmdError, DnscmdExecutor};

// Record workflows
pub use records::{MutationOutcome, Operation, OutcomeStatus, RecordMutator, RecordRequest};

// Configuration
pub use config::{Config, SetMode};

// Error and response types
pub use types::{ApiError, AppState, MessageResponse};

// Test modules
#[cfg(test)]
mod test_mocks;

#[cfg(test)]
mod dnscmd_test;
#[cfg(test)]
mod validation_test;
