// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Input validation for record mutations
//!
//! Zone and node names may only contain ASCII letters, digits, dashes and dots.
//! Addresses are only checked for `A` records, which must be strict dotted-quad
//! IPv4 (no leading zeros). Every other record type passes its address through
//! to dnscmd untouched.

use lazy_static::lazy_static;
use regex::Regex;

use crate::records::{Operation, RecordRequest};

lazy_static! {
    /// Zone and node names: one or more of `[A-Za-z0-9.-]`
    static ref DNS_NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9.-]+$").expect("Failed to compile DNS name regex");

    /// Dotted-quad IPv4, each octet 0-255 without a leading zero
    static ref IPV4_REGEX: Regex = Regex::new(
        r"^(([1-9]?[0-9]|1[0-9][0-9]|25[0-5]|2[0-4][0-9])\.){3}([1-9]?[0-9]|1[0-9][0-9]|25[0-5]|2[0-4][0-9])$"
    )
    .expect("Failed to compile IPv4 regex");
}

/// Validation failure, rendered as the message returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid IP address ('{0}'). Currently, only IPv4 addresses are accepted.")]
    InvalidAddress(String),

    #[error("Invalid zone name ('{0}'). Zone names can only contain letters, numbers, dashes (-), and dots (.).")]
    InvalidZoneName(String),

    #[error("Invalid node name ('{0}'). Node names can only contain letters, numbers, dashes (-), and dots (.).")]
    InvalidNodeName(String),

    #[error("An address is required to add a {0} record.")]
    MissingAddress(String),
}

/// Returns true if `name` is a non-empty string of letters, digits, `-` and `.`
pub fn is_valid_dns_name(name: &str) -> bool {
    DNS_NAME_REGEX.is_match(name)
}

/// Returns true if `address` is a strict dotted-quad IPv4 address
pub fn is_valid_ipv4(address: &str) -> bool {
    IPV4_REGEX.is_match(address)
}

/// Returns true if records of this type get address validation
///
/// The match is exact: `a` is passed through like any other type.
pub fn requires_address_check(record_type: &str) -> bool {
    record_type == "A"
}

/// Validate a zone name
pub fn validate_zone_name(zone_name: &str) -> Result<(), ValidationError> {
    if !is_valid_dns_name(zone_name) {
        return Err(ValidationError::InvalidZoneName(zone_name.to_string()));
    }
    Ok(())
}

/// Validate a node (host) name
pub fn validate_node_name(node_name: &str) -> Result<(), ValidationError> {
    if !is_valid_dns_name(node_name) {
        return Err(ValidationError::InvalidNodeName(node_name.to_string()));
    }
    Ok(())
}

/// Validate a record address for the given record type
///
/// Only `A` records are checked; anything else is accepted as-is.
pub fn validate_address(record_type: &str, address: &str) -> Result<(), ValidationError> {
    if requires_address_check(record_type) && !is_valid_ipv4(address) {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// Validate a request for the given operation
///
/// Checks run in a fixed order and stop at the first failure:
/// address (add/replace only), zone name, node name.
pub fn validate_request(
    operation: Operation,
    request: &RecordRequest,
) -> Result<(), ValidationError> {
    if operation.requires_address() {
        let address = request
            .address
            .as_deref()
            .ok_or_else(|| ValidationError::MissingAddress(request.record_type.clone()))?;
        validate_address(&request.record_type, address)?;
    }

    validate_zone_name(&request.zone_name)?;
    validate_node_name(&request.host_name)?;

    Ok(())
}
