// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for validation module

use super::validation::*;
use crate::records::{Operation, RecordRequest};

#[test]
fn test_dns_name_accepts_letters_digits_dashes_dots() {
    for name in ["example.com", "host1", "my-host.sub.example.com", "A1-b2.C3", "-", "."] {
        assert!(is_valid_dns_name(name), "{} should be valid", name);
    }
}

#[test]
fn test_dns_name_rejects_other_characters() {
    for name in [
        "bad zone!",
        "under_score",
        "*.example.com",
        "space ",
        " leading",
        "tab\tname",
        "new\nline",
        "münchen.de",
        "semi;colon",
        "amp&ersand",
        "quote\"d",
        "slash/zone",
    ] {
        assert!(!is_valid_dns_name(name), "{:?} should be invalid", name);
    }
}

#[test]
fn test_dns_name_rejects_empty_string() {
    assert!(!is_valid_dns_name(""));
    assert_eq!(
        validate_zone_name(""),
        Err(ValidationError::InvalidZoneName(String::new()))
    );
    assert_eq!(
        validate_node_name(""),
        Err(ValidationError::InvalidNodeName(String::new()))
    );
}

#[test]
fn test_ipv4_accepts_dotted_quads() {
    for addr in [
        "192.168.1.1",
        "10.0.0.5",
        "0.0.0.0",
        "255.255.255.255",
        "249.200.199.100",
        "1.10.100.250",
    ] {
        assert!(is_valid_ipv4(addr), "{} should be valid", addr);
    }
}

#[test]
fn test_ipv4_rejects_malformed_addresses() {
    for addr in [
        "192.168.1.256",
        "192.168.01.1",
        "192.168.1",
        "192.168.1.1.1",
        "999.0.0.1",
        "00.0.0.0",
        "1.2.3.4 ",
        "1.2.3.-4",
        "a.b.c.d",
        "::1",
        "",
        "1..2.3",
    ] {
        assert!(!is_valid_ipv4(addr), "{:?} should be invalid", addr);
    }
}

#[test]
fn test_ipv4_rejects_non_ascii_digits() {
    // Arabic-Indic digits are Unicode decimal digits but not valid octets
    assert!(!is_valid_ipv4("١٩٢.168.1.1"));
}

#[test]
fn test_address_only_checked_for_a_records() {
    assert!(validate_address("A", "not-an-ip").is_err());
    assert!(validate_address("a", "not-an-ip").is_ok());
    assert!(validate_address("CNAME", "not-an-ip").is_ok());
    assert!(validate_address("AAAA", "not-an-ip").is_ok());
    assert!(validate_address("TXT", "").is_ok());
}

#[test]
fn test_error_messages_name_the_offending_value() {
    assert_eq!(
        ValidationError::InvalidAddress("999.0.0.1".to_string()).to_string(),
        "Invalid IP address ('999.0.0.1'). Currently, only IPv4 addresses are accepted."
    );
    assert_eq!(
        ValidationError::InvalidZoneName("bad zone!".to_string()).to_string(),
        "Invalid zone name ('bad zone!'). Zone names can only contain letters, numbers, dashes (-), and dots (.)."
    );
    assert_eq!(
        ValidationError::InvalidNodeName("h*st".to_string()).to_string(),
        "Invalid node name ('h*st'). Node names can only contain letters, numbers, dashes (-), and dots (.)."
    );
}

#[test]
fn test_validate_request_checks_address_first() {
    let request = RecordRequest::new("bad zone!", "A", "bad node!", Some("999.0.0.1".to_string()));
    assert_eq!(
        validate_request(Operation::Add, &request),
        Err(ValidationError::InvalidAddress("999.0.0.1".to_string()))
    );
}

#[test]
fn test_validate_request_checks_zone_before_node() {
    let request = RecordRequest::new("bad zone!", "A", "bad node!", Some("10.0.0.5".to_string()));
    assert_eq!(
        validate_request(Operation::Replace, &request),
        Err(ValidationError::InvalidZoneName("bad zone!".to_string()))
    );

    let request = RecordRequest::new("example.com", "A", "bad node!", Some("10.0.0.5".to_string()));
    assert_eq!(
        validate_request(Operation::Add, &request),
        Err(ValidationError::InvalidNodeName("bad node!".to_string()))
    );
}

#[test]
fn test_validate_request_remove_ignores_address() {
    let request = RecordRequest::new("example.com", "A", "host1", Some("garbage".to_string()));
    assert!(validate_request(Operation::Remove, &request).is_ok());

    let request = RecordRequest::new("example.com", "A", "host1", None);
    assert!(validate_request(Operation::Remove, &request).is_ok());
}

#[test]
fn test_validate_request_requires_address_for_add() {
    let request = RecordRequest::new("example.com", "CNAME", "www", None);
    assert_eq!(
        validate_request(Operation::Add, &request),
        Err(ValidationError::MissingAddress("CNAME".to_string()))
    );
}

#[test]
fn test_validate_request_passes_non_a_address_through() {
    let request = RecordRequest::new("example.com", "CNAME", "www", Some("not-an-ip".to_string()));
    assert!(validate_request(Operation::Add, &request).is_ok());
}

#[test]
fn test_validate_request_lowercase_a_skips_address_check() {
    let request = RecordRequest::new("example.com", "a", "www", Some("not-an-ip".to_string()));
    assert!(validate_request(Operation::Add, &request).is_ok());
    assert!(validate_request(Operation::Replace, &request).is_ok());
}
