// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for dnscmd module

use super::dnscmd::*;
use crate::commands::DnsCommand;
use std::time::Duration;

fn delete_command() -> DnsCommand {
    DnsCommand::RecordDelete {
        zone: "example.com".to_string(),
        node: "www".to_string(),
        record_type: "A".to_string(),
    }
}

#[test]
fn test_dnscmd_executor_creation() {
    let executor = DnscmdExecutor::new(None, None, DEFAULT_DNSCMD_TIMEOUT);
    assert_eq!(executor.dnscmd_path, "dnscmd");
    assert!(executor.server.is_none());
    assert_eq!(executor.timeout, Duration::from_secs(30));

    let executor_custom = DnscmdExecutor::new(
        Some(r"C:\Windows\System32\dnscmd.exe".to_string()),
        Some("dc01".to_string()),
        Duration::from_secs(5),
    );
    assert_eq!(executor_custom.dnscmd_path, r"C:\Windows\System32\dnscmd.exe");
    assert_eq!(executor_custom.server.as_deref(), Some("dc01"));
}

#[test]
fn test_command_args_without_server() {
    let executor = DnscmdExecutor::new(None, None, DEFAULT_DNSCMD_TIMEOUT);
    assert_eq!(
        executor.command_args(&delete_command()),
        vec!["/recorddelete", "example.com", "www", "A", "/f"]
    );
}

#[test]
fn test_command_args_with_server_first() {
    let executor = DnscmdExecutor::new(None, Some("dc01.corp.local".to_string()), DEFAULT_DNSCMD_TIMEOUT);
    assert_eq!(
        executor.command_args(&delete_command()),
        vec!["dc01.corp.local", "/recorddelete", "example.com", "www", "A", "/f"]
    );
}

#[test]
fn test_parse_dnscmd_error_command_failed_line() {
    let stdout = "\nCommand failed:  DNS_ERROR_RECORD_DOES_NOT_EXIST     9701    0x25E5\n\n";
    assert_eq!(
        parse_dnscmd_error(Some(9701), stdout, ""),
        "Command failed: DNS_ERROR_RECORD_DOES_NOT_EXIST 9701 0x25E5"
    );
}

#[test]
fn test_parse_dnscmd_error_prefers_stderr_over_stdout() {
    assert_eq!(
        parse_dnscmd_error(Some(1), "some banner\n", "  access denied \n"),
        "access denied"
    );
}

#[test]
fn test_parse_dnscmd_error_falls_back_to_stdout() {
    assert_eq!(
        parse_dnscmd_error(Some(1), "Zone does not exist\n", ""),
        "Zone does not exist"
    );
}

#[test]
fn test_parse_dnscmd_error_falls_back_to_exit_status() {
    assert_eq!(parse_dnscmd_error(Some(1), "", "  \n"), "exit status 1");
    assert_eq!(parse_dnscmd_error(None, "", ""), "dnscmd terminated by signal");
}

#[test]
fn test_dnscmd_error_display() {
    let failed = DnscmdError::Failed {
        code: Some(1),
        message: "Command failed: DNS_ERROR_ZONE_DOES_NOT_EXIST 9601 0x2581".to_string(),
    };
    assert_eq!(
        failed.to_string(),
        "Command failed: DNS_ERROR_ZONE_DOES_NOT_EXIST 9601 0x2581"
    );

    let timeout = DnscmdError::Timeout(Duration::from_secs(30));
    assert_eq!(timeout.to_string(), "dnscmd timed out after 30s");
}

#[tokio::test]
async fn test_missing_binary_is_a_launch_error() {
    let executor = DnscmdExecutor::new(
        Some("/nonexistent/path/to/dnscmd".to_string()),
        None,
        Duration::from_secs(5),
    );

    let result = executor.run(&delete_command()).await;
    assert!(matches!(result, Err(DnscmdError::Launch(_))));
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_zero_exit_is_a_failure() {
    // `false` ignores its arguments and exits 1
    let executor = DnscmdExecutor::new(Some("false".to_string()), None, Duration::from_secs(5));

    match executor.run(&delete_command()).await {
        Err(DnscmdError::Failed { code, message }) => {
            assert_eq!(code, Some(1));
            assert_eq!(message, "exit status 1");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_zero_exit_is_success() {
    let executor = DnscmdExecutor::new(Some("true".to_string()), None, Duration::from_secs(5));
    assert!(executor.run(&delete_command()).await.is_ok());
}

/// Runs `script` through `sh`, passing the script path in the server slot
#[cfg(unix)]
fn script_executor(dir: &tempfile::TempDir, script: &str, timeout: Duration) -> DnscmdExecutor {
    let path = dir.path().join("dnscmd.sh");
    std::fs::write(&path, script).unwrap();
    DnscmdExecutor::new(
        Some("sh".to_string()),
        Some(path.to_string_lossy().to_string()),
        timeout,
    )
}

#[cfg(unix)]
#[tokio::test]
async fn test_slow_command_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let executor = script_executor(&dir, "sleep 5\n", Duration::from_millis(100));

    let result = executor.run(&delete_command()).await;
    assert!(matches!(result, Err(DnscmdError::Timeout(_))));
}

#[cfg(unix)]
#[tokio::test]
async fn test_failure_reported_on_stdout_with_zero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let executor = script_executor(
        &dir,
        "echo 'Command failed:  DNS_ERROR_ZONE_DOES_NOT_EXIST     9601'\nexit 0\n",
        Duration::from_secs(5),
    );

    match executor.run(&delete_command()).await {
        Err(DnscmdError::Failed { code, message }) => {
            assert_eq!(code, Some(0));
            assert_eq!(message, "Command failed: DNS_ERROR_ZONE_DOES_NOT_EXIST 9601");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_arguments_reach_the_process_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let executor = script_executor(
        &dir,
        "printf '%s|' \"$@\"\n",
        Duration::from_secs(5),
    );

    let command = DnsCommand::RecordAdd {
        zone: "example.com".to_string(),
        node: "note".to_string(),
        record_type: "TXT".to_string(),
        data: "a b; echo pwned".to_string(),
    };

    let stdout = executor.run(&command).await.unwrap();
    assert_eq!(stdout, "/recordadd|example.com|note|TXT|a b; echo pwned|");
}
