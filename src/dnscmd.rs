// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! dnscmd command execution
//!
//! This module executes record commands using the Windows `dnscmd` binary.
//! Arguments are handed to the process directly, never through `cmd /C`, so
//! no field of a request is ever interpreted by a shell.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, error};

use crate::{commands::DnsCommand, metrics};

/// Default dnscmd binary, resolved through `PATH`
pub const DEFAULT_DNSCMD_PATH: &str = "dnscmd";

/// Default per-invocation timeout
pub const DEFAULT_DNSCMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker dnscmd prints in front of the error status of a failed command
const COMMAND_FAILED_MARKER: &str = "Command failed:";

/// dnscmd execution failure
#[derive(Debug, thiserror::Error)]
pub enum DnscmdError {
    /// The process could not be spawned at all
    #[error("failed to launch dnscmd: {0}")]
    Launch(#[from] std::io::Error),

    /// dnscmd ran and reported a failure
    #[error("{message}")]
    Failed { code: Option<i32>, message: String },

    /// dnscmd did not exit within the configured timeout
    #[error("dnscmd timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Runs dnscmd invocations
///
/// Implemented by [`DnscmdExecutor`] for real processes; tests substitute
/// their own runner to observe the exact command sequence.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run one command, returning its stdout on success
    async fn run(&self, command: &DnsCommand) -> Result<String, DnscmdError>;
}

/// dnscmd command executor
#[derive(Debug, Clone)]
pub struct DnscmdExecutor {
    pub(crate) dnscmd_path: String,
    pub(crate) server: Option<String>,
    pub(crate) timeout: Duration,
}

impl DnscmdExecutor {
    /// Create a new dnscmd executor
    ///
    /// # Arguments
    /// * `dnscmd_path` - Path to the dnscmd binary (default: "dnscmd")
    /// * `server` - Optional DNS server name; the local server when omitted
    /// * `timeout` - Upper bound on a single invocation
    pub fn new(dnscmd_path: Option<String>, server: Option<String>, timeout: Duration) -> Self {
        Self {
            dnscmd_path: dnscmd_path.unwrap_or_else(|| DEFAULT_DNSCMD_PATH.to_string()),
            server,
            timeout,
        }
    }

    /// Full argument vector for a command, including the server name if set
    pub fn command_args(&self, command: &DnsCommand) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        if let Some(server) = &self.server {
            args.push(server.clone());
        }
        args.extend(command.args());
        args
    }

    /// Execute a dnscmd command
    ///
    /// # Returns
    /// The stdout output from dnscmd on success
    ///
    /// # Errors
    /// Returns an error if dnscmd cannot be spawned, exits non-zero,
    /// reports a failure on stdout, or exceeds the timeout
    async fn execute(&self, command: &DnsCommand) -> Result<String, DnscmdError> {
        let args = self.command_args(command);
        debug!("Executing dnscmd command: {} {:?}", self.dnscmd_path, args);

        let start = Instant::now();
        let command_name = command.name();

        let mut cmd = Command::new(&self.dnscmd_path);
        cmd.args(&args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("Failed to launch dnscmd {}: {}", self.dnscmd_path, e);
                metrics::record_dnscmd_command(command_name, false, start.elapsed().as_secs_f64());
                return Err(DnscmdError::Launch(e));
            }
            Err(_) => {
                error!("dnscmd {} timed out after {:?}", command_name, self.timeout);
                metrics::record_dnscmd_command(command_name, false, start.elapsed().as_secs_f64());
                return Err(DnscmdError::Timeout(self.timeout));
            }
        };

        let duration = start.elapsed().as_secs_f64();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() || stdout.contains(COMMAND_FAILED_MARKER) {
            let message = parse_dnscmd_error(output.status.code(), &stdout, &stderr);
            error!("dnscmd command failed: {}", message);
            metrics::record_dnscmd_command(command_name, false, duration);
            return Err(DnscmdError::Failed {
                code: output.status.code(),
                message,
            });
        }

        debug!("dnscmd command output: {}", stdout);
        metrics::record_dnscmd_command(command_name, true, duration);
        Ok(stdout)
    }
}

#[async_trait]
impl CommandRunner for DnscmdExecutor {
    async fn run(&self, command: &DnsCommand) -> Result<String, DnscmdError> {
        self.execute(command).await
    }
}

/// Extract the error text to relay from a failed dnscmd run
///
/// Prefers the `Command failed:` line dnscmd prints (whitespace collapsed),
/// then stderr, then stdout, then the bare exit status.
pub(crate) fn parse_dnscmd_error(code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let failed_line = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| line.starts_with(COMMAND_FAILED_MARKER));

    if let Some(line) = failed_line {
        return line.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }

    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }

    match code {
        Some(code) => format!("exit status {}", code),
        None => "dnscmd terminated by signal".to_string(),
    }
}
