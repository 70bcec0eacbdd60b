// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Server configuration
//!
//! All settings come from environment variables. Numeric values that fail to
//! parse fall back to their defaults; an unknown `SET_MODE` is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{dnscmd::DEFAULT_DNSCMD_TIMEOUT, records::Operation};

/// Default listening port
pub const DEFAULT_API_PORT: u16 = 3111;

/// Operation performed by `POST /dns/.../set/{address}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetMode {
    /// Add the record next to any existing ones
    #[default]
    Add,
    /// Delete existing records of the type at the node, then add
    Replace,
}

impl SetMode {
    pub fn operation(self) -> Operation {
        match self {
            SetMode::Add => Operation::Add,
            SetMode::Replace => Operation::Replace,
        }
    }
}

impl FromStr for SetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(SetMode::Add),
            "replace" | "edit" => Ok(SetMode::Replace),
            other => Err(format!(
                "Invalid SET_MODE: {}. Must be 'add' or 'replace'",
                other
            )),
        }
    }
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetMode::Add => f.write_str("add"),
            SetMode::Replace => f.write_str("replace"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port
    pub api_port: u16,
    /// Path to the dnscmd binary
    pub dnscmd_path: Option<String>,
    /// DNS server passed to dnscmd; the local server when unset
    pub dns_server: Option<String>,
    /// Timeout for a single dnscmd invocation
    pub dnscmd_timeout: Duration,
    /// Operation behind the `/set/` route
    pub set_mode: SetMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            dnscmd_path: None,
            dns_server: None,
            dnscmd_timeout: DEFAULT_DNSCMD_TIMEOUT,
            set_mode: SetMode::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `API_PORT`: Listening port (default: 3111)
    /// - `DNSCMD_PATH`: dnscmd binary (default: "dnscmd")
    /// - `DNS_SERVER`: Server name passed to dnscmd (default: local server)
    /// - `DNSCMD_TIMEOUT_SECS`: Per-invocation timeout (default: 30)
    /// - `SET_MODE`: "add" or "replace" (default: "add")
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let api_port = non_empty_var("API_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.api_port);

        let dnscmd_timeout = non_empty_var("DNSCMD_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.dnscmd_timeout);

        let set_mode = match non_empty_var("SET_MODE") {
            Some(v) => v.parse()?,
            None => defaults.set_mode,
        };

        Ok(Self {
            api_port,
            dnscmd_path: non_empty_var("DNSCMD_PATH"),
            dns_server: non_empty_var("DNS_SERVER"),
            dnscmd_timeout,
            set_mode,
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.api_port == 0 {
            return Err("api_port must be greater than 0".to_string());
        }

        if self.dnscmd_timeout.is_zero() {
            return Err("dnscmd_timeout must be greater than 0".to_string());
        }

        if let Some(server) = &self.dns_server {
            if server.starts_with('/') {
                return Err(format!(
                    "dns_server '{}' looks like a dnscmd switch, not a server name",
                    server
                ));
            }
        }

        Ok(())
    }
}
