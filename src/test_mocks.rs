// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Test doubles for dnscmd execution

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    commands::DnsCommand,
    dnscmd::{CommandRunner, DnscmdError},
};

/// Scripted result for one invocation
#[derive(Debug, Clone)]
pub enum Scripted {
    Ok,
    Fail(&'static str),
}

/// Records every command it is asked to run
///
/// Results are taken from the script in order; once the script runs out,
/// every further command succeeds.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<DnsCommand>>,
    script: Mutex<VecDeque<Scripted>>,
    delay: Option<Duration>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<DnsCommand> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &DnsCommand) -> Result<String, DnscmdError> {
        self.calls.lock().unwrap().push(command.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Fail(message)) => Err(DnscmdError::Failed {
                code: Some(1),
                message: message.to_string(),
            }),
            Some(Scripted::Ok) | None => Ok("Command completed successfully.".to_string()),
        }
    }
}

pub fn a_record(zone: &str, node: &str, address: &str) -> crate::records::RecordRequest {
    crate::records::RecordRequest::new(zone, "A", node, Some(address.to_string()))
}
