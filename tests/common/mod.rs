#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use beads_bridge::error::{BridgeError, Result};
use beads_bridge::runner::{CommandOutput, CommandRequest, CommandRunner};

pub fn init_test_logging() {
    beads_bridge::logging::init_test_logging();
}

/// What the fake runner should do for a given subcommand.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Exit with the given code and stdout.
    Output { status: i32, stdout: String },
    /// Pretend the time budget was exceeded.
    Timeout,
    /// Pretend the binary is missing.
    NotFound,
}

/// A [`CommandRunner`] scripted per subcommand, recording every request.
///
/// The client's first positional argument is always the tracker subcommand
/// (`list`, `create`, `ready`, ...), so responses are keyed on it.
/// Unscripted subcommands behave like a missing binary.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, ScriptedResponse>,
    calls: Mutex<Vec<CommandRequest>>,
}

impl ScriptedRunner {
    /// A runner where nothing is scripted: every call fails as "not found".
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// A runner whose availability probe succeeds.
    pub fn with_probe_ok() -> Self {
        Self::default().with_output("list", 0, "")
    }

    pub fn with_output(mut self, subcommand: &str, status: i32, stdout: &str) -> Self {
        self.responses.insert(
            subcommand.to_string(),
            ScriptedResponse::Output {
                status,
                stdout: stdout.to_string(),
            },
        );
        self
    }

    pub fn with_timeout(mut self, subcommand: &str) -> Self {
        self.responses
            .insert(subcommand.to_string(), ScriptedResponse::Timeout);
        self
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<CommandRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Argument vectors of the recorded calls, for compact assertions.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|c| c.args).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        self.calls.lock().expect("calls lock").push(request.clone());

        let subcommand = request.args.first().cloned().unwrap_or_default();
        match self.responses.get(&subcommand) {
            Some(ScriptedResponse::Output { status, stdout }) => Ok(CommandOutput {
                status: Some(*status),
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(ScriptedResponse::Timeout) => Err(BridgeError::Timeout {
                program: request.program.clone(),
                timeout: request.timeout,
            }),
            Some(ScriptedResponse::NotFound) | None => {
                Err(BridgeError::ToolNotFound(request.program.clone()))
            }
        }
    }
}

/// Short test timeouts so nothing waits on real clocks.
pub fn fast_config() -> beads_bridge::BridgeConfig {
    beads_bridge::BridgeConfig {
        probe_timeout: Duration::from_millis(200),
        command_timeout: Duration::from_millis(500),
        ..beads_bridge::BridgeConfig::default()
    }
}
