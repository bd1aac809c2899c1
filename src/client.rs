//! Client for the external tracker CLI.
//!
//! Every operation is a direct pass-through to one `bd` invocation. The
//! contract with callers is fail-soft: a missing binary, a non-zero exit, or
//! a blown time budget all collapse to the operation's sentinel value
//! (`false`, `None`, or an empty `Vec`). Nothing here retries and nothing
//! here panics; skills that embed this client keep working, just without
//! issue tracking.

use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::model::{CreateIssue, DependencyType, Issue, IssueId, IssueStatus, ReadyFilters};
use crate::parse;
use crate::runner::{CommandOutput, CommandRequest, CommandRunner, SystemRunner};

/// Closure reason used by [`BeadsClient::close_completed`].
const DEFAULT_CLOSE_REASON: &str = "Completed";

/// Handle to the external tracker.
///
/// Generic over the [`CommandRunner`] so tests can script process behavior;
/// production code uses the [`SystemRunner`] default.
#[derive(Debug, Clone)]
pub struct BeadsClient<R = SystemRunner> {
    config: BridgeConfig,
    runner: R,
}

impl BeadsClient {
    /// Client with environment-derived config and real process execution.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::from_env())
    }

    /// Client with explicit config and real process execution.
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            config,
            runner: SystemRunner::new(),
        }
    }
}

impl Default for BeadsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> BeadsClient<R> {
    /// Client with a custom runner, for tests and embedders with their own
    /// process management.
    pub fn with_runner(config: BridgeConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Probe whether the tracker is usable here.
    ///
    /// Runs the cheapest listing request (`list --limit 1`) under the probe
    /// timeout. True only on a clean zero exit; a missing binary, spawn
    /// failure, timeout, or non-zero exit all mean "not available".
    pub fn is_available(&self) -> bool {
        let request = self.request(
            vec![
                "list".to_string(),
                "--limit".to_string(),
                "1".to_string(),
            ],
            true,
        );

        match self.runner.run(&request) {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(error = %e, "Tracker unavailable");
                false
            }
        }
    }

    /// Create an issue, returning its id.
    ///
    /// `None` covers every failure: tracker absent, non-zero exit, timeout,
    /// or a zero exit whose output contained no id token (the issue may
    /// exist, but an unrecoverable id is useless to automation).
    pub fn create(&self, issue: &CreateIssue) -> Option<IssueId> {
        if !self.is_available() {
            return None;
        }

        let mut args = vec!["create".to_string()];
        args.extend(issue.to_args());

        let output = self.run_checked("create", args)?;
        match parse::extract_issue_id(&output.stdout) {
            Some(id) => {
                info!(id = %id, "Created tracker issue");
                Some(id)
            }
            None => {
                warn!(
                    stdout = %output.stdout.trim(),
                    "Tracker reported success but no issue id was found in output"
                );
                None
            }
        }
    }

    /// Set an issue's status. True on a clean zero exit.
    pub fn update_status(&self, id: &IssueId, status: IssueStatus) -> bool {
        if !self.is_available() {
            return false;
        }

        let args = vec![
            "update".to_string(),
            id.as_str().to_string(),
            "--status".to_string(),
            status.as_str().to_string(),
        ];
        let updated = self.run_checked("update", args).is_some();
        if updated {
            debug!(id = %id, status = %status, "Updated issue status");
        }
        updated
    }

    /// Close an issue with a reason. True on a clean zero exit.
    pub fn close(&self, id: &IssueId, reason: &str) -> bool {
        if !self.is_available() {
            return false;
        }

        let args = vec![
            "close".to_string(),
            id.as_str().to_string(),
            "--reason".to_string(),
            reason.to_string(),
        ];
        let closed = self.run_checked("close", args).is_some();
        if closed {
            debug!(id = %id, reason, "Closed issue");
        }
        closed
    }

    /// Close an issue with the stock `Completed` reason.
    pub fn close_completed(&self, id: &IssueId) -> bool {
        self.close(id, DEFAULT_CLOSE_REASON)
    }

    /// Link `issue` as depending on `depends_on`. True on a clean zero exit.
    pub fn add_dependency(
        &self,
        issue: &IssueId,
        depends_on: &IssueId,
        dep_type: DependencyType,
    ) -> bool {
        if !self.is_available() {
            return false;
        }

        let args = vec![
            "dep".to_string(),
            issue.as_str().to_string(),
            depends_on.as_str().to_string(),
            "--type".to_string(),
            dep_type.as_str().to_string(),
        ];
        let linked = self.run_checked("dep", args).is_some();
        if linked {
            debug!(
                issue = %issue,
                depends_on = %depends_on,
                dep_type = %dep_type,
                "Added dependency"
            );
        }
        linked
    }

    /// Issues ready to work (no unresolved blockers), best-effort parsed.
    ///
    /// Lines that don't look like `ID  title` are dropped; order of
    /// appearance is preserved.
    pub fn ready(&self, filters: &ReadyFilters) -> Vec<Issue> {
        if !self.is_available() {
            return Vec::new();
        }

        let mut args = vec!["ready".to_string()];
        args.extend(filters.to_args());

        let Some(output) = self.run_checked("ready", args) else {
            return Vec::new();
        };

        let issues = parse::parse_issue_list(&output.stdout);
        debug!(count = issues.len(), "Parsed ready issues");
        issues
    }

    /// Run a subcommand under the command timeout, collapsing every failure
    /// mode to `None`.
    fn run_checked(&self, operation: &str, args: Vec<String>) -> Option<CommandOutput> {
        let request = self.request(args, false);

        match self.runner.run(&request) {
            Ok(output) if output.success() => Some(output),
            Ok(output) => {
                warn!(
                    operation,
                    status = ?output.status,
                    stderr = %output.stderr.trim(),
                    "Tracker command failed"
                );
                None
            }
            Err(BridgeError::Timeout { .. }) => {
                warn!(operation, "Tracker command timed out");
                None
            }
            Err(e) => {
                warn!(operation, error = %e, "Tracker command could not run");
                None
            }
        }
    }

    fn request(&self, args: Vec<String>, probe: bool) -> CommandRequest {
        CommandRequest {
            program: self.config.program.clone(),
            args,
            current_dir: self.config.working_dir.clone(),
            timeout: if probe {
                self.config.probe_timeout
            } else {
                self.config.command_timeout
            },
        }
    }
}
