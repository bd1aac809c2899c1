//! Bridge configuration.
//!
//! Configuration sources and precedence (highest wins):
//! 1. Explicit struct construction by the embedder
//! 2. Environment variables (`BEADS_BIN`, `BEADS_DIR`)
//! 3. Defaults (`bd` on PATH, current directory, 2 s probe / 5 s commands)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default tracker binary name, resolved via PATH.
const DEFAULT_PROGRAM: &str = "bd";
/// Time budget for the availability probe.
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
/// Time budget for every other tracker invocation.
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// How the bridge locates and budgets the external tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Binary to invoke; either a bare name resolved via PATH or a path.
    pub program: String,
    /// Working directory for tracker invocations. `None` inherits the
    /// caller's current directory.
    pub working_dir: Option<PathBuf>,
    /// Budget for the availability probe.
    pub probe_timeout: Duration,
    /// Budget for mutating and query commands.
    pub command_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            working_dir: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl BridgeConfig {
    /// Build a config from the process environment.
    ///
    /// `BEADS_BIN` overrides the binary; `BEADS_DIR` pins the working
    /// directory so the tracker finds the right workspace regardless of
    /// where the embedder runs from. Blank values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_lookup(|name| env::var(name).ok())
    }

    fn from_env_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(program) = lookup("BEADS_BIN") {
            if !program.trim().is_empty() {
                config.program = program;
            }
        }
        if let Some(dir) = lookup("BEADS_DIR") {
            if !dir.trim().is_empty() {
                config.working_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}
