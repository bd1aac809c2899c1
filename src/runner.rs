//! Process execution seam.
//!
//! Everything that touches `std::process` lives behind [`CommandRunner`] so
//! client tests can substitute a scripted fake instead of invoking a real
//! binary. The real implementation, [`SystemRunner`], runs one child process
//! per call with a hard deadline: stdout/stderr are drained on background
//! threads while the parent polls `try_wait`, and a child that outlives its
//! budget is killed and reaped.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::error::{BridgeError, Result};

/// Poll interval while waiting for the child to exit.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// One tracker invocation: what to run and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl CommandRequest {
    /// A request with no working-directory override.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
            timeout,
        }
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True only for a clean zero exit.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// The narrow abstraction over process execution.
pub trait CommandRunner {
    /// Run the request to completion within its time budget.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ToolNotFound`] when the binary is missing,
    /// [`BridgeError::Timeout`] when the budget is exceeded, and
    /// [`BridgeError::Spawn`] / [`BridgeError::Io`] for other process
    /// failures. A non-zero exit is NOT an error here; callers inspect
    /// [`CommandOutput::success`].
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        debug!(
            program = %request.program,
            args = ?request.args,
            timeout = ?request.timeout,
            "Spawning tracker process"
        );

        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &request.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BridgeError::ToolNotFound(request.program.clone())
            } else {
                BridgeError::Spawn {
                    program: request.program.clone(),
                    source: e,
                }
            }
        })?;

        // Drain pipes off-thread so a chatty child can't block on a full
        // pipe buffer while we poll for exit.
        let stdout_reader = spawn_stdout_reader(&mut child);
        let stderr_reader = spawn_stderr_reader(&mut child);

        let status = wait_with_deadline(&mut child, request)?;

        let output = CommandOutput {
            status: status.code(),
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        };

        trace!(
            program = %request.program,
            status = ?output.status,
            stdout_bytes = output.stdout.len(),
            "Tracker process finished"
        );

        Ok(output)
    }
}

/// Poll `try_wait` until exit or deadline; kill and reap on overrun.
fn wait_with_deadline(
    child: &mut Child,
    request: &CommandRequest,
) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + request.timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            warn!(
                program = %request.program,
                timeout = ?request.timeout,
                "Tracker process exceeded time budget, killing"
            );
            let _ = child.kill();
            let _ = child.wait();
            return Err(BridgeError::Timeout {
                program: request.program.clone(),
                timeout: request.timeout,
            });
        }

        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

fn spawn_stdout_reader(child: &mut Child) -> Option<JoinHandle<String>> {
    child.stdout.take().map(spawn_reader)
}

fn spawn_stderr_reader(child: &mut Child) -> Option<JoinHandle<String>> {
    child.stderr.take().map(spawn_reader)
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        // Lossy on purpose: scraped text output, not a data channel.
        let mut bytes = Vec::new();
        match pipe.read_to_end(&mut bytes) {
            Ok(_) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        }
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
