//! Error types for `beads_bridge`.
//!
//! Errors here are internal plumbing: client operations collapse all of them
//! into sentinel returns (`false` / `None` / empty `Vec`) at the API
//! boundary, so callers of [`crate::client::BeadsClient`] never see a
//! `BridgeError` directly. The runner and the model constructors return them
//! so tests and embedders can distinguish the failure modes.

use std::time::Duration;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// All failure modes of the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The external tracker binary was not found on PATH.
    #[error("tracker binary `{0}` not found")]
    ToolNotFound(String),

    /// The external process could not be spawned for a reason other than
    /// a missing binary (permissions, resource limits).
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external process did not finish within its time budget.
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// An issue identifier failed validation.
    #[error("invalid issue id `{0}` (expected PREFIX-NUMBER, e.g. CFG-001)")]
    InvalidId(String),

    /// A priority string was out of range or malformed.
    #[error("invalid priority `{0}` (expected 0-4, optionally prefixed with P)")]
    InvalidPriority(String),

    /// A closed-category token (type, status, dependency kind) was not
    /// recognized.
    #[error("unknown {kind} `{value}`")]
    UnknownToken { kind: &'static str, value: String },

    /// I/O error while waiting on or reading from the child process.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
