//! `beads_bridge` - Graceful bindings over the beads (bd) issue tracker CLI
//!
//! This crate lets automation create, update, close, and query issues in a
//! beads workspace when the `bd` binary is present, and silently no-op when
//! it is not. Every operation is a single bounded subprocess invocation with
//! best-effort output scraping; the tracker itself owns all storage,
//! dependency resolution, and ready-set computation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`client`] - The tracker operations (probe, create, update, close, dep, ready)
//! - [`model`] - Validated domain values (`IssueId`, types, statuses, records)
//! - [`runner`] - Process execution seam with timeout enforcement
//! - [`parse`] - Best-effort scraping of tracker text output
//! - [`config`] - Binary location, working directory, time budgets
//! - [`error`] - Error types and handling
//! - [`logging`] - tracing setup for embedders and tests
//!
//! # Example
//!
//! ```no_run
//! use beads_bridge::{BeadsClient, CreateIssue, IssueType, Priority};
//!
//! let client = BeadsClient::new();
//! if client.is_available() {
//!     let id = client.create(
//!         &CreateIssue::new("Fix authentication bug")
//!             .with_type(IssueType::Bug)
//!             .with_priority(Priority(1)),
//!     );
//!     // `id` is None when the tracker is missing or creation failed;
//!     // automation proceeds either way.
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parse;
pub mod runner;

pub use client::BeadsClient;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use model::{
    CreateIssue, DependencyType, Issue, IssueId, IssueStatus, IssueType, Priority, ReadyFilters,
};
pub use runner::{CommandOutput, CommandRequest, CommandRunner, SystemRunner};
