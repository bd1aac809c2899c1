//! Domain values exchanged with the external tracker.
//!
//! Everything here is a closed, validated type: closed-category labels are
//! enums with a defined external token mapping, and issue identifiers only
//! exist after passing a fallible constructor. Free-form strings never reach
//! the tracker's command line for these fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// A validated issue identifier, e.g. `CFG-001`.
///
/// Format: uppercase ASCII prefix, a hyphen, then a decimal sequence.
/// Construct via [`IssueId::new`] or [`FromStr`]; the inner string is
/// guaranteed well-formed once an `IssueId` exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueId(String);

impl IssueId {
    /// Parse and validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidId`] unless the input matches
    /// `PREFIX-NUMBER` with a nonempty uppercase prefix and numeric suffix.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if Self::is_well_formed(&raw) {
            Ok(Self(raw))
        } else {
            Err(BridgeError::InvalidId(raw))
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(raw: &str) -> bool {
        let Some((prefix, number)) = raw.split_once('-') else {
            return false;
        };
        !prefix.is_empty()
            && !number.is_empty()
            && prefix.bytes().all(|b| b.is_ascii_uppercase())
            && number.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for IssueId {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for IssueId {
    type Error = BridgeError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<IssueId> for String {
    fn from(id: IssueId) -> Self {
        id.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issue category, mapped to the tracker's `--type` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Feature,
    Task,
    Epic,
    Chore,
}

impl IssueType {
    /// The token the tracker CLI expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Task => "task",
            Self::Epic => "epic",
            Self::Chore => "chore",
        }
    }
}

impl Default for IssueType {
    fn default() -> Self {
        Self::Task
    }
}

impl FromStr for IssueType {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "task" => Ok(Self::Task),
            "epic" => Ok(Self::Epic),
            "chore" => Ok(Self::Chore),
            _ => Err(BridgeError::UnknownToken {
                kind: "issue type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue lifecycle state, mapped to the tracker's `--status` tokens.
///
/// No transition rules are enforced here; the tracker owns its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Blocked,
    Closed,
}

impl IssueStatus {
    /// The token the tracker CLI expects (`in_progress`, not `in-progress`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "closed" => Ok(Self::Closed),
            _ => Err(BridgeError::UnknownToken {
                kind: "issue status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation kind for dependency links, mapped to the tracker's `--type`
/// tokens on `dep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    Blocks,
    Related,
    ParentChild,
    DiscoveredFrom,
}

impl DependencyType {
    /// The token the tracker CLI expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Related => "related",
            Self::ParentChild => "parent-child",
            Self::DiscoveredFrom => "discovered-from",
        }
    }
}

impl Default for DependencyType {
    fn default() -> Self {
        Self::Blocks
    }
}

impl FromStr for DependencyType {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "blocks" => Ok(Self::Blocks),
            "related" => Ok(Self::Related),
            "parent-child" => Ok(Self::ParentChild),
            "discovered-from" => Ok(Self::DiscoveredFrom),
            _ => Err(BridgeError::UnknownToken {
                kind: "dependency type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue priority on the tracker's P0 (urgent) to P4 (backlog) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(pub u8);

/// Highest priority the tracker accepts.
pub const MAX_PRIORITY: u8 = 4;

impl Priority {
    /// Validate a numeric priority.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPriority`] for values above
    /// [`MAX_PRIORITY`].
    pub fn new(value: u8) -> Result<Self> {
        if value <= MAX_PRIORITY {
            Ok(Self(value))
        } else {
            Err(BridgeError::InvalidPriority(value.to_string()))
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(2)
    }
}

impl FromStr for Priority {
    type Err = BridgeError;

    /// Accepts `2` or `P2` (case-insensitive prefix).
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix(['P', 'p']).unwrap_or(s);
        let value: u8 = digits
            .parse()
            .map_err(|_| BridgeError::InvalidPriority(s.to_string()))?;
        Self::new(value).map_err(|_| BridgeError::InvalidPriority(s.to_string()))
    }
}

impl TryFrom<u8> for Priority {
    type Error = BridgeError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An issue record scraped from tracker output.
///
/// Only `id` and `title` are guaranteed populated; everything else depends on
/// what the tracker chose to print. These records are never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<IssueId>,
}

impl Issue {
    /// A record with just the scraped id and title.
    #[must_use]
    pub fn new(id: IssueId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            priority: None,
            issue_type: None,
            status: None,
            labels: Vec::new(),
            deps: Vec::new(),
        }
    }
}

/// Request for `create`: title plus optional metadata, rendered to the
/// tracker's argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssue {
    title: String,
    issue_type: IssueType,
    description: String,
    priority: Priority,
    labels: Vec<String>,
    deps: Vec<IssueId>,
}

impl CreateIssue {
    /// A task-typed, priority-2 request with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            issue_type: IssueType::default(),
            description: String::new(),
            priority: Priority::default(),
            labels: Vec::new(),
            deps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = issue_type;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Record that the new issue depends on `id`.
    #[must_use]
    pub fn with_dependency(mut self, id: IssueId) -> Self {
        self.deps.push(id);
        self
    }

    /// Render the `create` argument vector (without the subcommand).
    ///
    /// Empty descriptions are omitted, labels collapse to one comma-joined
    /// `--labels` flag, and each dependency gets its own `--deps` flag.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--type".to_string(),
            self.issue_type.as_str().to_string(),
            "--title".to_string(),
            self.title.clone(),
        ];

        if !self.description.is_empty() {
            args.push("--description".to_string());
            args.push(self.description.clone());
        }
        args.push("--priority".to_string());
        args.push(self.priority.to_string());
        if !self.labels.is_empty() {
            args.push("--labels".to_string());
            args.push(self.labels.join(","));
        }
        for dep in &self.deps {
            args.push("--deps".to_string());
            args.push(dep.as_str().to_string());
        }

        args
    }
}

/// Filters for the ready-to-work query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyFilters {
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
}

impl ReadyFilters {
    /// Render the `ready` argument vector (without the subcommand).
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(assignee) = &self.assignee {
            args.push("--assignee".to_string());
            args.push(assignee.clone());
        }
        if let Some(priority) = self.priority {
            args.push("--priority".to_string());
            args.push(priority.to_string());
        }
        args
    }
}
