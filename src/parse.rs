//! Best-effort scraping of tracker text output.
//!
//! The tracker's output format is not contractual, so every pattern the
//! bridge relies on lives here and nowhere else. If the tracker changes its
//! output, this module is the single place to revise.
//!
//! Two shapes are assumed:
//! - `create` prints an id token (`CFG-001` style) somewhere on stdout.
//! - `ready` prints one issue per line, id token first, title after.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Issue, IssueId};

/// Id token anywhere in a blob of output.
static ISSUE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]+-\d+)\b").expect("issue id pattern"));

/// A listing line: optional indent, id token, whitespace, free-text title.
static LISTING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Z]+-\d+)\s+(.+)$").expect("listing line pattern"));

/// Extract the first id token from `create` output, if any.
///
/// Exit code zero with no token is possible (format drift, warnings on
/// stdout); callers treat that the same as a failed create.
#[must_use]
pub fn extract_issue_id(output: &str) -> Option<IssueId> {
    let token = ISSUE_ID.captures(output)?.get(1)?.as_str();
    // The pattern is strictly narrower than IssueId's format, so this
    // cannot fail; stay on the fallible path anyway.
    IssueId::new(token).ok()
}

/// Parse line-oriented listing output into issue records.
///
/// Lines that don't open with an id token (headers, separators, blank
/// lines) are dropped. Order of appearance is preserved. Only id and title
/// are populated.
#[must_use]
pub fn parse_issue_list(output: &str) -> Vec<Issue> {
    output
        .lines()
        .filter_map(|line| {
            let captures = LISTING_LINE.captures(line)?;
            let id = IssueId::new(captures.get(1)?.as_str()).ok()?;
            let title = captures.get(2)?.as_str().trim().to_string();
            Some(Issue::new(id, title))
        })
        .collect()
}
