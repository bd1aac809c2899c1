//! Client operation semantics through a scripted runner: sentinel collapse,
//! availability gating, id scraping, and argument-vector construction.

mod common;

use beads_bridge::{
    BeadsClient, BridgeConfig, CreateIssue, DependencyType, IssueId, IssueStatus, IssueType,
    Priority, ReadyFilters,
};
use common::ScriptedRunner;

fn client(runner: ScriptedRunner) -> BeadsClient<ScriptedRunner> {
    common::init_test_logging();
    BeadsClient::with_runner(BridgeConfig::default(), runner)
}

fn id(raw: &str) -> IssueId {
    raw.parse().expect("valid id")
}

#[test]
fn test_missing_tool_yields_sentinels_everywhere() {
    let client = client(ScriptedRunner::unavailable());

    assert!(!client.is_available());
    assert!(client.create(&CreateIssue::new("anything")).is_none());
    assert!(!client.update_status(&id("CFG-001"), IssueStatus::InProgress));
    assert!(!client.close(&id("CFG-001"), "done"));
    assert!(!client.add_dependency(&id("CFG-002"), &id("CFG-001"), DependencyType::Blocks));
    assert!(client.ready(&ReadyFilters::default()).is_empty());
}

#[test]
fn test_failed_probe_short_circuits_operations() {
    let runner = ScriptedRunner::unavailable().with_output("list", 1, "");
    let client = BeadsClient::with_runner(BridgeConfig::default(), runner);

    assert!(client.create(&CreateIssue::new("won't happen")).is_none());

    let calls = client_runner_args(&client);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], "list");
}

#[test]
fn test_probe_uses_minimal_listing_request() {
    let client = client(ScriptedRunner::with_probe_ok());

    assert!(client.is_available());
    let calls = client_runner_args(&client);
    assert_eq!(calls, vec![vec!["list", "--limit", "1"]]);
}

#[test]
fn test_probe_and_commands_use_their_own_timeouts() {
    let runner = ScriptedRunner::with_probe_ok().with_output("update", 0, "");
    let client = BeadsClient::with_runner(BridgeConfig::default(), runner);

    assert!(client.update_status(&id("CFG-001"), IssueStatus::Blocked));

    let calls = client.runner().calls();
    assert_eq!(calls[0].timeout, client.config().probe_timeout);
    assert_eq!(calls[1].timeout, client.config().command_timeout);
}

#[test]
fn test_create_returns_scraped_id() {
    let runner =
        ScriptedRunner::with_probe_ok().with_output("create", 0, "Created issue CFG-042\n");
    let client = client(runner);

    let created = client.create(
        &CreateIssue::new("Add retry budget")
            .with_type(IssueType::Feature)
            .with_priority(Priority(1))
            .with_label("infra")
            .with_dependency(id("CFG-007")),
    );

    assert_eq!(created, Some(id("CFG-042")));

    let calls = client_runner_args(&client);
    assert_eq!(
        calls[1],
        vec![
            "create",
            "--type",
            "feature",
            "--title",
            "Add retry budget",
            "--priority",
            "1",
            "--labels",
            "infra",
            "--deps",
            "CFG-007",
        ]
    );
}

#[test]
fn test_create_silent_success_is_treated_as_failure() {
    // Exit 0 but no id token anywhere in the output.
    let runner = ScriptedRunner::with_probe_ok().with_output("create", 0, "issue created\n");
    let client = client(runner);

    assert!(client.create(&CreateIssue::new("lost id")).is_none());
}

#[test]
fn test_create_nonzero_exit_is_failure() {
    let runner =
        ScriptedRunner::with_probe_ok().with_output("create", 1, "Created issue CFG-001\n");
    let client = client(runner);

    // Output contains an id token but the exit code wins.
    assert!(client.create(&CreateIssue::new("rejected")).is_none());
}

#[test]
fn test_update_status_builds_snake_case_token() {
    let runner = ScriptedRunner::with_probe_ok().with_output("update", 0, "");
    let client = client(runner);

    assert!(client.update_status(&id("CFG-001"), IssueStatus::InProgress));

    let calls = client_runner_args(&client);
    assert_eq!(calls[1], vec!["update", "CFG-001", "--status", "in_progress"]);
}

#[test]
fn test_close_passes_reason() {
    let runner = ScriptedRunner::with_probe_ok().with_output("close", 0, "");
    let client = client(runner);

    assert!(client.close(&id("UI-9"), "superseded by UI-12"));

    let calls = client_runner_args(&client);
    assert_eq!(
        calls[1],
        vec!["close", "UI-9", "--reason", "superseded by UI-12"]
    );
}

#[test]
fn test_close_completed_uses_stock_reason() {
    let runner = ScriptedRunner::with_probe_ok().with_output("close", 0, "");
    let client = client(runner);

    assert!(client.close_completed(&id("UI-9")));

    let calls = client_runner_args(&client);
    assert_eq!(calls[1], vec!["close", "UI-9", "--reason", "Completed"]);
}

#[test]
fn test_add_dependency_builds_relation_token() {
    let runner = ScriptedRunner::with_probe_ok().with_output("dep", 0, "");
    let client = client(runner);

    assert!(client.add_dependency(
        &id("CFG-002"),
        &id("CFG-001"),
        DependencyType::DiscoveredFrom
    ));

    let calls = client_runner_args(&client);
    assert_eq!(
        calls[1],
        vec!["dep", "CFG-002", "CFG-001", "--type", "discovered-from"]
    );
}

#[test]
fn test_ready_parses_listing_and_passes_filters() {
    let listing = "\
Ready to work (2 issues):

  CFG-003  Parse tracker output
  CFG-001  Wire up logging
";
    let runner = ScriptedRunner::with_probe_ok().with_output("ready", 0, listing);
    let client = client(runner);

    let filters = ReadyFilters {
        assignee: Some("alice".to_string()),
        priority: Some(Priority(1)),
    };
    let issues = client.ready(&filters);

    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["CFG-003", "CFG-001"]);
    assert_eq!(issues[0].title, "Parse tracker output");
    assert!(issues[0].status.is_none());

    let calls = client_runner_args(&client);
    assert_eq!(
        calls[1],
        vec!["ready", "--assignee", "alice", "--priority", "1"]
    );
}

#[test]
fn test_ready_without_filters_sends_bare_subcommand() {
    let runner = ScriptedRunner::with_probe_ok().with_output("ready", 0, "");
    let client = client(runner);

    assert!(client.ready(&ReadyFilters::default()).is_empty());

    let calls = client_runner_args(&client);
    assert_eq!(calls[1], vec!["ready"]);
}

#[test]
fn test_timeout_collapses_to_sentinel() {
    let runner = ScriptedRunner::with_probe_ok()
        .with_timeout("create")
        .with_timeout("update")
        .with_timeout("ready");
    let client = client(runner);

    assert!(client.create(&CreateIssue::new("too slow")).is_none());
    assert!(!client.update_status(&id("CFG-001"), IssueStatus::Closed));
    assert!(client.ready(&ReadyFilters::default()).is_empty());
}

#[test]
fn test_probe_timeout_means_unavailable() {
    let runner = ScriptedRunner::unavailable().with_timeout("list");
    let client = client(runner);

    assert!(!client.is_available());
}

fn client_runner_args(client: &BeadsClient<ScriptedRunner>) -> Vec<Vec<String>> {
    client.runner().call_args()
}
