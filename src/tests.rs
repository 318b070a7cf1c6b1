//! End-to-end tests: from a raw `svnlook changed --copy-info` listing all
//! the way to a verdict, the way the hook binary exercises the crate.

use crate::core::change::Commit;
use crate::core::engine::{Stage, ValidationEngine};
use crate::core::svnlook::parse_changed_listing;

fn validate(log_message: &str, listing: &str) -> crate::core::engine::Verdict {
    let commit = Commit {
        log_message: log_message.to_string(),
        changes: parse_changed_listing(listing).unwrap(),
    };
    ValidationEngine::new().unwrap().validate(&commit)
}

#[test]
fn test_tag_cut_from_listing_is_accepted() {
    let listing = concat!(
        "A   proj/tags/v3.0/\n",
        "A + proj/tags/v3.0/20180403001_release/\n",
        "    (from proj/trunk/:r42)\n",
    );
    let verdict = validate("cut release tag", listing);
    assert!(verdict.accepted);
}

#[test]
fn test_staged_tag_cut_from_listing_is_accepted() {
    let listing = concat!(
        "A   tags/v3.0/\n",
        "A   tags/v3.0/prod/\n",
        "A + tags/v3.0/prod/20180403001_release/\n",
        "    (from trunk/:r42)\n",
    );
    assert!(validate("cut production tag", listing).accepted);
}

#[test]
fn test_empty_log_message_rejects_any_listing() {
    let listing = "U   trunk/src/main.c\n";
    let verdict = validate("   ", listing);
    assert!(!verdict.accepted);
    assert_eq!(verdict.failed_stage, Some(Stage::Message));
    assert_eq!(
        verdict.diagnostics,
        vec!["the commit log message is empty.".to_string()]
    );
}

#[test]
fn test_tag_deletion_from_listing_is_rejected() {
    let listing = "D   proj/tags/v1.0/20170101001_old/\n";
    let verdict = validate("remove stale tag", listing);
    assert!(!verdict.accepted);
    assert_eq!(verdict.failed_stage, Some(Stage::Tags));
    assert!(verdict.diagnostics[0].contains("only additions"));
}

#[test]
fn test_branch_cut_from_listing_is_accepted() {
    let listing = concat!(
        "A + proj/branches/v1.0.x/20180403002_hotfix/\n",
        "    (from proj/branches/v1.0.x/:r17)\n",
    );
    assert!(validate("cut hotfix branch", listing).accepted);
}

#[test]
fn test_misnamed_branch_cut_from_listing_is_rejected() {
    let listing = concat!(
        "A + proj/branches/newfeature/\n",
        "    (from proj/branches/v1.0.x/:r17)\n",
    );
    let verdict = validate("new feature", listing);
    assert!(!verdict.accepted);
    assert_eq!(verdict.failed_stage, Some(Stage::Branches));
}

#[test]
fn test_trunk_changes_are_never_policed() {
    let listing = concat!(
        "U   trunk/src/main.c\n",
        "D   trunk/src/legacy.c\n",
        "A   trunk/tags/not-a-real-tags-dir/\n",
    );
    assert!(validate("refactor", listing).accepted);
}

#[test]
fn test_verdict_serializes_for_tooling() {
    let verdict = validate("", "U   trunk/a.txt\n");
    let rendered = serde_json::to_value(&verdict).unwrap();
    assert_eq!(rendered["accepted"], serde_json::Value::Bool(false));
    assert_eq!(rendered["failed_stage"], "message");
}
