use anyhow::Result;
use serde::Serialize;

use crate::core::change::Commit;
use crate::core::rules::{BranchesPolicy, TagsPolicy, Violation, check_log_message};

/// The validation stage at which a commit was rejected.
///
/// Stages run in a fixed order (log message, then tags, then branches) and
/// the first failure short-circuits the rest. That ordering is a deliberate
/// policy choice: a committer is told about a missing message before any
/// path-shape complaint.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Message,
    Tags,
    Branches,
}

/// The outcome of validating one commit: the decision, the stage that
/// failed (if any), and the ordered diagnostic lines for the user.
///
/// A verdict is a pure function of the commit: validating the same commit
/// twice yields the same verdict and the same diagnostics.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub failed_stage: Option<Stage>,
    pub diagnostics: Vec<String>,
}

impl Verdict {
    fn accept() -> Self {
        Self {
            accepted: true,
            failed_stage: None,
            diagnostics: Vec::new(),
        }
    }

    fn reject(stage: Stage, violation: Violation) -> Self {
        Self {
            accepted: false,
            failed_stage: Some(stage),
            diagnostics: violation.lines,
        }
    }
}

/// Runs a commit through the full policy pipeline.
///
/// The engine owns the compiled path-shape patterns, so construct it once
/// and reuse it for however many commits the process validates.
pub struct ValidationEngine {
    tags: TagsPolicy,
    branches: BranchesPolicy,
}

impl ValidationEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tags: TagsPolicy::new()?,
            branches: BranchesPolicy::new()?,
        })
    }

    /// Validates one commit and returns the verdict. Never fails: policy
    /// rejection is a value, not an error.
    pub fn validate(&self, commit: &Commit) -> Verdict {
        if let Err(violation) = check_log_message(commit) {
            return Verdict::reject(Stage::Message, violation);
        }
        if let Err(violation) = self.tags.validate(&commit.changes) {
            return Verdict::reject(Stage::Tags, violation);
        }
        if let Err(violation) = self.branches.validate(&commit.changes) {
            return Verdict::reject(Stage::Branches, violation);
        }
        Verdict::accept()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::{Action, ChangeItem, NodeKind};

    fn engine() -> ValidationEngine {
        ValidationEngine::new().unwrap()
    }

    fn commit(message: &str, changes: Vec<ChangeItem>) -> Commit {
        Commit {
            log_message: message.to_string(),
            changes,
        }
    }

    #[test]
    fn test_tag_creation_commit_is_accepted() {
        let c = commit(
            "fix bug",
            vec![
                ChangeItem::new("proj/tags/v3.0", Action::Add, NodeKind::Directory),
                ChangeItem::copied_from(
                    "proj/tags/v3.0/20180403001_release",
                    NodeKind::Directory,
                    "proj/tags/v3.0",
                ),
            ],
        );
        let verdict = engine().validate(&c);
        assert!(verdict.accepted);
        assert_eq!(verdict.failed_stage, None);
        assert!(verdict.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_log_message_rejects_before_any_path_check() {
        let c = commit(
            "",
            vec![
                ChangeItem::new("proj/tags/v3.0", Action::Add, NodeKind::Directory),
                ChangeItem::copied_from(
                    "proj/tags/v3.0/20180403001_release",
                    NodeKind::Directory,
                    "proj/tags/v3.0",
                ),
            ],
        );
        let verdict = engine().validate(&c);
        assert!(!verdict.accepted);
        assert_eq!(verdict.failed_stage, Some(Stage::Message));
    }

    #[test]
    fn test_delete_under_tags_is_rejected() {
        let c = commit(
            "cleanup",
            vec![
                ChangeItem::new("proj/tags/v3.0", Action::Add, NodeKind::Directory),
                ChangeItem::new("proj/tags/v3.0/old.txt", Action::Delete, NodeKind::File),
            ],
        );
        let verdict = engine().validate(&c);
        assert!(!verdict.accepted);
        assert_eq!(verdict.failed_stage, Some(Stage::Tags));
    }

    #[test]
    fn test_branch_creation_commit_is_accepted() {
        let c = commit(
            "cut hotfix branch",
            vec![ChangeItem::copied_from(
                "proj/branches/v1.0.x/20180403002_hotfix",
                NodeKind::Directory,
                "proj/branches/v1.0.x",
            )],
        );
        assert!(engine().validate(&c).accepted);
    }

    #[test]
    fn test_misshapen_branch_name_is_rejected() {
        let c = commit(
            "new feature branch",
            vec![ChangeItem::copied_from(
                "proj/branches/newfeature",
                NodeKind::Directory,
                "proj/branches/v1.0.x",
            )],
        );
        let verdict = engine().validate(&c);
        assert!(!verdict.accepted);
        assert_eq!(verdict.failed_stage, Some(Stage::Branches));
    }

    #[test]
    fn test_editing_existing_branch_content_is_accepted() {
        let c = commit(
            "update readme",
            vec![ChangeItem::new(
                "proj/branches/v1.0.x/20180403002_hotfix/readme.txt",
                Action::Modify,
                NodeKind::File,
            )],
        );
        assert!(engine().validate(&c).accepted);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let c = commit(
            "",
            vec![ChangeItem::new(
                "trunk/a.txt",
                Action::Modify,
                NodeKind::File,
            )],
        );
        let e = engine();
        assert_eq!(e.validate(&c), e.validate(&c));
    }

    #[test]
    fn test_verdict_is_order_independent() {
        let mut changes = vec![
            ChangeItem::new("proj/tags", Action::Add, NodeKind::Directory),
            ChangeItem::new("proj/tags/v3.0", Action::Add, NodeKind::Directory),
            ChangeItem::copied_from(
                "proj/tags/v3.0/20180403001_release",
                NodeKind::Directory,
                "proj/trunk",
            ),
        ];
        let e = engine();
        let forward = e.validate(&commit("cut tag", changes.clone()));
        changes.reverse();
        let backward = e.validate(&commit("cut tag", changes));
        assert_eq!(forward.accepted, backward.accepted);
        assert!(forward.accepted);
    }
}
