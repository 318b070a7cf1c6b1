use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a commit performs on a single repository path.
///
/// Subversion reports exactly these three kinds of change for a pending
/// transaction. Property-only updates are folded into `Modify` by the
/// backend layer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The path is newly added, either from scratch or by copying an
    /// existing path (see [`ChangeItem::copy_from_path`]).
    Add,
    /// The path's content or properties are changed in place.
    Modify,
    /// The path is removed.
    Delete,
}

/// Whether a changed path is a file or a directory.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One file or directory touched by a pending commit.
///
/// `path` is a forward-slash-delimited location inside the repository tree
/// with no leading slash, exactly as `svnlook changed` reports it.
/// `copy_from_path` is present when the path was materialized by copying an
/// existing path (the mechanism used to cut a branch or tag) rather than
/// created from scratch. The copy source's own structural validity is not
/// checked here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    pub path: String,
    pub action: Action,
    pub node_kind: NodeKind,
    pub copy_from_path: Option<String>,
}

/// The unit under validation: a pending transaction's log message and its
/// ordered list of changed paths.
///
/// The order of `changes` reflects the backend's change-detection traversal
/// and determines which diagnostic fires first, but the final accept/reject
/// verdict is order-independent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Commit {
    pub log_message: String,
    pub changes: Vec<ChangeItem>,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Modify => write!(f, "modify"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

impl ChangeItem {
    /// Convenience constructor for a plain (non-copy) change.
    pub fn new(path: impl Into<String>, action: Action, node_kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            action,
            node_kind,
            copy_from_path: None,
        }
    }

    /// Convenience constructor for a copy-originated addition.
    pub fn copied_from(
        path: impl Into<String>,
        node_kind: NodeKind,
        copy_from_path: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            action: Action::Add,
            node_kind,
            copy_from_path: Some(copy_from_path.into()),
        }
    }

    /// The directory this change materializes: the path itself for a
    /// directory, the containing directory for a file. A file at the
    /// repository root has no containing directory and yields `None`.
    pub fn materialized_directory(&self) -> Option<&str> {
        match self.node_kind {
            NodeKind::Directory => Some(self.path.as_str()),
            NodeKind::File => self.path.rfind('/').map(|pos| &self.path[..pos]),
        }
    }
}

/// Splits a repository path into its segments.
///
/// Paths carry no leading slash, so a plain split is enough; a trailing
/// slash (already stripped by the backend parser) would only produce an
/// empty final segment, which is filtered out.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
