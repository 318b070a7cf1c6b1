use anyhow::{Context, Result};
use regex::Regex;

use crate::core::aggregate::CreationAggregate;
use crate::core::change::{Action, ChangeItem, Commit, segments};
use crate::core::layout::{Subtree, classify};

/// The ordered diagnostic lines describing one violated convention.
///
/// A violation is a policy decision, not an error: the engine turns it into
/// a rejecting verdict, and the reporter renders the lines for the
/// committing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub lines: Vec<String>,
}

impl Violation {
    fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Rejects commits whose trimmed log message is empty. No other content
/// validation is performed.
pub fn check_log_message(commit: &Commit) -> Result<(), Violation> {
    if commit.log_message.trim().is_empty() {
        return Err(Violation::new(["the commit log message is empty."]));
    }
    Ok(())
}

// Accepted path shapes under a governed tags subtree. Freshly created
// directories may only be the tag parents (the version directory, optionally
// a stage directory below it); copy targets are the tags themselves.
const TAGS_CREATED_PATTERN: &str = r"^(?:.*/)?tags/v[0-9]+\.[0-9]+(?:/(?:dev|prod))?$";
const TAGS_COPIED_PATTERN: &str =
    r"^(?:.*/)?tags/v[0-9]+\.[0-9]+(?:/(?:dev|prod))?/[0-9]{11}_[^/]+$";

// Accepted copy targets under a governed branches subtree: the version
// branch root, or a timestamped working branch below it.
const BRANCHES_COPIED_PATTERN: &str = r"^(?:.*/)?branches/v[0-9]+\.[0-9]+\.x(?:/[0-9]{11}_[^/]+)?$";

// Deepest directory level a non-copy addition may materialize under tags:
// the token itself, the version directory, and a stage directory.
const TAG_PARENT_MAX_DEPTH: usize = 3;

/// Policy for the `tags` subtree: additions only, immutable after creation,
/// and creations constrained to the accepted tag shapes.
pub struct TagsPolicy {
    accept_created: Regex,
    accept_copied: Regex,
}

impl TagsPolicy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            accept_created: Regex::new(TAGS_CREATED_PATTERN)
                .context("failed to compile the tags created-directory pattern")?,
            accept_copied: Regex::new(TAGS_COPIED_PATTERN)
                .context("failed to compile the tags copy-target pattern")?,
        })
    }

    /// Validates every tags-governed change item, then the folded aggregate.
    ///
    /// Per-item checks run in change order, so the first offending item
    /// determines the diagnostic; the aggregate checks run on the fold and
    /// are therefore order-independent.
    pub fn validate(&self, changes: &[ChangeItem]) -> Result<(), Violation> {
        let governed: Vec<&ChangeItem> = changes
            .iter()
            .filter(|item| classify(&item.path, Subtree::Tags).is_some())
            .collect();

        for item in &governed {
            if item.action != Action::Add {
                return Err(Violation::new([
                    "the tags subtree permits only additions.",
                ]));
            }
            if item.copy_from_path.is_none() && reaches_into_tag(item) {
                return Err(tag_creation_violation());
            }
        }

        let aggregate = CreationAggregate::fold(governed.iter().copied());
        if let Some(created) = &aggregate.deepest_created
            && !self.accept_created.is_match(created)
        {
            return Err(tag_creation_violation());
        }
        if let Some(copied) = &aggregate.deepest_copied
            && !self.accept_copied.is_match(copied)
        {
            return Err(tag_creation_violation());
        }
        Ok(())
    }
}

/// Whether a non-copy item materializes a directory below the tag parents,
/// i.e. edits content that lives inside an existing tag.
///
/// Only the depth is policed here; the exact version and stage spelling is
/// the aggregate regexes' business, so that intermediate-directory commits
/// (`tags`, then `tags/v1.0`) remain legal.
fn reaches_into_tag(item: &ChangeItem) -> bool {
    let Some(directory) = item.materialized_directory() else {
        return false;
    };
    let Some(placement) = classify(directory, Subtree::Tags) else {
        return false;
    };
    segments(placement.remainder).len() > TAG_PARENT_MAX_DEPTH
}

fn tag_creation_violation() -> Violation {
    Violation::new([
        "tag contents may not be modified after creation.",
        "a tag must be created at one of the following locations:",
        "  /tags/v1.0/20180403001_<name>",
        "  /tags/v1.0/dev|prod/20180403001_<name>",
        "  /<project>/tags/v1.0/20180403001_<name>",
        "  /<project>/tags/v1.0/dev|prod/20180403001_<name>",
    ])
}

/// Policy for the `branches` subtree: content edits are unrestricted, but
/// copy-based creations must land on an accepted branch shape.
pub struct BranchesPolicy {
    accept_copied: Regex,
}

impl BranchesPolicy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            accept_copied: Regex::new(BRANCHES_COPIED_PATTERN)
                .context("failed to compile the branches copy-target pattern")?,
        })
    }

    /// Validates the branch-creation events of a commit. Plain check-out
    /// edits (no copy source) are always permitted and are skipped entirely.
    pub fn validate(&self, changes: &[ChangeItem]) -> Result<(), Violation> {
        let creations: Vec<&ChangeItem> = changes
            .iter()
            .filter(|item| item.copy_from_path.is_some())
            .filter(|item| classify(&item.path, Subtree::Branches).is_some())
            .collect();

        let aggregate = CreationAggregate::fold(creations.iter().copied());
        if let Some(copied) = &aggregate.deepest_copied
            && !self.accept_copied.is_match(copied)
        {
            return Err(branch_creation_violation());
        }
        Ok(())
    }
}

fn branch_creation_violation() -> Violation {
    Violation::new([
        "a branch must be created at one of the following locations:",
        "  /branches/v1.0.x/20180403001_<name>",
        "  /<project>/branches/v1.0.x/20180403001_<name>",
    ])
}
