use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::change::{Action, ChangeItem, Commit, NodeKind};

/// Trait defining how the engine obtains the pending commit snapshot.
/// This abstraction decouples validation from the Subversion toolchain and
/// lets tests supply commits directly.
pub trait RepositoryInspector {
    /// Resolves the pending transaction into a [`Commit`]. Failure here is
    /// an integration error (the backend could not be queried), never a
    /// policy decision.
    fn pending_commit(&self) -> Result<Commit>;
}

/// Concrete implementation of [`RepositoryInspector`] backed by the
/// `svnlook` command-line tool, the interface Subversion provides to hook
/// scripts for inspecting an in-flight transaction.
pub struct SvnlookClient {
    command: String,
    repos_path: PathBuf,
    txn_name: String,
}

impl SvnlookClient {
    pub fn new<P: AsRef<Path>>(repos_path: P, txn_name: impl Into<String>) -> Self {
        Self {
            command: "svnlook".to_string(),
            repos_path: repos_path.as_ref().to_path_buf(),
            txn_name: txn_name.into(),
        }
    }

    /// Overrides the `svnlook` executable, e.g. with an absolute path when
    /// the hook environment has no usable PATH.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    fn run(&self, subcommand: &str, extra_args: &[&str]) -> Result<String> {
        let output = Command::new(&self.command)
            .arg(subcommand)
            .arg(&self.repos_path)
            .arg("-t")
            .arg(&self.txn_name)
            .args(extra_args)
            .output()
            .with_context(|| format!("failed to run '{} {subcommand}'", self.command))?;

        if !output.status.success() {
            bail!(
                "'{} {subcommand}' failed for transaction '{}': {}",
                self.command,
                self.txn_name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("'{} {subcommand}' produced non-UTF-8 output", self.command))
    }
}

impl RepositoryInspector for SvnlookClient {
    fn pending_commit(&self) -> Result<Commit> {
        let log_message = self.run("log", &[])?;
        let listing = self.run("changed", &["--copy-info"])?;
        let changes = parse_changed_listing(&listing)?;
        Ok(Commit {
            log_message,
            changes,
        })
    }
}

/// Parses the output of `svnlook changed --copy-info` into change items.
///
/// Each change line carries a status field (`A`, `D`, `U`, `_U`, `UU`), an
/// optional `+` marker for copy-originated additions, and the path, with a
/// trailing `/` marking directories. A copy's source follows on its own
/// line as `(from <path>:r<rev>)` and is attached to the preceding item.
pub fn parse_changed_listing(listing: &str) -> Result<Vec<ChangeItem>> {
    let mut changes: Vec<ChangeItem> = Vec::new();

    for line in listing.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) && line.trim_start().starts_with("(from ") {
            let source = parse_copy_source(line.trim())?;
            let item = changes
                .last_mut()
                .ok_or_else(|| anyhow!("copy source line without a preceding change: {line}"))?;
            item.copy_from_path = Some(source);
            continue;
        }

        let (flags, rest) = line
            .split_once(' ')
            .ok_or_else(|| anyhow!("malformed change line: {line}"))?;
        let action = match flags.chars().next() {
            Some('A') => Action::Add,
            Some('D') => Action::Delete,
            // Content updates, property-only updates, and both combined all
            // count as modifications for policy purposes.
            Some('U') | Some('_') => Action::Modify,
            _ => bail!("unrecognized change status '{flags}' in line: {line}"),
        };

        let mut path = rest.trim_start();
        if let Some(stripped) = path.strip_prefix("+ ") {
            // The copy marker itself carries no information the following
            // (from ...) line doesn't; it is simply skipped over.
            path = stripped.trim_start();
        }
        let (path, node_kind) = match path.strip_suffix('/') {
            Some(dir) => (dir, NodeKind::Directory),
            None => (path, NodeKind::File),
        };
        if path.is_empty() {
            bail!("change line carries no path: {line}");
        }

        changes.push(ChangeItem::new(path, action, node_kind));
    }

    Ok(changes)
}

/// Extracts the source path from a `(from <path>:r<rev>)` line.
fn parse_copy_source(line: &str) -> Result<String> {
    let inner = line
        .strip_prefix("(from ")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| anyhow!("malformed copy source line: {line}"))?;
    // The revision separator is the last colon, so source paths containing
    // colons survive.
    let (path, revision) = inner
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("copy source line has no revision: {line}"))?;
    if !revision.starts_with('r') {
        bail!("copy source line has a malformed revision: {line}");
    }
    Ok(path.trim_end_matches('/').to_string())
}
