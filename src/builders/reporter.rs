use anyhow::{Context, Result};

use crate::core::change::Commit;
use crate::core::engine::Verdict;

const BANNER: &str = "----------------------------------------------------------";

pub trait DecisionReporter {
    fn report(&self, verdict: &Verdict) -> Result<()>;
}

/// The reporter used when the guard runs as an actual hook: rejection
/// diagnostics go to stderr between banner lines, because stderr is the
/// stream Subversion relays to the committing client.
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Constructs a new `ConsoleReporter` instance.
    pub fn new() -> Self {
        Self
    }

    /// Prints the resolved change list, used in verbose mode so a rejected
    /// committer can see exactly what the transaction touched.
    pub fn print_change_summary(&self, commit: &Commit) {
        println!("📋 {} changed path(s):", commit.changes.len());
        for item in &commit.changes {
            match &item.copy_from_path {
                Some(source) => {
                    println!("  {} {} (copied from {})", item.action, item.path, source)
                }
                None => println!("  {} {}", item.action, item.path),
            }
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionReporter for ConsoleReporter {
    fn report(&self, verdict: &Verdict) -> Result<()> {
        if verdict.accepted {
            return Ok(());
        }

        eprintln!("{BANNER}");
        for line in &verdict.diagnostics {
            eprintln!("{line}");
        }
        eprintln!("{BANNER}");
        Ok(())
    }
}

/// Renders the verdict as pretty-printed JSON on stdout, for tooling that
/// wraps the guard rather than a human reading hook output.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionReporter for JsonReporter {
    fn report(&self, verdict: &Verdict) -> Result<()> {
        let rendered =
            serde_json::to_string_pretty(verdict).context("Failed to serialize verdict")?;
        println!("{rendered}");
        Ok(())
    }
}
