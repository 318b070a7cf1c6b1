use anyhow::Result;
use std::path::Path;

use crate::builders::hooks;
use crate::builders::reporter::{ConsoleReporter, DecisionReporter, JsonReporter};
use crate::core::config::{ConfigManager, ConfigProvider};
use crate::core::engine::ValidationEngine;
use crate::core::svnlook::{RepositoryInspector, SvnlookClient};

pub fn initialize_repository(repos_path: &Path) -> Result<()> {
    let config_manager = ConfigManager::new(repos_path);
    config_manager.initialize()?;
    println!("✓ Initialized structure guard configuration for this repository");
    println!("Run 'svn-structure-guard install-hook' to enable enforcement");
    Ok(())
}

pub fn install_hook(repos_path: &Path) -> Result<()> {
    hooks::install_repository_hook(repos_path)?;
    println!("✓ Installed pre-commit hook");
    Ok(())
}

/// Resolves the pending transaction, runs it through the policy engine and
/// reports the verdict. Returns whether the commit may proceed; the caller
/// turns that into the process exit status.
pub fn validate_transaction(repos_path: &Path, txn_name: &str, json: bool) -> Result<bool> {
    let config = ConfigManager::new(repos_path).load_config()?;
    let client = SvnlookClient::new(repos_path, txn_name)
        .with_command(config.global_settings.svnlook_command);
    let commit = client.pending_commit()?;

    let engine = ValidationEngine::new()?;
    let verdict = engine.validate(&commit);

    if json {
        JsonReporter::new().report(&verdict)?;
    } else {
        let reporter = ConsoleReporter::new();
        if config.global_settings.verbose {
            reporter.print_change_summary(&commit);
        }
        reporter.report(&verdict)?;
    }

    Ok(verdict.accepted)
}
