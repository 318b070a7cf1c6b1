use anyhow::Result;
use std::fs;
use std::path::Path;

const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
# Svn Structure Guard - Pre-commit Hook
#
# Subversion invokes this script with the repository path and the name of
# the pending transaction. A non-zero exit aborts the commit and relays
# this script's stderr to the committing client.

REPOS="$1"
TXN="$2"

# Check if svn-structure-guard is available
if ! command -v svn-structure-guard > /dev/null 2>&1; then
    echo "Error: svn-structure-guard not found in PATH" 1>&2
    exit 1
fi

svn-structure-guard pre-commit "$REPOS" "$TXN" || exit 1
exit 0
"#;

/// Installs the pre-commit hook script into a repository's `hooks`
/// directory. Subversion repositories always carry this directory, but it
/// is created if missing so the command also works on bare skeletons.
pub fn install_repository_hook(repos_root: &Path) -> Result<()> {
    let hooks_dir = repos_root.join("hooks");
    fs::create_dir_all(&hooks_dir)?;

    install_hook(&hooks_dir, "pre-commit", PRE_COMMIT_HOOK)?;

    Ok(())
}

fn install_hook(hooks_dir: &Path, hook_name: &str, hook_content: &str) -> Result<()> {
    let hook_path = hooks_dir.join(hook_name);

    if hook_path.exists() {
        // Check if it's already our hook
        let existing_content = fs::read_to_string(&hook_path)?;
        if existing_content.contains("Svn Structure Guard") {
            println!("ℹ️  {hook_name} hook already installed");
            return Ok(());
        }

        // Backup existing hook
        let backup_path = hooks_dir.join(format!("{hook_name}.backup"));
        fs::rename(&hook_path, backup_path)?;
        println!("ℹ️  Backed up existing {hook_name} hook");
    }

    fs::write(&hook_path, hook_content)?;

    // Make executable on Unix systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    Ok(())
}
