use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Operational settings for the guard. These tune how the hook runs, never
/// what it accepts; the policed path shapes are fixed in code.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalSettings {
    /// Print the resolved change list before validating.
    pub verbose: bool,
    /// The `svnlook` executable to invoke. Hook environments often run
    /// with an empty PATH, in which case an absolute path belongs here.
    pub svnlook_command: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GuardConfig {
    pub version: String,
    pub global_settings: GlobalSettings,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            global_settings: GlobalSettings {
                verbose: false,
                svnlook_command: "svnlook".to_string(),
            },
        }
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<GuardConfig>;
    fn save_config(&self, config: &GuardConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

/// Manages the guard's configuration file inside a repository's `conf`
/// directory, next to Subversion's own `svnserve.conf`.
pub struct ConfigManager {
    config_path: PathBuf,
    repos_root: PathBuf,
}

impl ConfigManager {
    pub fn new<P: AsRef<Path>>(repos_root: P) -> Self {
        let repos_root = repos_root.as_ref().to_path_buf();
        let config_path = repos_root.join("conf").join("structure-guard.toml");
        Self {
            config_path,
            repos_root,
        }
    }

    /// Writes a default configuration file, unless one already exists.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }
        self.save_config(&GuardConfig::default())
    }

    pub fn get_repos_root(&self) -> &Path {
        &self.repos_root
    }
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<GuardConfig> {
        if !self.config_path.exists() {
            return Ok(GuardConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &GuardConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create conf directory")?;
        }
        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}
