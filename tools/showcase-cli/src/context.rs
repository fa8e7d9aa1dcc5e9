//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_data::FetchClient;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Skip interactive prompts.
    pub assume_yes: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output, assume_yes: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            assume_yes,
        })
    }

    /// API client for the configured catalog.
    pub fn client(&self) -> Result<FetchClient> {
        self.config.client()
    }

    /// Whether the user may be asked questions.
    pub fn can_prompt(&self) -> bool {
        !self.assume_yes && !self.output.is_json() && console::user_attended()
    }
}

/// Find a config file in the directory tree, starting at `start`.
fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(config_path.to_str()?) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => tracing::warn!(path = %config_path.display(), "skipping config: {:#}", e),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
