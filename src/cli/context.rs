use std::path::{Path, PathBuf};

use crate::config::RecorderConfig;

pub struct CliContext {
    config: RecorderConfig,
    config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config: RecorderConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Path the configuration was read from; `None` when running on defaults.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
