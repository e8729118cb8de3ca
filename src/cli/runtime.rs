use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::RecorderConfig;

/// Logs go to stderr so stdout carries only command output.
pub fn init_logging(level: &str, debug: bool, json: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));
    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

pub struct LoadedConfig {
    pub config: RecorderConfig,
    pub path: Option<PathBuf>,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            path.clone()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => {
                info!("No config file found, using defaults");
                return Ok(LoadedConfig {
                    config: RecorderConfig::default(),
                    path: None,
                });
            }
        },
    };

    let content = fs::read_to_string(&config_path)
        .await
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
    let config: RecorderConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
    if config.locator.max_candidates == 0 {
        warn!("locator.max_candidates is 0; one candidate will still be emitted");
    }

    info!("Loaded configuration from: {}", config_path.display());
    Ok(LoadedConfig {
        config,
        path: Some(config_path),
    })
}

/// Priority: ./config/config.yaml > <config_dir>/stepcapture/config.yaml
fn default_config_path() -> Option<PathBuf> {
    let local_config = PathBuf::from("config/config.yaml");
    if local_config.exists() {
        return Some(local_config);
    }
    let mut path = dirs::config_dir()?;
    path.push("stepcapture");
    path.push("config.yaml");
    path.exists().then_some(path)
}
