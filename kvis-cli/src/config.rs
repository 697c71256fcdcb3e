//! kvis configuration loading from `.kvisrc.toml`.
//!
//! Configuration is optional. Without a file every setting takes its built-in
//! default, and command-line flags override whatever the file says.
//!
//! # Example Configuration
//!
//! ```toml
//! [layout]
//! iterations = 800
//! charge = 200.0
//! spring = 0.04
//!
//! [render]
//! width = 842.0
//! height = 595.0
//! labels = false
//!
//! [output]
//! directory = "graphs"
//! color = false
//! ```

use anyhow::{Context, Result};
use kvis_core::{LayoutParams, RenderOptions};
use serde::Deserialize;
use std::path::Path;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".kvisrc.toml";

/// Root configuration structure loaded from `.kvisrc.toml`.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct KvisConfig {
    /// Force simulation settings.
    #[serde(default)]
    pub layout: LayoutParams,

    /// Page geometry and styling.
    #[serde(default)]
    pub render: RenderOptions,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Where and how results are reported.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct OutputSettings {
    /// Directory PDFs are written to. `--output` takes precedence.
    #[serde(default)]
    pub directory: Option<String>,

    /// Whether to use colored terminal output.
    ///
    /// Defaults to auto-detection when unset.
    #[serde(default)]
    pub color: Option<bool>,
}

impl KvisConfig {
    /// Load `.kvisrc.toml` from `root`, falling back to defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is logged as a
    /// warning and ignored.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(DEFAULT_CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", DEFAULT_CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", DEFAULT_CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Load an explicitly requested config file. Any failure is an error.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn output_directory(&self) -> Option<&str> {
        self.output.directory.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
