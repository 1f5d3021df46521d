//! Layout configuration loading
//!
//! The built-in preset for the host OS is the base; a YAML override file can
//! replace any of its fields.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LayoutConfig, LayoutOverride};
use crate::error::{Result, config};

/// Environment variable naming an explicit layout override file
pub const LAYOUT_ENV: &str = "DCEVM_LAYOUT";

/// Override file name under the user's config directory
const LAYOUT_FILE: &str = "layout.yaml";

const CONFIG_DIR: &str = "dcevm-installer";

/// Layout configuration loader
#[derive(Debug, Clone)]
pub struct LayoutLoader {
    base: LayoutConfig,
    /// Explicitly requested override file; must exist
    explicit: Option<PathBuf>,
    /// Override file that is used only if present
    optional: Option<PathBuf>,
}

impl LayoutLoader {
    /// Loader for the host preset, honoring `DCEVM_LAYOUT` and
    /// `<config dir>/dcevm-installer/layout.yaml`
    pub fn new() -> Self {
        Self {
            base: LayoutConfig::host(),
            explicit: std::env::var_os(LAYOUT_ENV).map(PathBuf::from),
            optional: dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(LAYOUT_FILE)),
        }
    }

    /// Loader applying exactly one override file on top of `base`
    pub fn with_override(base: LayoutConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            base,
            explicit: Some(path.into()),
            optional: None,
        }
    }

    /// Load the layout, applying the override file if any
    pub fn load(&self) -> Result<LayoutConfig> {
        if let Some(path) = &self.explicit {
            return self.apply(path);
        }

        match &self.optional {
            Some(path) if path.is_file() => self.apply(path),
            _ => {
                debug!("no layout override found, using built-in preset");
                self.base.validate()?;
                Ok(self.base.clone())
            }
        }
    }

    fn apply(&self, path: &Path) -> Result<LayoutConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        let o: LayoutOverride = serde_yaml::from_str(&content)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), "applying layout override");
        self.base.clone().merge(o)
    }
}

impl Default for LayoutLoader {
    fn default() -> Self {
        Self::new()
    }
}
