use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas used to place nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,

    /// Circle radius is `min(width, height) / radius_divisor`
    pub radius_divisor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            radius_divisor: 2.5,
        }
    }
}

impl LayoutConfig {
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / self.radius_divisor
    }

    fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GraphError::Config(format!(
                "layout canvas must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.radius_divisor > 0.0) {
            return Err(GraphError::Config(format!(
                "radius_divisor must be positive, got {}",
                self.radius_divisor
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub layout: LayoutConfig,
}

impl GraphConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| GraphError::Config(e.to_string()))?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}
