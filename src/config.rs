use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::account::Density;
use crate::error::{PhoneAccountError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PhoneAccountConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub resources: ResourceConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResourceConfig {
    /// Resource table used by `describe` when `--resources` is not given.
    #[serde(default)]
    pub table_path: Option<String>,
    /// Raw density, -1 for the package default.
    #[serde(default = "default_density")]
    pub default_density: i32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_density() -> i32 {
    Density::NO_DENSITY
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            default_density: default_density(),
        }
    }
}

impl Default for PhoneAccountConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            resources: ResourceConfig::default(),
        }
    }
}

impl ResourceConfig {
    pub fn density(&self) -> Density {
        Density::from_raw(self.default_density)
    }
}

impl PhoneAccountConfig {
    /// Missing file means defaults; an unreadable or invalid one is an error.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path)
            .map_err(|e| PhoneAccountError::Config(format!("reading {}: {}", path, e)))?;
        Self::from_toml_str(&s).map_err(|e| match e {
            PhoneAccountError::Config(msg) => PhoneAccountError::Config(format!("{}: {}", path, msg)),
            other => other,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PhoneAccountError::Config(e.to_string()))
    }
}
