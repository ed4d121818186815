pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod helpers;
pub mod key;
pub mod keygen;
pub mod preset;

use std::path::PathBuf;

use anyhow::Result;
use enigmatic_core::SecurityLevel;

use crate::config::Config;

/// Global context passed to all commands
pub struct Context {
    pub json_output: bool,
    pub verbose: bool,
    /// Config file location; `None` uses the platform config directory
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<Config> {
        Config::load(self.config_path.as_deref())
    }

    /// Resolve the security level, with priority:
    /// 1. --security CLI flag
    /// 2. Config file default_security
    /// 3. Medium
    pub fn resolve_security(&self, flag: Option<&str>) -> Result<SecurityLevel> {
        if let Some(name) = flag {
            return Ok(name.parse()?);
        }

        let config = self.config()?;
        if let Some(ref name) = config.default_security {
            return Ok(name.parse()?);
        }

        Ok(SecurityLevel::Medium)
    }

    /// Resolve the alphabet name: --alphabet flag, then config, then "latin"
    pub fn resolve_alphabet_name(&self, flag: Option<&str>) -> Result<String> {
        if let Some(name) = flag {
            return Ok(name.to_string());
        }

        let config = self.config()?;
        Ok(config
            .default_alphabet
            .unwrap_or_else(|| "latin".to_string()))
    }
}

#[cfg(test)]
pub(crate) fn test_context(dir: &std::path::Path) -> Context {
    Context {
        json_output: false,
        verbose: false,
        config_path: Some(dir.join("config.toml")),
    }
}
