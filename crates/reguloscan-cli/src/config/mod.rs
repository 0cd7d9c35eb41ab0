//! Configuration loading for ReguloSCAN.
//! Reads the path given by `--config` / REGULOSCAN_CONFIG, else
//! `reguloscan.toml` in the current directory, else built-in defaults.

use anyhow::Context;
use reguloscan_ranker::ScoringConfig;
use reguloscan_sources::SourcesConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "reguloscan.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}


impl Config {
    /// Load configuration. An explicit path must exist; the implicit
    /// `reguloscan.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!(
                        "Config file not found: {}\n\
                         Copy reguloscan.example.toml to reguloscan.toml and edit it.",
                        p.display()
                    );
                }
                p
            }
            None => {
                let p = Path::new(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    tracing::warn!("{} not found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.scoring.validate()?;

        let s = &self.sources;
        if s.tissue.trim().is_empty() {
            anyhow::bail!("sources.tissue must not be empty");
        }
        for (name, secs) in [
            ("vep_timeout_secs", s.vep_timeout_secs),
            ("cadd_timeout_secs", s.cadd_timeout_secs),
            ("gtex_timeout_secs", s.gtex_timeout_secs),
        ] {
            if secs == 0 {
                anyhow::bail!("sources.{} must be greater than zero", name);
            }
        }
        Ok(())
    }
}
