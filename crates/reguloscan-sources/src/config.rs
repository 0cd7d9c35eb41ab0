//! Endpoint and timeout configuration for the annotation services.

use reguloscan_common::sandbox::SandboxClient;
use reguloscan_common::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[sources]` section of `reguloscan.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Ensembl REST root; VEP lives under `/vep/human/id/`.
    #[serde(default = "default_vep_url")]
    pub vep_url: String,
    /// CADD annotate endpoint (POST).
    #[serde(default = "default_cadd_url")]
    pub cadd_url: String,
    /// GTEx single-tissue eQTL endpoint.
    #[serde(default = "default_gtex_url")]
    pub gtex_url: String,
    /// Tissue the expression lookup is restricted to.
    #[serde(default = "default_tissue")]
    pub tissue: String,
    #[serde(default = "default_vep_timeout")]
    pub vep_timeout_secs: u64,
    #[serde(default = "default_cadd_timeout")]
    pub cadd_timeout_secs: u64,
    #[serde(default = "default_gtex_timeout")]
    pub gtex_timeout_secs: u64,
}

fn default_vep_url()     -> String { "https://rest.ensembl.org".to_string() }
fn default_cadd_url()    -> String { "https://cadd.gs.washington.edu/api/v1.0/annotate".to_string() }
fn default_gtex_url()    -> String { "https://gtexportal.org/rest/v1/association/singleTissueEqtl".to_string() }
fn default_tissue()      -> String { "Brain_Cortex".to_string() }
fn default_vep_timeout() -> u64    { 10 }
fn default_cadd_timeout() -> u64   { 15 }
fn default_gtex_timeout() -> u64   { 10 }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            vep_url: default_vep_url(),
            cadd_url: default_cadd_url(),
            gtex_url: default_gtex_url(),
            tissue: default_tissue(),
            vep_timeout_secs: default_vep_timeout(),
            cadd_timeout_secs: default_cadd_timeout(),
            gtex_timeout_secs: default_gtex_timeout(),
        }
    }
}

impl SourcesConfig {
    pub fn vep_timeout(&self) -> Duration {
        Duration::from_secs(self.vep_timeout_secs)
    }

    pub fn cadd_timeout(&self) -> Duration {
        Duration::from_secs(self.cadd_timeout_secs)
    }

    pub fn gtex_timeout(&self) -> Duration {
        Duration::from_secs(self.gtex_timeout_secs)
    }

    /// Build a sandbox client whose allowlist also covers the configured hosts.
    pub fn build_client(&self) -> Result<SandboxClient> {
        let mut client = SandboxClient::new()?;
        for url in [&self.vep_url, &self.cadd_url, &self.gtex_url] {
            client.allow_url_host(url);
        }
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_public_services() {
        let c = SourcesConfig::default();
        assert_eq!(c.tissue, "Brain_Cortex");
        assert_eq!(c.vep_timeout(), Duration::from_secs(10));
        assert_eq!(c.cadd_timeout(), Duration::from_secs(15));
        assert_eq!(c.gtex_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let c: SourcesConfig = toml::from_str(r#"tissue = "Whole_Blood""#).unwrap();
        assert_eq!(c.tissue, "Whole_Blood");
        assert_eq!(c.vep_url, default_vep_url());
        assert_eq!(c.cadd_timeout_secs, 15);
    }

    #[test]
    fn test_build_client_allows_configured_hosts() {
        let c = SourcesConfig {
            vep_url: "https://vep.mirror.example".to_string(),
            ..Default::default()
        };
        let client = c.build_client().unwrap();
        assert!(client.is_allowed("https://vep.mirror.example/vep/human/id/rs1"));
        assert!(client.is_allowed("https://cadd.gs.washington.edu/api/v1.0/annotate"));
    }
}
