//! Trait for variant-effect annotation access.
//!
//! Decouples the scorer from the Ensembl REST client so tests can script
//! VEP responses and failures.

use async_trait::async_trait;
use reguloscan_common::{ReguloError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Trait for fetching the raw VEP annotation of a variant.
#[async_trait]
pub trait VepProvider: Send + Sync {
    async fn annotate(&self, variant: &str) -> Result<Value>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Scripted provider. Unknown variants resolve to `EntityNotFound`.
pub struct MockVepProvider {
    data: HashMap<String, Value>,
    failures: HashMap<String, String>,
}

impl MockVepProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    pub fn with(mut self, variant: &str, response: Value) -> Self {
        self.data.insert(variant.to_string(), response);
        self
    }

    /// Make lookups for `variant` fail as if the service were unreachable.
    pub fn failing(mut self, variant: &str, reason: &str) -> Self {
        self.failures.insert(variant.to_string(), reason.to_string());
        self
    }
}

impl Default for MockVepProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VepProvider for MockVepProvider {
    async fn annotate(&self, variant: &str) -> Result<Value> {
        if let Some(reason) = self.failures.get(variant) {
            return Err(ReguloError::Unavailable {
                service: reguloscan_sources::vep::SERVICE.to_string(),
                reason: reason.clone(),
            });
        }
        self.data
            .get(variant)
            .cloned()
            .ok_or_else(|| ReguloError::EntityNotFound(variant.to_string()))
    }
}

// ── Adapter for VepClient ──────────────────────────────────────────────────

pub struct VepClientAdapter {
    client: reguloscan_sources::VepClient,
}

impl VepClientAdapter {
    pub fn new(client: reguloscan_sources::VepClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VepProvider for VepClientAdapter {
    async fn annotate(&self, variant: &str) -> Result<Value> {
        self.client.annotate(variant).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockVepProvider::new()
            .with("rs1", json!([{ "id": "rs1" }]))
            .failing("rs2", "connection reset");

        assert_eq!(provider.annotate("rs1").await.unwrap(), json!([{ "id": "rs1" }]));
        assert!(matches!(
            provider.annotate("rs2").await,
            Err(ReguloError::Unavailable { .. })
        ));
        assert!(matches!(
            provider.annotate("rs3").await,
            Err(ReguloError::EntityNotFound(_))
        ));
    }
}
