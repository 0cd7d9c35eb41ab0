//! Trait for GTEx eQTL association access.

use async_trait::async_trait;
use reguloscan_common::{ReguloError, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for single-tissue eQTL lookups by gene symbol.
#[async_trait]
pub trait GtexProvider: Send + Sync {
    async fn single_tissue_eqtl(&self, gene_symbol: &str, tissue: &str) -> Result<Value>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Scripted provider. Unknown (gene, tissue) pairs return an empty
/// association list. Every call is recorded.
pub struct MockGtexProvider {
    data: HashMap<(String, String), Value>,
    failure: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGtexProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register one eQTL association for `gene` in `tissue`.
    pub fn with(self, gene: &str, tissue: &str) -> Self {
        self.with_response(
            gene,
            tissue,
            json!({ "singleTissueEqtl": [{ "geneSymbol": gene, "tissueSiteDetailId": tissue }] }),
        )
    }

    pub fn with_response(mut self, gene: &str, tissue: &str, response: Value) -> Self {
        self.data.insert((gene.to_string(), tissue.to_string()), response);
        self
    }

    /// Make every call fail as if the service were unreachable.
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    /// (gene, tissue) pairs requested so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockGtexProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GtexProvider for MockGtexProvider {
    async fn single_tissue_eqtl(&self, gene_symbol: &str, tissue: &str) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((gene_symbol.to_string(), tissue.to_string()));
        }
        if let Some(reason) = &self.failure {
            return Err(ReguloError::Unavailable {
                service: reguloscan_sources::gtex::SERVICE.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(&(gene_symbol.to_string(), tissue.to_string()))
            .cloned()
            .unwrap_or_else(|| json!({ "singleTissueEqtl": [] })))
    }
}

// ── Adapter for GtexClient ─────────────────────────────────────────────────

pub struct GtexClientAdapter {
    client: reguloscan_sources::GtexClient,
}

impl GtexClientAdapter {
    pub fn new(client: reguloscan_sources::GtexClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GtexProvider for GtexClientAdapter {
    async fn single_tissue_eqtl(&self, gene_symbol: &str, tissue: &str) -> Result<Value> {
        self.client.single_tissue_eqtl(gene_symbol, tissue).await
    }
}
