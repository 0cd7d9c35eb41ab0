//! Trait for deleteriousness-score access (CADD).

use async_trait::async_trait;
use reguloscan_common::{ReguloError, Result};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Trait for fetching CADD scores; the response maps ids under `scores`.
#[async_trait]
pub trait CaddProvider: Send + Sync {
    async fn annotate(&self, ids: &[&str]) -> Result<Value>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Scripted provider returning `{"scores": {id: {"raw": ..}}}` for the known
/// ids among those requested. Requested ids it does not know are omitted.
pub struct MockCaddProvider {
    raw: HashMap<String, Value>,
    failure: Option<String>,
}

impl MockCaddProvider {
    pub fn new() -> Self {
        Self {
            raw: HashMap::new(),
            failure: None,
        }
    }

    pub fn with(self, variant: &str, raw_score: f64) -> Self {
        self.with_raw(variant, json!(raw_score))
    }

    /// Store an arbitrary JSON value as the `raw` field.
    pub fn with_raw(mut self, variant: &str, raw: Value) -> Self {
        self.raw.insert(variant.to_string(), raw);
        self
    }

    /// Make every call fail as if the service were unreachable.
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }
}

impl Default for MockCaddProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaddProvider for MockCaddProvider {
    async fn annotate(&self, ids: &[&str]) -> Result<Value> {
        if let Some(reason) = &self.failure {
            return Err(ReguloError::Unavailable {
                service: reguloscan_sources::cadd::SERVICE.to_string(),
                reason: reason.clone(),
            });
        }
        let mut scores = Map::new();
        for id in ids {
            if let Some(raw) = self.raw.get(*id) {
                scores.insert(id.to_string(), json!({ "raw": raw }));
            }
        }
        Ok(json!({ "scores": scores }))
    }
}

// ── Adapter for CaddClient ─────────────────────────────────────────────────

pub struct CaddClientAdapter {
    client: reguloscan_sources::CaddClient,
}

impl CaddClientAdapter {
    pub fn new(client: reguloscan_sources::CaddClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CaddProvider for CaddClientAdapter {
    async fn annotate(&self, ids: &[&str]) -> Result<Value> {
        self.client.annotate(ids).await
    }
}
