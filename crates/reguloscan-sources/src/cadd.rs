//! CADD (Combined Annotation Dependent Depletion) client.
//!
//! `POST {cadd_url}` with `{"ids": [...]}`; the response maps each
//! identifier to its scores under `scores.<id>.raw`.

use reguloscan_common::sandbox::SandboxClient as Client;
use reguloscan_common::Result;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::SourcesConfig;
use crate::json_or_status;

pub const SERVICE: &str = "CADD";

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    ids: &'a [&'a str],
}

pub struct CaddClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl CaddClient {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            url: config.cadd_url.clone(),
            timeout: config.cadd_timeout(),
        }
    }

    /// Request CADD scores for one or more identifiers in a single call.
    #[instrument(skip(self))]
    pub async fn annotate(&self, ids: &[&str]) -> Result<Value> {
        debug!(count = ids.len(), "Fetching CADD scores");

        let resp = self.client
            .post(&self.url)?
            .json(&AnnotateRequest { ids })
            .timeout(self.timeout)
            .send()
            .await?;

        json_or_status(SERVICE, resp).await
    }
}

/// Raw CADD score for `variant`. Numeric strings are accepted.
pub fn raw_score(value: &Value, variant: &str) -> Option<f64> {
    let raw = value.get("scores")?.get(variant)?.get("raw")?;
    let score = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|v| v.is_finite())
}
