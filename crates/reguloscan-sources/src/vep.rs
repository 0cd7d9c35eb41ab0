//! Ensembl Variant Effect Predictor (VEP) REST client.
//!
//! Endpoint: `GET {base}/vep/human/id/{variant}?content-type=application/json`
//!
//! The response is an array with one record per input identifier, each
//! carrying (among much else) `transcript_consequences`,
//! `regulatory_feature_consequences` and `colocated_variants`.

use reguloscan_common::sandbox::SandboxClient as Client;
use reguloscan_common::Result;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::SourcesConfig;
use crate::{join_segments, json_or_status};

pub const SERVICE: &str = "Ensembl VEP";

pub struct VepClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl VepClient {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            base_url: config.vep_url.clone(),
            timeout: config.vep_timeout(),
        }
    }

    /// Fetch the VEP annotation for a single variant identifier.
    #[instrument(skip(self))]
    pub async fn annotate(&self, variant: &str) -> Result<Value> {
        let mut url = join_segments(&self.base_url, &["vep", "human", "id", variant])?;
        url.query_pairs_mut().append_pair("content-type", "application/json");

        debug!(variant = variant, "Fetching VEP annotation");

        let resp = self.client
            .get(url.as_str())?
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        json_or_status(SERVICE, resp).await
    }
}

/// True if `field` occurs as a key anywhere in the nested response.
/// Key comparison ignores ASCII case.
pub fn contains_field(value: &Value, field: &str) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case(field) || contains_field(v, field)),
        Value::Array(items) => items.iter().any(|v| contains_field(v, field)),
        _ => false,
    }
}

/// Gene symbol of the first transcript consequence of the first record.
/// Later consequences are not consulted, so `None` when the first one
/// carries no symbol.
///
/// Accepts either the usual top-level array or a bare record object.
pub fn first_gene_symbol(value: &Value) -> Option<&str> {
    let record = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    record
        .get("transcript_consequences")?
        .as_array()?
        .first()?
        .get("gene_symbol")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
