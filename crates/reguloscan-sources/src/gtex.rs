//! GTEx (Genotype-Tissue Expression) REST API client.
//! Used for single-tissue eQTL association lookups by gene symbol.

use reguloscan_common::sandbox::SandboxClient as Client;
use reguloscan_common::Result;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::SourcesConfig;
use crate::json_or_status;

pub const SERVICE: &str = "GTEx";

/// Keys under which the eQTL endpoints have returned association records.
const RECORD_KEYS: [&str; 3] = ["association", "singleTissueEqtl", "data"];

pub struct GtexClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl GtexClient {
    pub fn new(client: Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            url: config.gtex_url.clone(),
            timeout: config.gtex_timeout(),
        }
    }

    /// Fetch single-tissue eQTL associations for `gene_symbol` in `tissue`.
    #[instrument(skip(self))]
    pub async fn single_tissue_eqtl(&self, gene_symbol: &str, tissue: &str) -> Result<Value> {
        debug!(gene = gene_symbol, tissue = tissue, "Fetching GTEx eQTL associations");

        let resp = self.client
            .get(&self.url)?
            .query(&[("geneId", gene_symbol), ("tissueName", tissue)])
            .timeout(self.timeout)
            .send()
            .await?;

        json_or_status(SERVICE, resp).await
    }
}

/// True if the response carries at least one association record.
///
/// Empty arrays and `null` count as no records; any other value under a
/// record key counts as present.
pub fn has_associations(value: &Value) -> bool {
    RECORD_KEYS.iter().any(|key| match value.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    })
}
