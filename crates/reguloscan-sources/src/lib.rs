//! reguloscan-sources: REST clients for the annotation services the scorer
//! consumes (Ensembl VEP, CADD, GTEx), plus best-effort readers for the
//! fields the scorer needs from their responses.
//!
//! Responses are returned as opaque `serde_json::Value`s: the services'
//! schemas are not modelled, only probed.

pub mod config;
pub mod vep;
pub mod cadd;
pub mod gtex;

pub use cadd::CaddClient;
pub use config::SourcesConfig;
pub use gtex::GtexClient;
pub use vep::VepClient;

use reguloscan_common::{ReguloError, Result};
use url::Url;

/// Decode a JSON body, mapping non-2xx responses to `UpstreamStatus`.
pub(crate) async fn json_or_status(
    service: &str,
    resp: reqwest::Response,
) -> Result<serde_json::Value> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ReguloError::UpstreamStatus {
            service: service.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp.json::<serde_json::Value>().await?)
}

/// Append path segments to a base URL, percent-encoding each segment.
pub(crate) fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| ReguloError::Config(format!("Invalid base URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ReguloError::Config(format!("Base URL cannot carry a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
