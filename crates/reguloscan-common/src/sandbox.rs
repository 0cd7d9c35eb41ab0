use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;
use url::Url;
use crate::error::ReguloError;

/// Upper bound applied to every request; clients set tighter per-call timeouts.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP client that only allows requests to approved domains.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist of annotation services.
    pub fn new() -> Result<Self, ReguloError> {
        let mut allowlist = HashSet::new();
        let domains = [
            "rest.ensembl.org",         // Ensembl VEP + Regulatory Build
            "grch37.rest.ensembl.org",  // Ensembl GRCh37 mirror
            "cadd.gs.washington.edu",   // CADD
            "gtexportal.org",           // GTEx
            "localhost",
            "127.0.0.1",
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("reguloscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReguloError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends the host of `url` to the allowlist. Unparseable URLs are ignored.
    pub fn allow_url_host(&mut self, url: &str) {
        if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            self.allowlist.insert(host);
        }
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// GET request builder, refused for hosts outside the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ReguloError> {
        self.request(reqwest::Method::GET, url)
    }

    /// POST request builder, refused for hosts outside the allowlist.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, ReguloError> {
        self.request(reqwest::Method::POST, url)
    }

    pub fn request(&self, method: reqwest::Method, url: &str) -> Result<reqwest::RequestBuilder, ReguloError> {
        if !self.is_allowed(url) {
            warn!(url, "Request refused by network sandbox");
            return Err(ReguloError::SecurityError(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.request(method, url))
    }
}
