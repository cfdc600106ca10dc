use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

mod repos;
mod status;
mod types;

pub use types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Repos,
    TriggerUpdate,
    LastUpdated,
    Updating,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Repos,
        Endpoint::TriggerUpdate,
        Endpoint::LastUpdated,
        Endpoint::Updating,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Repos => "/repos",
            Endpoint::TriggerUpdate => "/repos/update",
            Endpoint::LastUpdated => "/db/updated",
            Endpoint::Updating => "/db/updating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Repos => "repos",
            Endpoint::TriggerUpdate => "update",
            Endpoint::LastUpdated => "last updated",
            Endpoint::Updating => "updating",
        }
    }
}

pub struct BackendClient {
    client: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repodash/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let relative = endpoint.path().trim_start_matches('/');
        self.base
            .join(relative)
            .with_context(|| format!("Failed to build URL for {}", endpoint.path()))
    }

    async fn get(&self, endpoint: Endpoint) -> Result<reqwest::Response> {
        let url = self.endpoint_url(endpoint)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", endpoint.path()))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", endpoint.path()))?;
        Ok(response)
    }
}

/// Base URLs are treated as directories so that `http://host/dash` keeps its
/// `/dash` prefix when endpoint paths are joined onto it.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&normalized)
        .with_context(|| format!("Invalid backend URL: {}", base_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Backend URL must be http or https: {}", base_url);
    }
    Ok(url)
}
