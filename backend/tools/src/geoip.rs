//! GeoIP lookup against the ipinfo.io JSON API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use ipscout_core::{LookupTool, ScoutError, ToolId};

use crate::NOT_AVAILABLE;

pub const DEFAULT_GEOIP_URL: &str = "https://ipinfo.io";

pub struct GeoIpTool {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    city: Option<String>,
    country: Option<String>,
}

impl GeoIpTool {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_GEOIP_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LookupTool for GeoIpTool {
    fn id(&self) -> ToolId {
        ToolId::GeoIp
    }

    fn description(&self) -> &str {
        "Find the geographic location (city and country) of an IP address"
    }

    fn failure_label(&self) -> &str {
        "GeoIP lookup failed"
    }

    async fn lookup(&self, ip: &str) -> Result<String> {
        let url = format!("{}/{}/json", self.base_url.trim_end_matches('/'), ip);
        debug!(url = %url, "Querying ipinfo");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("ipinfo request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::ProviderStatus {
                provider: "ipinfo".into(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.context("failed to read ipinfo body")?;
        let info: IpInfo = serde_json::from_str(&body)
            .map_err(|e| ScoutError::MalformedResponse(e.to_string()))?;

        Ok(format!(
            "GEOIP: {}, {}",
            info.city.as_deref().unwrap_or(NOT_AVAILABLE),
            info.country.as_deref().unwrap_or(NOT_AVAILABLE)
        ))
    }
}
