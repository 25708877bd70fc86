//! IP reputation check against the AbuseIPDB v2 API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ipscout_core::{LookupTool, ScoutError, ToolId};

use crate::NOT_AVAILABLE;

pub const DEFAULT_ABUSEIPDB_URL: &str = "https://api.abuseipdb.com";
const MAX_AGE_IN_DAYS: &str = "90";

pub struct ReputationTool {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    data: Option<CheckData>,
}

#[derive(Debug, Deserialize)]
struct CheckData {
    #[serde(rename = "abuseConfidenceScore")]
    abuse_confidence_score: Option<Value>,
}

impl ReputationTool {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_ABUSEIPDB_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

fn render_score(score: Option<&Value>) -> String {
    match score {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl LookupTool for ReputationTool {
    fn id(&self) -> ToolId {
        ToolId::Reputation
    }

    fn description(&self) -> &str {
        "Check whether an IP address is reported as malicious (abuse confidence score)"
    }

    fn failure_label(&self) -> &str {
        "Reputation check failed"
    }

    async fn lookup(&self, ip: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(ScoutError::MissingCredential("AbuseIPDB API key".into()).into());
        }

        let url = format!("{}/api/v2/check", self.base_url.trim_end_matches('/'));
        debug!(url = %url, ip = %ip, "Querying AbuseIPDB");

        let response = self
            .client
            .get(&url)
            .query(&[("ipAddress", ip), ("maxAgeInDays", MAX_AGE_IN_DAYS)])
            .header("Accept", "application/json")
            .header("Key", &self.api_key)
            .send()
            .await
            .context("AbuseIPDB request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::ProviderStatus {
                provider: "AbuseIPDB".into(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.context("failed to read AbuseIPDB body")?;
        let check: CheckResponse = serde_json::from_str(&body)
            .map_err(|e| ScoutError::MalformedResponse(e.to_string()))?;

        let score = check
            .data
            .as_ref()
            .and_then(|d| d.abuse_confidence_score.as_ref());

        Ok(format!(
            "Reputation: Abuse Confidence Score = {}",
            render_score(score)
        ))
    }
}
