use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ipscout_core::ScoutError;
use ipscout_logging::redact_secret;
use ipscout_planner::providers::ollama::DEFAULT_OLLAMA_URL;
use ipscout_tools::RegistryConfig;

/// Where tool decisions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionMode {
    /// The caller names the tool and the expected tool.
    #[default]
    Explicit,
    /// A local model picks the tool; the keyword policy supplies the expectation.
    Inferred,
}

impl DecisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionMode::Explicit => "explicit",
            DecisionMode::Inferred => "inferred",
        }
    }
}

impl fmt::Display for DecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionMode {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" | "forced" => Ok(DecisionMode::Explicit),
            "inferred" | "llm" => Ok(DecisionMode::Inferred),
            other => Err(ScoutError::Config(format!(
                "unknown decision mode '{other}' (expected explicit or inferred)"
            ))),
        }
    }
}

/// Agent configuration, fixed for the agent's lifetime.
#[derive(Clone)]
pub struct AgentConfig {
    pub abuseipdb_key: String,
    /// Model used for inferred decisions; `None` uses the planner default.
    pub model: Option<String>,
    pub mode: DecisionMode,
    pub ollama_url: String,
    pub geoip_base_url: Option<String>,
    pub reputation_base_url: Option<String>,
    pub whois_server: Option<String>,
}

impl AgentConfig {
    pub fn new(abuseipdb_key: impl Into<String>) -> Self {
        Self {
            abuseipdb_key: abuseipdb_key.into(),
            model: None,
            mode: DecisionMode::default(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            geoip_base_url: None,
            reputation_base_url: None,
            whois_server: None,
        }
    }

    pub fn with_mode(mut self, mode: DecisionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            abuseipdb_key: self.abuseipdb_key.clone(),
            geoip_base_url: self.geoip_base_url.clone(),
            reputation_base_url: self.reputation_base_url.clone(),
            whois_server: self.whois_server.clone(),
        }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("abuseipdb_key", &redact_secret(&self.abuseipdb_key))
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("ollama_url", &self.ollama_url)
            .field("geoip_base_url", &self.geoip_base_url)
            .field("reputation_base_url", &self.reputation_base_url)
            .field("whois_server", &self.whois_server)
            .finish()
    }
}
