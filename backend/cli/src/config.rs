use std::fmt;
use std::path::PathBuf;

use ipscout_agent::{AgentConfig, DecisionMode};
use ipscout_core::ScoutError;
use ipscout_logging::redact_secret;
use ipscout_planner::providers::ollama::DEFAULT_OLLAMA_URL;
use ipscout_planner::DEFAULT_MODEL;

/// Placeholder used when no AbuseIPDB key is configured.
pub const ABUSEIPDB_KEY_PLACEHOLDER: &str = "<<ABUSEIPDB KEY>>";

/// ipscout runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// AbuseIPDB API key
    pub abuseipdb_key: String,
    /// Default decision mode
    pub mode: DecisionMode,
    /// Ollama base URL
    pub ollama_url: String,
    /// Model used for inferred decisions
    pub ollama_model: String,
    // Provider overrides
    pub geoip_url: Option<String>,
    pub abuseipdb_url: Option<String>,
    pub whois_server: Option<String>,
    /// Log level
    pub log_level: String,
    /// Directory for rolling JSON logs
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ScoutError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match get("IPSCOUT_MODE") {
            Some(raw) => raw.parse()?,
            None => DecisionMode::default(),
        };

        Ok(Self {
            abuseipdb_key: get("ABUSEIPDB_API_KEY")
                .unwrap_or_else(|| ABUSEIPDB_KEY_PLACEHOLDER.to_string()),
            mode,
            ollama_url: get("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            geoip_url: get("IPSCOUT_GEOIP_URL"),
            abuseipdb_url: get("IPSCOUT_ABUSEIPDB_URL"),
            whois_server: get("IPSCOUT_WHOIS_SERVER"),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: get("IPSCOUT_LOG_DIR").map(PathBuf::from),
        })
    }

    pub fn agent_config(&self, mode: DecisionMode) -> AgentConfig {
        let mut agent = AgentConfig::new(self.abuseipdb_key.clone())
            .with_mode(mode)
            .with_model(self.ollama_model.clone());
        agent.ollama_url = self.ollama_url.clone();
        agent.geoip_base_url = self.geoip_url.clone();
        agent.reputation_base_url = self.abuseipdb_url.clone();
        agent.whois_server = self.whois_server.clone();
        agent
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("abuseipdb_key", &redact_secret(&self.abuseipdb_key))
            .field("mode", &self.mode)
            .field("ollama_url", &self.ollama_url)
            .field("ollama_model", &self.ollama_model)
            .field("geoip_url", &self.geoip_url)
            .field("abuseipdb_url", &self.abuseipdb_url)
            .field("whois_server", &self.whois_server)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
