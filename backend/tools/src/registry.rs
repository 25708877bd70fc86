use reqwest::Client;
use tracing::{debug, info};

use ipscout_core::{LookupTool, ToolId};

use crate::geoip::GeoIpTool;
use crate::reputation::ReputationTool;
use crate::whois::WhoisTool;

/// Result string for a decision that names no dispatchable tool.
pub const INVALID_TOOL_OUTPUT: &str = "Invalid tool chosen.";

/// Construction parameters for the tool registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub abuseipdb_key: String,
    /// Overrides for the provider endpoints; `None` uses the public services.
    pub geoip_base_url: Option<String>,
    pub reputation_base_url: Option<String>,
    pub whois_server: Option<String>,
}

/// The fixed set of lookup tools, built once and read-only afterwards.
pub struct ToolRegistry {
    whois: WhoisTool,
    geoip: GeoIpTool,
    reputation: ReputationTool,
}

impl ToolRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        let client = Client::new();

        let mut whois = WhoisTool::new();
        if let Some(server) = config.whois_server {
            whois = whois.with_server(server);
        }

        let mut geoip = GeoIpTool::new(client.clone());
        if let Some(url) = config.geoip_base_url {
            geoip = geoip.with_base_url(url);
        }

        let mut reputation = ReputationTool::new(client, config.abuseipdb_key);
        if let Some(url) = config.reputation_base_url {
            reputation = reputation.with_base_url(url);
        }

        info!("Tool registry initialized");
        Self {
            whois,
            geoip,
            reputation,
        }
    }

    pub fn get(&self, id: ToolId) -> Option<&dyn LookupTool> {
        match id {
            ToolId::Whois => Some(&self.whois),
            ToolId::GeoIp => Some(&self.geoip),
            ToolId::Reputation => Some(&self.reputation),
            ToolId::Unknown => None,
        }
    }

    /// All tools in `ToolId::ALL` order.
    pub fn list(&self) -> Vec<&dyn LookupTool> {
        ToolId::ALL.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Run the tool named by `id` against `ip`.
    ///
    /// `Unknown` short-circuits to [`INVALID_TOOL_OUTPUT`] without any I/O.
    pub async fn dispatch(&self, id: ToolId, ip: &str) -> String {
        debug!(tool = %id, ip = %ip, "Dispatching tool");
        match id {
            ToolId::Whois => self.whois.run(ip).await,
            ToolId::GeoIp => self.geoip.run(ip).await,
            ToolId::Reputation => self.reputation.run(ip).await,
            ToolId::Unknown => INVALID_TOOL_OUTPUT.to_string(),
        }
    }
}
