use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a lookup tool.
///
/// `Unknown` stands for any decision that does not name one of the three
/// dispatchable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    #[serde(rename = "whois_lookup")]
    Whois,
    #[serde(rename = "geoip_lookup")]
    GeoIp,
    #[serde(rename = "reputation_check")]
    Reputation,
    #[serde(rename = "unknown")]
    Unknown,
}

impl ToolId {
    /// The dispatchable tools, in registry order.
    pub const ALL: [ToolId; 3] = [ToolId::Whois, ToolId::GeoIp, ToolId::Reputation];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Whois => "whois_lookup",
            ToolId::GeoIp => "geoip_lookup",
            ToolId::Reputation => "reputation_check",
            ToolId::Unknown => "unknown",
        }
    }

    /// Exact name match. Anything that is not one of the three tool names
    /// maps to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "whois_lookup" => ToolId::Whois,
            "geoip_lookup" => ToolId::GeoIp,
            "reputation_check" => ToolId::Reputation,
            _ => ToolId::Unknown,
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
