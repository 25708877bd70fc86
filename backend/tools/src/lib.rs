pub mod geoip;
pub mod registry;
pub mod reputation;
pub mod whois;

#[cfg(test)]
pub(crate) mod test_support;

pub use geoip::GeoIpTool;
pub use registry::{RegistryConfig, ToolRegistry, INVALID_TOOL_OUTPUT};
pub use reputation::ReputationTool;
pub use whois::WhoisTool;

/// Placeholder rendered for any field the provider did not return.
pub const NOT_AVAILABLE: &str = "N/A";
