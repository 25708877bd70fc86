use ipscout_core::ToolId;

const REPUTATION_KEYWORDS: [&str; 3] = ["reputation", "abuse", "malicious"];

/// Map free-form text (a forced choice or a model reply) onto a tool.
///
/// Checks run in priority order: `whois`, then `geo`, then any reputation
/// keyword. This is substring matching, so unrelated occurrences of a
/// keyword still count.
pub fn normalize_decision(raw: &str) -> ToolId {
    let text = raw.to_lowercase().replace('-', "_");

    if text.contains("whois") {
        ToolId::Whois
    } else if text.contains("geo") {
        ToolId::GeoIp
    } else if REPUTATION_KEYWORDS.iter().any(|k| text.contains(k)) {
        ToolId::Reputation
    } else {
        ToolId::Unknown
    }
}
