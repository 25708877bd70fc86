use once_cell::sync::Lazy;
use regex::Regex;

use ipscout_core::ToolId;

/// Keyword policy, tested in order; the first match wins.
static EXPECTATION_RULES: Lazy<Vec<(Regex, ToolId)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"where|location|country").unwrap(), ToolId::GeoIp),
        (
            Regex::new(r"who owns|registrant|organization|owner").unwrap(),
            ToolId::Whois,
        ),
        (
            Regex::new(r"malicious|safe|reputation|blacklist").unwrap(),
            ToolId::Reputation,
        ),
    ]
});

/// The tool a query ought to be routed to, by keyword.
pub fn classify_expectation(query: &str) -> ToolId {
    let query = query.to_lowercase();
    EXPECTATION_RULES
        .iter()
        .find(|(re, _)| re.is_match(&query))
        .map(|(_, id)| *id)
        .unwrap_or(ToolId::Unknown)
}
