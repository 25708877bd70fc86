use serde::Serialize;

/// Outcome of a single handled query.
///
/// The chosen and expected tools are kept as the names the decision was
/// made with, so two different unrecognized names never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(rename = "Prompt")]
    pub prompt: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Tool Chosen")]
    pub tool_chosen: String,
    #[serde(rename = "Expected Tool")]
    pub expected_tool: String,
    #[serde(rename = "Correct?")]
    pub correct: bool,
    #[serde(rename = "Tool Output")]
    pub tool_output: String,
}

impl LogRecord {
    /// Build a record; `correct` is always `tool_chosen == expected_tool`.
    pub fn new(
        prompt: impl Into<String>,
        ip: impl Into<String>,
        tool_chosen: impl Into<String>,
        expected_tool: impl Into<String>,
        tool_output: impl Into<String>,
    ) -> Self {
        let tool_chosen = tool_chosen.into();
        let expected_tool = expected_tool.into();
        Self {
            prompt: prompt.into(),
            ip: ip.into(),
            correct: tool_chosen == expected_tool,
            tool_chosen,
            expected_tool,
            tool_output: tool_output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolId;

    #[test]
    fn correct_is_value_equality() {
        let hit = LogRecord::new("q", "1.1.1.1", "geoip_lookup", "geoip_lookup", "GEOIP: x, y");
        assert!(hit.correct);

        let miss = LogRecord::new("q", "1.1.1.1", "whois_lookup", "geoip_lookup", "WHOIS: x");
        assert!(!miss.correct);

        let same_unknown = LogRecord::new(
            "q",
            "1.1.1.1",
            ToolId::Unknown.as_str(),
            ToolId::Unknown.as_str(),
            "Invalid tool chosen.",
        );
        assert!(same_unknown.correct);
    }

    #[test]
    fn distinct_invalid_names_do_not_match() {
        let record = LogRecord::new(
            "q",
            "1.1.1.1",
            "traceroute",
            "geoip-lookup",
            "Invalid tool chosen.",
        );
        assert!(!record.correct);
        assert_eq!(record.tool_chosen, "traceroute");
        assert_eq!(record.expected_tool, "geoip-lookup");
    }

    #[test]
    fn serializes_with_display_keys() {
        let record = LogRecord::new(
            "Where is this IP located?",
            "8.8.8.8",
            ToolId::GeoIp.as_str(),
            ToolId::GeoIp.as_str(),
            "GEOIP: Mountain View, US",
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Prompt"], "Where is this IP located?");
        assert_eq!(value["IP"], "8.8.8.8");
        assert_eq!(value["Tool Chosen"], "geoip_lookup");
        assert_eq!(value["Expected Tool"], "geoip_lookup");
        assert_eq!(value["Correct?"], true);
        assert_eq!(value["Tool Output"], "GEOIP: Mountain View, US");
    }
}
