//! Agent Event Logger
//!
//! Structured events (decision, tool_call, error) routed to the
//! `agent_events` tracing target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use ipscout_core::ToolId;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    Decision {
        mode: String,
        raw: String,
        tool: ToolId,
        expected: ToolId,
    },
    ToolCall {
        tool: ToolId,
        ip: String,
        output: String,
        correct: bool,
    },
    Error {
        error_msg: String,
    },
}

impl AgentEvent {
    fn redact(&mut self) {
        match self {
            AgentEvent::Decision { raw, .. } => *raw = redact_sensitive_data(raw),
            AgentEvent::ToolCall { output, .. } => *output = redact_sensitive_data(output),
            AgentEvent::Error { error_msg } => *error_msg = redact_sensitive_data(error_msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AgentEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Build the redacted, timestamped entry for an event.
    pub fn entry(session_id: &str, mut event: AgentEvent) -> EventLogEntry {
        event.redact();
        EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// Log an agent event after redaction.
    pub fn log_event(session_id: &str, event: AgentEvent) {
        let entry = Self::entry(session_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "agent_events", event = %json, "Agent trace event"),
            Err(e) => info!(target: "agent_events", event = ?entry, error = %e, "Agent trace event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_is_redacted_and_tagged() {
        let key = "0f".repeat(40);
        let entry = EventLogger::entry(
            "session-1",
            AgentEvent::Error {
                error_msg: format!("rejected key {key}"),
            },
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["session_id"], "session-1");
        assert_eq!(value["event"]["type"], "Error");
        assert_eq!(value["event"]["error_msg"], "rejected key [REDACTED_TOKEN]");
    }

    #[test]
    fn tool_ids_serialize_by_name() {
        let entry = EventLogger::entry(
            "s",
            AgentEvent::Decision {
                mode: "inferred".into(),
                raw: "GeoIP".into(),
                tool: ToolId::GeoIp,
                expected: ToolId::Whois,
            },
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["event"]["tool"], "geoip_lookup");
        assert_eq!(value["event"]["expected"], "whois_lookup");
    }
}
