//! The query-routing agent.
//!
//! Per query: resolve a decision, resolve the expectation, dispatch the
//! chosen tool (or short-circuit on an invalid choice), build the record.
//! Nothing carries over between queries.

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use ipscout_core::LogRecord;
use ipscout_logging::{AgentEvent, EventLogger};
use ipscout_planner::providers::OllamaProvider;
use ipscout_planner::{ToolSelector, ToolSpec, DEFAULT_MODEL};
use ipscout_tools::ToolRegistry;

use crate::config::{AgentConfig, DecisionMode};
use crate::decision::{Decision, DecisionSource, ExplicitDecision, InferredDecision, QueryRequest};

pub struct CyberAgent {
    registry: ToolRegistry,
    source: Box<dyn DecisionSource>,
    session_id: String,
}

impl CyberAgent {
    /// Build the registry and the decision source selected by `config.mode`.
    pub fn new(config: AgentConfig) -> Self {
        let registry = ToolRegistry::new(config.registry_config());

        let source: Box<dyn DecisionSource> = match config.mode {
            DecisionMode::Explicit => Box::new(ExplicitDecision),
            DecisionMode::Inferred => {
                let provider = OllamaProvider::new().with_base_url(config.ollama_url.clone());
                let catalog = registry
                    .list()
                    .iter()
                    .map(|tool| ToolSpec::new(tool.id(), tool.description()))
                    .collect();
                let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
                let selector = ToolSelector::new(Arc::new(provider), model, catalog);
                Box::new(InferredDecision::new(selector))
            }
        };

        Self::with_source(registry, source)
    }

    pub fn with_source(registry: ToolRegistry, source: Box<dyn DecisionSource>) -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!(session_id = %session_id, mode = %source.mode(), "Agent ready");
        Self {
            registry,
            source,
            session_id,
        }
    }

    pub fn mode(&self) -> DecisionMode {
        self.source.mode()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Handle one query end to end. Always returns a complete record.
    #[instrument(skip(self, request), fields(session_id = %self.session_id, ip = %request.ip))]
    pub async fn handle_query(&self, request: &QueryRequest) -> LogRecord {
        let decision = self.source.decide(request).await;
        EventLogger::log_event(
            &self.session_id,
            AgentEvent::Decision {
                mode: self.mode().to_string(),
                raw: decision.raw.clone(),
                tool: decision.tool,
                expected: decision.expected,
            },
        );

        let output = self.registry.dispatch(decision.tool, &request.ip).await;
        if let Some(error_msg) = self.failure_of(&decision, &output) {
            EventLogger::log_event(&self.session_id, AgentEvent::Error { error_msg });
        }

        let record = LogRecord::new(
            request.prompt.clone(),
            request.ip.clone(),
            decision.chosen_name,
            decision.expected_name,
            output,
        );

        EventLogger::log_event(
            &self.session_id,
            AgentEvent::ToolCall {
                tool: decision.tool,
                ip: record.ip.clone(),
                output: record.tool_output.clone(),
                correct: record.correct,
            },
        );

        record
    }

    /// What went wrong while handling a query, if anything: the decision
    /// could not be obtained, or the dispatched tool reported a failure.
    fn failure_of(&self, decision: &Decision, output: &str) -> Option<String> {
        if let Some(error) = &decision.error {
            return Some(format!("tool selection failed: {error}"));
        }
        let tool = self.registry.get(decision.tool)?;
        output
            .strip_prefix(tool.failure_label())
            .filter(|rest| rest.starts_with(": "))
            .map(|_| output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::routing::get;
    use axum::{Json, Router};
    use ipscout_core::ToolId;
    use ipscout_planner::providers::MockProvider;
    use ipscout_tools::RegistryConfig;
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().to_string()
    }

    /// GeoIP answers from a local stub; the other providers are unreachable.
    async fn stub_config() -> AgentConfig {
        let geoip = serve(Router::new().route(
            "/:ip/json",
            get(|Path(ip): Path<String>| async move {
                Json(json!({ "ip": ip, "city": "Mountain View", "country": "US" }))
            }),
        ))
        .await;

        let mut config = AgentConfig::new("test-key");
        config.geoip_base_url = Some(geoip);
        config.reputation_base_url = Some(format!("http://{}", closed_port().await));
        config.whois_server = Some(closed_port().await);
        config
    }

    fn inferred_agent(config: &AgentConfig, provider: MockProvider) -> CyberAgent {
        let registry = ToolRegistry::new(config.registry_config());
        let catalog = ToolId::ALL.iter().map(|id| ToolSpec::new(*id, "")).collect();
        let selector = ToolSelector::new(Arc::new(provider), DEFAULT_MODEL, catalog);
        CyberAgent::with_source(registry, Box::new(InferredDecision::new(selector)))
    }

    #[tokio::test]
    async fn explicit_correct_choice() {
        let agent = CyberAgent::new(stub_config().await);
        let record = agent
            .handle_query(&QueryRequest::explicit(
                "Where is this IP located?",
                "8.8.8.8",
                "geoip_lookup",
                "geoip_lookup",
            ))
            .await;

        assert_eq!(record.tool_chosen, "geoip_lookup");
        assert_eq!(record.expected_tool, "geoip_lookup");
        assert!(record.correct);
        assert!(record.tool_output.starts_with("GEOIP:"));
        assert_eq!(record.tool_output, "GEOIP: Mountain View, US");
    }

    #[tokio::test]
    async fn explicit_mismatch_still_runs_forced_tool() {
        let agent = CyberAgent::new(stub_config().await);
        let record = agent
            .handle_query(&QueryRequest::explicit(
                "Is this IP malicious?",
                "123.45.67.89",
                "geoip_lookup",
                "reputation_check",
            ))
            .await;

        assert_eq!(record.tool_chosen, "geoip_lookup");
        assert_eq!(record.expected_tool, "reputation_check");
        assert!(!record.correct);
        assert!(record.tool_output.starts_with("GEOIP:"));
    }

    #[tokio::test]
    async fn invalid_forced_tool_short_circuits() {
        let agent = CyberAgent::new(stub_config().await);
        for forced in ["traceroute", "unknown", "", "GEOIP_LOOKUP"] {
            let record = agent
                .handle_query(&QueryRequest::explicit(
                    "Is this IP malicious?",
                    "1.2.3.4",
                    forced,
                    "reputation_check",
                ))
                .await;
            assert_eq!(record.tool_output, "Invalid tool chosen.");
            assert_eq!(record.tool_chosen, forced);
            assert!(!record.correct);
        }
    }

    #[tokio::test]
    async fn distinct_invalid_names_are_not_a_match() {
        let agent = CyberAgent::new(stub_config().await);
        let record = agent
            .handle_query(&QueryRequest::explicit(
                "q",
                "1.1.1.1",
                "traceroute",
                "geoip-lookup",
            ))
            .await;
        assert_eq!(record.tool_output, "Invalid tool chosen.");
        assert_eq!(record.tool_chosen, "traceroute");
        assert_eq!(record.expected_tool, "geoip-lookup");
        assert!(!record.correct);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Tool Chosen"], "traceroute");
        assert_eq!(value["Correct?"], false);
    }

    #[tokio::test]
    async fn identical_invalid_names_match() {
        let agent = CyberAgent::new(stub_config().await);
        let record = agent
            .handle_query(&QueryRequest::explicit("q", "1.1.1.1", "ping", "ping"))
            .await;
        assert_eq!(record.tool_output, "Invalid tool chosen.");
        assert!(record.correct);
    }

    #[tokio::test]
    async fn failing_tool_still_yields_record() {
        let agent = CyberAgent::new(stub_config().await);
        let record = agent
            .handle_query(&QueryRequest::explicit(
                "Which country is this IP from?",
                "1.1.1.1",
                "whois_lookup",
                "geoip_lookup",
            ))
            .await;
        assert!(!record.correct);
        assert!(record.tool_output.starts_with("WHOIS lookup failed: "));
    }

    #[tokio::test]
    async fn inferred_mode_routes_through_model() {
        let config = stub_config().await;
        let agent = inferred_agent(&config, MockProvider::new("mock").with_response("geoip_lookup"));
        assert_eq!(agent.mode(), DecisionMode::Inferred);

        let record = agent
            .handle_query(&QueryRequest::inferred("Where is this IP located?", "8.8.8.8"))
            .await;
        assert_eq!(record.tool_chosen, "geoip_lookup");
        assert_eq!(record.expected_tool, "geoip_lookup");
        assert!(record.correct);
        assert_eq!(record.tool_output, "GEOIP: Mountain View, US");
    }

    #[tokio::test]
    async fn unreachable_model_becomes_invalid_choice() {
        let config = stub_config().await;
        let agent = inferred_agent(&config, MockProvider::new("mock").failing("connection refused"));

        let record = agent
            .handle_query(&QueryRequest::inferred("Is this IP malicious?", "123.45.67.89"))
            .await;
        assert_eq!(record.tool_chosen, "unknown");
        assert_eq!(record.expected_tool, "reputation_check");
        assert!(!record.correct);
        assert_eq!(record.tool_output, "Invalid tool chosen.");
    }

    fn decision(tool: ToolId, error: Option<&str>) -> Decision {
        Decision {
            tool,
            expected: tool,
            chosen_name: tool.as_str().to_string(),
            expected_name: tool.as_str().to_string(),
            raw: tool.as_str().to_string(),
            error: error.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn failures_are_detected_for_error_events() {
        let agent = CyberAgent::new(stub_config().await);

        let whois = "WHOIS lookup failed: could not connect";
        assert_eq!(
            agent.failure_of(&decision(ToolId::Whois, None), whois).as_deref(),
            Some(whois)
        );
        assert_eq!(
            agent
                .failure_of(&decision(ToolId::Unknown, Some("connection refused")), "Invalid tool chosen.")
                .as_deref(),
            Some("tool selection failed: connection refused")
        );

        assert!(agent
            .failure_of(&decision(ToolId::GeoIp, None), "GEOIP: Mountain View, US")
            .is_none());
        assert!(agent
            .failure_of(&decision(ToolId::Unknown, None), "Invalid tool chosen.")
            .is_none());
    }

    #[tokio::test]
    async fn new_selects_source_by_mode() {
        let config = stub_config().await;
        assert_eq!(CyberAgent::new(config.clone()).mode(), DecisionMode::Explicit);
        let inferred = CyberAgent::new(config.with_mode(DecisionMode::Inferred).with_model("mistral"));
        assert_eq!(inferred.mode(), DecisionMode::Inferred);
    }
}
