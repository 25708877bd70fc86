use async_trait::async_trait;

use ipscout_core::ToolId;
use ipscout_planner::{classify_expectation, normalize_decision, ToolSelector};

use crate::config::DecisionMode;

/// One analyst query.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub prompt: String,
    pub ip: String,
    /// Tool forced by the caller (explicit mode only).
    pub forced_tool: Option<String>,
    /// Tool the caller considers correct (explicit mode only).
    pub expected_tool: Option<String>,
}

impl QueryRequest {
    pub fn explicit(
        prompt: impl Into<String>,
        ip: impl Into<String>,
        forced_tool: impl Into<String>,
        expected_tool: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            ip: ip.into(),
            forced_tool: Some(forced_tool.into()),
            expected_tool: Some(expected_tool.into()),
        }
    }

    pub fn inferred(prompt: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ip: ip.into(),
            forced_tool: None,
            expected_tool: None,
        }
    }
}

/// A resolved tool choice and the tool it is judged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Tool to dispatch.
    pub tool: ToolId,
    pub expected: ToolId,
    /// Name recorded as the chosen tool. In explicit mode this is the
    /// caller's name verbatim, even when it names no known tool.
    pub chosen_name: String,
    /// Name recorded as the expected tool, same rule as `chosen_name`.
    pub expected_name: String,
    /// Text the decision was read from.
    pub raw: String,
    /// Why the decision could not be obtained, if it failed.
    pub error: Option<String>,
}

/// Produces the tool decision and expectation for a query.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    fn mode(&self) -> DecisionMode;

    async fn decide(&self, request: &QueryRequest) -> Decision;
}

/// Uses the caller's forced tool and expected tool as given.
pub struct ExplicitDecision;

#[async_trait]
impl DecisionSource for ExplicitDecision {
    fn mode(&self) -> DecisionMode {
        DecisionMode::Explicit
    }

    async fn decide(&self, request: &QueryRequest) -> Decision {
        let unknown = || ToolId::Unknown.as_str().to_string();
        let chosen_name = request.forced_tool.clone().unwrap_or_else(unknown);
        let expected_name = request.expected_tool.clone().unwrap_or_else(unknown);
        Decision {
            tool: ToolId::from_name(&chosen_name),
            expected: ToolId::from_name(&expected_name),
            raw: chosen_name.clone(),
            chosen_name,
            expected_name,
            error: None,
        }
    }
}

/// Asks the model for a tool and classifies the expectation by keyword.
pub struct InferredDecision {
    selector: ToolSelector,
}

impl InferredDecision {
    pub fn new(selector: ToolSelector) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl DecisionSource for InferredDecision {
    fn mode(&self) -> DecisionMode {
        DecisionMode::Inferred
    }

    async fn decide(&self, request: &QueryRequest) -> Decision {
        let selection = self.selector.select(&request.prompt).await;
        let tool = normalize_decision(&selection.reply);
        let expected = classify_expectation(&request.prompt);
        Decision {
            tool,
            expected,
            chosen_name: tool.as_str().to_string(),
            expected_name: expected.as_str().to_string(),
            raw: selection.reply,
            error: selection.error,
        }
    }
}
