use std::sync::Arc;

use tracing::{debug, warn};

use ipscout_core::{LlmProvider, LlmRequest, ToolId};

pub const DEFAULT_MODEL: &str = "llama3";

/// Reply used when the model could not be reached or answered nothing.
const UNKNOWN_REPLY: &str = "unknown";

/// Outcome of asking the model for a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Raw model reply, or `"unknown"` when the call failed.
    pub reply: String,
    /// Why the call failed, if it did.
    pub error: Option<String>,
}

/// A tool as presented to the model.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub id: ToolId,
    pub description: String,
}

impl ToolSpec {
    pub fn new(id: ToolId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

/// Asks a text-generation model which tool fits a query.
///
/// The reply is returned verbatim; interpreting it is the normalizer's job.
pub struct ToolSelector {
    provider: Arc<dyn LlmProvider>,
    model: String,
    catalog: Vec<ToolSpec>,
}

impl ToolSelector {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        catalog: Vec<ToolSpec>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            catalog,
        }
    }

    pub fn build_prompt(&self, query: &str) -> String {
        let mut prompt = String::from(
            "You are a cybersecurity assistant. Pick the single tool that best answers the analyst's query.\n\nAvailable tools:\n",
        );
        for tool in &self.catalog {
            if tool.description.is_empty() {
                prompt.push_str(&format!("- {}\n", tool.id));
            } else {
                prompt.push_str(&format!("- {}: {}\n", tool.id, tool.description));
            }
        }
        prompt.push_str(&format!(
            "\nRespond with ONLY the tool name and nothing else.\n\nQuery: {query}\nTool:"
        ));
        prompt
    }

    /// Raw model reply for `query`; a failed call yields `"unknown"`.
    pub async fn select(&self, query: &str) -> Selection {
        let request = LlmRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(query),
            temperature: 0.0,
        };

        match self.provider.complete(&request).await {
            Ok(response) => {
                debug!(
                    provider = %response.provider,
                    latency_ms = response.latency_ms,
                    reply = %response.content.trim(),
                    "Model chose a tool"
                );
                Selection {
                    reply: response.content,
                    error: None,
                }
            }
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Tool selection failed");
                Selection {
                    reply: UNKNOWN_REPLY.to_string(),
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }
}
