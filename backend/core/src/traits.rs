use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::tool_id::ToolId;

/// An external lookup keyed by IP address.
#[async_trait]
pub trait LookupTool: Send + Sync {
    /// Which tool this is.
    fn id(&self) -> ToolId;

    /// Description for the tool-selection prompt.
    fn description(&self) -> &str;

    /// Prefix of every failure string, e.g. `"GeoIP lookup failed"`.
    fn failure_label(&self) -> &str;

    /// Perform the lookup and render the success string.
    async fn lookup(&self, ip: &str) -> Result<String>;

    /// Run the lookup, folding any error into a labeled failure string.
    async fn run(&self, ip: &str) -> String {
        match self.lookup(ip).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %self.id(), ip = %ip, error = %e, "Lookup failed");
                format!("{}: {:#}", self.failure_label(), e)
            }
        }
    }
}

/// Trait for text-generation backends used to pick a tool.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
