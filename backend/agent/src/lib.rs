//! ipscout agent
//!
//! Routes an analyst query to one lookup tool, checks the choice against
//! the keyword expectation, and returns a [`LogRecord`](ipscout_core::LogRecord).

pub mod agent;
pub mod config;
pub mod decision;

pub use agent::CyberAgent;
pub use config::{AgentConfig, DecisionMode};
pub use decision::{Decision, DecisionSource, ExplicitDecision, InferredDecision, QueryRequest};
