//! Telemetry and structured logging for ipscout.
//!
//! Handles subscriber setup, secret redaction, and agent event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AgentEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::{redact_secret, redact_sensitive_data};
