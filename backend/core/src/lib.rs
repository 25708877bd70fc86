pub mod error;
pub mod record;
pub mod tool_id;
pub mod traits;

pub use error::ScoutError;
pub use record::LogRecord;
pub use tool_id::ToolId;
pub use traits::{LlmProvider, LlmRequest, LlmResponse, LookupTool};
