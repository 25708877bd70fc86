//! Tool selection for ipscout.
//!
//! Two independent keyword policies live here: [`normalize_decision`] reads
//! a tool name out of free text, [`classify_expectation`] decides which tool
//! a query *should* use. They are kept separate on purpose and may disagree.

pub mod expectation;
pub mod normalizer;
pub mod providers;
pub mod selector;

pub use expectation::classify_expectation;
pub use normalizer::normalize_decision;
pub use selector::{Selection, ToolSelector, ToolSpec, DEFAULT_MODEL};
