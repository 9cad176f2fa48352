//! Agent-facing tool surface.
//!
//! This module exposes the repository and review operations as tools
//! an external LLM agent runtime can call.

pub mod tools;

pub use tools::{get_tool_definitions, ToolCall, ToolExecutor};
