//! Tool definitions for the code review agent.
//!
//! This module defines the tools an LLM agent runtime can call and
//! dispatches those calls to the repository and review operations.

use crate::commit;
use crate::config::ReviewConfig;
use crate::models::CommitType;
use crate::report;
use crate::vcs;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

/// Tool definition in function-calling format.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A tool call made by the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            function: FunctionCall {
                name: name.to_string(),
                arguments,
            },
        }
    }
}

/// Result of executing a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message),
        }
    }

    fn from_json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Self::success(output),
            Err(e) => Self::error(format!("Failed to serialize result: {}", e)),
        }
    }
}

/// The tools executor that handles tool calls.
pub struct ToolExecutor {
    /// Paths left out of `list_changes`.
    excludes: Vec<String>,
    /// Defaults for `write_review`.
    review: ReviewConfig,
}

impl ToolExecutor {
    pub fn new(excludes: Vec<String>, review: ReviewConfig) -> Self {
        Self { excludes, review }
    }

    /// Execute a tool call and return the result.
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let name = &tool_call.function.name;
        let args = &tool_call.function.arguments;

        debug!("Executing tool: {} with args: {:?}", name, args);

        match name.as_str() {
            "list_changes" => self.list_changes(args).await,
            "generate_commit_message" => self.generate_commit_message(args).await,
            "write_review" => self.write_review(args).await,
            _ => ToolResult::error(format!("Unknown tool: {}", name)),
        }
    }

    /// List changed files with their diffs.
    async fn list_changes(&self, args: &Value) -> ToolResult {
        let root = match required_str(args, "directory") {
            Ok(dir) => PathBuf::from(dir),
            Err(result) => return result,
        };
        let excludes = self.excludes.clone();

        match tokio::task::spawn_blocking(move || vcs::list_changes(&root, &excludes)).await {
            Ok(Ok(changes)) => ToolResult::from_json(&changes),
            Ok(Err(e)) => ToolResult::error(e.to_string()),
            Err(e) => ToolResult::error(format!("Tool task failed: {}", e)),
        }
    }

    /// Derive a conventional commit message.
    async fn generate_commit_message(&self, args: &Value) -> ToolResult {
        let root = match required_str(args, "directory") {
            Ok(dir) => PathBuf::from(dir),
            Err(result) => return result,
        };

        let explicit = match optional_str(args, "type") {
            Ok(Some(t)) => match t.parse::<CommitType>() {
                Ok(commit_type) => Some(commit_type),
                Err(e) => return ToolResult::error(e),
            },
            Ok(None) => None,
            Err(result) => return result,
        };

        match tokio::task::spawn_blocking(move || commit::generate_commit_message(&root, explicit))
            .await
        {
            Ok(Ok(outcome)) => ToolResult::from_json(&outcome),
            Ok(Err(e)) => ToolResult::error(e.to_string()),
            Err(e) => ToolResult::error(format!("Tool task failed: {}", e)),
        }
    }

    /// Save review text as a Markdown document.
    async fn write_review(&self, args: &Value) -> ToolResult {
        let path = match required_str(args, "file_path") {
            Ok(p) => PathBuf::from(p),
            Err(result) => return result,
        };
        let content = match required_str(args, "review_content") {
            Ok(c) => c.to_string(),
            Err(result) => return result,
        };

        let title = match optional_str(args, "title") {
            Ok(t) => t,
            Err(result) => return result,
        };
        let include_timestamp = match optional_bool(args, "include_timestamp") {
            Ok(b) => b,
            Err(result) => return result,
        };
        let options = self.review.options(title, include_timestamp);

        match tokio::task::spawn_blocking(move || report::write_review(&path, &content, &options))
            .await
        {
            Ok(result) => {
                let success = result.success;
                let mut tool_result = ToolResult::from_json(&result);
                tool_result.success &= success;
                tool_result
            }
            Err(e) => ToolResult::error(format!("Tool task failed: {}", e)),
        }
    }
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolResult> {
    match args.get(key).and_then(|v| v.as_str()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ToolResult::error(format!(
            "Missing required parameter: {}",
            key
        ))),
    }
}

/// An optional string parameter. Present with another JSON type is an error.
fn optional_str<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, ToolResult> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ToolResult::error(format!(
            "Invalid parameter {}: expected a string",
            key
        ))),
    }
}

/// An optional boolean parameter. Present with another JSON type is an error.
fn optional_bool(args: &Value, key: &str) -> Result<Option<bool>, ToolResult> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ToolResult::error(format!(
            "Invalid parameter {}: expected a boolean",
            key
        ))),
    }
}

/// Get the tool definitions for the agent runtime.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    let commit_types: Vec<&str> = CommitType::ALL.iter().map(|t| t.as_str()).collect();

    vec![
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: "list_changes".to_string(),
                description: "List files with uncommitted changes in a git repository, with the unified diff for each file.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "directory": {
                            "type": "string",
                            "description": "Path to the root of the git repository"
                        }
                    },
                    "required": ["directory"]
                }),
            },
        },
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: "generate_commit_message".to_string(),
                description: "Generate a conventional commit message from the uncommitted changes in a git repository.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "directory": {
                            "type": "string",
                            "description": "Path to the root of the git repository"
                        },
                        "type": {
                            "type": "string",
                            "enum": commit_types,
                            "description": "Commit type to use instead of detecting one"
                        }
                    },
                    "required": ["directory"]
                }),
            },
        },
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: "write_review".to_string(),
                description: "Save code review feedback to a Markdown file.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "file_path": {
                            "type": "string",
                            "description": "Where to write the review (parent directories are created)"
                        },
                        "review_content": {
                            "type": "string",
                            "description": "Review text in Markdown"
                        },
                        "title": {
                            "type": "string",
                            "description": "Document title (default: Code Review)"
                        },
                        "include_timestamp": {
                            "type": "boolean",
                            "description": "Add a generation timestamp (default: true)"
                        }
                    },
                    "required": ["file_path", "review_content"]
                }),
            },
        },
    ]
}
