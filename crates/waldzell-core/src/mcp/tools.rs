//! Tool definitions and argument types for the metagame tools.

use crate::mcp::messages::JsonRpcError;
use crate::metagames::{Complexity, ListFilter, ListFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const GET_METAGAME: &str = "getMetagame";
pub const LIST_METAGAMES: &str = "listMetagames";

/// Tool advertised through `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Every tool this server offers.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_METAGAME.to_string(),
            description: "Returns the content of a specific metagame document".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Name of the metagame to retrieve"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: LIST_METAGAMES.to_string(),
            description: "Lists all available metagames with metadata".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string", "description": "Filter by category" },
                    "subcategory": { "type": "string", "description": "Filter by subcategory" },
                    "complexity": {
                        "type": "string",
                        "enum": ["beginner", "intermediate", "advanced", "expert"],
                        "description": "Filter by complexity level"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Filter by tags"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["list", "tree", "detailed"],
                        "default": "list",
                        "description": "Output format"
                    }
                }
            }),
        },
    ]
}

/// Arguments of `getMetagame`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GetMetagameArgs {
    pub name: String,
}

/// Arguments of `listMetagames`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ListMetagamesArgs {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub complexity: Option<Complexity>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub format: ListFormat,
}

impl ListMetagamesArgs {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            complexity: self.complexity,
            tags: self.tags.clone().unwrap_or_default(),
        }
    }
}

/// Deserialize tool arguments, treating a missing value as `{}`.
///
/// # Errors
///
/// Returns an invalid-params error describing the first mismatch.
pub fn parse_args<T: DeserializeOwned>(arguments: Option<&Value>) -> Result<T, JsonRpcError> {
    let arguments = arguments.cloned().unwrap_or_else(|| json!({}));
    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}")))
}

/// Deserialize and check `getMetagame` arguments.
///
/// # Errors
///
/// Returns an invalid-params error if `name` is missing or empty.
pub fn parse_get_metagame_args(arguments: Option<&Value>) -> Result<GetMetagameArgs, JsonRpcError> {
    let args: GetMetagameArgs = parse_args(arguments)?;
    if args.name.is_empty() {
        return Err(JsonRpcError::invalid_params("Invalid arguments: name must not be empty"));
    }
    Ok(args)
}

/// Tool result wrapping a single text block.
pub fn text_content(text: impl Into<String>) -> Value {
    json!({ "content": [{ "type": "text", "text": text.into() }] })
}
