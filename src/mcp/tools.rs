//! Tool definitions and dispatch for the stdio server.
//!
//! Each tool maps to one `Cellar` operation and returns the result object as
//! pretty-printed JSON text content.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::cellar::Cellar;
use crate::errors::{CellarError, Result};
use crate::types::{CELEX_LEN, ECLI_LEN};

/// A tool exposed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Returns the definitions of all tools.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "cellar_validate".to_string(),
            description: "Check that a CELEX number identifies a document in EUR-Lex and return its English title and ECLI.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "celex": {
                        "type": "string",
                        "description": "CELEX number, e.g. 32019R0947",
                        "minLength": CELEX_LEN.0,
                        "maxLength": CELEX_LEN.1
                    }
                },
                "required": ["celex"]
            }),
        },
        ToolDefinition {
            name: "cellar_find_by_ecli".to_string(),
            description: "Find the CELEX number and English title of a judgment from its European Case Law Identifier.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ecli": {
                        "type": "string",
                        "description": "Case-law identifier, with or without the ECLI: label, e.g. ECLI:EU:C:2024:819",
                        "minLength": ECLI_LEN.0,
                        "maxLength": ECLI_LEN.1
                    }
                },
                "required": ["ecli"]
            }),
        },
    ]
}

/// Dispatches a tool call.
///
/// Fails only for unknown tools and invalid arguments; lookups themselves
/// always produce a result object.
pub fn handle_tool_call(cellar: &Cellar, tool_name: &str, args: Value) -> Result<Value> {
    match tool_name {
        "cellar_validate" => {
            let celex = required_str(&args, "celex")?;
            let result = cellar.validate_checked(celex)?;
            Ok(text_content(&serde_json::to_value(result)?))
        }
        "cellar_find_by_ecli" => {
            let ecli = required_str(&args, "ecli")?;
            let result = cellar.find_by_ecli_checked(ecli)?;
            Ok(text_content(&serde_json::to_value(result)?))
        }
        _ => Err(CellarError::InvalidInput {
            field: "name".to_string(),
            message: format!("unknown tool: {}", tool_name),
        }),
    }
}

fn required_str<'v>(args: &'v Value, field: &str) -> Result<&'v str> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CellarError::InvalidInput {
            field: field.to_string(),
            message: format!("missing required string parameter: {}", field),
        })
}

/// Wraps a result object as MCP text content, also attaching it as
/// structured content.
fn text_content(result: &Value) -> Value {
    let text = serde_json::to_string_pretty(result).unwrap_or_default();
    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definitions_complete() {
        let tools = get_tool_definitions();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["cellar_validate", "cellar_find_by_ecli"]);
        for tool in &tools {
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_schema_carries_length_bounds() {
        let tools = get_tool_definitions();
        assert_eq!(tools[0].input_schema["properties"]["celex"]["minLength"], 5);
        assert_eq!(tools[1].input_schema["properties"]["ecli"]["maxLength"], 50);
    }

    #[test]
    fn test_text_content_wraps_json() {
        let value = text_content(&json!({"valid": false, "title": null, "ecli": null}));
        let text = value["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"valid\": false"));
        assert_eq!(value["structuredContent"]["valid"], false);
    }

    #[test]
    fn test_required_str_missing() {
        let err = required_str(&json!({}), "celex").unwrap_err();
        assert!(matches!(err, CellarError::InvalidInput { ref field, .. } if field == "celex"));
    }
}
