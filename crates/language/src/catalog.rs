//! Tool catalog advertised through `tools/list`.

use mcp::Tool;
use serde_json::{Value, json};

use crate::operation::Operation;

/// The four tool descriptors, in fixed order.
pub fn list_tools() -> Vec<Tool> {
    Operation::ALL.into_iter().map(descriptor).collect()
}

pub fn descriptor(operation: Operation) -> Tool {
    Tool {
        name: operation.tool_name().to_string(),
        description: operation.description().to_string(),
        input_schema: text_input_schema(),
    }
}

fn text_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "text": {
                "type": "string",
                "description": "The text to analyze"
            }
        },
        "required": ["text"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_tools_in_order() {
        let names: Vec<String> = list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "analyze_sentiment",
                "extract_entities",
                "classify_content",
                "analyze_syntax"
            ]
        );
    }

    #[test]
    fn listing_is_stable() {
        assert_eq!(list_tools(), list_tools());
    }

    #[test]
    fn schema_requires_text_string() {
        for tool in list_tools() {
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
            assert_eq!(tool.input_schema["properties"]["text"]["type"], "string");
            assert_eq!(tool.input_schema["required"], json!(["text"]));
        }
    }
}
