use crate::NewscastError;
use rmcp::model::{Content, IntoContents};
use serde::Serialize;

/// Structured error response for MCP tool calls.
/// Carries an error_code and a suggestion so the calling model can react.
#[derive(Debug, Serialize)]
pub struct ToolError {
    pub error_code: String,
    pub message: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl ToolError {
    fn new(error_code: &str, message: String, suggestion: &str) -> Self {
        Self {
            error_code: error_code.into(),
            message,
            suggestion: suggestion.into(),
            field: None,
            example: None,
        }
    }
}

impl IntoContents for ToolError {
    fn into_contents(self) -> Vec<Content> {
        let json = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        vec![Content::text(json)]
    }
}

impl From<NewscastError> for ToolError {
    fn from(err: NewscastError) -> Self {
        let message = err.to_string();
        match err {
            NewscastError::Validation(ref msg) => {
                let mut tool_err = ToolError::new(
                    "VALIDATION_ERROR",
                    message,
                    "Provide a non-empty value and retry.",
                );
                if msg.starts_with("Company") {
                    tool_err.field = Some("company".into());
                    tool_err.example = Some(serde_json::json!({ "company": "Tesla" }));
                } else if msg.starts_with("Text") {
                    tool_err.field = Some("text".into());
                    tool_err.example = Some(serde_json::json!({ "text": "Hello" }));
                }
                tool_err
            }
            NewscastError::NoArticles { .. } | NewscastError::NoUsableArticles { .. } => {
                ToolError::new(
                    "NO_DATA",
                    message,
                    "Try the company's full or better-known name, or check the news API key.",
                )
            }
            _ => ToolError::new(
                "INTERNAL_ERROR",
                message,
                "Retry the operation; providers may be temporarily unavailable.",
            ),
        }
    }
}

impl From<String> for ToolError {
    fn from(msg: String) -> Self {
        ToolError::new(
            "INTERNAL_ERROR",
            msg,
            "Retry the operation; providers may be temporarily unavailable.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_field() {
        let err = ToolError::from(NewscastError::Validation("Company name cannot be empty.".into()));
        assert_eq!(err.error_code, "VALIDATION_ERROR");
        assert_eq!(err.field.as_deref(), Some("company"));
        assert!(err.example.is_some());
    }

    #[test]
    fn test_no_data_classification() {
        let err = ToolError::from(NewscastError::NoArticles {
            company: "Acme".into(),
        });
        assert_eq!(err.error_code, "NO_DATA");
        assert!(err.message.contains("Acme"));

        let err = ToolError::from(NewscastError::NoUsableArticles {
            company: "Acme".into(),
            fetched: 4,
        });
        assert_eq!(err.error_code, "NO_DATA");
    }

    #[test]
    fn test_internal_error_fallback() {
        let err = ToolError::from(NewscastError::Http("timeout".into()));
        assert_eq!(err.error_code, "INTERNAL_ERROR");
        assert!(err.field.is_none());

        let err = ToolError::from("Something unexpected happened".to_string());
        assert_eq!(err.error_code, "INTERNAL_ERROR");
        assert_eq!(err.message, "Something unexpected happened");
    }

    #[test]
    fn test_into_contents_produces_json() {
        let err = ToolError::from(NewscastError::NoArticles {
            company: "Acme".into(),
        });
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error_code"], "NO_DATA");
        assert!(json.get("field").is_none());
        assert_eq!(err.into_contents().len(), 1);
    }
}
