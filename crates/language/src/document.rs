//! Request payloads for the Language API.

use serde::Serialize;

use crate::{Error, Result};

/// The `{type, content}` wrapper the Language API requires around input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub content: String,
}

impl Document {
    /// Build a plain-text document from caller-supplied text.
    ///
    /// Surrounding whitespace is trimmed; text that is empty after trimming
    /// is rejected.
    pub fn plain_text(text: &str) -> Result<Self> {
        let content = text.trim();
        if content.is_empty() {
            return Err(Error::Validation);
        }
        Ok(Self {
            kind: DocumentType::PlainText,
            content: content.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    PlainText,
}

/// Offset encoding requested for operations that report text spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodingType {
    #[serde(rename = "UTF8")]
    Utf8,
}

/// JSON body of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<EncodingType>,
}

/// One outbound call: the remote method name plus its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// Remote method, e.g. `analyzeSentiment`.
    pub endpoint: &'static str,
    pub payload: AnalyzeRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_trims() {
        let doc = Document::plain_text("  hello world \n").unwrap();
        assert_eq!(doc.content, "hello world");
    }

    #[test]
    fn plain_text_rejects_blank() {
        assert!(matches!(Document::plain_text(""), Err(Error::Validation)));
        assert!(matches!(Document::plain_text(" \t\n "), Err(Error::Validation)));
    }

    #[test]
    fn payload_wire_format() {
        let payload = AnalyzeRequest {
            document: Document::plain_text("hi").unwrap(),
            encoding_type: Some(EncodingType::Utf8),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "document": {"type": "PLAIN_TEXT", "content": "hi"},
                "encodingType": "UTF8"
            })
        );
    }

    #[test]
    fn payload_without_encoding() {
        let payload = AnalyzeRequest {
            document: Document::plain_text("hi").unwrap(),
            encoding_type: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("encodingType").is_none());
    }
}
