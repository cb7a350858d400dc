//! Tool dispatcher: validates arguments, calls the backend once, shapes the
//! response.
//!
//! Every outcome becomes a [`CallToolResult`]; failures are flagged with
//! `is_error` and never escape to the host.

use std::time::Instant;

use mcp::{CallToolResult, Tool, ToolHandler};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::LanguageBackend;
use crate::document::Document;
use crate::operation::Operation;
use crate::{Error, Result, catalog};

pub struct Dispatcher<B> {
    backend: B,
}

impl<B: LanguageBackend> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Invoke a tool by name.
    pub async fn invoke(&self, name: &str, arguments: Option<&Value>) -> CallToolResult {
        match self.run(name, arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                CallToolResult::error(format!("Error: {e}"))
            }
        }
    }

    async fn run(&self, name: &str, arguments: Option<&Value>) -> Result<String> {
        let text = arguments
            .and_then(|args| args.get("text"))
            .and_then(Value::as_str)
            .ok_or(Error::Validation)?;
        let document = Document::plain_text(text)?;

        let operation =
            Operation::from_tool_name(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        let started = Instant::now();
        let raw = self.backend.analyze(&operation.request(document)).await?;
        let shaped = operation.shape(&raw)?;

        info!(
            tool = %operation,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tool call complete"
        );
        debug!(tool = %operation, bytes = shaped.len(), "shaped response");
        Ok(shaped)
    }
}

impl<B: LanguageBackend> ToolHandler for Dispatcher<B> {
    fn tools(&self) -> Vec<Tool> {
        catalog::list_tools()
    }

    async fn call_tool(&self, name: &str, arguments: Option<&Value>) -> CallToolResult {
        self.invoke(name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EncodingType, RemoteRequest};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    enum Reply {
        Json(Value),
        Status(StatusCode, &'static str),
        Transport,
    }

    /// Records every request and answers with a fixed reply.
    struct FakeBackend {
        reply: Reply,
        calls: Mutex<Vec<RemoteRequest>>,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn json(body: Value) -> Self {
            Self::new(Reply::Json(body))
        }

        fn calls(&self) -> Vec<RemoteRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LanguageBackend for FakeBackend {
        async fn analyze(&self, request: &RemoteRequest) -> Result<Value> {
            self.calls.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Json(body) => Ok(body.clone()),
                Reply::Status(status, body) => Err(Error::RemoteApi {
                    status: *status,
                    body: body.to_string(),
                }),
                Reply::Transport => Err(Error::Transport("connection reset".to_string())),
            }
        }
    }

    fn sentiment_body() -> Value {
        json!({
            "documentSentiment": {"score": 0.8, "magnitude": 1.6},
            "language": "en",
            "sentences": [
                {"text": {"content": "Great product.", "beginOffset": 0}, "sentiment": {"score": 0.8, "magnitude": 0.8}}
            ]
        })
    }

    fn text_of(result: &CallToolResult) -> String {
        result.joined_text()
    }

    #[tokio::test]
    async fn sentiment_makes_exactly_one_call() {
        let dispatcher = Dispatcher::new(FakeBackend::json(sentiment_body()));

        let result = dispatcher
            .invoke("analyze_sentiment", Some(&json!({"text": "Great product."})))
            .await;

        assert!(!result.is_error);
        let calls = dispatcher.backend().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].endpoint, "analyzeSentiment");
        assert_eq!(calls[0].payload.document.content, "Great product.");
        assert_eq!(calls[0].payload.encoding_type, Some(EncodingType::Utf8));

        let shaped: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(shaped["overall_sentiment"]["label"], "positive");
        assert_eq!(shaped["sentence_breakdown"][0]["text"], "Great product.");
    }

    #[tokio::test]
    async fn each_tool_hits_its_own_endpoint() {
        let cases = [
            ("analyze_sentiment", "analyzeSentiment"),
            ("extract_entities", "analyzeEntities"),
            ("classify_content", "classifyText"),
            ("analyze_syntax", "analyzeSyntax"),
        ];

        for (tool, endpoint) in cases {
            let dispatcher = Dispatcher::new(FakeBackend::json(json!({})));
            let result = dispatcher.invoke(tool, Some(&json!({"text": "hello"}))).await;
            assert!(!result.is_error, "{tool}: {}", text_of(&result));

            let calls = dispatcher.backend().calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].endpoint, endpoint);
        }
    }

    #[tokio::test]
    async fn classification_sends_no_encoding() {
        let dispatcher = Dispatcher::new(FakeBackend::json(json!({"categories": []})));
        dispatcher
            .invoke("classify_content", Some(&json!({"text": "short"})))
            .await;

        let calls = dispatcher.backend().calls();
        assert_eq!(calls[0].payload.encoding_type, None);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_a_call() {
        let blanks = [json!({"text": ""}), json!({"text": "   \n\t"}), json!({}), json!({"text": 42})];
        let names = ["analyze_sentiment", "extract_entities", "classify_content", "analyze_syntax", "not_a_real_tool"];

        for name in names {
            for args in &blanks {
                let dispatcher = Dispatcher::new(FakeBackend::json(sentiment_body()));
                let result = dispatcher.invoke(name, Some(args)).await;
                assert!(result.is_error);
                assert!(text_of(&result).contains("'text'"));
                assert!(dispatcher.backend().calls().is_empty());
            }
        }

        let dispatcher = Dispatcher::new(FakeBackend::json(sentiment_body()));
        let result = dispatcher.invoke("analyze_sentiment", None).await;
        assert!(result.is_error);
        assert!(dispatcher.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_is_named_without_a_call() {
        let dispatcher = Dispatcher::new(FakeBackend::json(sentiment_body()));

        let result = dispatcher
            .invoke("not_a_real_tool", Some(&json!({"text": "hello"})))
            .await;

        assert!(result.is_error);
        assert!(text_of(&result).contains("not_a_real_tool"));
        assert!(dispatcher.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn remote_error_body_is_surfaced() {
        let dispatcher = Dispatcher::new(FakeBackend::new(Reply::Status(
            StatusCode::BAD_REQUEST,
            "Invalid argument",
        )));

        let result = dispatcher
            .invoke("classify_content", Some(&json!({"text": "too short"})))
            .await;

        assert!(result.is_error);
        let text = text_of(&result);
        assert!(text.starts_with("Error:"));
        assert!(text.contains("400"));
        assert!(text.contains("Invalid argument"));
        assert_eq!(dispatcher.backend().calls().len(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_surfaced() {
        let dispatcher = Dispatcher::new(FakeBackend::new(Reply::Transport));

        let result = dispatcher
            .invoke("analyze_syntax", Some(&json!({"text": "hello"})))
            .await;

        assert!(result.is_error);
        assert!(text_of(&result).contains("connection reset"));
    }

    #[tokio::test]
    async fn malformed_response_is_a_generic_error() {
        let dispatcher = Dispatcher::new(FakeBackend::json(json!({"entities": "nope"})));

        let result = dispatcher
            .invoke("extract_entities", Some(&json!({"text": "hello"})))
            .await;

        assert!(result.is_error);
        assert!(text_of(&result).contains("unexpected response shape"));
    }

    #[tokio::test]
    async fn repeated_calls_are_byte_identical() {
        let dispatcher = Dispatcher::new(FakeBackend::json(json!({
            "entities": [
                {"name": "a", "type": "PERSON", "salience": 0.2},
                {"name": "b", "type": "PERSON", "salience": 0.2},
                {"name": "c", "type": "OTHER", "salience": 0.6, "metadata": {"mid": "/m/1"}}
            ]
        })));
        let args = json!({"text": "a b c"});

        let first = dispatcher.invoke("extract_entities", Some(&args)).await;
        let second = dispatcher.invoke("extract_entities", Some(&args)).await;

        assert_eq!(text_of(&first), text_of(&second));
        assert_eq!(dispatcher.backend().calls().len(), 2);
    }

    #[tokio::test]
    async fn handler_lists_catalog() {
        let dispatcher = Dispatcher::new(FakeBackend::json(json!({})));
        assert_eq!(dispatcher.tools(), catalog::list_tools());

        let result = dispatcher
            .call_tool("analyze_syntax", Some(&json!({"text": "Hi."})))
            .await;
        assert!(!result.is_error);
    }
}
