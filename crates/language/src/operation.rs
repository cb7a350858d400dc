//! The operation table shared by the catalog and the dispatcher.

use serde::Serialize;
use serde_json::Value;

use crate::document::{AnalyzeRequest, Document, EncodingType, RemoteRequest};
use crate::shape::{classify, entities, sentiment, syntax};
use crate::{Error, Result};

/// One tool exposed to the host, bound to one remote method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Sentiment,
    Entities,
    Classification,
    Syntax,
}

impl Operation {
    /// Every operation, in catalog order.
    pub const ALL: [Operation; 4] = [
        Operation::Sentiment,
        Operation::Entities,
        Operation::Classification,
        Operation::Syntax,
    ];

    /// Look up an operation by its exact tool name.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Sentiment => "analyze_sentiment",
            Self::Entities => "extract_entities",
            Self::Classification => "classify_content",
            Self::Syntax => "analyze_syntax",
        }
    }

    /// Remote method name.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Sentiment => "analyzeSentiment",
            Self::Entities => "analyzeEntities",
            Self::Classification => "classifyText",
            Self::Syntax => "analyzeSyntax",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Sentiment => {
                "Analyze the emotional tone of text. Returns the overall sentiment score \
                 (-1.0 negative to 1.0 positive), its magnitude (strength of emotion), a \
                 positive/negative/neutral label, and a per-sentence breakdown."
            }
            Self::Entities => {
                "Extract named entities (people, organizations, locations, events, products \
                 and more) from text. Entities are sorted by salience and include Wikipedia \
                 links and Knowledge Graph IDs when available."
            }
            Self::Classification => {
                "Classify text into content categories (e.g. /Science/Computer Science) with \
                 confidence scores. Works best with at least 20 words of input."
            }
            Self::Syntax => {
                "Analyze the grammatical structure of text. Returns sentences and tokens with \
                 part-of-speech tags, dependency labels and lemmas."
            }
        }
    }

    /// Offset encoding to request, if the method reports text offsets.
    pub fn encoding(self) -> Option<EncodingType> {
        match self {
            Self::Classification => None,
            Self::Sentiment | Self::Entities | Self::Syntax => Some(EncodingType::Utf8),
        }
    }

    pub fn request(self, document: Document) -> RemoteRequest {
        RemoteRequest {
            endpoint: self.endpoint(),
            payload: AnalyzeRequest {
                document,
                encoding_type: self.encoding(),
            },
        }
    }

    /// Shape a raw response and render it as pretty-printed JSON.
    pub fn shape(self, raw: &Value) -> Result<String> {
        match self {
            Self::Sentiment => render(&sentiment::shape(raw)?),
            Self::Entities => render(&entities::shape(raw)?),
            Self::Classification => render(&classify::shape(raw)?),
            Self::Syntax => render(&syntax::shape(raw)?),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name())
    }
}

fn render(shaped: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(shaped).map_err(|e| Error::Shape(e.to_string()))
}
