//! `analyzeSyntax` shaper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RawTextSpan, decode, span_text};
use crate::Result;

#[derive(Debug, Deserialize)]
struct RawResponse {
    sentences: Option<Vec<RawSentence>>,
    tokens: Option<Vec<RawToken>>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    text: Option<RawTextSpan>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToken {
    text: Option<RawTextSpan>,
    part_of_speech: Option<RawPartOfSpeech>,
    dependency_edge: Option<RawDependencyEdge>,
    lemma: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPartOfSpeech {
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDependencyEdge {
    label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    pub pos: String,
    pub dependency_label: String,
    pub lemma: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxSummary {
    pub sentence_count: usize,
    pub token_count: usize,
    pub sentences: Vec<String>,
    pub tokens: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Sentences and tokens in response order. The counts are always the lengths
/// of the two lists.
pub fn shape(raw: &Value) -> Result<SyntaxSummary> {
    let raw: RawResponse = decode(raw)?;

    let sentences: Vec<String> = raw
        .sentences
        .unwrap_or_default()
        .into_iter()
        .map(|sentence| span_text(sentence.text))
        .collect();

    let tokens: Vec<Token> = raw
        .tokens
        .unwrap_or_default()
        .into_iter()
        .map(|token| Token {
            text: span_text(token.text),
            pos: token
                .part_of_speech
                .and_then(|p| p.tag)
                .unwrap_or_default(),
            dependency_label: token
                .dependency_edge
                .and_then(|d| d.label)
                .unwrap_or_default(),
            lemma: token.lemma.unwrap_or_default(),
        })
        .collect();

    Ok(SyntaxSummary {
        sentence_count: sentences.len(),
        token_count: tokens.len(),
        sentences,
        tokens,
        language: raw.language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(text: &str, tag: &str, label: &str, lemma: &str) -> Value {
        json!({
            "text": {"content": text, "beginOffset": 0},
            "partOfSpeech": {"tag": tag, "number": "SINGULAR"},
            "dependencyEdge": {"headTokenIndex": 1, "label": label},
            "lemma": lemma
        })
    }

    #[test]
    fn shapes_sentences_and_tokens() {
        let raw = json!({
            "sentences": [{"text": {"content": "Dogs ran.", "beginOffset": 0}}],
            "tokens": [
                token("Dogs", "NOUN", "NSUBJ", "Dog"),
                token("ran", "VERB", "ROOT", "run"),
                token(".", "PUNCT", "P", ".")
            ],
            "language": "en"
        });

        let json = serde_json::to_value(shape(&raw).unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "sentence_count": 1,
                "token_count": 3,
                "sentences": ["Dogs ran."],
                "tokens": [
                    {"text": "Dogs", "pos": "NOUN", "dependency_label": "NSUBJ", "lemma": "Dog"},
                    {"text": "ran", "pos": "VERB", "dependency_label": "ROOT", "lemma": "run"},
                    {"text": ".", "pos": "PUNCT", "dependency_label": "P", "lemma": "."}
                ],
                "language": "en"
            })
        );
    }

    #[test]
    fn counts_ignore_remote_count_fields() {
        let raw = json!({
            "sentence_count": 10,
            "tokenCount": 99,
            "sentences": [{"text": {"content": "A."}}, {"text": {"content": "B."}}],
            "tokens": [token("A", "NOUN", "ROOT", "A")]
        });

        let summary = shape(&raw).unwrap();
        assert_eq!(summary.sentence_count, summary.sentences.len());
        assert_eq!(summary.token_count, summary.tokens.len());
        assert_eq!(summary.sentence_count, 2);
        assert_eq!(summary.token_count, 1);
    }

    #[test]
    fn missing_token_fields_use_defaults() {
        let summary = shape(&json!({"tokens": [{}]})).unwrap();
        assert_eq!(
            summary.tokens[0],
            Token {
                text: String::new(),
                pos: String::new(),
                dependency_label: String::new(),
                lemma: String::new(),
            }
        );
        assert_eq!(summary.sentence_count, 0);
    }
}
