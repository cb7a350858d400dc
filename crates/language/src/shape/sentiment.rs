//! `analyzeSentiment` shaper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RawTextSpan, decode, span_text};
use crate::Result;

/// Scores at or above this are labeled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.25;
/// Scores at or below this are labeled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.25;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    document_sentiment: Option<RawSentiment>,
    sentences: Option<Vec<RawSentence>>,
    language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSentiment {
    score: Option<f64>,
    magnitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    text: Option<RawTextSpan>,
    sentiment: Option<RawSentiment>,
}

/// Three-way sentiment label derived from the document score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSentiment {
    pub score: f64,
    pub magnitude: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSentiment {
    pub text: String,
    pub score: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub overall_sentiment: OverallSentiment,
    pub sentence_breakdown: Vec<SentenceSentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

pub fn shape(raw: &Value) -> Result<SentimentSummary> {
    let raw: RawResponse = decode(raw)?;

    let document = raw.document_sentiment.unwrap_or_default();
    let score = document.score.unwrap_or(0.0);
    let magnitude = document.magnitude.unwrap_or(0.0);

    let sentence_breakdown = raw
        .sentences
        .unwrap_or_default()
        .into_iter()
        .map(|sentence| {
            let sentiment = sentence.sentiment.unwrap_or_default();
            SentenceSentiment {
                text: span_text(sentence.text),
                score: sentiment.score.unwrap_or(0.0),
                magnitude: sentiment.magnitude.unwrap_or(0.0),
            }
        })
        .collect();

    Ok(SentimentSummary {
        overall_sentiment: OverallSentiment {
            score,
            magnitude,
            label: SentimentLabel::from_score(score),
        },
        sentence_breakdown,
        language: raw.language,
    })
}
