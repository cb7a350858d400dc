//! `classifyText` shaper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, round4};
use crate::Result;

#[derive(Debug, Deserialize)]
struct RawResponse {
    categories: Option<Vec<RawCategory>>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: Option<String>,
    confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Categories in response order.
pub fn shape(raw: &Value) -> Result<CategorySummary> {
    let raw: RawResponse = decode(raw)?;

    let categories = raw
        .categories
        .unwrap_or_default()
        .into_iter()
        .map(|category| Category {
            name: category.name.unwrap_or_default(),
            confidence: round4(category.confidence.unwrap_or(0.0)),
        })
        .collect();

    Ok(CategorySummary {
        categories,
        language: raw.language,
    })
}
