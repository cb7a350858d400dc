//! Response shapers.
//!
//! Each shaper turns a raw Language API response into a compact summary.
//! Raw fields are all optional: an absent number means `0`, an absent string
//! is empty and an absent list is empty. A present field with the wrong JSON type is a [`Error::Shape`].

pub mod classify;
pub mod entities;
pub mod sentiment;
pub mod syntax;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// A span of the input text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTextSpan {
    pub content: Option<String>,
}

pub(crate) fn span_text(span: Option<RawTextSpan>) -> String {
    span.and_then(|s| s.content).unwrap_or_default()
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(|e| Error::Shape(e.to_string()))
}

/// Round to 4 decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
