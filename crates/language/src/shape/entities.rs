//! `analyzeEntities` shaper.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, round4};
use crate::Result;

#[derive(Debug, Deserialize)]
struct RawResponse {
    entities: Option<Vec<RawEntity>>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    salience: Option<f64>,
    metadata: Option<HashMap<String, Value>>,
}

impl RawEntity {
    fn metadata_str(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub salience: f64,
    pub wikipedia_url: Option<String>,
    pub mid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Entities ordered by salience, most central first. Ties keep response order.
pub fn shape(raw: &Value) -> Result<EntitySummary> {
    let raw: RawResponse = decode(raw)?;

    let mut raw_entities = raw.entities.unwrap_or_default();
    raw_entities.sort_by(|a, b| {
        let a = a.salience.unwrap_or(0.0);
        let b = b.salience.unwrap_or(0.0);
        b.total_cmp(&a)
    });

    let entities = raw_entities
        .into_iter()
        .map(|entity| Entity {
            wikipedia_url: entity.metadata_str("wikipedia_url"),
            mid: entity.metadata_str("mid"),
            salience: round4(entity.salience.unwrap_or(0.0)),
            kind: entity.kind.unwrap_or_default(),
            name: entity.name.unwrap_or_default(),
        })
        .collect();

    Ok(EntitySummary {
        entities,
        language: raw.language,
    })
}
