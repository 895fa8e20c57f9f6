use crate::classifier::{Classification, Label};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Immutable prediction result, created exactly once per successful
/// request and persisted as-is.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub id: String,
    pub result: Label,
    pub suggestion: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(classification: Classification) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            result: classification.result,
            suggestion: classification.suggestion.to_string(),
            created_at: Utc::now(),
        }
    }
}
