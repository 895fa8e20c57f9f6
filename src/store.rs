use crate::config::ResultStoreConfig;
use crate::record::PredictionRecord;
use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to reach document store: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("document store rejected the write: {0}")]
    Rejected(reqwest::StatusCode),
}

/// Seam between the request pipeline and the document database, so the
/// HTTP layer can be exercised with an in-memory store.
#[async_trait]
pub trait ResultStore: Send + Sync + 'static {
    async fn save(&self, record: &PredictionRecord) -> Result<(), PersistenceError>;
}

/// Writes prediction records to a Firestore collection through its REST
/// surface, one document per record keyed by the generated id.
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
}

impl FirestoreStore {
    pub fn new(config: &ResultStoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            collection: config.collection.clone(),
        }
    }

    fn document_url(&self, id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            self.base_url, self.project_id, self.collection, id
        )
    }
}

#[async_trait]
impl ResultStore for FirestoreStore {
    async fn save(&self, record: &PredictionRecord) -> Result<(), PersistenceError> {
        let response = self
            .http
            .patch(self.document_url(&record.id))
            .json(&to_firestore_document(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PersistenceError::Rejected(status));
        }

        tracing::debug!("Persisted prediction {}", record.id);

        Ok(())
    }
}

// Firestore's REST API takes typed values rather than plain JSON.
fn to_firestore_document(record: &PredictionRecord) -> Value {
    json!({
        "fields": {
            "id": { "stringValue": record.id.as_str() },
            "result": { "stringValue": record.result.as_str() },
            "suggestion": { "stringValue": record.suggestion.as_str() },
            "createdAt": { "timestampValue": record.created_at.to_rfc3339() },
        }
    })
}
