use crate::config::ModelStorageConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to reach blob storage: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("blob storage returned {status} for {object}")]
    Rejected {
        status: reqwest::StatusCode,
        object: String,
    },
}

/// Thin client over the GCS JSON API, used once at startup to fetch the
/// model artifact.
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    pub fn new(config: &ModelStorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn download(&self, bucket: &str, object: &str) -> Result<Vec<u8>, StorageError> {
        let url = format!(
            "{}/storage/v1/b/{}/o/{}?alt=media",
            self.base_url,
            bucket,
            encode_object_name(object)
        );

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Rejected {
                status,
                object: object.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::info!("Downloaded {} ({} bytes)", object, body.len());

        Ok(body.to_vec())
    }
}

// Object names are a single path segment in the JSON API, so slashes
// must be percent-encoded.
fn encode_object_name(object: &str) -> String {
    object
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{:02X}", other),
        })
        .collect()
}
