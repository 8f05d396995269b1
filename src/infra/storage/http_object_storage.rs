use crate::domain::ports::ObjectStorage;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

/// Client for an S3-style object store with a REST upload endpoint and a
/// public retrieval prefix per bucket.
pub struct HttpObjectStorage {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl HttpObjectStorage {
    pub fn new(base_url: String, api_key: String, bucket: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            bucket,
        }
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);

        let res = self.client.post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Storage connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        Ok(format!("{}/object/public/{}/{}", self.base_url, self.bucket, path))
    }
}
