//! Media uploads through the Supabase storage API.
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use shared::MediaBucket;
use tracing::info;

use super::connection::SupabaseConnection;
use crate::domain::models::media::MediaUpload;
use crate::storage::traits::MediaStorage;

#[derive(Clone)]
pub struct SupabaseMediaRepository {
    connection: SupabaseConnection,
}

impl SupabaseMediaRepository {
    pub fn new(connection: SupabaseConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MediaStorage for SupabaseMediaRepository {
    async fn upload(&self, upload: &MediaUpload) -> Result<String> {
        let url = self
            .connection
            .storage_url(&format!("object/{}/{}", upload.bucket.as_str(), upload.object_name));
        let request = self
            .connection
            .request(Method::POST, &url)
            .header("Content-Type", &upload.content_type)
            .header("x-upsert", "false")
            .body(upload.bytes.clone());

        self.connection.send(request).await?;
        info!(
            "Uploaded {} ({} bytes) to bucket {}",
            upload.object_name,
            upload.bytes.len(),
            upload.bucket
        );
        Ok(upload.object_name.clone())
    }

    fn public_url(&self, bucket: MediaBucket, path: &str) -> String {
        self.connection
            .storage_url(&format!("object/public/{}/{}", bucket.as_str(), path))
    }
}
