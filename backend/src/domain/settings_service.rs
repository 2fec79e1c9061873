//! Settings service domain logic.
//!
//! The CMS keeps a single settings row. Saving updates that row when it
//! exists and creates it otherwise. Media files go to their bucket under a
//! timestamp-based name and are referenced from the row by public URL.
use anyhow::{anyhow, Result};
use shared::{MediaBucket, SaveSettingsResponse, Settings, UploadResponse};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};

use crate::domain::commands::settings::UploadMediaCommand;
use crate::domain::models::media::MediaUpload;
use crate::storage::traits::{Connection, MediaStorage, SettingsStorage};

pub const SETTINGS_UPDATED_MESSAGE: &str = "Settings updated!";
pub const SETTINGS_CREATED_MESSAGE: &str = "Settings created!";

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: C::SettingsRepository,
    media_repository: C::MediaRepository,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            settings_repository: connection.create_settings_repository(),
            media_repository: connection.create_media_repository(),
        }
    }

    pub async fn get_settings(&self) -> Result<Option<Settings>> {
        self.settings_repository.get_settings().await
    }

    /// Update the existing row, or insert it when the store has none yet.
    /// The target row is the id carried by `settings`, falling back to the id
    /// of whatever row the store currently holds.
    pub async fn save_settings(&self, settings: Settings) -> Result<SaveSettingsResponse> {
        let target_id = match settings.id.clone().filter(|id| !id.trim().is_empty()) {
            Some(id) => Some(id),
            None => self.settings_repository.get_settings().await?.and_then(|s| s.id),
        };

        match target_id {
            Some(id) => {
                let saved = self
                    .settings_repository
                    .update_settings(&id, &settings)
                    .await
                    .map_err(|e| {
                        error!("Failed to update settings {}: {}", id, e);
                        e
                    })?;
                info!("Updated settings row {}", id);
                Ok(SaveSettingsResponse {
                    settings: saved,
                    created: false,
                    success_message: SETTINGS_UPDATED_MESSAGE.to_string(),
                })
            }
            None => {
                let saved = self.settings_repository.insert_settings(&settings).await.map_err(|e| {
                    error!("Failed to create settings: {}", e);
                    e
                })?;
                info!("Created settings row {:?}", saved.id);
                Ok(SaveSettingsResponse {
                    settings: saved,
                    created: true,
                    success_message: SETTINGS_CREATED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Store a media file and return its public URL. With
    /// `attach_to_settings` the URL is also saved into the bucket's settings
    /// field.
    pub async fn upload_media(&self, command: UploadMediaCommand) -> Result<UploadResponse> {
        if command.bytes.is_empty() {
            return Err(anyhow!("Uploaded file is empty"));
        }

        let epoch_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let upload = MediaUpload::new(command.bucket, &command.original_filename, epoch_millis, command.bytes);

        let path = self.media_repository.upload(&upload).await.map_err(|e| {
            error!("Failed to upload {} to {}: {}", upload.object_name, upload.bucket, e);
            e
        })?;
        let public_url = self.media_repository.public_url(command.bucket, &path);

        let settings = if command.attach_to_settings {
            let mut current = self.get_settings().await?.unwrap_or_default();
            Self::apply_media_url(&mut current, command.bucket, &public_url);
            Some(self.save_settings(current).await?.settings)
        } else {
            None
        };

        Ok(UploadResponse {
            bucket: command.bucket,
            path,
            public_url,
            settings,
        })
    }

    /// Point the settings field belonging to `bucket` at `url`
    pub fn apply_media_url(settings: &mut Settings, bucket: MediaBucket, url: &str) {
        let field = match bucket {
            MediaBucket::Logos => &mut settings.logo_url,
            MediaBucket::HeroImages => &mut settings.hero_image,
            MediaBucket::AudioFiles => &mut settings.audio_src,
        };
        *field = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryConnection;

    fn setup() -> (MemoryConnection, SettingsService<MemoryConnection>) {
        let connection = MemoryConnection::new();
        let service = SettingsService::new(Arc::new(connection.clone()));
        (connection, service)
    }

    fn site_settings(title: &str) -> Settings {
        Settings {
            site_title: title.to_string(),
            tagline: "Bug hunting service".to_string(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_first_save_creates_then_updates() {
        let (_conn, service) = setup();
        assert_eq!(service.get_settings().await.unwrap(), None);

        let created = service.save_settings(site_settings("Debug May Cry")).await.unwrap();
        assert!(created.created);
        assert_eq!(created.success_message, "Settings created!");
        assert!(created.settings.id.is_some());

        // No id in the form: the existing row is still the one updated
        let updated = service.save_settings(site_settings("DMC")).await.unwrap();
        assert!(!updated.created);
        assert_eq!(updated.success_message, "Settings updated!");
        assert_eq!(updated.settings.id, created.settings.id);
        assert_eq!(service.get_settings().await.unwrap().unwrap().site_title, "DMC");
    }

    #[tokio::test]
    async fn test_save_failure_propagates() {
        let (conn, service) = setup();
        conn.set_unavailable(true);
        assert!(service.save_settings(site_settings("Gagal")).await.is_err());
    }

    #[tokio::test]
    async fn test_upload_media() {
        let (conn, service) = setup();
        let response = service
            .upload_media(UploadMediaCommand {
                bucket: MediaBucket::Logos,
                original_filename: "Logo.PNG".to_string(),
                bytes: vec![1, 2, 3],
                attach_to_settings: false,
            })
            .await
            .unwrap();

        assert!(response.path.ends_with(".PNG"));
        assert_eq!(response.public_url, format!("memory://logos/{}", response.path));
        assert_eq!(conn.stored_object(MediaBucket::Logos, &response.path), Some(vec![1, 2, 3]));
        assert!(response.settings.is_none());
    }

    #[tokio::test]
    async fn test_upload_media_attached_to_settings() {
        let (_conn, service) = setup();
        let response = service
            .upload_media(UploadMediaCommand {
                bucket: MediaBucket::AudioFiles,
                original_filename: "theme".to_string(),
                bytes: vec![9],
                attach_to_settings: true,
            })
            .await
            .unwrap();

        assert!(response.path.ends_with(".bin"));
        let settings = response.settings.unwrap();
        assert_eq!(settings.audio_src, response.public_url);
        assert_eq!(service.get_settings().await.unwrap().unwrap().audio_src, response.public_url);
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let (_conn, service) = setup();
        let result = service
            .upload_media(UploadMediaCommand {
                bucket: MediaBucket::HeroImages,
                original_filename: "hero.jpg".to_string(),
                bytes: Vec::new(),
                attach_to_settings: false,
            })
            .await;
        assert!(result.is_err());
    }
}
