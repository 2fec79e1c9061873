use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    media_repository::SupabaseMediaRepository, order_repository::SupabaseOrderRepository,
    settings_repository::SupabaseSettingsRepository,
};
use crate::storage::traits::Connection;

/// Errors raised while talking to the hosted backend
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Connection to a Supabase project: the PostgREST table API under
/// `/rest/v1` and object storage under `/storage/v1`.
#[derive(Clone)]
pub struct SupabaseConnection {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseConnection {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, SupabaseError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(SupabaseError::Config("Supabase URL is not set".to_string()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SupabaseError::Config(format!("Supabase URL must be http(s): {}", base_url)));
        }
        if anon_key.trim().is_empty() {
            return Err(SupabaseError::Config("Supabase anon key is not set".to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }

    /// URL of a table in the REST API
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// URL under the storage API, `path` without a leading slash
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    /// Request builder carrying the project's API key
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Send the request and turn non-2xx answers into [`SupabaseError::Server`]
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SupabaseError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SupabaseError::Server {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }

    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, SupabaseError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SupabaseError::Decode(e.to_string()))
    }
}

/// PostgREST and storage errors carry a JSON body with a `message` (or
/// `error`) field; fall back to the raw body otherwise.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl Connection for SupabaseConnection {
    type OrderRepository = SupabaseOrderRepository;
    type SettingsRepository = SupabaseSettingsRepository;
    type MediaRepository = SupabaseMediaRepository;

    fn create_order_repository(&self) -> Self::OrderRepository {
        SupabaseOrderRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        SupabaseSettingsRepository::new(self.clone())
    }

    fn create_media_repository(&self) -> Self::MediaRepository {
        SupabaseMediaRepository::new(self.clone())
    }
}
