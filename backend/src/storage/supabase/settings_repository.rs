//! Settings table access through the PostgREST API.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use shared::Settings;

use super::connection::SupabaseConnection;
use crate::storage::traits::SettingsStorage;

const SETTINGS_TABLE: &str = "settings";

/// Row shape of the `settings` table. Text columns are nullable and the id
/// may be numeric or a uuid depending on how the table was created.
#[derive(Debug, Deserialize)]
struct SettingsRow {
    id: Option<serde_json::Value>,
    site_title: Option<String>,
    tagline: Option<String>,
    logo_url: Option<String>,
    hero_name: Option<String>,
    hero_image: Option<String>,
    hero_description: Option<String>,
    about_description: Option<String>,
    trusted_title: Option<String>,
    trusted_description: Option<String>,
    location: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    audio_title: Option<String>,
    audio_src: Option<String>,
    audio_button_text: Option<String>,
}

impl SettingsRow {
    fn into_settings(self) -> Settings {
        let id = self.id.and_then(|value| match value {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Settings {
            id,
            site_title: self.site_title.unwrap_or_default(),
            tagline: self.tagline.unwrap_or_default(),
            logo_url: self.logo_url.unwrap_or_default(),
            hero_name: self.hero_name.unwrap_or_default(),
            hero_image: self.hero_image.unwrap_or_default(),
            hero_description: self.hero_description.unwrap_or_default(),
            about_description: self.about_description.unwrap_or_default(),
            trusted_title: self.trusted_title.unwrap_or_default(),
            trusted_description: self.trusted_description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            audio_title: self.audio_title.unwrap_or_default(),
            audio_src: self.audio_src.unwrap_or_default(),
            audio_button_text: self.audio_button_text.unwrap_or_default(),
        }
    }
}

/// Write payload: every field except the id, which the table owns
fn without_id(settings: &Settings) -> Settings {
    Settings {
        id: None,
        ..settings.clone()
    }
}

#[derive(Clone)]
pub struct SupabaseSettingsRepository {
    connection: SupabaseConnection,
}

impl SupabaseSettingsRepository {
    pub fn new(connection: SupabaseConnection) -> Self {
        Self { connection }
    }

    fn first_row(rows: Vec<SettingsRow>, action: &str) -> Result<Settings> {
        rows.into_iter()
            .next()
            .map(SettingsRow::into_settings)
            .ok_or_else(|| anyhow!("Settings {} returned no row", action))
    }
}

#[async_trait]
impl SettingsStorage for SupabaseSettingsRepository {
    async fn get_settings(&self) -> Result<Option<Settings>> {
        let url = self.connection.table_url(SETTINGS_TABLE);
        let request = self
            .connection
            .request(Method::GET, &url)
            .query(&[("select", "*"), ("limit", "1")]);

        let rows: Vec<SettingsRow> = self.connection.send_json(request).await?;
        Ok(rows.into_iter().next().map(SettingsRow::into_settings))
    }

    async fn update_settings(&self, id: &str, settings: &Settings) -> Result<Settings> {
        let url = self.connection.table_url(SETTINGS_TABLE);
        let request = self
            .connection
            .request(Method::PATCH, &url)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&without_id(settings));

        let rows: Vec<SettingsRow> = self.connection.send_json(request).await?;
        Self::first_row(rows, "update")
    }

    async fn insert_settings(&self, settings: &Settings) -> Result<Settings> {
        let url = self.connection.table_url(SETTINGS_TABLE);
        let request = self
            .connection
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&without_id(settings));

        let rows: Vec<SettingsRow> = self.connection.send_json(request).await?;
        Self::first_row(rows, "insert")
    }
}
