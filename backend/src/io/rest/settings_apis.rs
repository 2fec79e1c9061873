//! # REST API for Site Settings
//!
//! Read and save the singleton settings row, and upload site media.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{GetSettingsResponse, MediaBucket, Settings};
use tracing::{error, info};

use crate::domain::commands::settings::UploadMediaCommand;
use crate::storage::traits::Connection;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
    #[serde(default)]
    pub attach: bool,
}

pub async fn get_settings<C: Connection>(State(state): State<AppState<C>>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(settings) => (StatusCode::OK, Json(GetSettingsResponse { settings })).into_response(),
        Err(e) => {
            error!("Failed to fetch settings: {}", e);
            (StatusCode::BAD_GATEWAY, "Error fetching settings").into_response()
        }
    }
}

pub async fn save_settings<C: Connection>(
    State(state): State<AppState<C>>,
    Json(settings): Json<Settings>,
) -> impl IntoResponse {
    info!("PUT /api/settings - id: {:?}", settings.id);

    match state.settings_service.save_settings(settings).await {
        Ok(response) => {
            state.toast_service.success(response.success_message.clone());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to save settings: {}", e);
            state.toast_service.error("Gagal menyimpan settings");
            (StatusCode::BAD_GATEWAY, "Error saving settings").into_response()
        }
    }
}

/// Upload a media file sent as the raw request body
pub async fn upload_media<C: Connection>(
    State(state): State<AppState<C>>,
    Path(bucket): Path<String>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> impl IntoResponse {
    info!(
        "POST /api/settings/media/{} - params: {:?}, {} bytes",
        bucket,
        params,
        body.len()
    );

    let bucket = match bucket.parse::<MediaBucket>() {
        Ok(bucket) => bucket,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };
    if body.is_empty() {
        return (StatusCode::BAD_REQUEST, "Uploaded file is empty").into_response();
    }

    let command = UploadMediaCommand {
        bucket,
        original_filename: params.filename.unwrap_or_default(),
        bytes: body.to_vec(),
        attach_to_settings: params.attach,
    };

    match state.settings_service.upload_media(command).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to upload media to {}: {}", bucket, e);
            state.toast_service.error("Gagal mengunggah file");
            (StatusCode::BAD_GATEWAY, "Error uploading file").into_response()
        }
    }
}
