//! # Storage Traits
//!
//! Storage abstractions used by the domain layer. The order table, the
//! settings table and the media buckets all live in a hosted backend; these
//! traits let the domain work against that backend or the in-memory store
//! without modification.

use anyhow::Result;
use async_trait::async_trait;
use shared::{MediaBucket, Settings};

use crate::domain::models::media::MediaUpload;
use crate::domain::models::order::{NewOrder, Order, OrderStatus};

/// Interface for the remote order table
#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Full scan of the table, ordered by `created_at` descending
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Insert a new order and return the stored row
    async fn insert_order(&self, order: &NewOrder) -> Result<Order>;

    /// Set the status and notification flag of a single order
    async fn update_order_status(&self, id: i64, status: OrderStatus, is_notif_send: bool) -> Result<()>;

    /// Permanently delete an order
    async fn delete_order(&self, id: i64) -> Result<()>;
}

/// Interface for the singleton settings row
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Fetch the settings row, if one exists
    async fn get_settings(&self) -> Result<Option<Settings>>;

    /// Overwrite the row with the given id
    async fn update_settings(&self, id: &str, settings: &Settings) -> Result<Settings>;

    /// Create the row
    async fn insert_settings(&self, settings: &Settings) -> Result<Settings>;
}

/// Interface for the media buckets
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store the upload and return its object path inside the bucket
    async fn upload(&self, upload: &MediaUpload) -> Result<String>;

    /// Publicly reachable URL of a stored object
    fn public_url(&self, bucket: MediaBucket, path: &str) -> String;
}

/// Factory for the repositories of one storage backend
pub trait Connection: Send + Sync + Clone + 'static {
    type OrderRepository: OrderStorage + Clone + 'static;
    type SettingsRepository: SettingsStorage + Clone + 'static;
    type MediaRepository: MediaStorage + Clone + 'static;

    fn create_order_repository(&self) -> Self::OrderRepository;

    fn create_settings_repository(&self) -> Self::SettingsRepository;

    fn create_media_repository(&self) -> Self::MediaRepository;
}
