use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Local;
use shared::{MediaBucket, Settings};

use super::connection::MemoryConnection;
use crate::domain::models::media::MediaUpload;
use crate::domain::models::order::{NewOrder, Order, OrderStatus};
use crate::storage::traits::{MediaStorage, OrderStorage, SettingsStorage};

#[derive(Clone)]
pub struct MemoryOrderRepository {
    connection: MemoryConnection,
}

impl MemoryOrderRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl OrderStorage for MemoryOrderRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let state = self.connection.lock()?;
        if state.list_unavailable {
            return Err(anyhow!("Memory store failed to list orders"));
        }
        let mut orders = state.orders.clone();
        // Missing timestamps sort last, like NULLs in a descending scan
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order> {
        let mut state = self.connection.lock()?;
        state.next_order_id += 1;
        let stored = Order {
            id: state.next_order_id,
            name: order.name.clone(),
            price: order.price,
            order_number: order.order_number.clone(),
            created_at: Some(Local::now().fixed_offset()),
            due_date: Some(order.due_date),
            status: order.status,
            phone: Some(order.phone.clone()),
            is_notif_send: false,
        };
        state.orders.push(stored.clone());
        state.record_order_write();
        Ok(stored)
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus, is_notif_send: bool) -> Result<()> {
        let mut state = self.connection.lock()?;
        if let Some(order) = state.orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
            order.is_notif_send = is_notif_send;
        }
        state.record_order_write();
        Ok(())
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        let mut state = self.connection.lock()?;
        state.orders.retain(|o| o.id != id);
        state.record_order_write();
        Ok(())
    }
}

#[derive(Clone)]
pub struct MemorySettingsRepository {
    connection: MemoryConnection,
}

impl MemorySettingsRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SettingsStorage for MemorySettingsRepository {
    async fn get_settings(&self) -> Result<Option<Settings>> {
        Ok(self.connection.lock()?.settings.clone())
    }

    async fn update_settings(&self, id: &str, settings: &Settings) -> Result<Settings> {
        let mut state = self.connection.lock()?;
        let row_exists = state.settings.as_ref().and_then(|s| s.id.as_deref()) == Some(id);
        if !row_exists {
            return Err(anyhow!("Settings update returned no row"));
        }
        let updated = Settings {
            id: Some(id.to_string()),
            ..settings.clone()
        };
        state.settings = Some(updated.clone());
        Ok(updated)
    }

    async fn insert_settings(&self, settings: &Settings) -> Result<Settings> {
        let mut state = self.connection.lock()?;
        let inserted = Settings {
            id: Some("1".to_string()),
            ..settings.clone()
        };
        state.settings = Some(inserted.clone());
        Ok(inserted)
    }
}

#[derive(Clone)]
pub struct MemoryMediaRepository {
    connection: MemoryConnection,
}

impl MemoryMediaRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MediaStorage for MemoryMediaRepository {
    async fn upload(&self, upload: &MediaUpload) -> Result<String> {
        let mut state = self.connection.lock()?;
        let key = (upload.bucket, upload.object_name.clone());
        if state.objects.contains_key(&key) {
            return Err(anyhow!("The resource already exists: {}/{}", upload.bucket, upload.object_name));
        }
        state.objects.insert(key, upload.bytes.clone());
        Ok(upload.object_name.clone())
    }

    fn public_url(&self, bucket: MediaBucket, path: &str) -> String {
        format!("memory://{}/{}", bucket.as_str(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::Connection;
    use chrono::NaiveDate;

    fn new_order(name: &str) -> NewOrder {
        NewOrder {
            name: name.to_string(),
            price: 10_000.0,
            order_number: Order::generate_order_number(),
            due_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            status: OrderStatus::Unfinished,
            phone: "081234567890".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_timestamp() {
        let conn = MemoryConnection::new();
        let repo = conn.create_order_repository();

        let first = repo.insert_order(&new_order("Pertama")).await.unwrap();
        let second = repo.insert_order(&new_order("Kedua")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.created_at.is_some());
        assert!(!first.is_notif_send);
        assert_eq!(repo.list_orders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = MemoryConnection::new();
        let repo = conn.create_order_repository();
        let order = repo.insert_order(&new_order("Servis")).await.unwrap();

        repo.update_order_status(order.id, OrderStatus::Finished, false).await.unwrap();
        let listed = repo.list_orders().await.unwrap();
        assert_eq!(listed[0].status, OrderStatus::Finished);

        repo.delete_order(order.id).await.unwrap();
        assert!(repo.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let conn = MemoryConnection::new();
        let repo = conn.create_order_repository();
        conn.set_unavailable(true);
        assert!(repo.list_orders().await.is_err());
        assert!(repo.insert_order(&new_order("Gagal")).await.is_err());

        conn.set_unavailable(false);
        assert!(repo.list_orders().await.is_ok());
    }

    #[tokio::test]
    async fn test_listing_fails_after_next_write() {
        let conn = MemoryConnection::new();
        let repo = conn.create_order_repository();
        conn.fail_listing_after_next_write();
        assert!(repo.list_orders().await.is_ok());

        repo.insert_order(&new_order("Servis")).await.unwrap();
        assert!(repo.list_orders().await.is_err());

        conn.restore_listing();
        assert_eq!(repo.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_settings_update_requires_matching_row() {
        let conn = MemoryConnection::new();
        let repo = conn.create_settings_repository();
        assert_eq!(repo.get_settings().await.unwrap(), None);
        assert!(repo.update_settings("1", &Settings::default()).await.is_err());

        let created = repo.insert_settings(&Settings::default()).await.unwrap();
        assert_eq!(created.id.as_deref(), Some("1"));
        let updated = repo
            .update_settings(
                "1",
                &Settings {
                    tagline: "Bug hunting service".to_string(),
                    ..Settings::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id.as_deref(), Some("1"));
        assert_eq!(updated.tagline, "Bug hunting service");
    }

    #[tokio::test]
    async fn test_media_upload_rejects_duplicates() {
        let conn = MemoryConnection::new();
        let repo = conn.create_media_repository();
        let upload = MediaUpload::new(MediaBucket::Logos, "logo.png", 1_700_000_000_000, vec![0x89, 0x50]);

        let path = repo.upload(&upload).await.unwrap();
        assert_eq!(path, "1700000000000.png");
        assert_eq!(conn.stored_object(MediaBucket::Logos, &path), Some(vec![0x89, 0x50]));
        assert!(repo.upload(&upload).await.is_err());
    }
}
