use anyhow::{anyhow, Result};
use shared::{MediaBucket, Settings};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::repositories::{MemoryMediaRepository, MemoryOrderRepository, MemorySettingsRepository};
use crate::domain::models::order::Order;
use crate::storage::traits::Connection;

#[derive(Default)]
pub(super) struct MemoryState {
    pub orders: Vec<Order>,
    pub next_order_id: i64,
    pub settings: Option<Settings>,
    pub objects: HashMap<(MediaBucket, String), Vec<u8>>,
    pub unavailable: bool,
    /// Order listing fails while set
    pub list_unavailable: bool,
    /// Set `list_unavailable` on the next order write
    pub list_fails_after_write: bool,
}

impl MemoryState {
    pub fn record_order_write(&mut self) {
        if self.list_fails_after_write {
            self.list_fails_after_write = false;
            self.list_unavailable = true;
        }
    }
}

/// Process-local store with the same semantics as the hosted backend.
/// Used for local development and as the test double for the domain layer.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing orders
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let next_order_id = orders.iter().map(|o| o.id).max().unwrap_or(0);
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                orders,
                next_order_id,
                ..MemoryState::default()
            })),
        }
    }

    /// Make every following request fail, as if the backend were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.unavailable = unavailable;
        }
    }

    /// Let the next order write succeed, then fail every order listing until
    /// [`restore_listing`](Self::restore_listing) is called
    pub fn fail_listing_after_next_write(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.list_fails_after_write = true;
        }
    }

    pub fn restore_listing(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.list_fails_after_write = false;
            state.list_unavailable = false;
        }
    }

    /// Bytes stored under `bucket/path`, if any
    pub fn stored_object(&self, bucket: MediaBucket, path: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.objects.get(&(bucket, path.to_string())).cloned())
    }

    pub(super) fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        if state.unavailable {
            return Err(anyhow!("Memory store is unavailable"));
        }
        Ok(state)
    }
}

impl Connection for MemoryConnection {
    type OrderRepository = MemoryOrderRepository;
    type SettingsRepository = MemorySettingsRepository;
    type MediaRepository = MemoryMediaRepository;

    fn create_order_repository(&self) -> Self::OrderRepository {
        MemoryOrderRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        MemorySettingsRepository::new(self.clone())
    }

    fn create_media_repository(&self) -> Self::MediaRepository {
        MemoryMediaRepository::new(self.clone())
    }
}
