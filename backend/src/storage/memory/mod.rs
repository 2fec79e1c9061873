//! # Memory Storage
//!
//! In-process implementation of the storage traits. Orders, the settings
//! row and uploaded objects live behind a shared mutex; clones of the
//! connection see the same data.

pub mod connection;
pub mod repositories;

pub use connection::MemoryConnection;
pub use repositories::{MemoryMediaRepository, MemoryOrderRepository, MemorySettingsRepository};
