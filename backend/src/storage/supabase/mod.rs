//! # Supabase Storage
//!
//! Storage backend for the hosted project: the `orders` and `settings`
//! tables through PostgREST and the `logos`, `hero-images` and `audio-files`
//! buckets through the storage API. Every call is a single request; failures
//! are returned to the caller without retries.

pub mod connection;
pub mod media_repository;
pub mod order_repository;
pub mod settings_repository;

pub use connection::{SupabaseConnection, SupabaseError};
pub use media_repository::SupabaseMediaRepository;
pub use order_repository::SupabaseOrderRepository;
pub use settings_repository::SupabaseSettingsRepository;
