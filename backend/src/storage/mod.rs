//! # Storage Module
//!
//! Data access for the dashboard. Orders and settings are owned by a hosted
//! relational backend and media by its object storage; this module hides the
//! wire details behind the traits in [`traits`].
//!
//! - **supabase**: the hosted backend over HTTP (PostgREST + storage API)
//! - **memory**: an in-process store for local development and tests

pub mod memory;
pub mod supabase;
pub mod traits;

pub use memory::MemoryConnection;
pub use supabase::{SupabaseConnection, SupabaseError};
pub use traits::{Connection, MediaStorage, OrderStorage, SettingsStorage};
