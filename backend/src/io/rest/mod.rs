//! # REST API Interface Layer
//!
//! Axum handlers for the dashboard. Handlers are generic over the storage
//! [`Connection`](crate::storage::traits::Connection) so the same router runs
//! on the hosted backend and on the in-memory store.
//!
//! - **order_apis**: order table, form validation, create/finish/delete
//! - **dashboard_apis**: stat cards, revenue chart, notifications
//! - **settings_apis**: settings row and media uploads
//! - **toast_apis**: active toast polling and dismissal

pub mod dashboard_apis;
pub mod order_apis;
pub mod settings_apis;
pub mod toast_apis;

pub use dashboard_apis::*;
pub use order_apis::*;
pub use settings_apis::*;
pub use toast_apis::*;
