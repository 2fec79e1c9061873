//! # Domain Module
//!
//! Contains all business logic for the DMC admin dashboard.
//!
//! The dashboard manages repair orders for a small service shop and the
//! content of its public site. This module works against the storage traits
//! only, so the same services run on the hosted backend and on the in-memory
//! store.
//!
//! ## Module Organization
//!
//! - **order_service**: Create, finish and delete orders, re-fetching the list after each change
//! - **order_form**: Field-level validation of the "Add New Order" form
//! - **order_list**: Search, pagination and row formatting for the order table
//! - **aggregation**: Stat cards, revenue series and percent change
//! - **dashboard_service**: Dashboard page assembly over the aggregation functions
//! - **settings_service**: The singleton settings row and media uploads
//! - **toast**: Single active toast with timed dismissal
//! - **formatting**: Indonesian number, currency and date formatting
//!
//! ## Business Rules
//!
//! - Order status only moves from unfinished to finished
//! - Finishing an order also removes it from the notification feed
//! - Deleting an order requires explicit confirmation
//! - Monthly income counts orders by the local month of `created_at`

pub mod aggregation;
pub mod commands;
pub mod dashboard_service;
pub mod formatting;
pub mod models;
pub mod order_form;
pub mod order_list;
pub mod order_service;
pub mod settings_service;
pub mod toast;

pub use dashboard_service::{DashboardError, DashboardService};
pub use order_form::OrderFormService;
pub use order_list::OrderTableService;
pub use order_service::{OrderService, OrderServiceError};
pub use settings_service::SettingsService;
pub use toast::ToastService;
