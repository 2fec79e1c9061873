//! # DMC Dashboard Backend
//!
//! Admin dashboard for the Debug May Cry repair shop: order management,
//! revenue analytics and the content settings of the public site.
//!
//! ## Architecture
//!
//! ```text
//! UI (browser)
//!     ↓
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (services, aggregation, validation)
//!     ↓
//! Storage Layer (hosted backend or in-memory store)
//! ```
//!
//! The router and every service are generic over the storage
//! [`Connection`], chosen once at startup.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::DashboardConfig;
use crate::domain::{DashboardService, OrderService, OrderTableService, SettingsService, ToastService};
use crate::storage::traits::Connection;

/// Largest media file accepted by the upload endpoint
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub order_service: OrderService<C>,
    pub order_table_service: OrderTableService,
    pub dashboard_service: DashboardService<C>,
    pub settings_service: SettingsService<C>,
    pub toast_service: ToastService,
}

impl<C: Connection> AppState<C> {
    pub fn new(connection: C, config: &DashboardConfig) -> Self {
        let connection = Arc::new(connection);
        Self {
            order_service: OrderService::new(connection.clone()),
            order_table_service: OrderTableService::with_page_size(config.page_size),
            dashboard_service: DashboardService::new(connection.clone()),
            settings_service: SettingsService::new(connection),
            toast_service: ToastService::new(config.toast_duration()),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend<C: Connection>(connection: C, config: &DashboardConfig) -> AppState<C> {
    info!("Setting up domain services");
    let app_state = AppState::new(connection, config);
    info!(
        "Application state ready (page size {}, toast duration {} ms)",
        config.page_size, config.toast_duration_ms
    );
    app_state
}

/// Create the Axum router with all routes configured
pub fn create_router<C: Connection>(app_state: AppState<C>, config: &DashboardConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed_origin {:?}", config.allowed_origin))?;

    // CORS setup to allow the dashboard UI to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/orders", get(io::list_orders::<C>).post(io::create_order::<C>))
        .route("/orders/validate", post(io::validate_order::<C>))
        .route("/orders/:id", delete(io::delete_order::<C>))
        .route("/orders/:id/finish", post(io::finish_order::<C>))
        .route("/dashboard", get(io::get_dashboard::<C>))
        .route("/chart", get(io::get_chart::<C>))
        .route("/notifications", get(io::get_notifications::<C>))
        .route("/settings", get(io::get_settings::<C>).put(io::save_settings::<C>))
        .route(
            "/settings/media/:bucket",
            post(io::upload_media::<C>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/toast", get(io::get_toast::<C>).delete(io::dismiss_toast::<C>));

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
