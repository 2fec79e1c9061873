//! # REST API for the Dashboard
//!
//! Stat cards, revenue chart and the notification feed.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::ChartGranularity;
use tracing::{error, info};

use crate::domain::commands::dashboard::DashboardQuery;
use crate::domain::{DashboardError, DashboardService};
use crate::storage::traits::Connection;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// 0-based month, defaults to the current month
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub granularity: Option<ChartGranularity>,
}

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub granularity: Option<ChartGranularity>,
}

pub async fn get_dashboard<C: Connection>(
    State(state): State<AppState<C>>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - query: {:?}", params);

    let current = DashboardService::<C>::current_period();
    let query = DashboardQuery {
        month: params.month.unwrap_or(current.month),
        year: params.year.unwrap_or(current.year),
        granularity: params.granularity.unwrap_or_default(),
    };

    match state.dashboard_service.get_dashboard(query).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e @ DashboardError::InvalidMonth(_)) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            error!("Failed to build dashboard: {}", e);
            (StatusCode::BAD_GATEWAY, "Error loading dashboard").into_response()
        }
    }
}

pub async fn get_chart<C: Connection>(
    State(state): State<AppState<C>>,
    Query(params): Query<ChartParams>,
) -> impl IntoResponse {
    info!("GET /api/chart - query: {:?}", params);

    match state
        .dashboard_service
        .get_chart(params.granularity.unwrap_or_default())
        .await
    {
        Ok(chart) => (StatusCode::OK, Json(chart)).into_response(),
        Err(e) => {
            error!("Failed to build chart: {}", e);
            (StatusCode::BAD_GATEWAY, "Error loading chart").into_response()
        }
    }
}

pub async fn get_notifications<C: Connection>(State(state): State<AppState<C>>) -> impl IntoResponse {
    info!("GET /api/notifications");

    match state.dashboard_service.get_notifications().await {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(e) => {
            error!("Failed to load notifications: {}", e);
            (StatusCode::BAD_GATEWAY, "Error loading notifications").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::order::{Order, OrderStatus};
    use crate::io::rest::test_support::{read_json, test_router};
    use crate::storage::memory::MemoryConnection;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Local, TimeZone};
    use shared::{ChartResponse, DashboardResponse};
    use tower::ServiceExt;

    fn order(id: i64, price: f64, notif: bool, (y, m, d): (i32, u32, u32)) -> Order {
        Order {
            id,
            name: format!("Order {}", id),
            price,
            order_number: format!("ORD-{:08}", id),
            created_at: Local
                .with_ymd_and_hms(y, m, d, 9, 0, 0)
                .single()
                .map(|dt| dt.fixed_offset()),
            due_date: None,
            status: OrderStatus::Unfinished,
            phone: None,
            is_notif_send: notif,
        }
    }

    fn seeded() -> MemoryConnection {
        MemoryConnection::with_orders(vec![
            order(1, 100.0, true, (2024, 12, 30)),
            order(2, 150.0, false, (2025, 1, 2)),
            order(3, 150.0, true, (2025, 1, 3)),
        ])
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_for_selected_month() {
        let (app, _state) = test_router(seeded());
        let response = app
            .oneshot(get("/api/dashboard?month=0&year=2025&granularity=yearly"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let dashboard: DashboardResponse = read_json(response).await;
        assert_eq!(dashboard.month_name, "Januari");
        assert_eq!(dashboard.summary.monthly_income, 300.0);
        assert_eq!(dashboard.formatted_monthly_income, "Rp 300");
        let labels: Vec<&str> = dashboard.chart.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024", "2025"]);
        assert_eq!(dashboard.chart.percent_change.map(|c| c.magnitude), Some(200.0));
        assert_eq!(dashboard.notifications.len(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_month_out_of_range() {
        let (app, _state) = test_router(seeded());
        let response = app.oneshot(get("/api/dashboard?month=12&year=2025")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_defaults_to_monthly() {
        let (app, _state) = test_router(seeded());
        let response = app.oneshot(get("/api/chart")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let chart: ChartResponse = read_json(response).await;
        assert_eq!(chart.granularity, ChartGranularity::Monthly);
        let labels: Vec<&str> = chart.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["12/2024", "1/2025"]);
    }

    #[tokio::test]
    async fn test_notifications_unavailable_store() {
        let connection = seeded();
        let (app, _state) = test_router(connection.clone());
        connection.set_unavailable(true);
        let response = app.oneshot(get("/api/notifications")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
