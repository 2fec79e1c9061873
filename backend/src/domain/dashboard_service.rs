//! Dashboard service domain logic.
//!
//! Loads the order list once per request and derives the stat cards, the
//! revenue chart and the notification feed from it.
use chrono::{Datelike, Local};
use shared::{ChartGranularity, ChartResponse, DashboardResponse};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::aggregation::{build_chart_series, filter_notifiable, percent_change, summarize};
use crate::domain::commands::dashboard::DashboardQuery;
use crate::domain::formatting::{format_rupiah, month_name};
use crate::domain::models::order::Order;
use crate::storage::traits::{Connection, OrderStorage};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Month must be between 0 and 11, got {0}")]
    InvalidMonth(u32),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    order_repository: C::OrderRepository,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            order_repository: connection.create_order_repository(),
        }
    }

    /// Query for the current local month with the default granularity
    pub fn current_period() -> DashboardQuery {
        let now = Local::now();
        DashboardQuery {
            month: now.month0(),
            year: now.year(),
            granularity: ChartGranularity::default(),
        }
    }

    pub async fn get_dashboard(&self, query: DashboardQuery) -> Result<DashboardResponse, DashboardError> {
        if month_name(query.month).is_none() {
            return Err(DashboardError::InvalidMonth(query.month));
        }
        let orders = self.fetch_orders().await?;
        info!(
            "Building dashboard for {}/{} over {} orders",
            query.month + 1,
            query.year,
            orders.len()
        );
        Self::build_dashboard(&orders, query)
    }

    pub async fn get_chart(&self, granularity: ChartGranularity) -> Result<ChartResponse, DashboardError> {
        let orders = self.fetch_orders().await?;
        Ok(Self::build_chart(&orders, granularity))
    }

    pub async fn get_notifications(&self) -> Result<Vec<shared::Order>, DashboardError> {
        let orders = self.fetch_orders().await?;
        Ok(Self::notifications(&orders))
    }

    pub fn build_dashboard(orders: &[Order], query: DashboardQuery) -> Result<DashboardResponse, DashboardError> {
        let month_name = month_name(query.month).ok_or(DashboardError::InvalidMonth(query.month))?;
        let summary = summarize(orders, query.month, query.year);

        Ok(DashboardResponse {
            month: query.month,
            year: query.year,
            month_name: month_name.to_string(),
            formatted_monthly_income: format_rupiah(summary.monthly_income),
            summary,
            chart: Self::build_chart(orders, query.granularity),
            notifications: Self::notifications(orders),
        })
    }

    pub fn build_chart(orders: &[Order], granularity: ChartGranularity) -> ChartResponse {
        let series = build_chart_series(orders, granularity);
        let percent_change = percent_change(&series);
        ChartResponse {
            granularity,
            series,
            percent_change,
        }
    }

    pub fn notifications(orders: &[Order]) -> Vec<shared::Order> {
        filter_notifiable(orders)
            .into_iter()
            .map(shared::Order::from)
            .collect()
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, DashboardError> {
        self.order_repository.list_orders().await.map_err(|e| {
            error!("Failed to fetch orders for dashboard: {}", e);
            DashboardError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::order::OrderStatus;
    use crate::storage::memory::MemoryConnection;
    use chrono::TimeZone;
    use shared::Direction;

    fn order(id: i64, price: f64, status: OrderStatus, notif: bool, (y, m, d): (i32, u32, u32)) -> Order {
        Order {
            id,
            name: format!("Order {}", id),
            price,
            order_number: format!("ORD-{:08}", id),
            created_at: Local
                .with_ymd_and_hms(y, m, d, 10, 0, 0)
                .single()
                .map(|dt| dt.fixed_offset()),
            due_date: None,
            status,
            phone: None,
            is_notif_send: notif,
        }
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            order(1, 100.0, OrderStatus::Unfinished, true, (2025, 1, 5)),
            order(2, 200.0, OrderStatus::Finished, false, (2025, 1, 20)),
            order(3, 50.0, OrderStatus::Unfinished, false, (2025, 2, 1)),
        ]
    }

    fn query(month: u32, year: i32) -> DashboardQuery {
        DashboardQuery {
            month,
            year,
            granularity: ChartGranularity::Monthly,
        }
    }

    #[test]
    fn test_build_dashboard_for_january() {
        let response = DashboardService::<MemoryConnection>::build_dashboard(&sample_orders(), query(0, 2025)).unwrap();

        assert_eq!(response.month_name, "Januari");
        assert_eq!(response.summary.total_orders, 3);
        assert_eq!(response.summary.unfinished_count, 2);
        assert_eq!(response.summary.finished_count, 1);
        assert_eq!(response.summary.monthly_income, 300.0);
        assert_eq!(response.formatted_monthly_income, "Rp 300");

        let labels: Vec<&str> = response.chart.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1/2025", "2/2025"]);
        let change = response.chart.percent_change.unwrap();
        assert_eq!(change.direction, Direction::Down);
        assert!((change.magnitude - 83.333).abs() < 0.01);

        assert_eq!(response.notifications.len(), 1);
        assert_eq!(response.notifications[0].id, 1);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let result = DashboardService::<MemoryConnection>::build_dashboard(&sample_orders(), query(12, 2025));
        assert!(matches!(result, Err(DashboardError::InvalidMonth(12))));
    }

    #[test]
    fn test_empty_orders() {
        let response = DashboardService::<MemoryConnection>::build_dashboard(&[], query(5, 2025)).unwrap();
        assert_eq!(response.summary.total_orders, 0);
        assert_eq!(response.formatted_monthly_income, "Rp 0");
        assert!(response.chart.series.is_empty());
        assert!(response.chart.percent_change.is_none());
        assert!(response.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_get_chart_from_store() {
        let connection = MemoryConnection::with_orders(sample_orders());
        let service = DashboardService::new(Arc::new(connection.clone()));

        let chart = service.get_chart(ChartGranularity::Yearly).await.unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "2025");
        assert_eq!(chart.series[0].total, 350.0);
        assert!(chart.percent_change.is_none());

        connection.set_unavailable(true);
        assert!(matches!(
            service.get_notifications().await,
            Err(DashboardError::Store(_))
        ));
    }
}
