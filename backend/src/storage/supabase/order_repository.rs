//! Order table access through the PostgREST API.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::connection::SupabaseConnection;
use crate::domain::models::order::{parse_due_date, parse_timestamp, NewOrder, Order, OrderStatus};
use crate::storage::traits::OrderStorage;

const ORDERS_TABLE: &str = "orders";

/// `numeric` columns may come back as JSON numbers or strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Number(n) => Some(*n),
            NumericValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Row shape of the `orders` table
#[derive(Debug, Deserialize)]
struct OrderRow {
    id: i64,
    name: Option<String>,
    price: Option<NumericValue>,
    order_number: Option<String>,
    created_at: Option<String>,
    due_date: Option<String>,
    status: Option<String>,
    phone: Option<String>,
    is_notif_send: Option<bool>,
}

impl OrderRow {
    fn into_domain(self) -> Order {
        let created_at = self.created_at.as_deref().and_then(parse_timestamp);
        if created_at.is_none() {
            warn!("Order {} has missing or unparseable created_at: {:?}", self.id, self.created_at);
        }

        let price = match self.price.as_ref().and_then(NumericValue::as_f64) {
            Some(price) => price,
            None => {
                warn!("Order {} has missing or invalid price, treating as 0", self.id);
                0.0
            }
        };

        Order {
            id: self.id,
            name: self.name.unwrap_or_default(),
            price,
            order_number: self.order_number.unwrap_or_default(),
            created_at,
            due_date: self.due_date.as_deref().and_then(parse_due_date),
            status: parse_status(self.id, self.status.as_deref()),
            phone: self.phone,
            is_notif_send: self.is_notif_send.unwrap_or(false),
        }
    }
}

fn parse_status(id: i64, raw: Option<&str>) -> OrderStatus {
    match raw {
        Some("finished") => OrderStatus::Finished,
        Some("unfinished") => OrderStatus::Unfinished,
        other => {
            warn!("Order {} has unexpected status {:?}, treating as unfinished", id, other);
            OrderStatus::Unfinished
        }
    }
}

fn status_value(status: OrderStatus) -> &'static str {
    shared::OrderStatus::from(status).as_str()
}

#[derive(Debug, Serialize)]
struct InsertOrderRow<'a> {
    name: &'a str,
    price: f64,
    order_number: &'a str,
    due_date: String,
    status: &'static str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateStatusRow {
    status: &'static str,
    is_notif_send: bool,
}

#[derive(Clone)]
pub struct SupabaseOrderRepository {
    connection: SupabaseConnection,
}

impl SupabaseOrderRepository {
    pub fn new(connection: SupabaseConnection) -> Self {
        Self { connection }
    }

    fn id_filter(id: i64) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }
}

#[async_trait]
impl OrderStorage for SupabaseOrderRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let url = self.connection.table_url(ORDERS_TABLE);
        let request = self
            .connection
            .request(Method::GET, &url)
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let rows: Vec<OrderRow> = self.connection.send_json(request).await?;
        info!("Fetched {} orders", rows.len());
        Ok(rows.into_iter().map(OrderRow::into_domain).collect())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order> {
        let url = self.connection.table_url(ORDERS_TABLE);
        let payload = InsertOrderRow {
            name: &order.name,
            price: order.price,
            order_number: &order.order_number,
            due_date: order.due_date.format("%Y-%m-%d").to_string(),
            status: status_value(order.status),
            phone: &order.phone,
        };
        let request = self
            .connection
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&payload);

        let rows: Vec<OrderRow> = self.connection.send_json(request).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Insert of order {} returned no row", order.order_number))?;
        Ok(row.into_domain())
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus, is_notif_send: bool) -> Result<()> {
        let url = self.connection.table_url(ORDERS_TABLE);
        let request = self
            .connection
            .request(Method::PATCH, &url)
            .query(&Self::id_filter(id))
            .json(&UpdateStatusRow {
                status: status_value(status),
                is_notif_send,
            });

        self.connection.send(request).await?;
        Ok(())
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        let url = self.connection.table_url(ORDERS_TABLE);
        let request = self
            .connection
            .request(Method::DELETE, &url)
            .query(&Self::id_filter(id));

        self.connection.send(request).await?;
        Ok(())
    }
}
