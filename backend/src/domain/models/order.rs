//! Domain model for an order.
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use rand::Rng;

const ORDER_NUMBER_PREFIX: &str = "ORD-";
const ORDER_NUMBER_SUFFIX_LEN: usize = 8;
const BASE36_UPPER: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Unfinished,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub order_number: String,
    /// `None` when the store returned a missing or unparseable timestamp
    pub created_at: Option<DateTime<FixedOffset>>,
    pub due_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub phone: Option<String>,
    pub is_notif_send: bool,
}

impl Order {
    /// Creation time in the time zone of the running process
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        self.created_at.map(|dt| dt.with_timezone(&Local))
    }

    /// Unfinished and still flagged for the notification feed
    pub fn is_notifiable(&self) -> bool {
        self.status == OrderStatus::Unfinished && self.is_notif_send
    }

    pub fn can_finish(&self) -> bool {
        self.status == OrderStatus::Unfinished
    }

    /// Generate an order number: "ORD-" followed by 8 random base-36 characters.
    /// Uniqueness is not checked against the store.
    pub fn generate_order_number() -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ORDER_NUMBER_SUFFIX_LEN)
            .map(|_| BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())] as char)
            .collect();
        format!("{}{}", ORDER_NUMBER_PREFIX, suffix)
    }
}

impl From<OrderStatus> for shared::OrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unfinished => shared::OrderStatus::Unfinished,
            OrderStatus::Finished => shared::OrderStatus::Finished,
        }
    }
}

/// Wire form: RFC 3339 `created_at` (empty when unknown) and `YYYY-MM-DD`
/// due date
impl From<&Order> for shared::Order {
    fn from(order: &Order) -> Self {
        shared::Order {
            id: order.id,
            name: order.name.clone(),
            price: order.price,
            order_number: order.order_number.clone(),
            created_at: order.created_at.map(|dt| dt.to_rfc3339()).unwrap_or_default(),
            due_date: order.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            status: order.status.into(),
            phone: order.phone.clone(),
            is_notif_send: order.is_notif_send,
        }
    }
}

/// Validated insert payload for a new order
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub price: f64,
    pub order_number: String,
    pub due_date: NaiveDate,
    pub status: OrderStatus,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("Nama wajib diisi")]
    EmptyName,
    #[error("Harga wajib diisi")]
    EmptyPrice,
    #[error("Harga harus berupa angka positif")]
    InvalidPrice,
    #[error("Tanggal wajib diisi")]
    EmptyDueDate,
    #[error("Tanggal tidak valid")]
    InvalidDueDate,
    #[error("Nomor telepon wajib diisi")]
    EmptyPhone,
    #[error("Nomor telepon harus 10-15 angka")]
    InvalidPhone,
}

/// Parse a store timestamp. Accepts RFC 3339 and, for columns without a zone,
/// a naive `YYYY-MM-DDTHH:MM:SS[.f]` interpreted in local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.fixed_offset())
}

/// Parse a due date, tolerating a trailing time component
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
