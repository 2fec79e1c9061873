use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An order row as exchanged with the dashboard UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name of the order (never empty)
    pub name: String,
    /// Non-negative amount in Rupiah
    pub price: f64,
    /// Client-generated number in format "ORD-XXXXXXXX"
    pub order_number: String,
    /// Insertion timestamp set by the store (RFC 3339)
    pub created_at: String,
    /// Optional due date (YYYY-MM-DD)
    pub due_date: Option<String>,
    pub status: OrderStatus,
    /// Customer phone number, 10-15 digits
    pub phone: Option<String>,
    /// Whether the order still shows up in the notification feed
    #[serde(default)]
    pub is_notif_send: bool,
}

/// Completion status of an order. Transitions only go unfinished -> finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Unfinished,
    Finished,
}

impl OrderStatus {
    /// Wire value used by the remote order table
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unfinished => "unfinished",
            OrderStatus::Finished => "finished",
        }
    }

    /// Label shown in the order table
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Unfinished => "Unfinished",
            OrderStatus::Finished => "Finished",
        }
    }
}

/// Raw values typed into the "Add New Order" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub name: String,
    /// Price as typed by the operator, parsed during validation
    #[serde(default)]
    pub price: String,
    /// Due date as YYYY-MM-DD
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub phone: String,
}

/// Inline error message per form field; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFormErrors {
    pub name: Option<String>,
    pub price: Option<String>,
    pub due_date: Option<String>,
    pub phone: Option<String>,
}

impl OrderFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.due_date.is_none() && self.phone.is_none()
    }
}

/// Validation result for the order form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFormValidation {
    pub is_valid: bool,
    pub errors: OrderFormErrors,
}

/// One formatted row of the order table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTableRow {
    /// Running number across pages, starting at 1
    pub number: usize,
    pub id: i64,
    pub order_number: String,
    pub name: String,
    pub phone: String,
    pub formatted_price: String,
    pub formatted_created_at: String,
    pub formatted_due_date: String,
    pub status: OrderStatus,
    pub status_label: String,
    /// Only unfinished orders expose the "Finish" action
    pub can_finish: bool,
}

/// A single page of the searchable order table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub rows: Vec<OrderTableRow>,
    pub search: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub page_size: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Set when the page has no rows
    pub empty_message: Option<String>,
}

/// Response for create/finish/delete: a message plus the freshly fetched page.
/// The change is saved whenever this is returned. `page` is absent and
/// `refresh_error` set when the list could not be fetched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMutationResponse {
    pub success_message: String,
    pub page: Option<OrderPage>,
    #[serde(default)]
    pub refresh_error: Option<String>,
}

/// Aggregate counters shown on the dashboard stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_orders: usize,
    pub unfinished_count: usize,
    pub finished_count: usize,
    /// Sum of prices for orders created in the selected month
    pub monthly_income: f64,
}

/// Time bucket size for the revenue chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartGranularity {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

/// Revenue total of one chart bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Change between the last two chart buckets, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentChange {
    pub magnitude: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub granularity: ChartGranularity,
    pub series: Vec<ChartPoint>,
    pub percent_change: Option<PercentChange>,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Selected month, zero-based (0 = January)
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub summary: Summary,
    pub formatted_monthly_income: String,
    pub chart: ChartResponse,
    pub notifications: Vec<Order>,
}

/// The singleton CMS settings record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub site_title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub hero_name: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub hero_description: String,
    #[serde(default)]
    pub about_description: String,
    #[serde(default)]
    pub trusted_title: String,
    #[serde(default)]
    pub trusted_description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub audio_title: String,
    #[serde(default)]
    pub audio_src: String,
    #[serde(default)]
    pub audio_button_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSettingsResponse {
    /// `None` until the first save creates the row
    pub settings: Option<Settings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSettingsResponse {
    pub settings: Settings,
    /// True when the save inserted the singleton row
    pub created: bool,
    pub success_message: String,
}

/// Object storage bucket for uploaded site media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaBucket {
    Logos,
    HeroImages,
    AudioFiles,
}

impl MediaBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaBucket::Logos => "logos",
            MediaBucket::HeroImages => "hero-images",
            MediaBucket::AudioFiles => "audio-files",
        }
    }
}

impl FromStr for MediaBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logos" => Ok(MediaBucket::Logos),
            "hero-images" => Ok(MediaBucket::HeroImages),
            "audio-files" => Ok(MediaBucket::AudioFiles),
            other => Err(format!("Unknown media bucket: {}", other)),
        }
    }
}

impl fmt::Display for MediaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub bucket: MediaBucket,
    /// Object path inside the bucket, e.g. "1718000000000.png"
    pub path: String,
    pub public_url: String,
    /// Saved settings when the upload was attached to its settings field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Short-lived notification shown after an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastResponse {
    pub toast: Option<Toast>,
}
