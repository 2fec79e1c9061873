//! Order aggregation for the dashboard.
//!
//! Pure functions turning the flat order list into the numbers the dashboard
//! shows: stat-card counters, monthly income, the time-bucketed revenue
//! series and the change between its last two buckets. Inputs are never
//! mutated and results depend only on the input values.
//!
//! All calendar math happens in the local time zone of the running process.
//! Orders whose `created_at` is missing or unparseable are not dropped: they
//! are collected in a single bucket labelled [`UNKNOWN_BUCKET_LABEL`] that
//! sorts before every dated bucket. That bucket is charted but never takes
//! part in the percent change.

use chrono::{Datelike, NaiveDate};
use shared::{ChartGranularity, ChartPoint, Direction, PercentChange, Summary};
use std::collections::BTreeMap;

use crate::domain::models::order::{Order, OrderStatus};

pub const UNKNOWN_BUCKET_LABEL: &str = "unknown";

/// Grouping key of a chart bucket. The derived ordering is chronological and
/// places `Unknown` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BucketKey {
    Unknown,
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl BucketKey {
    fn for_order(order: &Order, granularity: ChartGranularity) -> Self {
        let Some(created_at) = order.created_at_local() else {
            return BucketKey::Unknown;
        };
        match granularity {
            ChartGranularity::Daily => BucketKey::Day(created_at.date_naive()),
            ChartGranularity::Monthly => BucketKey::Month {
                year: created_at.year(),
                month: created_at.month(),
            },
            ChartGranularity::Yearly => BucketKey::Year(created_at.year()),
        }
    }

    fn label(&self) -> String {
        match self {
            BucketKey::Unknown => UNKNOWN_BUCKET_LABEL.to_string(),
            BucketKey::Day(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
            BucketKey::Month { year, month } => format!("{}/{}", month, year),
            BucketKey::Year(year) => year.to_string(),
        }
    }
}

/// Counters over all orders plus the income of orders created in the given
/// month (`month0` is zero-based, 0 = January) and year.
pub fn summarize(orders: &[Order], month0: u32, year: i32) -> Summary {
    let unfinished_count = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Unfinished)
        .count();
    let finished_count = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Finished)
        .count();

    let monthly_income = orders
        .iter()
        .filter(|o| {
            o.created_at_local()
                .map(|dt| dt.month0() == month0 && dt.year() == year)
                .unwrap_or(false)
        })
        .map(|o| o.price)
        .sum();

    Summary {
        total_orders: orders.len(),
        unfinished_count,
        finished_count,
        monthly_income,
    }
}

/// Revenue per time bucket, sorted chronologically by the bucket's date.
/// One point per distinct bucket present in the input; empty input gives an
/// empty series.
pub fn build_chart_series(orders: &[Order], granularity: ChartGranularity) -> Vec<ChartPoint> {
    let mut totals: BTreeMap<BucketKey, f64> = BTreeMap::new();
    for order in orders {
        *totals.entry(BucketKey::for_order(order, granularity)).or_insert(0.0) += order.price;
    }

    totals
        .into_iter()
        .map(|(key, total)| ChartPoint {
            label: key.label(),
            total,
        })
        .collect()
}

/// Change from the second-to-last to the last dated bucket. `None` with
/// fewer than two dated buckets or when the previous total is zero.
pub fn percent_change(series: &[ChartPoint]) -> Option<PercentChange> {
    let dated: Vec<&ChartPoint> = series.iter().filter(|p| p.label != UNKNOWN_BUCKET_LABEL).collect();
    let [.., prev, curr] = dated.as_slice() else {
        return None;
    };
    if prev.total == 0.0 {
        return None;
    }

    Some(PercentChange {
        magnitude: (curr.total - prev.total).abs() / prev.total * 100.0,
        direction: if curr.total >= prev.total {
            Direction::Up
        } else {
            Direction::Down
        },
    })
}

/// Unfinished orders still flagged for notification, in input order
pub fn filter_notifiable(orders: &[Order]) -> Vec<&Order> {
    orders.iter().filter(|o| o.is_notifiable()).collect()
}
