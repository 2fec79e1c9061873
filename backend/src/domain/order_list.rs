//! Order table presentation logic.
//!
//! Search, pagination and per-row formatting for the order list. All of it
//! runs over the full list fetched from the store; the store itself is never
//! asked to filter or paginate.

use shared::{OrderPage, OrderTableRow};

use crate::domain::formatting::{format_date, format_local_datetime, format_rupiah};
use crate::domain::models::order::Order;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const EMPTY_TABLE_MESSAGE: &str = "Tidak ada data order.";

/// Service that turns the raw order list into table pages
#[derive(Clone)]
pub struct OrderTableService {
    page_size: usize,
}

impl Default for OrderTableService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderTableService {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Orders whose name contains `search`, ignoring case, in input order
    pub fn filter_by_name<'a>(&self, orders: &'a [Order], search: &str) -> Vec<&'a Order> {
        let needle = search.to_lowercase();
        orders
            .iter()
            .filter(|order| needle.is_empty() || order.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Build one page of the filtered table. `page` is 1-based and clamped
    /// into the available range.
    pub fn build_page(&self, orders: &[Order], search: &str, page: usize) -> OrderPage {
        let filtered = self.filter_by_name(orders, search);
        let total_filtered = filtered.len();
        let total_pages = total_filtered.div_ceil(self.page_size);
        let current_page = page.clamp(1, total_pages.max(1));
        let offset = (current_page - 1) * self.page_size;

        let rows: Vec<OrderTableRow> = filtered
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .enumerate()
            .map(|(index, order)| self.format_row(offset + index + 1, order))
            .collect();

        let empty_message = rows.is_empty().then(|| EMPTY_TABLE_MESSAGE.to_string());

        OrderPage {
            rows,
            search: search.to_string(),
            current_page,
            total_pages,
            total_filtered,
            page_size: self.page_size,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            empty_message,
        }
    }

    /// Format a single order for display
    pub fn format_row(&self, number: usize, order: &Order) -> OrderTableRow {
        let status = shared::OrderStatus::from(order.status);
        OrderTableRow {
            number,
            id: order.id,
            order_number: order.order_number.clone(),
            name: order.name.clone(),
            phone: order.phone.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "-".to_string()),
            formatted_price: format_rupiah(order.price),
            formatted_created_at: order
                .created_at_local()
                .map(|dt| format_local_datetime(&dt))
                .unwrap_or_else(|| "-".to_string()),
            formatted_due_date: order.due_date.map(format_date).unwrap_or_else(|| "-".to_string()),
            status,
            status_label: status.label().to_string(),
            can_finish: order.can_finish(),
        }
    }
}
