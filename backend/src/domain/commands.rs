//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the public DTOs from the
//! `shared` crate to these internal types.

pub mod orders {
    use crate::domain::models::order::Order;

    /// Query parameters for the order table.
    #[derive(Debug, Clone)]
    pub struct OrderListQuery {
        pub search: String,
        /// 1-based page number
        pub page: usize,
    }

    /// Command for deleting an order. Nothing is sent to the store unless
    /// `confirmed` is set.
    #[derive(Debug, Clone)]
    pub struct DeleteOrderCommand {
        pub id: i64,
        pub confirmed: bool,
    }

    /// Result of a successful create, finish or delete.
    #[derive(Debug, Clone)]
    pub struct OrderMutationResult {
        pub order_id: i64,
        /// Order number of the affected order
        pub order_number: String,
        /// Full list re-fetched after the mutation, `None` when that re-fetch
        /// failed. The mutation itself is stored either way.
        pub orders: Option<Vec<Order>>,
        pub success_message: String,
    }
}

pub mod dashboard {
    use shared::ChartGranularity;

    /// Period and chart granularity selected on the dashboard.
    #[derive(Debug, Clone, Copy)]
    pub struct DashboardQuery {
        /// 0-based month
        pub month: u32,
        pub year: i32,
        pub granularity: ChartGranularity,
    }
}

pub mod settings {
    use shared::MediaBucket;

    /// Input for uploading a media file.
    #[derive(Debug, Clone)]
    pub struct UploadMediaCommand {
        pub bucket: MediaBucket,
        pub original_filename: String,
        pub bytes: Vec<u8>,
        /// Also write the public URL into the matching settings field
        pub attach_to_settings: bool,
    }
}
