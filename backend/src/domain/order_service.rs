//! Order service domain logic.
//!
//! Every mutation is followed by a full re-fetch of the order list so the
//! caller always renders what the store actually holds. When the mutation
//! fails nothing is re-fetched and the previous list stays valid. When only
//! the re-fetch fails the mutation still counts as done and the result
//! carries no list.
use shared::{CreateOrderRequest, OrderFormErrors};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::commands::orders::{DeleteOrderCommand, OrderMutationResult};
use crate::domain::models::order::{Order, OrderStatus};
use crate::domain::order_form::OrderFormService;
use crate::storage::traits::{Connection, OrderStorage};

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error("Order form is invalid")]
    Validation(OrderFormErrors),
    #[error("Order {0} not found")]
    NotFound(i64),
    #[error("Order {0} is already finished")]
    AlreadyFinished(i64),
    #[error("Deleting order {0} requires confirmation")]
    NotConfirmed(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct OrderService<C: Connection> {
    order_repository: C::OrderRepository,
    form_service: OrderFormService,
}

impl<C: Connection> OrderService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            order_repository: connection.create_order_repository(),
            form_service: OrderFormService::new(),
        }
    }

    pub fn form_service(&self) -> &OrderFormService {
        &self.form_service
    }

    /// All orders, newest first
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        self.order_repository.list_orders().await.map_err(|e| {
            error!("Failed to fetch orders: {}", e);
            OrderServiceError::Store(e)
        })
    }

    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderMutationResult, OrderServiceError> {
        let new_order = self.form_service.to_new_order(request).map_err(|errors| {
            warn!("Rejected order form: {:?}", errors);
            OrderServiceError::Validation(errors)
        })?;

        let created = self.order_repository.insert_order(&new_order).await.map_err(|e| {
            error!("Failed to add order {}: {}", new_order.order_number, e);
            OrderServiceError::Store(e)
        })?;
        info!("Created order {} (id {})", created.order_number, created.id);

        let orders = self.refresh_after_write(&created.order_number).await;
        Ok(OrderMutationResult {
            success_message: format!("Order {} berhasil ditambahkan", created.order_number),
            order_id: created.id,
            order_number: created.order_number,
            orders,
        })
    }

    /// Mark an unfinished order as finished and drop it from the
    /// notification feed
    pub async fn finish_order(&self, id: i64) -> Result<OrderMutationResult, OrderServiceError> {
        let order = self.find_order(id).await?;
        if !order.can_finish() {
            warn!("Order {} is already finished", order.order_number);
            return Err(OrderServiceError::AlreadyFinished(id));
        }

        self.order_repository
            .update_order_status(id, OrderStatus::Finished, false)
            .await
            .map_err(|e| {
                error!("Failed to finish order {}: {}", order.order_number, e);
                OrderServiceError::Store(e)
            })?;
        info!("Finished order {}", order.order_number);

        let orders = self.refresh_after_write(&order.order_number).await;
        Ok(OrderMutationResult {
            success_message: format!("Order {} selesai", order.order_number),
            order_id: id,
            order_number: order.order_number,
            orders,
        })
    }

    pub async fn delete_order(&self, command: DeleteOrderCommand) -> Result<OrderMutationResult, OrderServiceError> {
        if !command.confirmed {
            return Err(OrderServiceError::NotConfirmed(command.id));
        }

        let order = self.find_order(command.id).await?;
        self.order_repository.delete_order(command.id).await.map_err(|e| {
            error!("Failed to delete order {}: {}", order.order_number, e);
            OrderServiceError::Store(e)
        })?;
        info!("Deleted order {}", order.order_number);

        let orders = self.refresh_after_write(&order.order_number).await;
        Ok(OrderMutationResult {
            success_message: format!("Order {} dihapus", order.order_number),
            order_id: command.id,
            order_number: order.order_number,
            orders,
        })
    }

    async fn refresh_after_write(&self, order_number: &str) -> Option<Vec<Order>> {
        match self.order_repository.list_orders().await {
            Ok(orders) => Some(orders),
            Err(e) => {
                warn!("Order {} was saved but the list could not be refreshed: {}", order_number, e);
                None
            }
        }
    }

    async fn find_order(&self, id: i64) -> Result<Order, OrderServiceError> {
        self.list_orders()
            .await?
            .into_iter()
            .find(|order| order.id == id)
            .ok_or(OrderServiceError::NotFound(id))
    }
}
