//! # REST API for Orders
//!
//! Order table, order form validation and the three order mutations. Every
//! successful mutation answers with the refreshed table page and raises a
//! success toast; failures raise an error toast. A mutation that was stored
//! but whose re-fetch failed is still a success, answered without a page.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use shared::{CreateOrderRequest, OrderFormValidation, OrderMutationResponse};
use tracing::{error, info};

use crate::domain::commands::orders::{DeleteOrderCommand, OrderListQuery, OrderMutationResult};
use crate::domain::OrderServiceError;
use crate::storage::traits::Connection;
use crate::AppState;

pub const REFRESH_FAILED_MESSAGE: &str = "Perubahan tersimpan, tetapi daftar order gagal dimuat ulang";

/// Table view parameters, accepted by the list endpoint and by every
/// mutation so the refreshed page matches what the user was looking at
#[derive(Debug, Default, Deserialize)]
pub struct OrderTableQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl OrderTableQuery {
    fn to_domain(&self) -> OrderListQuery {
        OrderListQuery {
            search: self.search.clone().unwrap_or_default(),
            page: self.page.unwrap_or(1),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrderQuery {
    #[serde(default)]
    pub confirm: bool,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Get one page of the order table
pub async fn list_orders<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<OrderTableQuery>,
) -> impl IntoResponse {
    info!("GET /api/orders - query: {:?}", query);

    let list_query = query.to_domain();
    match state.order_service.list_orders().await {
        Ok(orders) => {
            let page = state
                .order_table_service
                .build_page(&orders, &list_query.search, list_query.page);
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => {
            error!("Failed to list orders: {}", e);
            (StatusCode::BAD_GATEWAY, "Error fetching orders").into_response()
        }
    }
}

/// Validate the order form without submitting it
pub async fn validate_order<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    info!("POST /api/orders/validate - request: {:?}", request);

    let validation = state.order_service.form_service().validate(&request);
    (StatusCode::OK, Json(validation)).into_response()
}

pub async fn create_order<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<OrderTableQuery>,
    Json(request): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    info!("POST /api/orders - request: {:?}", request);

    let result = state.order_service.create_order(&request).await;
    mutation_response(&state, result, &query.to_domain(), StatusCode::CREATED, "Gagal menambahkan order")
}

pub async fn finish_order<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<i64>,
    Query(query): Query<OrderTableQuery>,
) -> impl IntoResponse {
    info!("POST /api/orders/{}/finish", id);

    let result = state.order_service.finish_order(id).await;
    mutation_response(&state, result, &query.to_domain(), StatusCode::OK, "Gagal menyelesaikan order")
}

pub async fn delete_order<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteOrderQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/orders/{} - query: {:?}", id, query);

    let command = DeleteOrderCommand {
        id,
        confirmed: query.confirm,
    };
    let list_query = OrderListQuery {
        search: query.search.unwrap_or_default(),
        page: query.page.unwrap_or(1),
    };

    let result = state.order_service.delete_order(command).await;
    mutation_response(&state, result, &list_query, StatusCode::OK, "Gagal menghapus order")
}

fn mutation_response<C: Connection>(
    state: &AppState<C>,
    result: Result<OrderMutationResult, OrderServiceError>,
    list_query: &OrderListQuery,
    success_status: StatusCode,
    failure_message: &str,
) -> Response {
    match result {
        Ok(mutation) => {
            state.toast_service.success(mutation.success_message.clone());
            let page = mutation.orders.as_deref().map(|orders| {
                state
                    .order_table_service
                    .build_page(orders, &list_query.search, list_query.page)
            });
            let refresh_error = page.is_none().then(|| REFRESH_FAILED_MESSAGE.to_string());
            let response = OrderMutationResponse {
                success_message: mutation.success_message,
                page,
                refresh_error,
            };
            (success_status, Json(response)).into_response()
        }
        Err(OrderServiceError::Validation(errors)) => {
            let validation = OrderFormValidation {
                is_valid: false,
                errors,
            };
            (StatusCode::BAD_REQUEST, Json(validation)).into_response()
        }
        Err(e @ OrderServiceError::NotConfirmed(_)) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e @ OrderServiceError::NotFound(_)) => {
            state.toast_service.error(failure_message);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ OrderServiceError::AlreadyFinished(_)) => {
            state.toast_service.error(failure_message);
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(OrderServiceError::Store(e)) => {
            error!("{}: {}", failure_message, e);
            state.toast_service.error(failure_message);
            (StatusCode::BAD_GATEWAY, failure_message.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, test_router};
    use crate::storage::memory::MemoryConnection;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::json;
    use shared::OrderPage;
    use tower::ServiceExt;

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    fn valid_form(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "price": "1500000",
            "due_date": "2025-01-10",
            "phone": "081234567890"
        })
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (app, _state) = test_router(MemoryConnection::new());

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/orders", valid_form("Servis Laptop")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: OrderMutationResponse = read_json(response).await;
        assert!(created.refresh_error.is_none());
        let created_page = created.page.unwrap();
        assert_eq!(created_page.total_filtered, 1);
        assert_eq!(created_page.rows[0].formatted_price, "Rp 1.500.000");

        let response = app
            .oneshot(empty_request(Method::GET, "/api/orders?search=laptop&page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page: OrderPage = read_json(response).await;
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].name, "Servis Laptop");
    }

    #[tokio::test]
    async fn test_create_invalid_returns_field_errors() {
        let (app, state) = test_router(MemoryConnection::new());
        let body = json!({ "name": "", "price": "-5", "due_date": "", "phone": "08" });

        let response = app.oneshot(json_request(Method::POST, "/api/orders", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let validation: OrderFormValidation = read_json(response).await;
        assert!(!validation.is_valid);
        assert_eq!(validation.errors.name.as_deref(), Some("Nama wajib diisi"));
        assert_eq!(validation.errors.price.as_deref(), Some("Harga harus berupa angka positif"));
        assert_eq!(validation.errors.due_date.as_deref(), Some("Tanggal wajib diisi"));
        assert_eq!(validation.errors.phone.as_deref(), Some("Nomor telepon harus 10-15 angka"));
        assert!(state.order_service.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let (app, _state) = test_router(MemoryConnection::new());
        let response = app
            .oneshot(json_request(Method::POST, "/api/orders/validate", valid_form("Rakit PC")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let validation: OrderFormValidation = read_json(response).await;
        assert!(validation.is_valid);
    }

    #[tokio::test]
    async fn test_finish_and_delete() {
        let (app, state) = test_router(MemoryConnection::new());
        let created = state
            .order_service
            .create_order(&serde_json::from_value(valid_form("Ganti LCD")).unwrap())
            .await
            .unwrap();
        let id = created.order_id;

        let response = app
            .clone()
            .oneshot(empty_request(Method::POST, &format!("/api/orders/{}/finish", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let finished: OrderMutationResponse = read_json(response).await;
        let finished_page = finished.page.clone().unwrap();
        assert_eq!(finished_page.rows[0].status_label, "Finished");
        assert!(!finished_page.rows[0].can_finish);
        assert_eq!(
            state.toast_service.current().map(|t| t.message),
            Some(finished.success_message.clone())
        );

        let response = app
            .clone()
            .oneshot(empty_request(Method::POST, &format!("/api/orders/{}/finish", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(empty_request(Method::DELETE, &format!("/api/orders/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(empty_request(Method::DELETE, &format!("/api/orders/{}?confirm=true", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: OrderMutationResponse = read_json(response).await;
        let deleted_page = deleted.page.unwrap();
        assert_eq!(deleted_page.total_filtered, 0);
        assert!(deleted_page.empty_message.is_some());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_bad_gateway() {
        let connection = MemoryConnection::new();
        let (app, state) = test_router(connection.clone());
        connection.set_unavailable(true);

        let response = app
            .oneshot(json_request(Method::POST, "/api/orders", valid_form("Servis")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            state.toast_service.current().map(|t| t.kind),
            Some(shared::ToastKind::Error)
        );
    }

    #[tokio::test]
    async fn test_create_is_success_when_refresh_fails() {
        let connection = MemoryConnection::new();
        let (app, state) = test_router(connection.clone());
        connection.fail_listing_after_next_write();

        let response = app
            .oneshot(json_request(Method::POST, "/api/orders", valid_form("Servis")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: OrderMutationResponse = read_json(response).await;
        assert!(created.page.is_none());
        assert_eq!(created.refresh_error.as_deref(), Some(REFRESH_FAILED_MESSAGE));
        assert_eq!(
            state.toast_service.current().map(|t| t.kind),
            Some(shared::ToastKind::Success)
        );

        connection.restore_listing();
        assert_eq!(state.order_service.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_finish_missing_order_is_not_found() {
        let (app, _state) = test_router(MemoryConnection::new());
        let response = app
            .oneshot(empty_request(Method::POST, "/api/orders/42/finish"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
