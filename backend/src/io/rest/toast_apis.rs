//! # REST API for Toasts
//!
//! The UI polls the active toast and may dismiss it early.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::ToastResponse;
use tracing::debug;

use crate::storage::traits::Connection;
use crate::AppState;

pub async fn get_toast<C: Connection>(State(state): State<AppState<C>>) -> impl IntoResponse {
    debug!("GET /api/toast");

    let response = ToastResponse {
        toast: state.toast_service.current(),
    };
    (StatusCode::OK, Json(response))
}

pub async fn dismiss_toast<C: Connection>(State(state): State<AppState<C>>) -> impl IntoResponse {
    debug!("DELETE /api/toast");

    state.toast_service.dismiss();
    StatusCode::NO_CONTENT
}
