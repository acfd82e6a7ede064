//! # Request Handlers
//!
//! Axum request handlers for the checkout page.
//!
//! Gateway results are relayed with the provider's own status and JSON body.
//! Gateway errors become a fixed, route-specific message; the detail only
//! goes to the server log.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{Cart, GatewayResult, PaymentError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Client-visible message for any order-creation failure
pub const CREATE_ORDER_FAILED: &str = "Failed to create order.";

/// Client-visible message for any capture failure
pub const CAPTURE_ORDER_FAILED: &str = "Failed to capture order.";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderRequest {
    /// Cart contents from the checkout page (shape is up to the page)
    #[serde(default)]
    pub cart: Cart,
}

impl CreateOrderRequest {
    /// Parse a raw body; an empty body is the same as `{}`
    pub fn from_body(body: &[u8]) -> Result<Self, PaymentError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| PaymentError::InvalidRequest(format!("Invalid create order body: {}", e)))
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A gateway failure on its way out of a route
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Log the failure and keep only its status mapping
    pub fn from_payment(err: PaymentError, message: &'static str) -> Self {
        error!(code = err.code(), "{} {}", message, err);
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Turn a gateway result into the outgoing response, status untouched
fn relay(result: GatewayResult) -> Result<Response, PaymentError> {
    let status = StatusCode::from_u16(result.status_code).map_err(|_| {
        PaymentError::Internal(format!(
            "Provider returned unusable status {}",
            result.status_code
        ))
    })?;
    Ok((status, Json(result.body)).into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paypal-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Anything outside the API and the client directory
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Create an order for the cart sent by the checkout page
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn create_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let fail = |e: PaymentError| ApiError::from_payment(e, CREATE_ORDER_FAILED);

    let request = CreateOrderRequest::from_body(&body).map_err(fail)?;

    info!(
        "Creating order: provider={}, cart_items={}",
        state.gateway.provider_name(),
        request.cart.item_count()
    );

    let result = state.gateway.create_order(&request.cart).await.map_err(fail)?;

    info!(
        "Order created: status={}, id={}",
        result.status_code,
        result.resource_id().unwrap_or("-")
    );

    relay(result).map_err(fail)
}

/// Capture payment for an approved order
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
pub async fn capture_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Response, ApiError> {
    let fail = |e: PaymentError| ApiError::from_payment(e, CAPTURE_ORDER_FAILED);

    let result = state.gateway.capture_order(&order_id).await.map_err(fail)?;

    info!(
        "Order capture: status={}, order_status={}",
        result.status_code,
        result.resource_status().unwrap_or("-")
    );

    relay(result).map_err(fail)
}
