//! # Order Gateway Trait
//!
//! Provider-neutral seam between the HTTP edge and a payment provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    OrderGateway (trait)                     │
//! │  ├── create_order(cart)                                     │
//! │  ├── capture_order(order_id)                                │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴────────┐
//!                    │ PayPalOrder    │
//!                    │   Gateway      │
//!                    └────────────────┘
//! ```
//!
//! A gateway relays the provider's answer as a [`GatewayResult`]: the parsed
//! JSON body together with the provider's own HTTP status, error statuses
//! included. Only failures to talk to the provider at all are `Err`.

use crate::cart::Cart;
use crate::error::PaymentResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Provider response relayed back to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResult {
    /// Parsed provider response body
    pub body: Value,
    /// Provider's HTTP status code
    pub status_code: u16,
}

impl GatewayResult {
    pub fn new(body: Value, status_code: u16) -> Self {
        Self { body, status_code }
    }

    /// The `id` field of the body, if the provider returned one
    pub fn resource_id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }

    /// The `status` field of the body, if the provider returned one
    pub fn resource_status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }
}

/// Core trait for payment provider order APIs.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Create an order for the given cart.
    ///
    /// # Returns
    /// The provider's order-create response and status.
    async fn create_order(&self, cart: &Cart) -> PaymentResult<GatewayResult>;

    /// Capture payment for an order previously returned by `create_order`.
    ///
    /// Every call reaches the provider; nothing is deduplicated locally.
    async fn capture_order(&self, order_id: &str) -> PaymentResult<GatewayResult>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedOrderGateway = Arc<dyn OrderGateway>;
