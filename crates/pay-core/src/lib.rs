//! # pay-core
//!
//! Core types and traits for the paypal-checkout order proxy.
//!
//! This crate provides:
//! - `OrderGateway` trait for implementing payment providers
//! - `GatewayResult`, the relayed provider response
//! - `Cart`, `Price` and `PricingPolicy` for deciding the charge amount
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Cart, OrderGateway};
//!
//! let created = gateway.create_order(&Cart(cart_json)).await?;
//! let order_id = created.resource_id().unwrap_or_default();
//!
//! // ... buyer approves the order in the browser ...
//!
//! let captured = gateway.capture_order(order_id).await?;
//! ```

pub mod cart;
pub mod error;
pub mod gateway;

// Re-exports for convenience
pub use cart::{Cart, Currency, FixedPrice, Price, PricingPolicy};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedOrderGateway, GatewayResult, OrderGateway};
