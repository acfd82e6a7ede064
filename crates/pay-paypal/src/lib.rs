//! # pay-paypal
//!
//! PayPal Orders v2 gateway for paypal-checkout.
//!
//! The flow is two server-side calls per buyer checkout:
//!
//! 1. **create_order** - `POST /v2/checkout/orders` with a fixed-shape
//!    `CAPTURE` intent; the browser then asks the buyer to approve it.
//! 2. **capture_order** - `POST /v2/checkout/orders/{id}/capture` once the
//!    buyer approved.
//!
//! Both authenticate with a bearer token from the client-credentials
//! exchange (`/v1/oauth2/token`), cached by [`TokenProvider`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paypal::{PayPalConfig, PayPalOrderGateway};
//! use pay_core::{Cart, OrderGateway};
//!
//! // Create gateway from environment
//! let gateway = PayPalOrderGateway::from_config(PayPalConfig::from_env())?;
//!
//! let created = gateway.create_order(&Cart::default()).await?;
//! // created.status_code == 201, created.body["id"] == "5O190127TN364715T"
//!
//! let captured = gateway.capture_order("5O190127TN364715T").await?;
//! ```

pub mod config;
pub mod orders;
pub mod response;
pub mod token;

// Re-exports
pub use config::{PayPalConfig, SANDBOX_API_BASE};
pub use orders::PayPalOrderGateway;
pub use response::{normalize, normalize_body};
pub use token::{AccessToken, TokenProvider};
