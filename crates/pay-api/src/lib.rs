//! # pay-api
//!
//! HTTP edge for paypal-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The two order endpoints used by the checkout page
//! - Static serving of the checkout page and its assets
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Checkout page |
//! | GET | `/health` | Health check |
//! | POST | `/api/orders` | Create order |
//! | POST | `/api/orders/{order_id}/capture` | Capture order |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
