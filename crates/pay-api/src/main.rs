//! # paypal-checkout
//!
//! Server-side half of a PayPal checkout page.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//!
//! # Run the server (serves ./client on port 8888)
//! paypal-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Client directory: {}", state.config.client_dir.display());
    info!("Payment provider: {}", state.gateway.provider_name());

    let app = routes::create_router(state);

    info!("Server listening at http://{}/", addr);

    if !is_prod {
        info!("Create order: POST http://{}/api/orders", addr);
        info!("Capture order: POST http://{}/api/orders/{{order_id}}/capture", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  PayPal Checkout
  ━━━━━━━━━━━━━━━━━━━━━━━
  Orders v2 proxy
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
