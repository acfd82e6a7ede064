//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the order gateway and server configuration, both built once at
//! startup and read-only afterwards.

use anyhow::Context;
use pay_core::BoxedOrderGateway;
use pay_paypal::{PayPalConfig, PayPalOrderGateway};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the checkout page and its assets
    pub client_dir: PathBuf,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(8888),
            client_dir: lookup("CLIENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("client")),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Path of the page served at `/`
    pub fn checkout_page(&self) -> PathBuf {
        self.client_dir.join("checkout.html")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order gateway
    pub gateway: BoxedOrderGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the PayPal gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let paypal = PayPalConfig::from_env();

        if !paypal.has_credentials() {
            warn!("PAYPAL_CLIENT_ID / PAYPAL_CLIENT_SECRET not set; order calls will fail");
        }
        info!(
            "PayPal API: {} (token cache: {}, timeout: {:?})",
            paypal.api_base_url, paypal.token_cache, paypal.timeout
        );

        let gateway = PayPalOrderGateway::from_config(paypal)
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayPal: {}", e))?;

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create with an explicit gateway (tests, alternative providers)
    pub fn with_gateway(config: AppConfig, gateway: BoxedOrderGateway) -> Self {
        Self { gateway, config }
    }
}
