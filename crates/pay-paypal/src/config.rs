//! # PayPal Configuration
//!
//! Configuration management for the PayPal integration.
//! Secrets are loaded from environment variables once at startup and passed
//! to each component explicitly.
//!
//! Missing credentials are not a startup failure: the server still comes up
//! and each gateway call fails with a configuration error instead.

use pay_core::{PaymentError, PaymentResult};
use reqwest::Client;
use std::env;
use std::fmt;
use std::time::Duration;

/// Sandbox REST endpoint
pub const SANDBOX_API_BASE: &str = "https://api.sandbox.paypal.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REFRESH_MARGIN_SECS: u64 = 60;

/// PayPal API configuration
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST app client id
    pub client_id: String,

    /// REST app client secret
    pub client_secret: String,

    /// API base URL (sandbox, live, or a mock server in tests)
    pub api_base_url: String,

    /// Upper bound on every outbound call
    pub timeout: Duration,

    /// Reuse access tokens until they are close to expiry
    pub token_cache: bool,

    /// How long before expiry a cached token stops being reused
    pub token_refresh_margin: Duration,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognised env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    /// - `PAYPAL_API_BASE` (default: sandbox)
    /// - `PAYPAL_HTTP_TIMEOUT_SECS` (default: 30)
    /// - `PAYPAL_TOKEN_CACHE` (default: true)
    /// - `PAYPAL_TOKEN_REFRESH_MARGIN_SECS` (default: 60)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = lookup("PAYPAL_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let token_cache = lookup("PAYPAL_TOKEN_CACHE")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        let refresh_margin = lookup("PAYPAL_TOKEN_REFRESH_MARGIN_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REFRESH_MARGIN_SECS);

        let api_base_url = lookup("PAYPAL_API_BASE")
            .filter(|url| !url.trim_end_matches('/').is_empty())
            .unwrap_or_else(|| SANDBOX_API_BASE.to_string());

        Self::new(
            lookup("PAYPAL_CLIENT_ID").unwrap_or_default(),
            lookup("PAYPAL_CLIENT_SECRET").unwrap_or_default(),
        )
        .with_api_base_url(api_base_url)
        .with_timeout(Duration::from_secs(timeout))
        .with_token_cache(token_cache)
        .with_token_refresh_margin(Duration::from_secs(refresh_margin))
    }

    /// Create config with explicit values (for testing)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base_url: SANDBOX_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_cache: true,
            token_refresh_margin: Duration::from_secs(DEFAULT_REFRESH_MARGIN_SECS),
        }
    }

    /// Both credentials present and non-blank
    pub fn has_credentials(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }

    /// Client id and secret, or a configuration error if either is missing
    pub fn credentials(&self) -> PaymentResult<(&str, &str)> {
        if !self.has_credentials() {
            return Err(PaymentError::Configuration(
                "missing API credentials".to_string(),
            ));
        }
        Ok((&self.client_id, &self.client_secret))
    }

    /// Build the HTTP client shared by the token provider and the gateway
    pub fn http_client(&self) -> PaymentResult<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| PaymentError::Internal(format!("Failed to create HTTP client: {}", e)))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: enable or disable token caching
    pub fn with_token_cache(mut self, enabled: bool) -> Self {
        self.token_cache = enabled;
        self
    }

    /// Builder: set the refresh margin for cached tokens
    pub fn with_token_refresh_margin(mut self, margin: Duration) -> Self {
        self.token_refresh_margin = margin;
        self
    }
}

impl fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("token_cache", &self.token_cache)
            .field("token_refresh_margin", &self.token_refresh_margin)
            .finish()
    }
}
