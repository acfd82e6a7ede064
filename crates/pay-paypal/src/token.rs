//! # Access Tokens
//!
//! OAuth2 client-credentials exchange against `/v1/oauth2/token`.
//!
//! Tokens are cached until shortly before they expire. The cache lock is held
//! across a refresh, so concurrent callers wait on the single in-flight
//! request and then share its token. Failed refreshes are never cached.
//!
//! Nothing secret is logged here: not the client secret, not the Basic
//! header, not the bearer token.

use crate::config::PayPalConfig;
use crate::response::transport_error;
use chrono::{DateTime, Duration, Utc};
use pay_core::{PaymentError, PaymentResult};
use reqwest::{header::ACCEPT, Client};
use serde::Deserialize;
use std::fmt;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

/// A bearer credential for the Orders API
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Create a token that expires `expires_in` seconds from now.
    /// Without a representable lifetime the token is treated as single-use.
    pub fn new(value: impl Into<String>, expires_in: Option<i64>) -> Self {
        let expires_at = expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// The raw bearer value; only for building the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Still usable for at least `margin`
    pub fn is_fresh(&self, margin: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now()
                .checked_add_signed(margin)
                .is_some_and(|deadline| deadline < expires_at),
            None => false,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Obtains access tokens, caching them per [`PayPalConfig::token_cache`]
pub struct TokenProvider {
    config: PayPalConfig,
    client: Client,
    cache: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(config: PayPalConfig, client: Client) -> Self {
        Self {
            config,
            client,
            cache: Mutex::new(None),
        }
    }

    /// Return a usable access token, fetching a new one when needed.
    ///
    /// Fails with `Configuration` before any network call if credentials
    /// are missing.
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> PaymentResult<AccessToken> {
        let (client_id, client_secret) = self.config.credentials()?;

        if !self.config.token_cache {
            return self.fetch(client_id, client_secret).await;
        }

        let margin = Duration::from_std(self.config.token_refresh_margin)
            .unwrap_or_else(|_| Duration::zero());

        let mut cached = self.cache.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(margin)) {
            debug!("Reusing cached access token");
            return Ok(token.clone());
        }

        let token = self.fetch(client_id, client_secret).await?;
        *cached = token.expires_at().map(|_| token.clone());
        Ok(token)
    }

    /// Drop the cached token if it is the one the provider rejected.
    /// A newer token cached by another caller is left alone.
    pub async fn invalidate(&self, rejected: &AccessToken) {
        let mut cached = self.cache.lock().await;
        if cached.as_ref().is_some_and(|t| t.value == rejected.value) {
            *cached = None;
            debug!("Cached access token invalidated");
        }
    }

    async fn fetch(&self, client_id: &str, client_secret: &str) -> PaymentResult<AccessToken> {
        let url = format!("{}/v1/oauth2/token", self.config.api_base_url);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                error!("Access token request failed: {}", e);
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Failed to generate access token"
            );
            return Err(PaymentError::ProviderHttp {
                provider: "paypal".to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let parsed: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            PaymentError::MalformedResponse(format!("Failed to parse token response: {}", e))
        })?;

        info!(
            token_type = parsed.token_type.as_deref().unwrap_or("unknown"),
            expires_in = ?parsed.expires_in,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Access token acquired"
        );

        Ok(AccessToken::new(parsed.access_token, parsed.expires_in))
    }
}

// =============================================================================
// PayPal API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}
