//! # PayPal Orders v2
//!
//! Order creation and payment capture against `/v2/checkout/orders`.
//! This is the gateway the HTTP edge talks to.

use crate::config::PayPalConfig;
use crate::response::{normalize, transport_error};
use crate::token::{AccessToken, TokenProvider};
use async_trait::async_trait;
use pay_core::{
    Cart, FixedPrice, GatewayResult, OrderGateway, PaymentError, PaymentResult, Price,
    PricingPolicy,
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Url,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// PayPal order gateway
///
/// Each call obtains a credential from the shared [`TokenProvider`], issues a
/// single request, and relays the provider's JSON and status unchanged.
pub struct PayPalOrderGateway {
    config: PayPalConfig,
    client: Client,
    tokens: Arc<TokenProvider>,
    pricing: Arc<dyn PricingPolicy>,
}

impl PayPalOrderGateway {
    /// Create a gateway from its parts
    pub fn new(
        config: PayPalConfig,
        client: Client,
        tokens: Arc<TokenProvider>,
        pricing: Arc<dyn PricingPolicy>,
    ) -> Self {
        Self {
            config,
            client,
            tokens,
            pricing,
        }
    }

    /// Create a gateway with one shared HTTP client and fixed pricing
    pub fn from_config(config: PayPalConfig) -> PaymentResult<Self> {
        let client = config.http_client()?;
        let tokens = Arc::new(TokenProvider::new(config.clone(), client.clone()));
        Ok(Self::new(
            config,
            client,
            tokens,
            Arc::new(FixedPrice::default()),
        ))
    }

    fn build_order_request(&self, cart: &Cart) -> PaymentResult<CreateOrderRequest> {
        let price = self.pricing.price_for(cart)?;

        Ok(CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                amount: Money::from(price),
            }],
        })
    }

    fn orders_url(&self) -> String {
        format!("{}/v2/checkout/orders", self.config.api_base_url)
    }

    /// `{base}/v2/checkout/orders/{order_id}/capture`, with the id as one encoded segment
    fn capture_url(&self, order_id: &str) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.orders_url())
            .map_err(|e| PaymentError::Configuration(format!("Invalid API base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| PaymentError::Configuration("API base URL cannot be a base".to_string()))?
            .push(order_id)
            .push("capture");

        Ok(url)
    }

    /// A 401 on an order call means the token it carried went stale
    async fn evict_rejected_token(&self, token: &AccessToken, result: &GatewayResult) {
        if result.status_code == 401 {
            warn!("PayPal rejected the access token; clearing cache");
            self.tokens.invalidate(token).await;
        }
    }
}

#[async_trait]
impl OrderGateway for PayPalOrderGateway {
    #[instrument(skip(self, cart), fields(items = cart.item_count()))]
    async fn create_order(&self, cart: &Cart) -> PaymentResult<GatewayResult> {
        let token = self.tokens.access_token().await?;
        let payload = self.build_order_request(cart)?;

        debug!(
            "Creating PayPal order: intent={}, amount={} {}",
            payload.intent,
            payload.purchase_units[0].amount.value,
            payload.purchase_units[0].amount.currency_code
        );

        let response = self
            .client
            .post(self.orders_url())
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let result = normalize(response).await?;
        self.evict_rejected_token(&token, &result).await;

        info!(
            status = result.status_code,
            order_id = result.resource_id().unwrap_or("-"),
            order_status = result.resource_status().unwrap_or("-"),
            "PayPal create order responded"
        );

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn capture_order(&self, order_id: &str) -> PaymentResult<GatewayResult> {
        if order_id.trim().is_empty()
            || order_id.trim() != order_id
            || order_id == "."
            || order_id == ".."
        {
            return Err(PaymentError::InvalidRequest(format!(
                "invalid order id: {:?}",
                order_id
            )));
        }

        let url = self.capture_url(order_id)?;
        let token = self.tokens.access_token().await?;

        debug!("Capturing PayPal order: {}", order_id);

        let response = self
            .client
            .post(url)
            .bearer_auth(token.secret())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let result = normalize(response).await?;
        self.evict_rejected_token(&token, &result).await;

        info!(
            status = result.status_code,
            order_status = result.resource_status().unwrap_or("-"),
            "PayPal capture responded"
        );

        Ok(result)
    }

    fn provider_name(&self) -> &'static str {
        "paypal"
    }
}

// =============================================================================
// PayPal API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    intent: &'static str,
    purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Serialize)]
struct PurchaseUnit {
    amount: Money,
}

#[derive(Debug, Serialize)]
struct Money {
    currency_code: String,
    value: String,
}

impl From<Price> for Money {
    fn from(price: Price) -> Self {
        Self {
            currency_code: price.currency.as_str().to_string(),
            value: price.to_decimal_string(),
        }
    }
}
