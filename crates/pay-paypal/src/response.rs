//! # Response Normalizer
//!
//! Turns a raw PayPal HTTP response into a [`GatewayResult`].
//!
//! The provider's status is relayed as-is, 4xx/5xx included, as long as the
//! body is JSON. A body that is not JSON is the only failure, and it carries
//! the body text so the cause shows up in server logs.

use pay_core::{GatewayResult, PaymentError, PaymentResult};
use reqwest::Response;
use serde_json::Value;

/// Read and normalize a provider response
pub async fn normalize(response: Response) -> PaymentResult<GatewayResult> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(transport_error)?;
    normalize_body(status, &body)
}

/// Normalize an already-read response body
pub fn normalize_body(status: u16, body: &[u8]) -> PaymentResult<GatewayResult> {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => Ok(GatewayResult::new(json, status)),
        Err(_) => Err(PaymentError::MalformedResponse(
            String::from_utf8_lossy(body).into_owned(),
        )),
    }
}

/// Map a reqwest transport failure (connect, timeout, body read) to `Network`
pub(crate) fn transport_error(err: reqwest::Error) -> PaymentError {
    if err.is_timeout() {
        PaymentError::Network(format!("request timed out: {}", err))
    } else {
        PaymentError::Network(err.to_string())
    }
}
