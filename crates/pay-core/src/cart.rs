//! # Cart and Pricing
//!
//! The cart is whatever the checkout page sends; we keep it as raw JSON.
//! Turning a cart into a charge amount is the job of a [`PricingPolicy`],
//! kept separate so the amount rule is explicit and swappable.

use crate::error::PaymentResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Charge currency (ISO 4217). Checkout is USD-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
}

impl Currency {
    /// Returns the ISO 4217 currency code as the provider expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Number of minor-unit digits
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD => 2,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from an amount already in the smallest unit
    pub fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Decimal string in the currency's precision, e.g. `10000 USD` -> `"100.00"`
    pub fn to_decimal_string(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.currency)
    }
}

/// Client-supplied cart contents, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(pub Value);

impl Cart {
    /// Number of line items if the cart is a JSON array, zero otherwise
    pub fn item_count(&self) -> usize {
        self.0.as_array().map(Vec::len).unwrap_or(0)
    }
}

/// Decides how much to charge for a cart.
pub trait PricingPolicy: Send + Sync {
    fn price_for(&self, cart: &Cart) -> PaymentResult<Price>;
}

/// Charges the same amount regardless of cart contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPrice {
    price: Price,
}

impl FixedPrice {
    pub fn new(price: Price) -> Self {
        Self { price }
    }
}

impl Default for FixedPrice {
    /// USD 100.00
    fn default() -> Self {
        Self::new(Price::from_minor(10_000, Currency::USD))
    }
}

impl PricingPolicy for FixedPrice {
    fn price_for(&self, _cart: &Cart) -> PaymentResult<Price> {
        Ok(self.price)
    }
}
