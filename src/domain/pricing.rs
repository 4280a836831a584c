//! Pricing value types
//!
//! Amounts are stored in minor currency units (cents) to avoid floating-point
//! rounding in feed output. The currency of a price is the currency of the
//! pricing group it was calculated for, which is not necessarily the domain's
//! default currency.

use super::ids::{DomainId, PricingGroupId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a money value from minor units (e.g. cents)
    pub const fn from_minor(amount: i64) -> Self {
        Self(amount)
    }

    /// Zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in minor units
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Check if this is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Format the amount with two decimal places (e.g. "49.99")
    pub fn display_amount(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_amount())
    }
}

/// A price as a pair of amounts without and with VAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    /// Amount without VAT
    pub price_without_vat: Money,
    /// Amount including VAT
    pub price_with_vat: Money,
}

impl Price {
    /// Create a new price pair
    pub fn new(price_without_vat: Money, price_with_vat: Money) -> Self {
        Self {
            price_without_vat,
            price_with_vat,
        }
    }

    /// Price with both amounts zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// VAT portion of the price
    pub fn vat_amount(&self) -> Money {
        Money::from_minor(self.price_with_vat.minor_units() - self.price_without_vat.minor_units())
    }
}

/// Result of a product price calculation
///
/// `price_from` is set when the product is a main variant and the price is the
/// lowest of its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPrice {
    price: Price,
    price_from: bool,
}

impl ProductPrice {
    /// Create a new product price
    pub fn new(price: Price, price_from: bool) -> Self {
        Self { price, price_from }
    }

    /// Returns the calculated price
    pub fn price(&self) -> Price {
        self.price
    }

    /// Whether the price is a "from" price
    pub fn is_price_from(&self) -> bool {
        self.price_from
    }
}

/// ISO 4217 currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: String,
}

impl Currency {
    /// Creates a currency from its ISO code
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_feed::domain::pricing::Currency;
    ///
    /// let eur = Currency::new("eur").unwrap();
    /// assert_eq!(eur.code(), "EUR");
    /// assert!(Currency::new("EURO").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into().trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!(
                "Invalid currency code '{}'. Expected a three-letter ISO 4217 code",
                code
            ));
        }
        Ok(Self { code })
    }

    /// Returns the ISO code
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// A pricing tier that determines which price list applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingGroup {
    /// Pricing group identifier
    pub id: PricingGroupId,
    /// Display name (e.g. "Ordinary customer")
    pub name: String,
    /// Domain the pricing group belongs to
    pub domain_id: DomainId,
    /// Currency of the group's price list, the domain default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl PricingGroup {
    /// Create a new pricing group
    pub fn new(id: PricingGroupId, name: impl Into<String>, domain_id: DomainId) -> Self {
        Self {
            id,
            name: name.into(),
            domain_id,
            currency: None,
        }
    }

    /// Set the currency of the price list
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }
}
