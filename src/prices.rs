//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, NGN, USD},
};
use thiserror::Error;

/// A price in minor units of an ISO currency.
pub type Price = Money<'static, Currency>;

/// Errors raised while parsing a price string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The string was not `AMOUNT CURRENCY`.
    #[error("Expected format 'AMOUNT CURRENCY', got: {0}")]
    InvalidFormat(String),

    /// The amount could not be parsed as a decimal.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Shop prices are never negative.
    #[error("Negative price: {0}")]
    Negative(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes the shop does not trade in.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code {
        "NGN" => Ok(NGN),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g. `"4500 NGN"` or `"2.99 GBP"`).
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if the
/// amount is not a non-negative decimal, or if the currency is not recognised.
pub fn parse_price(s: &str) -> Result<Price, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidFormat(s.to_string()));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(s.to_string()));
    }

    let currency = currency_from_code(code)?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::InvalidAmount(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}
