//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{items::LineItem, prices::Price};

/// Errors that can occur while calculating a cart total.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total does not fit in minor units.
    #[error("line total for {0} overflows")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `unit_price * quantity` for a single line.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
pub fn line_total(item: &LineItem) -> Result<Price, TotalPriceError> {
    let unit = item.unit_price();

    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(item.quantity()))
        .ok_or_else(|| TotalPriceError::Overflow(item.id().to_string()))?;

    Ok(Money::from_minor(minor, unit.currency()))
}

/// Calculates the total of a list of line items in the given currency.
///
/// An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: an item is priced in a different currency.
pub fn total_price(
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<Price, TotalPriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(line_total(item)?)?)
        })
}
