//! Cart

use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    items::{ItemId, LineItem},
    prices::Price,
    pricing::{TotalPriceError, total_price},
};

/// Result of adding a product to the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with a quantity of one.
    Appended,

    /// An existing line gained one unit.
    Incremented {
        /// Quantity after the increment.
        quantity: u32,
    },
}

/// Result of changing the quantity of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line has the given id; nothing changed.
    Missing,

    /// The line is still in the cart with a new quantity.
    Updated {
        /// Quantity after the change.
        quantity: u32,
    },

    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

impl QuantityChange {
    /// Whether the cart was modified.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Ordered collection of line items, at most one per id.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line keeps the name and price it was created with.
    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Price,
    ) -> AddOutcome {
        let id = id.into();

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == &id) {
            let quantity = item.increment();

            debug!(%id, quantity, "incremented cart line");

            return AddOutcome::Incremented { quantity };
        }

        debug!(%id, price = %unit_price, "appended cart line");

        self.items.push(LineItem::new(id, name, unit_price));

        AddOutcome::Appended
    }

    /// Add `delta` units to a line, removing it when the quantity drops to zero or below.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let Some(position) = self.position(id) else {
            debug!(id, delta, "quantity change for missing line ignored");

            return QuantityChange::Missing;
        };

        let next = self
            .items
            .get_mut(position)
            .and_then(|item| item.apply_delta(delta));

        if let Some(quantity) = next {
            debug!(id, quantity, "changed cart line quantity");

            QuantityChange::Updated { quantity }
        } else {
            self.items.remove(position);

            debug!(id, "removed cart line");

            QuantityChange::Removed
        }
    }

    /// Sum of all quantities, as shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Sum of `unit_price * quantity` over the current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line overflows or is priced in another currency.
    pub fn total(&self) -> Result<Price, TotalPriceError> {
        total_price(&self.items, self.currency)
    }

    /// Get a line by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id().as_str() == id)
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id().as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::NGN};
    use testresult::TestResult;

    use super::*;

    fn naira(minor: i64) -> Price {
        Money::from_minor(minor, NGN)
    }

    #[test]
    fn new_cart_is_empty() -> TestResult {
        let cart = Cart::new(NGN);

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total()?, naira(0));
        assert_eq!(cart.currency(), NGN);

        Ok(())
    }

    #[test]
    fn adding_same_id_twice_increments() -> TestResult {
        let mut cart = Cart::new(NGN);

        assert_eq!(cart.add_item("a", "Soap", naira(500)), AddOutcome::Appended);
        assert_eq!(
            cart.add_item("a", "Soap", naira(500)),
            AddOutcome::Incremented { quantity: 2 }
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a").map(LineItem::quantity), Some(2));
        assert_eq!(cart.total()?, naira(1_000));

        Ok(())
    }

    #[test]
    fn existing_line_keeps_original_name_and_price() {
        let mut cart = Cart::new(NGN);

        cart.add_item("a", "Soap", naira(500));
        cart.add_item("a", "Renamed", naira(900));

        let item = cart.get("a");

        assert_eq!(item.map(LineItem::name), Some("Soap"));
        assert_eq!(item.map(LineItem::unit_price), Some(&naira(500)));
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new(NGN);

        cart.add_item("b", "Body Butter", naira(3_000));
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("b", "Body Butter", naira(3_000));

        let ids: Vec<&str> = cart.iter().map(|item| item.id().as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn change_quantity_updates_line() {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));

        assert_eq!(
            cart.change_quantity("a", 2),
            QuantityChange::Updated { quantity: 3 }
        );
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("a", "Soap", naira(500));

        assert_eq!(cart.change_quantity("a", -2), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("b", "Candle", naira(1_500));

        assert_eq!(cart.change_quantity("a", -5), QuantityChange::Removed);
        assert_eq!(cart.len(), 1);
        assert!(cart.get("a").is_none());
    }

    #[test]
    fn change_quantity_missing_is_noop() {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));

        let change = cart.change_quantity("zzz", 1);

        assert_eq!(change, QuantityChange::Missing);
        assert!(!change.changed());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("b", "Candle", naira(1_500));

        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn total_is_recomputed_after_each_change() -> TestResult {
        let mut cart = Cart::new(NGN);
        cart.add_item("a", "Soap", naira(500));
        cart.add_item("b", "Candle", naira(1_500));

        assert_eq!(cart.total()?, naira(2_000));

        cart.change_quantity("b", 1);

        assert_eq!(cart.total()?, naira(3_500));

        cart.change_quantity("a", -1);

        assert_eq!(cart.total()?, naira(3_000));

        Ok(())
    }
}
