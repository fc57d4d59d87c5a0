//! Property tests for cart arithmetic over arbitrary action sequences.

use proptest::prelude::*;
use rusty_money::{Money, iso::NGN};

use storefront_cart::cart::{Cart, QuantityChange};

const IDS: [&str; 4] = ["soap", "zobo", "kunu", "scarf"];

#[derive(Clone, Debug)]
enum Action {
    Add { id: usize, price: i64 },
    Change { id: usize, delta: i64 },
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..IDS.len(), 0i64..100_000).prop_map(|(id, price)| Action::Add { id, price }),
        (0..IDS.len(), -5i64..5).prop_map(|(id, delta)| Action::Change { id, delta }),
    ]
}

fn id(index: usize) -> &'static str {
    IDS.get(index).copied().unwrap_or("soap")
}

proptest! {
    /// Adding the same id N times gives one line with quantity N.
    #[test]
    fn repeated_adds_accumulate(count in 1u32..200) {
        let mut cart = Cart::new(NGN);

        for _ in 0..count {
            cart.add_item("soap", "Soap", Money::from_minor(500, NGN));
        }

        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.get("soap").map(|item| item.quantity()), Some(count));
        prop_assert_eq!(cart.item_count(), u64::from(count));
    }

    /// Changing by the negated quantity always removes the line.
    #[test]
    fn negated_quantity_removes(count in 1u32..50, extra in 0i64..10) {
        let mut cart = Cart::new(NGN);

        for _ in 0..count {
            cart.add_item("soap", "Soap", Money::from_minor(500, NGN));
        }

        let change = cart.change_quantity("soap", -i64::from(count) - extra);

        prop_assert_eq!(change, QuantityChange::Removed);
        prop_assert!(cart.is_empty());
    }

    /// The total always equals the sum of the current lines, every quantity
    /// stays positive and ids stay unique.
    #[test]
    fn total_matches_lines(actions in prop::collection::vec(action(), 0..64)) {
        let mut cart = Cart::new(NGN);

        for action in actions {
            match action {
                Action::Add { id: index, price } => {
                    let before = cart.len();
                    let present = cart.get(id(index)).is_some();

                    cart.add_item(id(index), id(index), Money::from_minor(price, NGN));

                    prop_assert_eq!(cart.len(), if present { before } else { before + 1 });
                }
                Action::Change { id: index, delta } => {
                    cart.change_quantity(id(index), delta);
                }
            }

            let expected: i64 = cart
                .iter()
                .map(|item| item.unit_price().to_minor_units() * i64::from(item.quantity()))
                .sum();

            prop_assert_eq!(cart.total().ok(), Some(Money::from_minor(expected, NGN)));
            prop_assert!(cart.iter().all(|item| item.quantity() >= 1));

            let mut ids: Vec<&str> = cart.iter().map(|item| item.id().as_str()).collect();
            ids.sort_unstable();
            ids.dedup();

            prop_assert_eq!(ids.len(), cart.len());
        }
    }
}
