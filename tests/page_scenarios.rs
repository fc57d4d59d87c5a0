//! End-to-end scenarios for a storefront page session.

use std::time::Duration;

use rusty_money::{Money, iso::NGN};
use testresult::TestResult;

use storefront_cart::{
    cart::QuantityChange,
    presenter::{Panel, PresenterEvent, RecordingPresenter},
    storefront::{CheckoutOutcome, Storefront},
    toasts::ToastPhase,
};

fn page() -> Storefront<RecordingPresenter> {
    Storefront::new(NGN, RecordingPresenter::new())
}

#[test]
fn adding_twice_doubles_quantity_and_total() -> TestResult {
    let mut page = page();

    page.add_to_cart("a", "Soap", Money::from_minor(500, NGN));
    page.add_to_cart("a", "Soap", Money::from_minor(500, NGN));

    assert_eq!(page.cart().len(), 1);
    assert_eq!(page.cart().get("a").map(|item| item.quantity()), Some(2));
    assert_eq!(page.total()?, Money::from_minor(1_000, NGN));
    assert_eq!(page.item_count(), 2);

    let presenter = page.presenter();

    assert_eq!(presenter.render_count(), 2);
    assert_eq!(presenter.last_item_count(), Some(2));
    assert_eq!(
        presenter.toasts(),
        vec!["Item added to cart!", "Item added to cart!"]
    );

    Ok(())
}

#[test]
fn removing_everything_blocks_checkout() -> TestResult {
    let mut page = page();

    page.add_to_cart("a", "Soap", Money::from_minor(500, NGN));
    page.add_to_cart("a", "Soap", Money::from_minor(500, NGN));

    assert_eq!(page.change_quantity("a", -2), QuantityChange::Removed);
    assert!(page.cart().is_empty());
    assert_eq!(page.total()?, Money::from_minor(0, NGN));

    assert_eq!(page.checkout(), CheckoutOutcome::Empty);
    assert_eq!(
        page.presenter().toasts().last().map(String::as_str),
        Some("Your cart is empty!")
    );

    page.advance(Duration::from_secs(5));

    assert!(page.presenter().payments().is_empty());

    Ok(())
}

#[test]
fn wishlist_keeps_one_entry_per_product() {
    let mut page = page();

    assert!(page.add_to_wishlist("x"));
    assert!(!page.add_to_wishlist("x"));

    assert_eq!(page.wishlist().len(), 1);
    assert_eq!(
        page.presenter().toasts(),
        vec!["Added to wishlist!", "Already in wishlist!"]
    );
}

#[test]
fn checkout_hands_off_once_after_one_second() -> TestResult {
    let mut page = page();

    page.add_to_cart("soap", "Soap", Money::from_minor(250_000, NGN));
    page.add_to_cart("zobo", "Zobo", Money::from_minor(180_000, NGN));

    let CheckoutOutcome::Redirecting { summary, .. } = page.checkout() else {
        panic!("checkout should proceed with a non-empty cart");
    };

    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total, Money::from_minor(430_000, NGN));

    page.advance(Duration::from_millis(999));
    assert!(page.presenter().payments().is_empty());

    page.advance(Duration::from_millis(1));
    assert_eq!(page.presenter().payments(), vec![summary]);

    page.advance(Duration::from_secs(10));
    assert_eq!(page.presenter().payments().len(), 1);

    Ok(())
}

#[test]
fn toasts_enter_leave_and_detach_on_schedule() {
    let mut page = page();

    page.browse_category("Skincare");

    assert_eq!(page.toasts().messages(), vec!["Browsing Skincare category..."]);

    page.advance(Duration::from_millis(100));
    page.advance(Duration::from_millis(2_900));

    assert_eq!(page.toasts().len(), 1);

    page.advance(Duration::from_millis(300));

    assert!(page.toasts().is_empty());

    let phases: Vec<ToastPhase> = page
        .presenter()
        .events()
        .iter()
        .filter_map(|event| match event {
            PresenterEvent::ToastPhase(_, phase) => Some(*phase),
            _ => None,
        })
        .collect();

    assert_eq!(phases, vec![ToastPhase::Visible, ToastPhase::Leaving]);
    assert!(
        page.presenter()
            .events()
            .iter()
            .any(|event| matches!(event, PresenterEvent::DismissToast(_)))
    );
}

#[test]
fn newsletter_opens_after_ten_seconds_even_for_early_subscribers() -> TestResult {
    let mut idle = page();

    idle.advance(Duration::from_millis(9_999));
    assert!(!idle.newsletter().is_open());

    idle.advance(Duration::from_millis(1));
    assert!(idle.newsletter().is_open());
    assert!(
        idle.presenter()
            .events()
            .contains(&PresenterEvent::Panel(Panel::Newsletter, true))
    );

    let mut eager = page();

    eager.subscribe_newsletter("ada@example.com")?;
    eager.advance(Duration::from_secs(30));

    assert!(eager.newsletter().is_open());
    assert_eq!(eager.newsletter().subscribers().len(), 1);
    assert!(
        eager
            .presenter()
            .toasts()
            .contains(&"Thank you for subscribing!".to_string())
    );

    Ok(())
}

#[test]
fn several_toasts_can_be_live_together() {
    let mut page = page();

    page.add_to_cart("a", "Soap", Money::from_minor(500, NGN));
    page.advance(Duration::from_millis(1_000));
    page.add_to_wishlist("a");

    assert_eq!(
        page.toasts().messages(),
        vec!["Item added to cart!", "Added to wishlist!"]
    );

    page.advance(Duration::from_millis(2_300));

    assert_eq!(page.toasts().messages(), vec!["Added to wishlist!"]);
}
