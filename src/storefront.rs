//! Storefront page session
//!
//! [`Storefront`] owns every piece of page state (cart, wishlist, toasts,
//! newsletter popup, panel toggles) together with the scheduler that drives
//! their timers. UI events mutate state synchronously and then notify the
//! [`Presenter`]; timed effects only run when the caller advances virtual time.

use std::time::Duration;

use rusty_money::iso::Currency;
use tracing::{debug, error, info, warn};

use crate::{
    cart::{AddOutcome, Cart, QuantityChange},
    catalog::Product,
    config::Timings,
    items::ItemId,
    newsletter::{Email, Newsletter, NewsletterError},
    presenter::{CheckoutSummary, Panel, Presenter},
    prices::Price,
    pricing::TotalPriceError,
    scheduler::{Scheduler, TaskKey},
    toasts::{Notice, ToastKey, ToastPhase, Toasts},
    wishlist::Wishlist,
};

/// Input from the page's controls.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// "Add to cart" on a product card.
    AddToCart {
        /// Product id.
        id: ItemId,
        /// Display name.
        name: String,
        /// Unit price.
        price: Price,
    },

    /// A `+` / `-` quantity button in the cart.
    ChangeQuantity {
        /// Line id.
        id: ItemId,
        /// Signed change, usually `1` or `-1`.
        delta: i64,
    },

    /// The checkout button.
    Checkout,

    /// The heart icon on a product card.
    AddToWishlist {
        /// Product id.
        id: ItemId,
    },

    /// The cart button in the header.
    OpenCart,

    /// The close button on the cart overlay.
    CloseCart,

    /// A click anywhere outside the cart overlay and cart button.
    ClickOutsideCart,

    /// The window scrolled.
    Scroll {
        /// Vertical scroll offset in pixels.
        offset: u32,
    },

    /// The hamburger button.
    ToggleMobileMenu,

    /// A category card.
    BrowseCategory {
        /// Category name shown on the card.
        category: String,
    },

    /// The newsletter form was submitted.
    SubscribeNewsletter {
        /// Address typed into the form.
        email: String,
    },

    /// The close button on the newsletter popup.
    CloseNewsletter,

    /// A click on the popup backdrop.
    ClickNewsletterBackdrop,
}

impl UiEvent {
    /// The "add to cart" event for a catalog product.
    pub fn add_to_cart(product: &Product) -> Self {
        Self::AddToCart {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Result of clicking checkout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing to buy; the "cart is empty" toast was shown.
    Empty,

    /// The checkout notice was shown and the payment hand-off is scheduled.
    Redirecting {
        /// What the payment step will receive.
        summary: CheckoutSummary,
        /// Timer for the hand-off.
        handoff: TaskKey,
    },
}

#[derive(Clone, Debug, PartialEq)]
enum PageTask {
    ToastEnter(ToastKey),
    ToastLeave(ToastKey),
    ToastRemove(ToastKey),
    ShowNewsletter,
    PaymentHandoff(CheckoutSummary),
}

/// All state for a single page lifetime.
#[derive(Debug)]
pub struct Storefront<P: Presenter> {
    cart: Cart,
    wishlist: Wishlist,
    toasts: Toasts,
    newsletter: Newsletter,
    scheduler: Scheduler<PageTask>,
    timings: Timings,
    presenter: P,
    cart_open: bool,
    menu_open: bool,
    header_scrolled: bool,
}

impl<P: Presenter> Storefront<P> {
    /// Load a page priced in `currency` with the default timings.
    pub fn new(currency: &'static Currency, presenter: P) -> Self {
        Self::with_timings(currency, Timings::default(), presenter)
    }

    /// Load a page with custom timings. The newsletter popup is scheduled immediately.
    pub fn with_timings(currency: &'static Currency, timings: Timings, presenter: P) -> Self {
        let mut scheduler = Scheduler::new();
        let mut newsletter = Newsletter::new();

        let auto_show = scheduler.schedule(timings.newsletter_delay(), PageTask::ShowNewsletter);
        newsletter.set_auto_show(auto_show);

        Self {
            cart: Cart::new(currency),
            wishlist: Wishlist::new(),
            toasts: Toasts::new(),
            newsletter,
            scheduler,
            timings,
            presenter,
            cart_open: false,
            menu_open: false,
            header_scrolled: false,
        }
    }

    /// Add one unit of a product, redraw the cart and confirm with a toast.
    pub fn add_to_cart(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Price,
    ) -> AddOutcome {
        let outcome = self.cart.add_item(id, name, price);

        self.refresh_cart();
        self.notify(Notice::ItemAdded);

        outcome
    }

    /// Change a line's quantity and redraw the cart. Unknown ids are ignored.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let change = self.cart.change_quantity(id, delta);

        if change.changed() {
            self.refresh_cart();
        }

        change
    }

    /// Units in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Cart total, recomputed from the current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line overflows or is priced in another currency.
    pub fn total(&self) -> Result<Price, TotalPriceError> {
        self.cart.total()
    }

    /// Start checkout. An empty cart only shows a notice; otherwise the
    /// payment hand-off fires after the configured delay.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.cart.is_empty() {
            self.notify(Notice::CartEmpty);

            return CheckoutOutcome::Empty;
        }

        let total = match self.cart.total() {
            Ok(total) => total,
            Err(err) => {
                error!(%err, "cannot total cart for checkout");

                return CheckoutOutcome::Empty;
            }
        };

        let summary = CheckoutSummary {
            item_count: self.cart.item_count(),
            total,
        };

        self.notify(Notice::RedirectingToCheckout);

        let handoff = self.scheduler.schedule(
            self.timings.checkout_handoff(),
            PageTask::PaymentHandoff(summary),
        );

        info!(items = summary.item_count, total = %summary.total, "checkout started");

        CheckoutOutcome::Redirecting { summary, handoff }
    }

    /// Save a product for later. Returns `false` if it was already saved.
    pub fn add_to_wishlist(&mut self, id: impl Into<ItemId>) -> bool {
        let added = self.wishlist.add(id);

        self.notify(if added {
            Notice::AddedToWishlist
        } else {
            Notice::AlreadyInWishlist
        });

        added
    }

    /// Open the cart overlay.
    pub fn open_cart(&mut self) {
        self.set_cart_open(true);
    }

    /// Close the cart overlay.
    pub fn close_cart(&mut self) {
        self.set_cart_open(false);
    }

    /// Toggle the mobile navigation menu.
    pub fn toggle_mobile_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.presenter.panel_toggled(Panel::MobileMenu, self.menu_open);
    }

    /// Record the window scroll offset.
    pub fn scroll_to(&mut self, offset: u32) {
        let scrolled = offset > self.timings.header_scroll_threshold_px;

        if scrolled != self.header_scrolled {
            self.header_scrolled = scrolled;
            self.presenter.header_scrolled(scrolled);
        }
    }

    /// A category card was clicked.
    pub fn browse_category(&mut self, category: impl Into<String>) {
        self.notify(Notice::BrowsingCategory(category.into()));
    }

    /// Subscribe an address, thank the visitor and close the popup.
    ///
    /// The auto-show timer is left alone, so an early subscriber still sees
    /// the popup once the delay has passed.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::InvalidEmail`] if the address is malformed; nothing changes.
    pub fn subscribe_newsletter(&mut self, email: &str) -> Result<(), NewsletterError> {
        let email: Email = email.parse()?;

        debug!(%email, "newsletter subscription");

        self.newsletter.subscribe(email);

        self.notify(Notice::Subscribed);
        self.close_newsletter();

        Ok(())
    }

    /// Hide the newsletter popup.
    pub fn close_newsletter(&mut self) {
        if self.newsletter.close() {
            self.presenter.panel_toggled(Panel::Newsletter, false);
        }
    }

    /// Dispatch a UI event.
    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::AddToCart { id, name, price } => {
                self.add_to_cart(id, name, price);
            }
            UiEvent::ChangeQuantity { id, delta } => {
                self.change_quantity(id.as_str(), delta);
            }
            UiEvent::Checkout => {
                self.checkout();
            }
            UiEvent::AddToWishlist { id } => {
                self.add_to_wishlist(id);
            }
            UiEvent::OpenCart => self.open_cart(),
            UiEvent::CloseCart | UiEvent::ClickOutsideCart => self.close_cart(),
            UiEvent::Scroll { offset } => self.scroll_to(offset),
            UiEvent::ToggleMobileMenu => self.toggle_mobile_menu(),
            UiEvent::BrowseCategory { category } => self.browse_category(category),
            UiEvent::SubscribeNewsletter { email } => {
                if let Err(err) = self.subscribe_newsletter(&email) {
                    warn!(%err, "newsletter form rejected");
                }
            }
            UiEvent::CloseNewsletter | UiEvent::ClickNewsletterBackdrop => self.close_newsletter(),
        }
    }

    /// Let `by` of virtual time pass, running every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        // timers run against the taken scheduler and may schedule follow-ups on it
        let mut scheduler = std::mem::take(&mut self.scheduler);

        scheduler.advance_with(by, |scheduler, task| self.run_task(scheduler, task));

        self.scheduler = scheduler;
    }

    /// Virtual time since page load.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The wishlist.
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Live toasts.
    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    /// Newsletter popup state.
    pub fn newsletter(&self) -> &Newsletter {
        &self.newsletter
    }

    /// Whether the cart overlay is open.
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Whether the mobile menu is open.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Whether the header is in its scrolled style.
    pub fn is_header_scrolled(&self) -> bool {
        self.header_scrolled
    }

    /// Timings in use.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Number of timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Unload the page, keeping only the presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn refresh_cart(&mut self) {
        match self.cart.total() {
            Ok(total) => self.presenter.render_cart(self.cart.items(), total),
            Err(err) => error!(%err, "skipping cart render"),
        }

        self.presenter.render_item_count(self.cart.item_count());
    }

    fn notify(&mut self, notice: Notice) {
        let key = self.toasts.show(notice.clone(), self.scheduler.now());

        self.presenter.show_toast(key, &notice);

        self.scheduler
            .schedule(self.timings.toast_enter(), PageTask::ToastEnter(key));
        self.scheduler
            .schedule(self.timings.toast_visible(), PageTask::ToastLeave(key));
    }

    fn set_cart_open(&mut self, open: bool) {
        if self.cart_open != open {
            self.cart_open = open;
            self.presenter.panel_toggled(Panel::CartOverlay, open);
        }
    }

    fn set_toast_phase(&mut self, key: ToastKey, phase: ToastPhase) -> bool {
        let live = self.toasts.set_phase(key, phase);

        if live {
            self.presenter.toast_phase_changed(key, phase);
        }

        live
    }

    fn run_task(&mut self, scheduler: &mut Scheduler<PageTask>, task: PageTask) {
        match task {
            PageTask::ToastEnter(key) => {
                self.set_toast_phase(key, ToastPhase::Visible);
            }
            PageTask::ToastLeave(key) => {
                if self.set_toast_phase(key, ToastPhase::Leaving) {
                    scheduler.schedule(self.timings.toast_exit(), PageTask::ToastRemove(key));
                }
            }
            PageTask::ToastRemove(key) => {
                if self.toasts.remove(key).is_some() {
                    self.presenter.dismiss_toast(key);
                }
            }
            PageTask::ShowNewsletter => {
                self.newsletter.take_auto_show();

                if self.newsletter.open() {
                    self.presenter.panel_toggled(Panel::Newsletter, true);
                }
            }
            PageTask::PaymentHandoff(summary) => {
                info!(items = summary.item_count, total = %summary.total, "handing off to payment");

                self.presenter.begin_payment(&summary);
            }
        }
    }
}
