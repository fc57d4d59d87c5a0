//! Presenter
//!
//! The page session never touches a view directly. After every state
//! transition it calls into a [`Presenter`], which owns rendering: a DOM
//! binding in a browser, a terminal writer in the replay CLI, or a recorder
//! in tests.

use crate::{
    items::LineItem,
    prices::Price,
    toasts::{Notice, ToastKey, ToastPhase},
};

/// Toggleable page panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// The slide-out cart.
    CartOverlay,

    /// The newsletter signup popup.
    Newsletter,

    /// The mobile navigation menu.
    MobileMenu,
}

/// What the payment step receives when checkout proceeds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckoutSummary {
    /// Number of units in the cart.
    pub item_count: u64,

    /// Cart total at the time checkout was clicked.
    pub total: Price,
}

/// Receives rendering callbacks from the page session.
///
/// Only the cart render and toast display are required; the remaining hooks
/// default to doing nothing.
pub trait Presenter {
    /// Redraw the cart lines and total.
    fn render_cart(&mut self, items: &[LineItem], total: Price);

    /// Redraw the cart badge.
    fn render_item_count(&mut self, _count: u64) {}

    /// Attach a new toast.
    fn show_toast(&mut self, key: ToastKey, notice: &Notice);

    /// A toast moved to a new phase of its transition.
    fn toast_phase_changed(&mut self, _key: ToastKey, _phase: ToastPhase) {}

    /// A toast finished leaving and should be detached.
    fn dismiss_toast(&mut self, _key: ToastKey) {}

    /// A panel was opened or closed.
    fn panel_toggled(&mut self, _panel: Panel, _open: bool) {}

    /// The header crossed the scroll threshold.
    fn header_scrolled(&mut self, _scrolled: bool) {}

    /// Checkout is ready to hand off to an external payment step.
    fn begin_payment(&mut self, _summary: &CheckoutSummary) {}
}

/// A presenter that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn render_cart(&mut self, _items: &[LineItem], _total: Price) {}

    fn show_toast(&mut self, _key: ToastKey, _notice: &Notice) {}
}

/// One recorded presenter callback.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterEvent {
    /// `render_cart` snapshot.
    Render {
        /// Lines at render time.
        items: Vec<LineItem>,
        /// Total at render time.
        total: Price,
    },

    /// `render_item_count`
    ItemCount(u64),

    /// `show_toast`
    Toast(ToastKey, Notice),

    /// `toast_phase_changed`
    ToastPhase(ToastKey, ToastPhase),

    /// `dismiss_toast`
    DismissToast(ToastKey),

    /// `panel_toggled`
    Panel(Panel, bool),

    /// `header_scrolled`
    Header(bool),

    /// `begin_payment`
    Payment(CheckoutSummary),
}

/// A presenter that records every callback, for tests and debugging.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every callback in the order it arrived.
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Messages of every toast shown, in order.
    pub fn toasts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Toast(_, notice) => Some(notice.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Number of cart renders.
    pub fn render_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Render { .. }))
            .count()
    }

    /// The most recent cart render.
    pub fn last_render(&self) -> Option<(&[LineItem], Price)> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Render { items, total } => Some((items.as_slice(), *total)),
            _ => None,
        })
    }

    /// The most recent badge count.
    pub fn last_item_count(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::ItemCount(count) => Some(*count),
            _ => None,
        })
    }

    /// Every payment hand-off received.
    pub fn payments(&self) -> Vec<CheckoutSummary> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Payment(summary) => Some(*summary),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn render_cart(&mut self, items: &[LineItem], total: Price) {
        self.events.push(PresenterEvent::Render {
            items: items.to_vec(),
            total,
        });
    }

    fn render_item_count(&mut self, count: u64) {
        self.events.push(PresenterEvent::ItemCount(count));
    }

    fn show_toast(&mut self, key: ToastKey, notice: &Notice) {
        self.events.push(PresenterEvent::Toast(key, notice.clone()));
    }

    fn toast_phase_changed(&mut self, key: ToastKey, phase: ToastPhase) {
        self.events.push(PresenterEvent::ToastPhase(key, phase));
    }

    fn dismiss_toast(&mut self, key: ToastKey) {
        self.events.push(PresenterEvent::DismissToast(key));
    }

    fn panel_toggled(&mut self, panel: Panel, open: bool) {
        self.events.push(PresenterEvent::Panel(panel, open));
    }

    fn header_scrolled(&mut self, scrolled: bool) {
        self.events.push(PresenterEvent::Header(scrolled));
    }

    fn begin_payment(&mut self, summary: &CheckoutSummary) {
        self.events.push(PresenterEvent::Payment(*summary));
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::NGN};

    use super::*;

    #[test]
    fn recorder_helpers_read_back_events() {
        let mut presenter = RecordingPresenter::new();
        let key = ToastKey::default();
        let items = [LineItem::new("a", "Soap", Money::from_minor(500, NGN))];

        presenter.render_cart(&items, Money::from_minor(500, NGN));
        presenter.render_item_count(1);
        presenter.show_toast(key, &Notice::ItemAdded);
        presenter.begin_payment(&CheckoutSummary {
            item_count: 1,
            total: Money::from_minor(500, NGN),
        });

        assert_eq!(presenter.render_count(), 1);
        assert_eq!(presenter.last_item_count(), Some(1));
        assert_eq!(presenter.toasts(), vec!["Item added to cart!"]);
        assert_eq!(
            presenter.last_render().map(|(items, total)| (items.len(), total)),
            Some((1, Money::from_minor(500, NGN)))
        );
        assert_eq!(presenter.payments().len(), 1);

        presenter.clear();

        assert!(presenter.events().is_empty());
    }
}
