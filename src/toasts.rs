//! Toast notifications

use std::{fmt, time::Duration};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to a live toast.
    pub struct ToastKey;
}

/// Messages the page can show as a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A product was added to the cart.
    ItemAdded,

    /// Checkout was attempted with nothing in the cart.
    CartEmpty,

    /// Checkout accepted; the payment step follows.
    RedirectingToCheckout,

    /// A product was saved to the wishlist.
    AddedToWishlist,

    /// The product was already on the wishlist.
    AlreadyInWishlist,

    /// Newsletter subscription accepted.
    Subscribed,

    /// A category card was clicked.
    BrowsingCategory(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ItemAdded => f.write_str("Item added to cart!"),
            Notice::CartEmpty => f.write_str("Your cart is empty!"),
            Notice::RedirectingToCheckout => f.write_str("Redirecting to checkout..."),
            Notice::AddedToWishlist => f.write_str("Added to wishlist!"),
            Notice::AlreadyInWishlist => f.write_str("Already in wishlist!"),
            Notice::Subscribed => f.write_str("Thank you for subscribing!"),
            Notice::BrowsingCategory(category) => write!(f, "Browsing {category} category..."),
        }
    }
}

/// Where a toast is in its slide-in / slide-out cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached off-screen, about to slide in.
    Entering,

    /// Fully on screen.
    Visible,

    /// Sliding out; removed once the exit transition ends.
    Leaving,
}

/// A notice currently attached to the page.
#[derive(Clone, Debug)]
pub struct Toast {
    notice: Notice,
    phase: ToastPhase,
    shown_at: Duration,
    seq: u64,
}

impl Toast {
    /// The notice being shown.
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Current phase.
    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Virtual time the toast was attached.
    pub fn shown_at(&self) -> Duration {
        self.shown_at
    }
}

/// Live toasts. Several may be on screen at once.
#[derive(Debug, Default)]
pub struct Toasts {
    live: SlotMap<ToastKey, Toast>,
    next_seq: u64,
}

impl Toasts {
    /// Create an empty toast stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a toast in the [`ToastPhase::Entering`] phase.
    pub fn show(&mut self, notice: Notice, now: Duration) -> ToastKey {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.live.insert(Toast {
            notice,
            phase: ToastPhase::Entering,
            shown_at: now,
            seq,
        })
    }

    /// Move a live toast to `phase`. Returns `false` if the toast is gone.
    pub fn set_phase(&mut self, key: ToastKey, phase: ToastPhase) -> bool {
        match self.live.get_mut(key) {
            Some(toast) => {
                toast.phase = phase;
                true
            }
            None => false,
        }
    }

    /// Detach a toast.
    pub fn remove(&mut self, key: ToastKey) -> Option<Toast> {
        self.live.remove(key)
    }

    /// Get a live toast.
    pub fn get(&self, key: ToastKey) -> Option<&Toast> {
        self.live.get(key)
    }

    /// Live toasts, oldest first.
    pub fn in_order(&self) -> Vec<(ToastKey, &Toast)> {
        let mut toasts: Vec<_> = self.live.iter().collect();
        toasts.sort_by_key(|(_, toast)| toast.seq);
        toasts
    }

    /// Messages of the live toasts, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.in_order()
            .into_iter()
            .map(|(_, toast)| toast.notice.to_string())
            .collect()
    }

    /// Number of live toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if no toast is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
