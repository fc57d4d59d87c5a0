//! Storefront cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, QuantityChange},
    catalog::{Catalog, CatalogError, Product},
    config::Timings,
    items::{ItemId, LineItem},
    newsletter::{Email, Newsletter, NewsletterError},
    presenter::{CheckoutSummary, NoopPresenter, Panel, Presenter, RecordingPresenter},
    prices::{Price, PriceError, parse_price},
    pricing::{TotalPriceError, total_price},
    render::TerminalPresenter,
    scheduler::{Scheduler, TaskKey},
    script::{Script, ScriptError, Step},
    storefront::{CheckoutOutcome, Storefront, UiEvent},
    toasts::{Notice, Toast, ToastKey, ToastPhase, Toasts},
    wishlist::Wishlist,
};
