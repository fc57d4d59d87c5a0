//! Page timing configuration

use std::time::Duration;

use serde::Deserialize;

/// Delays and thresholds used by the page's timed effects.
///
/// Defaults match the storefront page: toasts slide in after 100ms, start
/// leaving after 3s and are detached 300ms later; the newsletter popup appears
/// 10s after load; checkout hands off to payment after 1s; the header switches
/// style once scrolled past 100px.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay before a new toast slides in.
    pub toast_enter_ms: u64,

    /// Time after showing before a toast starts leaving.
    pub toast_visible_ms: u64,

    /// Length of the slide-out transition.
    pub toast_exit_ms: u64,

    /// Delay after page load before the newsletter popup opens.
    pub newsletter_delay_ms: u64,

    /// Delay between the checkout notice and the payment hand-off.
    pub checkout_handoff_ms: u64,

    /// Scroll offset beyond which the header is marked as scrolled.
    pub header_scroll_threshold_px: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            toast_enter_ms: 100,
            toast_visible_ms: 3_000,
            toast_exit_ms: 300,
            newsletter_delay_ms: 10_000,
            checkout_handoff_ms: 1_000,
            header_scroll_threshold_px: 100,
        }
    }
}

impl Timings {
    pub(crate) fn toast_enter(&self) -> Duration {
        Duration::from_millis(self.toast_enter_ms)
    }

    pub(crate) fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    pub(crate) fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    pub(crate) fn newsletter_delay(&self) -> Duration {
        Duration::from_millis(self.newsletter_delay_ms)
    }

    pub(crate) fn checkout_handoff(&self) -> Duration {
        Duration::from_millis(self.checkout_handoff_ms)
    }
}
