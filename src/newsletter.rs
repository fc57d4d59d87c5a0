//! Newsletter popup

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::scheduler::TaskKey;

/// Newsletter errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewsletterError {
    /// The address would not pass a browser's `type=email` check.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

/// A syntactically plausible email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = NewsletterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let valid = trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            })
            && !trimmed.chars().any(char::is_whitespace);

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(NewsletterError::InvalidEmail(s.to_string()))
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Popup visibility, the pending auto-show timer and captured subscribers.
#[derive(Debug, Default)]
pub struct Newsletter {
    open: bool,
    auto_show: Option<TaskKey>,
    subscribers: Vec<Email>,
}

impl Newsletter {
    /// Create a hidden popup with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the popup is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the popup. Returns `true` if it was hidden before.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Hide the popup. Returns `true` if it was showing before.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Remember the timer that will show the popup.
    pub fn set_auto_show(&mut self, key: TaskKey) {
        self.auto_show = Some(key);
    }

    /// Take the pending auto-show timer, if any.
    pub fn take_auto_show(&mut self) -> Option<TaskKey> {
        self.auto_show.take()
    }

    /// Whether an auto-show timer is still pending.
    pub fn auto_show_pending(&self) -> bool {
        self.auto_show.is_some()
    }

    /// Record a subscriber.
    pub fn subscribe(&mut self, email: Email) {
        self.subscribers.push(email);
    }

    /// Subscribers captured on this page, in order.
    pub fn subscribers(&self) -> &[Email] {
        &self.subscribers
    }
}
