//! Session scripts
//!
//! A script is a YAML list of visitor actions replayed against a
//! [`Storefront`], with `wait` steps advancing virtual time:
//!
//! ```yaml
//! timings:
//!   newsletter_delay_ms: 5000
//! steps:
//!   - add: shea-soap
//!   - add: shea-soap
//!   - quantity: { id: shea-soap, delta: -1 }
//!   - wait: 3500
//!   - checkout
//!   - wait: 1000
//! ```

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    config::Timings,
    items::ItemId,
    presenter::Presenter,
    storefront::{Storefront, UiEvent},
};

/// Script loading and replay errors
#[derive(Debug, Error)]
pub enum ScriptError {
    /// IO error reading the script file
    #[error("Failed to read script file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A step names a product the catalog does not have
    #[error("Step {step}: unknown product '{id}'")]
    UnknownProduct {
        /// 1-based step number
        step: usize,
        /// Product id as written
        id: String,
    },
}

/// One visitor action.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Add one unit of a catalog product.
    Add(String),

    /// Press a quantity button on a cart line.
    Quantity {
        /// Line id
        id: String,
        /// Signed change
        delta: i64,
    },

    /// Click checkout.
    Checkout,

    /// Click the heart on a product card.
    Wishlist(String),

    /// Open the cart overlay.
    OpenCart,

    /// Close the cart overlay.
    CloseCart,

    /// Click outside the cart overlay.
    ClickOutsideCart,

    /// Scroll the window to an offset in pixels.
    Scroll(u32),

    /// Toggle the mobile menu.
    ToggleMenu,

    /// Click a category card.
    Category(String),

    /// Submit the newsletter form.
    Subscribe(String),

    /// Close the newsletter popup.
    CloseNewsletter,

    /// Let time pass, in milliseconds.
    Wait(u64),
}

/// A parsed session script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Timing overrides for the replayed page.
    #[serde(default)]
    pub timings: Option<Timings>,

    /// Actions in order, written as `- checkout` or `- add: zobo`.
    #[serde(default, with = "serde_norway::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a step is unknown.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Check that every product a step adds exists in `catalog`.
    ///
    /// Quantity and wishlist steps may name anything; the page ignores
    /// unknown cart lines and saves any id to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownProduct`] for the first bad `add` step.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ScriptError> {
        for (idx, step) in self.steps.iter().enumerate() {
            if let Step::Add(id) = step
                && catalog.get(id).is_none()
            {
                return Err(ScriptError::UnknownProduct {
                    step: idx + 1,
                    id: id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Timings the script asks for, or the defaults.
    pub fn timings(&self) -> Timings {
        self.timings.unwrap_or_default()
    }

    /// Replay every step against `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if an `add` step names an unknown product; steps
    /// before it have already run.
    pub fn replay<P: Presenter>(
        &self,
        catalog: &Catalog,
        page: &mut Storefront<P>,
    ) -> Result<(), ScriptError> {
        info!(steps = self.steps.len(), "replaying session");

        for (idx, step) in self.steps.iter().enumerate() {
            debug!(step = idx + 1, ?step, "replay step");

            step.apply(idx + 1, catalog, page)?;
        }

        Ok(())
    }
}

impl Step {
    fn apply<P: Presenter>(
        &self,
        step_number: usize,
        catalog: &Catalog,
        page: &mut Storefront<P>,
    ) -> Result<(), ScriptError> {
        let event = match self {
            Step::Add(id) => {
                let product = catalog
                    .get(id)
                    .ok_or_else(|| ScriptError::UnknownProduct {
                        step: step_number,
                        id: id.clone(),
                    })?;

                UiEvent::add_to_cart(product)
            }
            Step::Quantity { id, delta } => UiEvent::ChangeQuantity {
                id: ItemId::from(id.as_str()),
                delta: *delta,
            },
            Step::Checkout => UiEvent::Checkout,
            Step::Wishlist(id) => UiEvent::AddToWishlist {
                id: ItemId::from(id.as_str()),
            },
            Step::OpenCart => UiEvent::OpenCart,
            Step::CloseCart => UiEvent::CloseCart,
            Step::ClickOutsideCart => UiEvent::ClickOutsideCart,
            Step::Scroll(offset) => UiEvent::Scroll { offset: *offset },
            Step::ToggleMenu => UiEvent::ToggleMobileMenu,
            Step::Category(category) => UiEvent::BrowseCategory {
                category: category.clone(),
            },
            Step::Subscribe(email) => UiEvent::SubscribeNewsletter {
                email: email.clone(),
            },
            Step::CloseNewsletter => UiEvent::CloseNewsletter,
            Step::Wait(ms) => {
                page.advance(Duration::from_millis(*ms));

                return Ok(());
            }
        };

        page.handle(event);

        Ok(())
    }
}
