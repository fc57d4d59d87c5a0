//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront_cart::config::Timings;

use crate::cli::logging::LoggingConfig;

pub(crate) mod logging;

/// Storefront cart session replayer
#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Replay storefront sessions in the terminal", long_about = None)]
pub struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a session script against a catalog.
    Replay {
        /// Catalog YAML file
        #[arg(short, long, env = "STOREFRONT_CATALOG")]
        catalog: PathBuf,

        /// Session script YAML file
        #[arg(short, long, env = "STOREFRONT_SCRIPT")]
        script: PathBuf,

        /// Timing overrides, applied on top of the script's own.
        #[command(flatten)]
        timings: TimingsArgs,
    },

    /// Print the products in a catalog.
    Catalog {
        /// Catalog YAML file
        #[arg(short, long, env = "STOREFRONT_CATALOG")]
        catalog: PathBuf,
    },
}

/// Timing overrides in milliseconds.
#[derive(Debug, Default, Args)]
pub struct TimingsArgs {
    /// Delay before a toast slides in
    #[arg(long, env = "STOREFRONT_TOAST_ENTER_MS")]
    pub toast_enter_ms: Option<u64>,

    /// Time a toast stays before leaving
    #[arg(long, env = "STOREFRONT_TOAST_VISIBLE_MS")]
    pub toast_visible_ms: Option<u64>,

    /// Length of the toast exit transition
    #[arg(long, env = "STOREFRONT_TOAST_EXIT_MS")]
    pub toast_exit_ms: Option<u64>,

    /// Delay before the newsletter popup opens
    #[arg(long, env = "STOREFRONT_NEWSLETTER_DELAY_MS")]
    pub newsletter_delay_ms: Option<u64>,

    /// Delay before the payment hand-off
    #[arg(long, env = "STOREFRONT_CHECKOUT_HANDOFF_MS")]
    pub checkout_handoff_ms: Option<u64>,
}

impl TimingsArgs {
    /// Overlay the given overrides on `base`.
    pub fn apply(&self, base: Timings) -> Timings {
        Timings {
            toast_enter_ms: self.toast_enter_ms.unwrap_or(base.toast_enter_ms),
            toast_visible_ms: self.toast_visible_ms.unwrap_or(base.toast_visible_ms),
            toast_exit_ms: self.toast_exit_ms.unwrap_or(base.toast_exit_ms),
            newsletter_delay_ms: self.newsletter_delay_ms.unwrap_or(base.newsletter_delay_ms),
            checkout_handoff_ms: self.checkout_handoff_ms.unwrap_or(base.checkout_handoff_ms),
            ..base
        }
    }
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
