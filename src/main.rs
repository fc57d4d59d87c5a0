//! Storefront cart session replayer

use std::{
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use storefront_cart::{
    catalog::{Catalog, CatalogError},
    render::{TerminalPresenter, cart_table, catalog_table},
    script::{Script, ScriptError},
    storefront::Storefront,
};
use thiserror::Error;
use tracing::{error, info};

use crate::cli::{Cli, Command, TimingsArgs};

mod cli;

/// Top-level failures
#[derive(Debug, Error)]
enum AppError {
    /// Catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Script could not be loaded or replayed
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Writing to stdout failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    /// The cart total could not be computed
    #[error("Failed to total cart: {0}")]
    Total(#[from] storefront_cart::pricing::TotalPriceError),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Storefront cart entry point
fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help and version through the same path
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "storefront-cart failed");

            #[expect(
                clippy::print_stderr,
                reason = "logging may be filtered or not initialised, the user must see the failure"
            )]
            {
                eprintln!("Error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    cli::logging::init_subscriber(&cli.logging)?;

    let stdout = io::stdout().lock();

    match cli.command {
        Command::Replay {
            catalog,
            script,
            timings,
        } => replay(&catalog, &script, &timings, stdout),
        Command::Catalog { catalog } => list_catalog(&catalog, stdout),
    }
}

fn list_catalog(path: &Path, mut out: impl Write) -> Result<(), AppError> {
    let catalog = Catalog::from_path(path)?;

    info!(products = catalog.len(), "catalog loaded");

    writeln!(out, "{}", catalog_table(&catalog))?;
    writeln!(out, "Categories: {}", catalog.categories().join(", "))?;

    Ok(())
}

fn replay(
    catalog_path: &Path,
    script_path: &Path,
    overrides: &TimingsArgs,
    out: impl Write,
) -> Result<(), AppError> {
    let catalog = Catalog::from_path(catalog_path)?;
    let script = Script::from_path(script_path)?;

    script.validate(&catalog)?;

    let timings = overrides.apply(script.timings());
    let presenter = TerminalPresenter::new(out);
    let mut page = Storefront::with_timings(catalog.currency(), timings, presenter);

    script.replay(&catalog, &mut page)?;

    let item_count = page.item_count();
    let total = page.total()?;
    let items = page.cart().items().to_vec();
    let wishlist: Vec<String> = page.wishlist().iter().map(ToString::to_string).collect();
    let subscribers: Vec<String> = page
        .newsletter()
        .subscribers()
        .iter()
        .map(ToString::to_string)
        .collect();
    let elapsed = page.now();

    let mut presenter = page.into_presenter();

    presenter.line("");
    presenter.line(&format!("Session ended after {}ms", elapsed.as_millis()));
    presenter.line(&cart_table(&items, total));
    presenter.line(&format!("Items in cart: {item_count}"));
    presenter.line(&format!("Wishlist: {}", wishlist.join(", ")));
    presenter.line(&format!("Subscribers: {}", subscribers.join(", ")));

    presenter.finish()?;

    Ok(())
}
