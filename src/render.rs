//! Terminal rendering

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    catalog::Catalog,
    items::LineItem,
    presenter::{CheckoutSummary, Panel, Presenter},
    prices::Price,
    pricing::line_total,
    toasts::{Notice, ToastKey},
};

/// Render cart lines and the total as a table.
pub fn cart_table(items: &[LineItem], total: Price) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

    for (idx, item) in items.iter().enumerate() {
        let line = line_total(item).map_or_else(|_err| "-".to_string(), |price| price.to_string());

        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.name().to_string(),
            item.unit_price().to_string(),
            item.quantity().to_string(),
            line,
        ]);
    }

    builder.push_record([
        String::new(),
        "Total".to_string(),
        String::new(),
        String::new(),
        total.to_string(),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());
    table.modify(Rows::last(), Alignment::right());

    table.to_string()
}

/// Render the catalog as a table.
pub fn catalog_table(catalog: &Catalog) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone().unwrap_or_default(),
            product.price.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    table.to_string()
}

/// A presenter that writes every callback to a terminal.
///
/// Write failures are kept rather than raised, since presenter callbacks
/// cannot fail; [`TerminalPresenter::finish`] reports the first one.
#[derive(Debug)]
pub struct TerminalPresenter<W: io::Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: io::Write> TerminalPresenter<W> {
    /// Write to `out`.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Write a free-form line, e.g. a replay heading.
    pub fn line(&mut self, text: &str) {
        self.write(format_args!("{text}\n"));
    }

    /// Return the writer, or the first write error.
    ///
    /// # Errors
    ///
    /// Returns the first IO error seen while rendering.
    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(err) => Err(err),
            None => {
                self.out.flush()?;
                Ok(self.out)
            }
        }
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.out.write_fmt(args) {
            self.error = Some(err);
        }
    }
}

impl<W: io::Write> Presenter for TerminalPresenter<W> {
    fn render_cart(&mut self, items: &[LineItem], total: Price) {
        let table = cart_table(items, total);

        self.write(format_args!("{table}\n"));
    }

    fn render_item_count(&mut self, count: u64) {
        self.write(format_args!("  cart badge: {count}\n"));
    }

    fn show_toast(&mut self, _key: ToastKey, notice: &Notice) {
        self.write(format_args!("  toast: {notice}\n"));
    }

    fn panel_toggled(&mut self, panel: Panel, open: bool) {
        let state = if open { "opened" } else { "closed" };

        self.write(format_args!("  {panel:?} {state}\n"));
    }

    fn header_scrolled(&mut self, scrolled: bool) {
        let state = if scrolled { "compact" } else { "full" };

        self.write(format_args!("  header: {state}\n"));
    }

    fn begin_payment(&mut self, summary: &CheckoutSummary) {
        self.write(format_args!(
            "  payment hand-off: {} item(s), {}\n",
            summary.item_count, summary.total
        ));
    }
}
