//! Product catalog

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    items::ItemId,
    prices::{Price, PriceError, currency_from_code, parse_price},
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product price could not be parsed
    #[error("Invalid price for product '{product}': {source}")]
    Price {
        /// Product id
        product: String,
        /// Underlying parse error
        source: PriceError,
    },

    /// The declared catalog currency is not supported
    #[error(transparent)]
    Currency(PriceError),

    /// Products priced in different currencies
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products defined
    #[error("No products found in catalog")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    currency: Option<String>,
    products: FxHashMap<String, ProductFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,
    price: String,
    #[serde(default)]
    category: Option<String>,
}

/// A product that can be added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ItemId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Price,

    /// Category shown on the product card, if any
    pub category: Option<String>,
}

/// Products offered on the page, all priced in one currency.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ItemId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, products
    /// use different currencies, or there are no products.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut currency = fixture
            .currency
            .as_deref()
            .map(currency_from_code)
            .transpose()
            .map_err(CatalogError::Currency)?;

        let mut products = Vec::with_capacity(fixture.products.len());

        for (key, product_fixture) in fixture.products {
            let price =
                parse_price(&product_fixture.price).map_err(|source| CatalogError::Price {
                    product: key.clone(),
                    source,
                })?;

            match currency {
                Some(existing) if existing != price.currency() => {
                    return Err(CatalogError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        price.currency().iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(price.currency()),
            }

            products.push(Product {
                id: ItemId::new(key),
                name: product_fixture.name,
                price,
                category: product_fixture.category,
            });
        }

        let currency = currency.ok_or(CatalogError::Empty)?;

        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        products.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.id.cmp(&right.id))
        });

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Get a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
    }

    /// Products sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .products
            .iter()
            .filter_map(|product| product.category.as_deref())
            .collect();

        categories.sort_unstable();
        categories.dedup();

        categories
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always `false` for a loaded catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::{
        Money,
        iso::{GBP, NGN},
    };
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = r#"
currency: NGN
products:
  shea-soap:
    name: "Shea Butter Soap"
    price: "2500 NGN"
    category: Skincare
  zobo:
    name: "Zobo Syrup"
    price: "1800 NGN"
    category: Drinks
  body-butter:
    name: "Body Butter"
    price: "4500 NGN"
    category: Skincare
"#;

    #[test]
    fn loads_products_sorted_by_name() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        let names: Vec<&str> = catalog.iter().map(|product| product.name.as_str()).collect();

        assert_eq!(names, vec!["Body Butter", "Shea Butter Soap", "Zobo Syrup"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.currency(), NGN);

        Ok(())
    }

    #[test]
    fn looks_up_products_by_id() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        let soap = catalog.get("shea-soap");

        assert_eq!(
            soap.map(|product| product.price),
            Some(Money::from_minor(250_000, NGN))
        );
        assert_eq!(
            soap.and_then(|product| product.category.as_deref()),
            Some("Skincare")
        );
        assert!(catalog.get("missing").is_none());

        Ok(())
    }

    #[test]
    fn lists_distinct_categories() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        assert_eq!(catalog.categories(), vec!["Drinks", "Skincare"]);

        Ok(())
    }

    #[test]
    fn currency_is_inferred_when_not_declared() -> TestResult {
        let catalog = Catalog::from_yaml(
            r#"
products:
  tea:
    name: "Tea"
    price: "2.50 GBP"
"#,
        )?;

        assert_eq!(catalog.currency(), GBP);

        Ok(())
    }

    #[test]
    fn rejects_price_in_other_currency() {
        let result = Catalog::from_yaml(
            r#"
currency: NGN
products:
  tea:
    name: "Tea"
    price: "2.50 GBP"
"#,
        );

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch(expected, found)) if expected == "NGN" && found == "GBP"
        ));
    }

    #[test]
    fn rejects_invalid_price() {
        let result = Catalog::from_yaml(
            r#"
products:
  tea:
    name: "Tea"
    price: "cheap"
"#,
        );

        assert!(matches!(result, Err(CatalogError::Price { product, .. }) if product == "tea"));
    }

    #[test]
    fn rejects_unknown_declared_currency() {
        let result = Catalog::from_yaml("currency: XYZ\nproducts: {}\n");

        assert!(matches!(result, Err(CatalogError::Currency(_))));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(
            Catalog::from_yaml("products: {}\n"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_yaml("currency: NGN\nproducts: {}\n"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(matches!(
            Catalog::from_yaml("products: [[["),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn loads_from_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(CATALOG.as_bytes())?;

        let catalog = Catalog::from_path(file.path())?;

        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Catalog::from_path("/definitely/not/here.yml"),
            Err(CatalogError::Io(_))
        ));
    }
}
