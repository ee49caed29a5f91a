//! Product catalog loading from catalog.toml
//!
//! This module provides functionality to load an initial product catalog from
//! a TOML file. The products listed there are used to seed the database on
//! first run, when the product table is still empty.

use crate::core::product;
use crate::entities::Product;
use crate::errors::{Error, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default location of the catalog file
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct Catalog {
    /// Products to seed
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// A single product entry in the catalog file
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogProduct {
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Whether the product is digital (never shipped)
    #[serde(default)]
    pub digital: bool,
    /// Image path relative to the media root
    #[serde(default)]
    pub image: Option<String>,
}

/// Returns `CATALOG_PATH` from the environment or [`DEFAULT_CATALOG_PATH`].
#[must_use]
pub fn get_catalog_path() -> PathBuf {
    std::env::var("CATALOG_PATH")
        .map_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from)
}

/// Loads a product catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    parse_catalog(&contents)
}

/// Parses catalog TOML text.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Inserts the catalog's products if the product table is empty.
///
/// Returns the number of products inserted. A non-empty table is left alone so
/// that edits made through the bot survive restarts. Either every entry is
/// inserted or none is.
///
/// # Errors
/// Returns an error if any entry has a blank name or non-finite price, or if a
/// database operation fails.
pub async fn seed_products(db: &DatabaseConnection, catalog: &Catalog) -> Result<usize> {
    let existing = Product::find().count(db).await?;
    if existing > 0 {
        info!("Product table already has {existing} rows, skipping catalog seed");
        return Ok(0);
    }

    for entry in &catalog.products {
        product::validate(&entry.name, entry.price)?;
    }

    let txn = db.begin().await?;
    for entry in &catalog.products {
        product::insert_product(
            &txn,
            entry.name.clone(),
            entry.price,
            entry.digital,
            entry.image.clone(),
        )
        .await?;
    }
    txn.commit().await?;

    info!("Seeded {} products from catalog", catalog.products.len());
    Ok(catalog.products.len())
}

/// Loads the catalog at `path` and seeds it, treating a missing file as an empty catalog.
pub async fn seed_from_file(db: &DatabaseConnection, path: &Path) -> Result<usize> {
    if !path.exists() {
        warn!("Catalog file {} not found, nothing to seed", path.display());
        return Ok(0);
    }
    let catalog = load_catalog(path)?;
    seed_products(db, &catalog).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const CATALOG: &str = r#"
        [[products]]
        name = "Headphones"
        price = 79.99
        image = "headphones.jpg"

        [[products]]
        name = "Source Code"
        price = 20.0
        digital = true
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].name, "Headphones");
        assert_eq!(catalog.products[0].price, 79.99);
        assert!(!catalog.products[0].digital);
        assert_eq!(catalog.products[0].image.as_deref(), Some("headphones.jpg"));

        assert!(catalog.products[1].digital);
        assert!(catalog.products[1].image.is_none());
    }

    #[test]
    fn test_parse_catalog_rejects_missing_price() {
        let result = parse_catalog("[[products]]\nname = \"Broken\"\n");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[tokio::test]
    async fn test_seed_products_only_into_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        let catalog = parse_catalog(CATALOG)?;

        assert_eq!(seed_products(&db, &catalog).await?, 2);
        assert_eq!(seed_products(&db, &catalog).await?, 0);

        let products = product::get_all_products(&db).await?;
        assert_eq!(products.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_entry_seeds_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let broken = parse_catalog(
            r#"
            [[products]]
            name = "A"
            price = 1.0

            [[products]]
            name = "  "
            price = 2.0

            [[products]]
            name = "C"
            price = 3.0
        "#,
        )?;

        let result = seed_products(&db, &broken).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
        assert!(product::get_all_products(&db).await?.is_empty());

        // A corrected catalog still seeds on the next start
        let fixed = parse_catalog(CATALOG)?;
        assert_eq!(seed_products(&db, &fixed).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_from_missing_file_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let seeded = seed_from_file(&db, Path::new("does/not/exist.toml")).await?;
        assert_eq!(seeded, 0);
        Ok(())
    }
}
