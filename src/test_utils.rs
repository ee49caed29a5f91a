//! Shared test utilities for `StorefrontBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{customer, order, product, shipping::NewShippingAddress},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test customer with no linked user.
///
/// # Defaults
/// * `name`: "Test Customer"
/// * `email`: "customer@example.com"
pub async fn create_test_customer(db: &DatabaseConnection) -> Result<entities::customer::Model> {
    customer::create_customer(
        db,
        None,
        Some("Test Customer".to_string()),
        "customer@example.com".to_string(),
    )
    .await
}

/// Creates a physical test product.
///
/// # Defaults
/// * price: 10.0
/// * digital: false
/// * image: None
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), 10.0, false, None).await
}

/// Creates a test product with custom price and digital flag.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    digital: bool,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), price, digital, None).await
}

/// A complete, valid shipping address.
#[must_use]
pub fn test_address() -> NewShippingAddress {
    NewShippingAddress {
        address: "742 Evergreen Terrace".to_string(),
        city: "Springfield".to_string(),
        state: "OR".to_string(),
        zipcode: "97403".to_string(),
    }
}

/// Sets up a database with one customer and their empty cart.
/// Returns (db, customer, cart) for cart and checkout tests.
pub async fn setup_with_cart() -> Result<(
    DatabaseConnection,
    entities::customer::Model,
    entities::order::Model,
)> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db).await?;
    let cart = order::get_or_create_cart(&db, customer.id).await?;
    Ok((db, customer, cart))
}
