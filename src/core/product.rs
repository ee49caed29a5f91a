//! Product business logic - Handles all catalog operations.
//!
//! This module provides functions for creating, retrieving, updating, and deleting
//! products. Prices are stored as given apart from rejecting non-finite values;
//! the catalog deliberately allows zero and negative prices (free items,
//! discount lines). Deleting a product keeps the order lines that referenced
//! it, with their product reference cleared.

use crate::{
    entities::{OrderItem, Product, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific product by its name, returning None if not found.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Checks a product name and price before any write.
pub(crate) fn validate(name: &str, price: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    Ok(())
}

fn normalize_image(image: Option<String>) -> Option<String> {
    image
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
}

/// Creates a new product.
///
/// The name is trimmed and a blank image path is stored as no image.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is not finite (NaN, infinity)
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    digital: bool,
    image: Option<String>,
) -> Result<product::Model> {
    let product = insert_product(db, name, price, digital, image).await?;
    info!(
        "Added product '{}' (ID: {}) at {} ({})",
        product.name,
        product.id,
        product.price,
        if product.digital { "digital" } else { "physical" }
    );
    Ok(product)
}

/// Validates and inserts a product on any connection or transaction.
pub(crate) async fn insert_product<C: ConnectionTrait>(
    conn: &C,
    name: String,
    price: f64,
    digital: bool,
    image: Option<String>,
) -> Result<product::Model> {
    validate(&name, price)?;

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        digital: Set(digital),
        image: Set(normalize_image(image)),
        ..Default::default()
    };
    product.insert(conn).await.map_err(Into::into)
}

/// Updates an existing product's name, price, and digital flag.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is not finite (NaN, infinity)
/// - The product does not exist
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_price: f64,
    digital: bool,
) -> Result<product::Model> {
    validate(&new_name, new_price)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.name = Set(new_name.trim().to_string());
    product.price = Set(new_price);
    product.digital = Set(digital);

    product.update(db).await.map_err(Into::into)
}

/// Sets or clears a product's image path.
///
/// # Errors
/// Returns an error if the product does not exist or the update fails.
#[instrument(skip(db))]
pub async fn set_product_image(
    db: &DatabaseConnection,
    product_id: i64,
    image: Option<String>,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.image = Set(normalize_image(image));

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product.
///
/// Order lines that referenced the product stay in place with `product_id`
/// cleared. Returns the deleted product.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - A database operation fails
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let detached = OrderItem::update_many()
        .col_expr(order_item::Column::ProductId, Expr::value(Option::<i64>::None))
        .filter(order_item::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    product.clone().delete(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted product '{}' (ID: {}), detached from {} order lines",
        product.name, product.id, detached.rows_affected
    );
    Ok(product)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::order_item;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Test empty name validation
        let result = create_product(&db, String::new(), 10.0, false, None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Test whitespace-only name validation
        let result = create_product(&db, "   ".to_string(), 10.0, false, None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Test NaN price validation
        let result = create_product(&db, "Test Product".to_string(), f64::NAN, false, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));

        // Test infinity price validation
        let result =
            create_product(&db, "Test Product".to_string(), f64::INFINITY, false, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            "  Headphones ".to_string(),
            79.99,
            false,
            Some("headphones.jpg".to_string()),
        )
        .await?;

        assert_eq!(product.name, "Headphones");
        assert_eq!(product.price, 79.99);
        assert!(!product.digital);
        assert_eq!(product.image.as_deref(), Some("headphones.jpg"));

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_price_is_stored() -> Result<()> {
        let db = setup_test_db().await?;
        let discount = create_custom_product(&db, "Coupon", -5.0, true).await?;
        assert_eq!(discount.price, -5.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_image_is_stored_as_none() -> Result<()> {
        let db = setup_test_db().await?;
        let product =
            create_product(&db, "Mug".to_string(), 8.0, false, Some("  ".to_string())).await?;
        assert!(product.image.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_name_and_id() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_product(&db, "Test Product").await?;

        let by_name = get_product_by_name(&db, "Test Product").await?.unwrap();
        assert_eq!(by_name.id, created.id);

        let by_id = get_product_by_id(&db, created.id).await?.unwrap();
        assert_eq!(by_id, created);

        assert!(get_product_by_name(&db, "Non-existent").await?.is_none());
        assert!(get_product_by_id(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_products_sorted_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        let zebra = create_test_product(&db, "Zebra Plush").await?;
        let apple = create_test_product(&db, "Apple Sticker").await?;

        let products = get_all_products(&db).await?;
        assert_eq!(products, vec![apple, zebra]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Original Name").await?;

        let updated =
            update_product(&db, product.id, "Updated Name".to_string(), 15.0, true).await?;

        assert_eq!(updated.name, "Updated Name");
        assert_eq!(updated.price, 15.0);
        assert!(updated.digital);
        assert_eq!(updated.id, product.id);

        // Verify the update persisted
        let retrieved = Product::find_by_id(product.id).one(&db).await?.unwrap();
        assert_eq!(retrieved, updated);

        let missing = update_product(&db, 999, "Ghost".to_string(), 1.0, false).await;
        assert!(matches!(missing, Err(Error::ProductNotFound { name: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_product_image() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Poster").await?;
        assert!(product.image.is_none());

        let with_image = set_product_image(&db, product.id, Some("poster.png".to_string())).await?;
        assert_eq!(with_image.image.as_deref(), Some("poster.png"));

        let cleared = set_product_image(&db, product.id, None).await?;
        assert!(cleared.image.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_keeps_order_items() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Doomed").await?;
        let item = order_item::add_item(&db, cart.id, product.id, 2).await?;

        let deleted = delete_product(&db, product.id).await?;
        assert_eq!(deleted.id, product.id);
        assert!(get_product_by_id(&db, product.id).await?.is_none());

        let surviving = order_item::get_item_by_id(&db, item.id).await?.unwrap();
        assert_eq!(surviving.product_id, None);
        assert_eq!(surviving.order_id, Some(cart.id));
        assert_eq!(surviving.quantity, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_product(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }
}
