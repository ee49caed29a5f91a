//! Order item business logic - Adding products to orders and adjusting quantities.
//!
//! An order holds at most one line per product: adding a product that is
//! already on the order increases that line's quantity. Lines whose quantity
//! drops to zero are removed.

use crate::{
    entities::{Order, OrderItem, Product, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// A one-step change to a cart line, as issued by the cart buttons and commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// One more unit
    Add,
    /// One unit fewer
    Remove,
}

impl CartAction {
    const fn delta(self) -> i32 {
        match self {
            Self::Add => 1,
            Self::Remove => -1,
        }
    }
}

/// Retrieves a line item by ID.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<order_item::Model>> {
    OrderItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All line items of an order, oldest first.
pub async fn get_items_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::DateAdded)
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn ensure_open_order<C: ConnectionTrait>(conn: &C, order_id: i64) -> Result<()> {
    let order = Order::find_by_id(order_id)
        .one(conn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    if order.complete {
        return Err(Error::OrderAlreadyComplete { id: order_id });
    }
    Ok(())
}

async fn ensure_product<C: ConnectionTrait>(conn: &C, product_id: i64) -> Result<()> {
    Product::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;
    Ok(())
}

async fn find_line<C: ConnectionTrait>(
    conn: &C,
    order_id: i64,
    product_id: i64,
) -> Result<Option<order_item::Model>> {
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .filter(order_item::Column::ProductId.eq(product_id))
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Applies `delta` to a line, deleting it when the quantity reaches zero.
async fn adjust_line<C: ConnectionTrait>(
    conn: &C,
    line: order_item::Model,
    delta: i32,
) -> Result<Option<order_item::Model>> {
    let quantity = line.quantity.saturating_add(delta);
    if quantity <= 0 {
        debug!("Removing order item {} (quantity {quantity})", line.id);
        line.delete(conn).await?;
        return Ok(None);
    }

    let mut active: order_item::ActiveModel = line.into();
    active.quantity = Set(quantity);
    Ok(Some(active.update(conn).await?))
}

/// Adds `quantity` units of a product to an open order.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is not positive
/// - The order does not exist or is already complete
/// - The product does not exist
/// - A database operation fails
#[instrument(skip(db))]
pub async fn add_item(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    quantity: i32,
) -> Result<order_item::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;
    ensure_open_order(&txn, order_id).await?;
    ensure_product(&txn, product_id).await?;

    let line = if let Some(existing) = find_line(&txn, order_id, product_id).await? {
        adjust_line(&txn, existing, quantity)
            .await?
            .ok_or(Error::InvalidQuantity { quantity })?
    } else {
        order_item::ActiveModel {
            product_id: Set(Some(product_id)),
            order_id: Set(Some(order_id)),
            quantity: Set(quantity),
            date_added: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?
    };
    txn.commit().await?;

    info!(
        "Order {order_id}: product {product_id} now at quantity {}",
        line.quantity
    );
    Ok(line)
}

/// Adds or removes a single unit of a product on an open order.
///
/// Returns the updated line, or `None` if the line was removed (or never
/// existed and the action was [`CartAction::Remove`]).
#[instrument(skip(db))]
pub async fn update_item(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    action: CartAction,
) -> Result<Option<order_item::Model>> {
    if action == CartAction::Add {
        return add_item(db, order_id, product_id, 1).await.map(Some);
    }

    let txn = db.begin().await?;
    ensure_open_order(&txn, order_id).await?;
    let result = match find_line(&txn, order_id, product_id).await? {
        Some(line) => adjust_line(&txn, line, action.delta()).await?,
        None => None,
    };
    txn.commit().await?;
    Ok(result)
}

/// Sets a line's quantity outright; zero or less removes the line.
///
/// # Errors
/// Returns an error if the line does not exist, its order is complete, or a
/// database operation fails.
#[instrument(skip(db))]
pub async fn set_item_quantity(
    db: &DatabaseConnection,
    item_id: i64,
    quantity: i32,
) -> Result<Option<order_item::Model>> {
    let txn = db.begin().await?;
    let line = OrderItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderItemNotFound { id: item_id })?;
    if let Some(order_id) = line.order_id {
        ensure_open_order(&txn, order_id).await?;
    }

    let delta = quantity.saturating_sub(line.quantity);
    let result = adjust_line(&txn, line, delta).await?;
    txn.commit().await?;
    Ok(result)
}

/// Deletes a line item.
///
/// # Errors
/// Returns an error if the line does not exist or the delete fails.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let line = OrderItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::OrderItemNotFound { id: item_id })?;
    line.delete(db).await?;
    Ok(())
}

/// Removes lines of an order whose product has been deleted.
///
/// Returns the number of lines removed.
pub(crate) async fn prune_orphaned_items<C: ConnectionTrait>(conn: &C, order_id: i64) -> Result<u64> {
    let result = OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .filter(order_item::Column::ProductId.is_null())
        .exec(conn)
        .await?;
    if result.rows_affected > 0 {
        info!(
            "Removed {} line(s) with deleted products from order {order_id}",
            result.rows_affected
        );
    }
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_item_rejects_non_positive_quantity() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = add_item(&db, 1, 1, 0).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));
        let result = add_item(&db, 1, 1, -3).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: -3 })));
    }

    #[tokio::test]
    async fn test_add_same_product_merges_lines() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;

        let first = add_item(&db, cart.id, product.id, 2).await?;
        let second = add_item(&db, cart.id, product.id, 3).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);
        assert_eq!(get_items_for_order(&db, cart.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_order_or_product() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;

        let no_order = add_item(&db, 999, product.id, 1).await;
        assert!(matches!(no_order, Err(Error::OrderNotFound { id: 999 })));

        let no_product = add_item(&db, cart.id, 999, 1).await;
        assert!(matches!(no_product, Err(Error::ProductNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_to_complete_order_fails() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;

        let mut done: crate::entities::order::ActiveModel = cart.clone().into();
        done.complete = Set(true);
        done.update(&db).await?;

        let result = add_item(&db, cart.id, product.id, 1).await;
        assert!(matches!(result, Err(Error::OrderAlreadyComplete { id: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_add_and_remove() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;

        let line = update_item(&db, cart.id, product.id, CartAction::Add)
            .await?
            .unwrap();
        assert_eq!(line.quantity, 1);

        let line = update_item(&db, cart.id, product.id, CartAction::Add)
            .await?
            .unwrap();
        assert_eq!(line.quantity, 2);

        let line = update_item(&db, cart.id, product.id, CartAction::Remove)
            .await?
            .unwrap();
        assert_eq!(line.quantity, 1);

        // Dropping to zero removes the line
        let removed = update_item(&db, cart.id, product.id, CartAction::Remove).await?;
        assert!(removed.is_none());
        assert!(get_items_for_order(&db, cart.id).await?.is_empty());

        // Removing something that is not in the cart is a no-op
        let nothing = update_item(&db, cart.id, product.id, CartAction::Remove).await?;
        assert!(nothing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_item_quantity() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;
        let line = add_item(&db, cart.id, product.id, 1).await?;

        let line = set_item_quantity(&db, line.id, 7).await?.unwrap();
        assert_eq!(line.quantity, 7);

        let removed = set_item_quantity(&db, line.id, 0).await?;
        assert!(removed.is_none());
        assert!(get_item_by_id(&db, line.id).await?.is_none());

        let missing = set_item_quantity(&db, line.id, 1).await;
        assert!(matches!(missing, Err(Error::OrderItemNotFound { id: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item() -> Result<()> {
        let (db, _customer, cart) = setup_with_cart().await?;
        let product = create_test_product(&db, "Socks").await?;
        let line = add_item(&db, cart.id, product.id, 1).await?;

        delete_item(&db, line.id).await?;
        assert!(get_item_by_id(&db, line.id).await?.is_none());

        let again = delete_item(&db, line.id).await;
        assert!(matches!(again, Err(Error::OrderItemNotFound { id: _ })));
        Ok(())
    }
}
