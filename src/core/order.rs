//! Order business logic - Order headers and the customer's active cart.
//!
//! An order with `complete == false` is a cart. Each customer has at most one
//! cart at a time in practice: [`get_or_create_cart`] reuses the newest
//! incomplete order before creating a new one.

use crate::{
    core::order_item::prune_orphaned_items,
    entities::{Order, OrderItem, ShippingAddress, order, order_item, shipping_address},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument};

/// Creates a new, incomplete order.
#[instrument(skip(db))]
pub async fn create_order(
    db: &DatabaseConnection,
    customer_id: Option<i64>,
) -> Result<order::Model> {
    let order = order::ActiveModel {
        customer_id: Set(customer_id),
        date_ordered: Set(chrono::Utc::now()),
        complete: Set(false),
        transaction_id: Set(None),
        ..Default::default()
    };
    let order = order.insert(db).await?;
    info!("Created order {} for customer {:?}", order.id, order.customer_id);
    Ok(order)
}

/// Retrieves an order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the customer's current cart, creating an empty one if needed.
///
/// Lines of a reused cart whose product has since been deleted are dropped.
pub async fn get_or_create_cart(db: &DatabaseConnection, customer_id: i64) -> Result<order::Model> {
    let existing = Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .filter(order::Column::Complete.eq(false))
        .order_by_desc(order::Column::DateOrdered)
        .order_by_desc(order::Column::Id)
        .one(db)
        .await?;

    if let Some(cart) = existing {
        debug!("Reusing cart {} for customer {customer_id}", cart.id);
        prune_orphaned_items(db, cart.id).await?;
        return Ok(cart);
    }
    create_order(db, Some(customer_id)).await
}

/// All orders of a customer, newest first.
pub async fn get_orders_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .order_by_desc(order::Column::DateOrdered)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Completed orders of a customer, newest first.
pub async fn get_completed_orders_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .filter(order::Column::Complete.eq(true))
        .order_by_desc(order::Column::DateOrdered)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an order.
///
/// Its line items and shipping addresses are kept with the order reference cleared.
///
/// # Errors
/// Returns an error if the order does not exist or a database operation fails.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    OrderItem::update_many()
        .col_expr(order_item::Column::OrderId, Expr::value(Option::<i64>::None))
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    ShippingAddress::update_many()
        .col_expr(
            shipping_address::Column::OrderId,
            Expr::value(Option::<i64>::None),
        )
        .filter(shipping_address::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;

    order.delete(&txn).await?;
    txn.commit().await?;

    info!("Deleted order {order_id}");
    Ok(())
}
