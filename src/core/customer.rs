//! Customer operations - Creating, looking up, and removing customer profiles.
//!
//! Deleting a customer never deletes its orders or shipping addresses; their
//! customer reference is cleared instead.

use crate::{
    entities::{Customer, Order, ShippingAddress, customer, order, shipping_address},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Retrieves a customer by ID.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the customer linked to a user, if any.
pub async fn get_customer_by_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<customer::Model>> {
    Customer::find()
        .filter(customer::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new customer.
///
/// The email is stored as given; it is not validated.
#[instrument(skip(db))]
pub async fn create_customer(
    db: &DatabaseConnection,
    user_id: Option<String>,
    name: Option<String>,
    email: String,
) -> Result<customer::Model> {
    let customer = customer::ActiveModel {
        user_id: Set(user_id),
        name: Set(name),
        email: Set(email),
        ..Default::default()
    };
    let customer = customer.insert(db).await?;
    info!("Created customer {}", customer.id);
    Ok(customer)
}

/// Returns the customer linked to `user_id`, creating one on first use.
///
/// The user record must already exist, see [`crate::core::user::register_user`].
pub async fn get_or_create_customer_for_user(
    db: &DatabaseConnection,
    user_id: &str,
    name: Option<String>,
) -> Result<customer::Model> {
    if let Some(existing) = get_customer_by_user(db, user_id).await? {
        return Ok(existing);
    }
    create_customer(db, Some(user_id.to_string()), name, String::new()).await
}

/// Updates a customer's display name and email.
///
/// # Errors
/// Returns an error if the customer does not exist or the update fails.
#[instrument(skip(db))]
pub async fn update_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    name: Option<String>,
    email: String,
) -> Result<customer::Model> {
    let mut customer: customer::ActiveModel = Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?
        .into();

    customer.name = Set(name);
    customer.email = Set(email);

    customer.update(db).await.map_err(Into::into)
}

/// Deletes a customer, clearing the customer reference on its orders and addresses.
///
/// # Errors
/// Returns an error if the customer does not exist or a database operation fails.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DatabaseConnection, customer_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    delete_customer_in(&txn, customer_id).await?;
    txn.commit().await?;
    info!("Deleted customer {customer_id}");
    Ok(())
}

/// Deletes a customer on an existing connection or transaction.
///
/// Dependents are nulled explicitly since `SQLite` only applies `ON DELETE`
/// actions when foreign key enforcement is switched on.
pub(crate) async fn delete_customer_in<C>(conn: &C, customer_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let customer = Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    Order::update_many()
        .col_expr(order::Column::CustomerId, Expr::value(Option::<i64>::None))
        .filter(order::Column::CustomerId.eq(customer_id))
        .exec(conn)
        .await?;
    ShippingAddress::update_many()
        .col_expr(
            shipping_address::Column::CustomerId,
            Expr::value(Option::<i64>::None),
        )
        .filter(shipping_address::Column::CustomerId.eq(customer_id))
        .exec(conn)
        .await?;

    customer.delete(conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{order as order_ops, shipping};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_get_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let customer = create_customer(
            &db,
            None,
            Some("Dana".to_string()),
            "not-an-email".to_string(),
        )
        .await?;

        let found = get_customer_by_id(&db, customer.id).await?.unwrap();
        assert_eq!(found.name.as_deref(), Some("Dana"));
        // Email is free text
        assert_eq!(found.email, "not-an-email");
        assert_eq!(found.user_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_customer_for_user() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::user::register_user(&db, "7", "bob").await?;

        let first = get_or_create_customer_for_user(&db, "7", Some("Bob".to_string())).await?;
        let second = get_or_create_customer_for_user(&db, "7", None).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.user_id.as_deref(), Some("7"));
        assert_eq!(get_customer_by_user(&db, "7").await?.unwrap().id, first.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db).await?;

        let updated = update_customer(
            &db,
            customer.id,
            Some("New Name".to_string()),
            "new@example.com".to_string(),
        )
        .await?;
        assert_eq!(updated.name.as_deref(), Some("New Name"));
        assert_eq!(updated.email, "new@example.com");

        let missing = update_customer(&db, 999, None, String::new()).await;
        assert!(matches!(missing, Err(Error::CustomerNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_nulls_orders_and_addresses() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db).await?;
        let cart = order_ops::get_or_create_cart(&db, customer.id).await?;
        let address = shipping::create_shipping_address(
            &db,
            Some(customer.id),
            Some(cart.id),
            test_address(),
        )
        .await?;

        delete_customer(&db, customer.id).await?;

        assert!(get_customer_by_id(&db, customer.id).await?.is_none());
        let order = order_ops::get_order_by_id(&db, cart.id).await?.unwrap();
        assert_eq!(order.customer_id, None);
        let address = shipping::get_shipping_address_by_id(&db, address.id)
            .await?
            .unwrap();
        assert_eq!(address.customer_id, None);
        assert_eq!(address.order_id, Some(cart.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_customer(&db, 404).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { id: 404 })));
        Ok(())
    }
}
