//! Shipping address operations.

use crate::{
    entities::{ShippingAddress, shipping_address},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Address fields as entered by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShippingAddress {
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub zipcode: String,
}

impl NewShippingAddress {
    /// Checks that every field is filled in.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipcode", &self.zipcode),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("Shipping {field} cannot be empty"),
                });
            }
        }
        Ok(())
    }
}

/// Stores a shipping address on any connection or transaction.
pub(crate) async fn insert_shipping_address<C: ConnectionTrait>(
    conn: &C,
    customer_id: Option<i64>,
    order_id: Option<i64>,
    fields: NewShippingAddress,
) -> Result<shipping_address::Model> {
    fields.validate()?;

    let address = shipping_address::ActiveModel {
        customer_id: Set(customer_id),
        order_id: Set(order_id),
        address: Set(fields.address.trim().to_string()),
        city: Set(fields.city.trim().to_string()),
        state: Set(fields.state.trim().to_string()),
        zipcode: Set(fields.zipcode.trim().to_string()),
        date_added: Set(chrono::Utc::now()),
        ..Default::default()
    };
    address.insert(conn).await.map_err(Into::into)
}

/// Creates a shipping address for a customer and/or order.
///
/// # Errors
/// Returns an error if any address field is blank or the insert fails.
#[instrument(skip(db))]
pub async fn create_shipping_address(
    db: &DatabaseConnection,
    customer_id: Option<i64>,
    order_id: Option<i64>,
    fields: NewShippingAddress,
) -> Result<shipping_address::Model> {
    let address = insert_shipping_address(db, customer_id, order_id, fields).await?;
    info!(
        "Recorded shipping address {} for order {:?}",
        address.id, address.order_id
    );
    Ok(address)
}

/// Retrieves a shipping address by ID.
pub async fn get_shipping_address_by_id(
    db: &DatabaseConnection,
    address_id: i64,
) -> Result<Option<shipping_address::Model>> {
    ShippingAddress::find_by_id(address_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Addresses recorded for an order, newest first.
pub async fn get_addresses_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<shipping_address::Model>> {
    ShippingAddress::find()
        .filter(shipping_address::Column::OrderId.eq(order_id))
        .order_by_desc(shipping_address::Column::DateAdded)
        .order_by_desc(shipping_address::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Addresses recorded by a customer, newest first.
pub async fn get_addresses_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<shipping_address::Model>> {
    ShippingAddress::find()
        .filter(shipping_address::Column::CustomerId.eq(customer_id))
        .order_by_desc(shipping_address::Column::DateAdded)
        .order_by_desc(shipping_address::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a shipping address. Returns `false` if it did not exist.
pub async fn delete_shipping_address(db: &DatabaseConnection, address_id: i64) -> Result<bool> {
    let result = ShippingAddress::delete_by_id(address_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
