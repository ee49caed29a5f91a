//! Derived order views: shipping requirement, cart total, cart item count.
//!
//! None of these are stored. [`load_cart`] reads an order together with its
//! line items and their products, and the [`Cart`] methods compute each view
//! from that snapshot on demand.

use crate::{
    entities::{Order, OrderItem, Product, order, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};

/// A line item together with the product it references, if that still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The stored line item
    pub item: order_item::Model,
    /// The referenced product; `None` once the product has been deleted
    pub product: Option<product::Model>,
}

impl CartLine {
    /// The line's product, or [`Error::MissingProduct`] if it was deleted.
    pub fn product(&self) -> Result<&product::Model> {
        self.product.as_ref().ok_or(Error::MissingProduct {
            order_item_id: self.item.id,
        })
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    /// Returns [`Error::MissingProduct`] if the line's product was deleted.
    pub fn total(&self) -> Result<f64> {
        Ok(self.item.total(self.product()?))
    }
}

/// An order and its current lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// The order header
    pub order: order::Model,
    /// Line items, oldest first
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Whether the order has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if any line holds a physical (non-digital) product.
    ///
    /// Every line is checked, so a line with a deleted product is an error even
    /// when another line already requires shipping.
    pub fn requires_shipping(&self) -> Result<bool> {
        self.lines
            .iter()
            .try_fold(false, |shipping, line| -> Result<bool> {
                Ok(shipping | !line.product()?.digital)
            })
    }

    /// Sum of all line totals; 0.0 for an empty cart.
    pub fn total(&self) -> Result<f64> {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Sum of all line quantities; 0 for an empty cart.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| i64::from(line.item.quantity))
            .sum()
    }
}

/// Reads an order with its lines and their products.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist, or a database error.
pub async fn load_cart<C>(conn: &C, order_id: i64) -> Result<Cart>
where
    C: ConnectionTrait,
{
    let order = Order::find_by_id(order_id)
        .one(conn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let lines = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::DateAdded)
        .order_by_asc(order_item::Column::Id)
        .find_also_related(Product)
        .all(conn)
        .await?
        .into_iter()
        .map(|(item, product)| CartLine { item, product })
        .collect();

    Ok(Cart { order, lines })
}
