//! Checkout - Turning a cart into a placed order.
//!
//! [`process_order`] runs inside one database transaction: the transaction
//! ID, the completion flag and the shipping address are committed together
//! or not at all. The order is only marked complete when the total the
//! customer was shown matches the cart total at the moment of checkout;
//! otherwise the transaction ID is recorded and the cart stays open.

use crate::{
    core::{
        cart::load_cart,
        shipping::{NewShippingAddress, insert_shipping_address},
    },
    entities::{order, shipping_address},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Largest difference between submitted and computed totals still treated as equal.
pub const TOTAL_TOLERANCE: f64 = 0.005;

/// What the customer submits at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    /// The total the customer agreed to pay
    pub submitted_total: f64,
    /// Payment reference; generated from the current time when absent.
    /// The Discord `/checkout` command always supplies one derived from the interaction ID.
    pub transaction_id: Option<String>,
    /// Required when the cart holds physical goods
    pub shipping: Option<NewShippingAddress>,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The order after checkout
    pub order: order::Model,
    /// Cart total computed at checkout
    pub cart_total: f64,
    /// Units in the order
    pub item_count: i64,
    /// The address stored for a completed physical order
    pub shipping_address: Option<shipping_address::Model>,
}

impl CheckoutReceipt {
    /// Whether the order was completed (the submitted total matched).
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.order.complete
    }
}

/// Builds a transaction ID from the current UTC time.
#[must_use]
pub fn generate_transaction_id() -> String {
    chrono::Utc::now().timestamp_micros().to_string()
}

/// Checks out an order.
///
/// # Errors
/// Returns an error if:
/// - The submitted total is not finite
/// - The order does not exist, is already complete, or has no items
/// - A line's product was deleted
/// - The cart needs shipping and no valid address was given
/// - A database operation fails
#[instrument(skip(db, request))]
pub async fn process_order(
    db: &DatabaseConnection,
    order_id: i64,
    request: CheckoutRequest,
) -> Result<CheckoutReceipt> {
    if !request.submitted_total.is_finite() {
        return Err(Error::InvalidAmount {
            amount: request.submitted_total,
        });
    }

    let txn = db.begin().await?;

    let cart = load_cart(&txn, order_id).await?;
    if cart.order.complete {
        return Err(Error::OrderAlreadyComplete { id: order_id });
    }
    if cart.is_empty() {
        return Err(Error::EmptyCart { id: order_id });
    }

    let cart_total = cart.total()?;
    let requires_shipping = cart.requires_shipping()?;
    let totals_match = (request.submitted_total - cart_total).abs() < TOTAL_TOLERANCE;

    let fields = if requires_shipping {
        let fields = request
            .shipping
            .ok_or(Error::ShippingAddressRequired { id: order_id })?;
        fields.validate()?;
        Some(fields)
    } else {
        None
    };

    // An order left open gets no address; the next attempt supplies it again
    let shipping_address = match fields {
        Some(fields) if totals_match => Some(
            insert_shipping_address(&txn, cart.order.customer_id, Some(order_id), fields).await?,
        ),
        _ => None,
    };

    let transaction_id = request
        .transaction_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_transaction_id);

    let mut active: order::ActiveModel = cart.order.clone().into();
    active.transaction_id = Set(Some(transaction_id));
    if totals_match {
        active.complete = Set(true);
    }
    let order = active.update(&txn).await?;

    txn.commit().await?;

    if order.complete {
        info!(
            "Order {} completed: total {cart_total:.2}, transaction {:?}",
            order.id, order.transaction_id
        );
    } else {
        warn!(
            "Order {} left open: submitted {:.2} but cart total is {cart_total:.2}",
            order.id, request.submitted_total
        );
    }

    Ok(CheckoutReceipt {
        order,
        cart_total,
        item_count: cart.item_count(),
        shipping_address,
    })
}
