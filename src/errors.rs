//! Unified error type for the storefront.

use thiserror::Error;

/// Every failure the storefront can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input or configuration that is not tied to a specific record
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Anything returned by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A price or total that is not a finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// A quantity that is not allowed for the operation
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected value
        quantity: i32,
    },

    /// No product with the given name or ID
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or ID used for the lookup
        name: String,
    },

    /// No customer with the given ID
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Customer ID
        id: i64,
    },

    /// No order with the given ID
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Order ID
        id: i64,
    },

    /// No line item with the given ID
    #[error("Order item not found: {id}")]
    OrderItemNotFound {
        /// Order item ID
        id: i64,
    },

    /// A line item whose product was deleted
    #[error("Order item {order_item_id} no longer references a product")]
    MissingProduct {
        /// The dangling line item
        order_item_id: i64,
    },

    /// The order has already been checked out
    #[error("Order {id} is already complete")]
    OrderAlreadyComplete {
        /// Order ID
        id: i64,
    },

    /// Checkout was attempted on a cart with no items
    #[error("Order {id} has no items")]
    EmptyCart {
        /// Order ID
        id: i64,
    },

    /// The order contains physical goods but no address was given
    #[error("Order {id} requires a shipping address")]
    ShippingAddressRequired {
        /// Order ID
        id: i64,
    },

    /// A product image path that cannot be turned into a URL
    #[error("Cannot resolve image '{path}': {reason}")]
    ImageResolution {
        /// The stored image path
        path: String,
        /// Why resolution failed
        reason: String,
    },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise failure while talking to Discord
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
