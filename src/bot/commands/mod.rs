//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Cart commands
pub mod cart;

/// Catalog browsing
pub mod catalog;

/// Checkout and order history
pub mod checkout;

/// General utility commands
pub mod general;

/// Product management commands
pub mod product;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use cart::*;
pub use catalog::*;
pub use checkout::*;
pub use general::*;
pub use product::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        catalog(),
        product_manage(),
        add_to_cart(),
        remove_from_cart(),
        cart(),
        checkout(),
        orders(),
        profile(),
    ]
}
