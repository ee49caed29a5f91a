//! Core business logic, independent of the Discord front end.

/// The derived cart views: shipping requirement, totals, item count
pub mod cart;
/// Completing a cart into a placed order
pub mod checkout;
/// Customer profiles
pub mod customer;
/// Product image URL resolution
pub mod media;
/// Order headers and carts
pub mod order;
/// Order line items
pub mod order_item;
/// Catalog products
pub mod product;
/// Shipping addresses
pub mod shipping;
/// Users (authentication principals)
pub mod user;
