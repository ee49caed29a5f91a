//! Product entity - A catalog item that can be added to an order.
//!
//! Products are either digital or physical; any physical product in an order
//! makes that order require shipping. The image column holds a path relative
//! to the media root, resolved into a URL by [`crate::core::media`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Headphones", "E-book")
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Digital goods never need shipping
    pub digital: bool,
    /// Image path relative to the media root
    pub image: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A product appears on many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
