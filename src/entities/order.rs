//! Order entity - Persistence row behind the Orders page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Order number (e.g., "ORD-001")
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Customer display name
    pub customer: String,
    /// Customer email address
    pub email: String,
    /// Order total in dollars
    pub total: f64,
    /// Status label: Pending, Processing, Shipped, Delivered or Cancelled
    pub status: String,
    /// Date the order was placed
    pub date: Date,
    /// Number of line items
    pub items: i64,
}

/// Orders have no relationships in the console schema
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
