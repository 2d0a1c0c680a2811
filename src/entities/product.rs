//! Product entity - Persistence row behind the Products page.
//!
//! Categories are stored by display label and money as `REAL`; the mapping
//! into [`crate::models::Product`] validates both. Stock status is never
//! stored, it is derived from `stock` on the domain side.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Name of the product (e.g., "Desk Lamp", "Coffee Maker")
    pub name: String,
    /// Category display label (e.g., "Furniture")
    pub category: String,
    /// Unit price in dollars
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Units sold to date
    pub sales: i64,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Products have no relationships in the console schema
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
