//! Entity module - Contains the SeaORM entity definitions for the database.
//! These entities are persistence rows; [`crate::source::db`] maps them into
//! the domain records of [`crate::models`].

pub mod order;
pub mod product;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
