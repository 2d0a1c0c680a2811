//! Domain records displayed by the console.
//!
//! These are plain in-memory values; where they come from (fixtures, the
//! HTTP backend, `SQLite`) is the business of [`crate::source`].

pub mod order;
pub mod product;
pub mod role;
pub mod wall;

pub use order::{Order, OrderField, OrderStatus};
pub use product::{LOW_STOCK_THRESHOLD, Product, ProductCategory, ProductField, ProductStatus};
pub use role::{Permission, PermissionField, Role, RoleField};
pub use wall::{Author, Reactions, WallField, WallPost, WallPostKind};
