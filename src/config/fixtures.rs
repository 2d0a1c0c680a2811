//! Mock record loading from a fixtures TOML file
//!
//! The console's pages used to carry their mock arrays inline. They now live
//! in one TOML file with a table array per entity, and feed
//! [`crate::source::StaticSource`] or seed the database.

use crate::{
    errors::{Error, Result},
    models::{Order, Permission, Product, Role, WallPost},
};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use tracing::info;

/// Every mock collection, each possibly empty
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Fixtures {
    /// `[[products]]`
    pub products: Vec<Product>,
    /// `[[orders]]`
    pub orders: Vec<Order>,
    /// `[[roles]]`
    pub roles: Vec<Role>,
    /// `[[permissions]]`
    pub permissions: Vec<Permission>,
    /// `[[wall_posts]]`
    pub wall_posts: Vec<WallPost>,
}

impl Fixtures {
    /// Parses fixtures from TOML text and checks id uniqueness.
    ///
    /// # Errors
    /// Returns [`Error::Config`] on invalid TOML or a duplicated id.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let fixtures: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse fixtures: {e}"),
        })?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    fn validate(&self) -> Result<()> {
        ensure_unique("product", self.products.iter().map(|p| p.id.to_string()))?;
        ensure_unique("order", self.orders.iter().map(|o| o.id.clone()))?;
        ensure_unique("role", self.roles.iter().map(|r| r.id.to_string()))?;
        ensure_unique("permission", self.permissions.iter().map(|p| p.id.to_string()))?;
        ensure_unique("wall post", self.wall_posts.iter().map(|p| p.id.to_string()))
    }
}

fn ensure_unique(entity: &str, ids: impl Iterator<Item = String>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(Error::Config {
                message: format!("Duplicate {entity} id '{id}' in fixtures"),
            });
        }
    }
    Ok(())
}

/// Loads fixtures from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or a record is malformed
/// - An id appears twice within one entity
pub fn load_fixtures<P: AsRef<Path>>(path: P) -> Result<Fixtures> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read fixtures file {}: {e}", path.display()),
    })?;

    let fixtures = Fixtures::from_toml(&contents)?;
    info!(
        "Loaded fixtures: {} products, {} orders, {} roles, {} permissions, {} wall posts",
        fixtures.products.len(),
        fixtures.orders.len(),
        fixtures.roles.len(),
        fixtures.permissions.len(),
        fixtures.wall_posts.len()
    );
    Ok(fixtures)
}
