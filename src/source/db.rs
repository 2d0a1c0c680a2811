//! `SQLite`-backed record source for Products and Orders.
//!
//! Rows are mapped into domain records on the way out; a row that does not
//! map (unknown category, negative stock, non-finite price) fails the whole
//! fetch rather than being silently skipped.

use super::RecordSource;
use crate::{
    entities::{self, order, product},
    errors::{Error, Result},
    models::{Order, Product},
};
use async_trait::async_trait;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, warn};

/// Database connection wrapper implementing [`RecordSource`].
#[derive(Debug, Clone)]
pub struct DbSource {
    db: DatabaseConnection,
}

impl DbSource {
    /// Wraps an open connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Looks up one visible product.
    ///
    /// # Errors
    /// [`Error::NotFound`] when the product does not exist or is deleted.
    pub async fn product_by_id(&self, id: i64) -> Result<Product> {
        entities::Product::find_by_id(id)
            .filter(product::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "product",
                id: id.to_string(),
            })?
            .try_into()
    }

    /// Inserts or refreshes products from fixtures in one transaction.
    ///
    /// An existing visible product is left alone; a soft-deleted one is
    /// re-enabled with the fixture values; a missing one is inserted.
    /// Returns how many rows were written.
    pub async fn seed_products(&self, products: &[Product]) -> Result<usize> {
        info!("Seeding {} products", products.len());
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().naive_utc();
        let mut written = 0;

        for p in products {
            let existing = entities::Product::find_by_id(p.id).one(&txn).await?;
            match existing {
                Some(row) if !row.is_deleted => {
                    debug!("Product {} '{}' already exists. Skipping.", p.id, p.name);
                }
                Some(row) => {
                    info!("Re-enabling soft-deleted product {} '{}'", p.id, p.name);
                    let mut active: product::ActiveModel = row.into();
                    active.name = Set(p.name.clone());
                    active.category = Set(p.category.label().to_string());
                    active.price = Set(to_real(p.price)?);
                    active.stock = Set(i64::from(p.stock));
                    active.sales = Set(i64::from(p.sales));
                    active.is_deleted = Set(false);
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                    written += 1;
                }
                None => {
                    product::ActiveModel {
                        id: Set(p.id),
                        name: Set(p.name.clone()),
                        category: Set(p.category.label().to_string()),
                        price: Set(to_real(p.price)?),
                        stock: Set(i64::from(p.stock)),
                        sales: Set(i64::from(p.sales)),
                        is_deleted: Set(false),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await?;
                    written += 1;
                }
            }
        }

        txn.commit().await?;
        Ok(written)
    }

    /// Inserts orders that are not present yet. Returns how many were inserted.
    pub async fn seed_orders(&self, orders: &[Order]) -> Result<usize> {
        info!("Seeding {} orders", orders.len());
        let txn = self.db.begin().await?;
        let mut written = 0;

        for o in orders {
            if entities::Order::find_by_id(o.id.clone())
                .one(&txn)
                .await?
                .is_some()
            {
                debug!("Order {} already exists. Skipping.", o.id);
                continue;
            }

            order::ActiveModel {
                id: Set(o.id.clone()),
                customer: Set(o.customer.clone()),
                email: Set(o.email.clone()),
                total: Set(to_real(o.total)?),
                status: Set(o.status.label().to_string()),
                date: Set(o.date),
                items: Set(i64::from(o.items)),
            }
            .insert(&txn)
            .await?;
            written += 1;
        }

        txn.commit().await?;
        Ok(written)
    }
}

#[async_trait]
impl RecordSource<Product> for DbSource {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        entities::Product::find()
            .filter(product::Column::IsDeleted.eq(false))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }
}

#[async_trait]
impl RecordSource<Order> for DbSource {
    async fn fetch_all(&self) -> Result<Vec<Order>> {
        entities::Order::find()
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }
}

impl TryFrom<product::Model> for Product {
    type Error = Error;

    fn try_from(row: product::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            category: row.category.parse()?,
            price: to_money(row.price)?,
            stock: to_count("product stock", row.stock)?,
            sales: to_count("product sales", row.sales)?,
            name: row.name,
        })
    }
}

impl TryFrom<order::Model> for Order {
    type Error = Error;

    fn try_from(row: order::Model) -> Result<Self> {
        Ok(Self {
            status: row.status.parse()?,
            total: to_money(row.total)?,
            items: to_count("order items", row.items)?,
            id: row.id,
            customer: row.customer,
            email: row.email,
            date: row.date,
        })
    }
}

fn to_money(value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|_| Error::InvalidValue {
            kind: "amount",
            value: value.to_string(),
        })
}

fn to_real(value: Decimal) -> Result<f64> {
    value.to_f64().ok_or_else(|| Error::InvalidValue {
        kind: "amount",
        value: value.to_string(),
    })
}

fn to_count(kind: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        warn!("Rejecting {} value {}", kind, value);
        Error::InvalidValue {
            kind,
            value: value.to_string(),
        }
    })
}
