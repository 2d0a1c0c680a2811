//! Product record - catalog items shown on the Products page.
//!
//! The stock status badge is never stored; it is derived from `stock`.

use crate::{
    core::filter::Filterable,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// Stock level at or below which a product counts as "Low Stock".
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Product catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Phones, headphones, chargers
    Electronics,
    /// Desks, chairs, lamps
    Furniture,
    /// Kitchen and household appliances
    Appliances,
    /// Bags, cases, small add-ons
    Accessories,
    /// Paper goods and office supplies
    Stationery,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Furniture,
        Self::Appliances,
        Self::Accessories,
        Self::Stationery,
    ];

    /// Display label, also the wire and selector value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Furniture => "Furniture",
            Self::Appliances => "Appliances",
            Self::Accessories => "Accessories",
            Self::Stationery => "Stationery",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidValue {
                kind: "product category",
                value: s.to_string(),
            })
    }
}

/// Stock status, derived from the stock count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductStatus {
    /// Comfortably in stock
    Active,
    /// At or below [`LOW_STOCK_THRESHOLD`]
    LowStock,
    /// Nothing left
    OutOfStock,
}

impl ProductStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::LowStock, Self::OutOfStock];

    /// Derives the status for a stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            n if n <= LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::Active,
        }
    }

    /// Display label, also the selector value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A product as listed on the Products page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: i64,
    /// Product name (e.g., "Desk Lamp")
    pub name: String,
    /// Catalog category
    pub category: ProductCategory,
    /// Unit price
    pub price: Decimal,
    /// Units on hand
    pub stock: u32,
    /// Units sold to date
    #[serde(default)]
    pub sales: u32,
}

impl Product {
    /// Stock status derived from `stock`.
    #[must_use]
    pub const fn status(&self) -> ProductStatus {
        ProductStatus::from_stock(self.stock)
    }

    /// Value of the units on hand (`price * stock`).
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.stock)
    }
}

/// Product fields a selector can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProductField {
    /// Product name
    Name,
    /// Category label
    Category,
    /// Derived stock status label
    Status,
}

impl FromStr for ProductField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "status" => Ok(Self::Status),
            other => Err(Error::UnknownField {
                entity: Product::ENTITY,
                field: other.to_string(),
            }),
        }
    }
}

impl Filterable for Product {
    type Field = ProductField;

    const ENTITY: &'static str = "product";
    const SEARCH_FIELDS: &'static [ProductField] = &[ProductField::Name, ProductField::Category];

    fn field_value(&self, field: ProductField) -> Cow<'_, str> {
        match field {
            ProductField::Name => Cow::Borrowed(&self.name),
            ProductField::Category => Cow::Borrowed(self.category.label()),
            ProductField::Status => Cow::Borrowed(self.status().label()),
        }
    }
}
