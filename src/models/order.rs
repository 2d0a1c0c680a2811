//! Order record - customer orders shown on the Orders page.

use crate::{
    core::filter::Filterable,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet picked up
    Pending,
    /// Being packed
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled; excluded from revenue
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Display label, also the wire and selector value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidValue {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number (e.g., "ORD-001")
    pub id: String,
    /// Customer display name
    pub customer: String,
    /// Customer email
    pub email: String,
    /// Order total
    pub total: Decimal,
    /// Fulfilment status
    pub status: OrderStatus,
    /// Date the order was placed
    pub date: NaiveDate,
    /// Number of line items
    pub items: u32,
}

/// Order fields a selector can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderField {
    /// Order number
    Id,
    /// Customer name
    Customer,
    /// Customer email
    Email,
    /// Status label
    Status,
}

impl FromStr for OrderField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(Self::Id),
            "customer" => Ok(Self::Customer),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            other => Err(Error::UnknownField {
                entity: Order::ENTITY,
                field: other.to_string(),
            }),
        }
    }
}

impl Filterable for Order {
    type Field = OrderField;

    const ENTITY: &'static str = "order";
    const SEARCH_FIELDS: &'static [OrderField] =
        &[OrderField::Id, OrderField::Customer, OrderField::Email];

    fn field_value(&self, field: OrderField) -> Cow<'_, str> {
        match field {
            OrderField::Id => Cow::Borrowed(&self.id),
            OrderField::Customer => Cow::Borrowed(&self.customer),
            OrderField::Email => Cow::Borrowed(&self.email),
            OrderField::Status => Cow::Borrowed(self.status.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_status_round_trips_through_label() {
        for status in OrderStatus::ALL {
            assert_eq!(status.label().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_deserializes_from_backend_json() {
        let json = r#"{
            "id": "ORD-010",
            "customer": "Ada Lovelace",
            "email": "ada@example.com",
            "total": 129.5,
            "status": "Processing",
            "date": "2024-03-02",
            "items": 3
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, Decimal::new(1295, 1));
        assert_eq!(order.field_value(OrderField::Email), "ada@example.com");
    }
}
