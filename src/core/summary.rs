//! Category distribution summaries for the dashboard cards.
//!
//! Summaries are always computed from the full, unfiltered collection. Every
//! percentage is zero-guarded: an empty collection yields 0, never a division
//! error or NaN.

use crate::models::{
    Order, OrderStatus, Product, ProductStatus, Role, WallPost, WallPostKind,
};
use rust_decimal::Decimal;

/// `part / whole * 100`, or 0 when `whole` is 0.
#[must_use]
pub fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    // Counts are page-sized collections; precision loss is irrelevant here.
    #[allow(clippy::cast_precision_loss)]
    let (part, whole) = (part as f64, whole as f64);
    part / whole * 100.0
}

/// Count per category over a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<C> {
    counts: Vec<(C, usize)>,
    total: usize,
}

impl<C: Copy + PartialEq> Distribution<C> {
    /// Number of records in the collection (including ones whose category
    /// is outside the enumeration).
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Count for `category`; 0 for categories outside the enumeration.
    #[must_use]
    pub fn count(&self, category: C) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }

    /// Share of the collection in `category`, 0 for an empty collection.
    #[must_use]
    pub fn percentage(&self, category: C) -> f64 {
        rate(self.count(category), self.total)
    }

    /// `(category, count)` in enumeration order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.counts.iter().copied()
    }
}

/// Counts `records` per category of `categories`, keyed by `key`.
pub fn distribution<T, C, F>(records: &[T], categories: &[C], key: F) -> Distribution<C>
where
    C: Copy + PartialEq,
    F: Fn(&T) -> C,
{
    let mut counts: Vec<(C, usize)> = categories.iter().map(|c| (*c, 0)).collect();
    for record in records {
        let category = key(record);
        if let Some((_, n)) = counts.iter_mut().find(|(c, _)| *c == category) {
            *n += 1;
        }
    }

    Distribution {
        counts,
        total: records.len(),
    }
}

/// Sums `value` over records whose category is not `excluded`.
pub fn sum_excluding<T, C, K, V>(records: &[T], value: V, key: K, excluded: C) -> Decimal
where
    C: PartialEq,
    K: Fn(&T) -> C,
    V: Fn(&T) -> Decimal,
{
    records
        .iter()
        .filter(|record| key(*record) != excluded)
        .map(value)
        .sum()
}

/// Order status counts and revenue for the Orders page header.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Orders per status
    pub by_status: Distribution<OrderStatus>,
    /// Sum of totals, cancelled orders excluded
    pub revenue: Decimal,
    /// Revenue divided by non-cancelled orders, 0 when there are none
    pub average_order_value: Decimal,
}

impl OrderSummary {
    /// Builds the summary from the full order list.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let by_status = distribution(orders, &OrderStatus::ALL, |o| o.status);
        let revenue = sum_excluding(orders, |o| o.total, |o| o.status, OrderStatus::Cancelled);
        let billable = by_status.total() - by_status.count(OrderStatus::Cancelled);
        let average_order_value = if billable == 0 {
            Decimal::ZERO
        } else {
            (revenue / Decimal::from(billable)).round_dp(2)
        };

        Self {
            by_status,
            revenue,
            average_order_value,
        }
    }

    /// Share of orders that were cancelled.
    #[must_use]
    pub fn cancellation_rate(&self) -> f64 {
        self.by_status.percentage(OrderStatus::Cancelled)
    }
}

/// Inventory figures for the Products page header.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    /// Products per derived stock status
    pub by_status: Distribution<ProductStatus>,
    /// Sum of `price * stock`
    pub inventory_value: Decimal,
    /// Units sold across the catalog
    pub total_sales: u64,
}

impl ProductSummary {
    /// Builds the summary from the full product list.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            by_status: distribution(products, &ProductStatus::ALL, Product::status),
            inventory_value: products.iter().map(Product::stock_value).sum(),
            total_sales: products.iter().map(|p| u64::from(p.sales)).sum(),
        }
    }

    /// Products needing attention (low or out of stock).
    #[must_use]
    pub fn needs_restock(&self) -> usize {
        self.by_status.count(ProductStatus::LowStock) + self.by_status.count(ProductStatus::OutOfStock)
    }
}

/// One bar of the role distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleShare {
    /// Role id
    pub role_id: i64,
    /// Role display name
    pub display_name: String,
    /// Users holding the role
    pub users: u32,
    /// Share of all role assignments, 0 when nobody holds any role
    pub percentage: f64,
}

/// Role statistics for the Roles page header.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSummary {
    /// Number of roles
    pub total: usize,
    /// Roles with `is_active`
    pub active: usize,
    /// Sum of users over all roles
    pub total_users: u64,
    /// Per-role user share, in input order
    pub shares: Vec<RoleShare>,
}

impl RoleSummary {
    /// Builds the summary from the full role list.
    #[must_use]
    pub fn from_roles(roles: &[Role]) -> Self {
        let total_users: u64 = roles.iter().map(|r| u64::from(r.users_count)).sum();
        let shares = roles
            .iter()
            .map(|role| RoleShare {
                role_id: role.id,
                display_name: role.display_name.clone(),
                users: role.users_count,
                percentage: user_share(role.users_count, total_users),
            })
            .collect();

        Self {
            total: roles.len(),
            active: roles.iter().filter(|r| r.is_active).count(),
            total_users,
            shares,
        }
    }

    /// Roles without `is_active`.
    #[must_use]
    pub const fn inactive(&self) -> usize {
        self.total - self.active
    }

    /// Share of roles that are active, 0 when there are no roles.
    #[must_use]
    pub fn active_rate(&self) -> f64 {
        rate(self.active, self.total)
    }
}

fn user_share(users: u32, total_users: u64) -> f64 {
    if total_users == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = total_users as f64;
    f64::from(users) / total * 100.0
}

/// Feed statistics for the Wall page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallSummary {
    /// Posts per kind
    pub by_kind: Distribution<WallPostKind>,
    /// Pinned posts
    pub pinned: usize,
    /// Likes, hearts and comments over all posts
    pub engagement: u64,
    /// Views over all posts
    pub views: u64,
}

impl WallSummary {
    /// Builds the summary from the full post list.
    #[must_use]
    pub fn from_posts(posts: &[WallPost]) -> Self {
        Self {
            by_kind: distribution(posts, &WallPostKind::ALL, |p| p.kind),
            pinned: posts.iter().filter(|p| p.is_pinned).count(),
            engagement: posts.iter().map(|p| u64::from(p.engagement())).sum(),
            views: posts.iter().map(|p| u64::from(p.views)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_rate_guards_empty_collection() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 0), 0.0);
        assert_eq!(rate(1, 4), 25.0);
    }

    #[test]
    fn test_distribution_includes_empty_categories() {
        let orders = vec![order("ORD-1", "Ann", "ann@x.io", "10.00", OrderStatus::Pending)];
        let dist = distribution(&orders, &OrderStatus::ALL, |o| o.status);

        assert_eq!(dist.total(), 1);
        assert_eq!(dist.iter().count(), OrderStatus::ALL.len());
        assert_eq!(dist.count(OrderStatus::Pending), 1);
        assert_eq!(dist.count(OrderStatus::Shipped), 0);
        assert_eq!(dist.percentage(OrderStatus::Pending), 100.0);
    }

    #[test]
    fn test_distribution_of_empty_collection_is_all_zero() {
        let orders: Vec<Order> = Vec::new();
        let dist = distribution(&orders, &OrderStatus::ALL, |o| o.status);

        assert_eq!(dist.total(), 0);
        for status in OrderStatus::ALL {
            assert_eq!(dist.count(status), 0);
            assert_eq!(dist.percentage(status), 0.0);
        }
    }

    #[test]
    fn test_order_revenue_excludes_cancelled() {
        let orders = sample_orders();
        let summary = OrderSummary::from_orders(&orders);

        // 120.00 + 75.50 + 300.00 + 45.25 ; the 999.99 cancelled order is excluded
        assert_eq!(summary.revenue, Decimal::new(54075, 2));
        assert_eq!(summary.by_status.count(OrderStatus::Cancelled), 1);
        assert_eq!(summary.average_order_value, Decimal::new(13519, 2));
        assert_eq!(summary.cancellation_rate(), 20.0);
    }

    #[test]
    fn test_order_summary_of_nothing_is_zero() {
        let summary = OrderSummary::from_orders(&[]);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
        assert_eq!(summary.cancellation_rate(), 0.0);
    }

    #[test]
    fn test_only_cancelled_orders_have_zero_average() {
        let orders = vec![order("ORD-9", "Bo", "bo@x.io", "50.00", OrderStatus::Cancelled)];
        let summary = OrderSummary::from_orders(&orders);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_product_summary() {
        let products = vec![
            product(1, "Desk Lamp", "Furniture", "45.00", 67),
            product(2, "Coffee Maker", "Appliances", "89.99", 12),
            product(3, "Stapler", "Stationery", "8.00", 0),
        ];
        let summary = ProductSummary::from_products(&products);

        assert_eq!(summary.by_status.count(ProductStatus::Active), 1);
        assert_eq!(summary.by_status.count(ProductStatus::LowStock), 1);
        assert_eq!(summary.by_status.count(ProductStatus::OutOfStock), 1);
        assert_eq!(summary.needs_restock(), 2);
        // 45 * 67 + 89.99 * 12
        assert_eq!(summary.inventory_value, Decimal::new(409488, 2));
    }

    #[test]
    fn test_role_summary_active_rate_and_shares() {
        let roles = sample_roles();
        let summary = RoleSummary::from_roles(&roles);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 3);
        assert_eq!(summary.inactive(), 1);
        assert_eq!(summary.active_rate(), 75.0);
        assert_eq!(summary.total_users, 20);
        assert_eq!(summary.shares[0].percentage, 10.0);
        let sum: f64 = summary.shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_role_summary_without_users_or_roles() {
        let empty = RoleSummary::from_roles(&[]);
        assert_eq!(empty.active_rate(), 0.0);
        assert!(empty.shares.is_empty());

        let mut roles = sample_roles();
        for role in &mut roles {
            role.users_count = 0;
        }
        let summary = RoleSummary::from_roles(&roles);
        assert!(summary.shares.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_wall_summary() {
        let posts = sample_wall_posts();
        let summary = WallSummary::from_posts(&posts);

        assert_eq!(summary.by_kind.total(), posts.len());
        assert_eq!(summary.pinned, 1);
        assert_eq!(summary.by_kind.count(WallPostKind::Announcement), 2);
    }
}
