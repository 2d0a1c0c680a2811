//! Shared test utilities for the console data layer.
//!
//! This module provides sample collections mirroring the console's mock
//! pages, small record constructors with sensible defaults, and an in-memory
//! `SQLite` setup for the database-backed source.

use crate::{
    errors::Result,
    models::{
        Author, Order, OrderStatus, Permission, Product, Reactions, Role, WallPost, WallPostKind,
    },
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a decimal literal used in tests.
///
/// # Panics
/// Panics on an invalid literal; test input is always well-formed.
#[allow(clippy::unwrap_used)]
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Creates a product with zero sales.
///
/// # Panics
/// Panics on an unknown category label.
#[allow(clippy::unwrap_used)]
pub fn product(id: i64, name: &str, category: &str, price: &str, stock: u32) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.parse().unwrap(),
        price: dec(price),
        stock,
        sales: 0,
    }
}

/// Creates a single-item order placed on 2024-03-01.
pub fn order(id: &str, customer: &str, email: &str, total: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        customer: customer.to_string(),
        email: email.to_string(),
        total: dec(total),
        status,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
        items: 1,
    }
}

/// Creates a role granting `permissions`.
pub fn role(
    id: i64,
    name: &str,
    display_name: &str,
    description: &str,
    is_active: bool,
    permissions: &[i64],
    users_count: u32,
) -> Role {
    Role {
        id,
        name: name.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        is_active,
        permissions: permissions.iter().copied().collect(),
        users_count,
    }
}

/// Creates a permission with a display name derived from the dotted name.
pub fn permission(id: i64, name: &str) -> Permission {
    Permission {
        id,
        name: name.to_string(),
        display_name: name.replace('.', " "),
    }
}

/// Creates an unpinned wall post posted at 2024-05-01 09:00 UTC.
pub fn wall_post(id: i64, kind: WallPostKind, title: &str, content: &str) -> WallPost {
    WallPost {
        id,
        kind,
        title: title.to_string(),
        content: content.to_string(),
        author: Author {
            name: "Jordan Park".to_string(),
            role: "Operations".to_string(),
        },
        timestamp: Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .unwrap_or_default(),
        is_pinned: false,
        reactions: Reactions::default(),
        comments: 0,
        views: 0,
        tags: Vec::new(),
    }
}

/// Products page sample: one of each status across several categories.
pub fn sample_products() -> Vec<Product> {
    let mut products = vec![
        product(1, "Wireless Headphones", "Electronics", "199.99", 45),
        product(2, "Desk Lamp", "Furniture", "45.00", 67),
        product(3, "Coffee Maker", "Appliances", "89.99", 12),
        product(4, "Laptop Sleeve", "Accessories", "29.50", 0),
        product(5, "Ergonomic Chair", "Furniture", "349.00", 8),
        product(6, "Blender", "Appliances", "59.90", 31),
        product(7, "Notebook Set", "Stationery", "12.00", 150),
    ];
    for (p, sales) in products.iter_mut().zip([320, 210, 145, 88, 40, 97, 510]) {
        p.sales = sales;
    }
    products
}

/// Orders page sample: exactly one order per status.
pub fn sample_orders() -> Vec<Order> {
    vec![
        order("ORD-001", "John Smith", "john.smith@gmail.com", "120.00", OrderStatus::Pending),
        order("ORD-002", "Sarah Johnson", "sarah.j@gmail.com", "75.50", OrderStatus::Shipped),
        order("ORD-003", "Mike Brown", "mike.brown@yahoo.com", "300.00", OrderStatus::Delivered),
        order("ORD-004", "Emily Davis", "emily@outlook.com", "45.25", OrderStatus::Processing),
        order("ORD-005", "Chris Wilson", "chris.w@outlook.com", "999.99", OrderStatus::Cancelled),
    ]
}

/// Roles page sample: 20 users across four roles, one role inactive.
pub fn sample_roles() -> Vec<Role> {
    vec![
        role(1, "admin", "Administrator", "Full access; can manage every module", true, &[1, 2, 3, 4, 5, 6], 2),
        role(2, "manager", "Store Manager", "Manages orders and products", true, &[1, 2, 3, 4], 8),
        role(3, "editor", "Content Editor", "Edits wall posts and product copy", false, &[3, 5], 6),
        role(4, "viewer", "Viewer", "Read-only access to reports", true, &[1], 4),
    ]
}

/// Permissions across three modules.
pub fn sample_permissions() -> Vec<Permission> {
    vec![
        permission(1, "orders.view"),
        permission(2, "orders.edit"),
        permission(3, "products.view"),
        permission(4, "products.edit"),
        permission(5, "wall.post"),
        permission(6, "roles.manage"),
    ]
}

/// Wall sample: two announcements (the first pinned), one of each other kind.
pub fn sample_wall_posts() -> Vec<WallPost> {
    let mut posts = vec![
        wall_post(1, WallPostKind::Update, "Warehouse move", "The team moves to the new site on Friday"),
        wall_post(2, WallPostKind::Announcement, "Quarterly all-hands", "The whole team meets Thursday at 10"),
        wall_post(3, WallPostKind::News, "Supplier news", "Our main supplier opened a second plant"),
        wall_post(4, WallPostKind::Announcement, "New expense policy", "Receipts are now required above $50"),
        wall_post(5, WallPostKind::Celebration, "Record month", "March beat every sales target"),
    ];
    posts[1].is_pinned = true;
    posts[1].tags = vec!["company".to_string(), "Meeting".to_string()];
    posts[1].reactions = Reactions { likes: 10, hearts: 4 };
    posts[1].comments = 3;
    posts[1].views = 120;
    posts[4].tags = vec!["sales".to_string()];
    posts[4].reactions = Reactions { likes: 25, hearts: 12 };
    posts[4].views = 300;
    posts
}
