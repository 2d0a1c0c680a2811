//! Plain-text rendering of pages, summaries and remote views.
//!
//! Everything here returns a `String`; printing is the caller's job. The
//! filtered rows and the summary block are rendered separately because the
//! summary always describes the full collection.

use crate::{
    client::{DashboardAnalytics, RoutePlan, remote::ViewState},
    core::{
        display::{Badge, HasBadge},
        format::Formatter,
        permission::{ModuleCoverage, group_by_module},
        summary::{Distribution, OrderSummary, ProductSummary, RoleSummary, WallSummary},
    },
    models::{Order, Permission, Product, Role, WallPost},
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt::Write};

/// Shown instead of rows when nothing passes the filters.
pub const EMPTY_STATE: &str = "No records match the current filters.";

/// Width of the distribution bars.
const BAR_WIDTH: usize = 20;

/// Renders one line per row, or [`EMPTY_STATE`].
pub fn rows<T>(records: &[&T], line: impl Fn(&T) -> String) -> String {
    if records.is_empty() {
        return EMPTY_STATE.to_string();
    }

    records
        .iter()
        .map(|record| line(record))
        .collect::<Vec<_>>()
        .join("\n")
}

fn chip(badge: Badge) -> String {
    format!("[{}:{}]", badge.label, badge.tone.as_str())
}

/// `#1  Desk Lamp  Furniture  $45.00  67 in stock  [Active:success]`
#[must_use]
pub fn product_line(product: &Product, fmt: &Formatter) -> String {
    format!(
        "#{:<4} {:<24} {:<12} {:>12} {:>5} in stock  {}",
        product.id,
        product.name,
        product.category.label(),
        fmt.currency(product.price),
        product.stock,
        chip(product.status().badge())
    )
}

/// `ORD-001  John Smith <john@x.io>  $120.00  03/01/2024  [Pending:warning]`
#[must_use]
pub fn order_line(order: &Order, fmt: &Formatter) -> String {
    format!(
        "{:<10} {} <{}>  {}  {}  {} item(s)  {}",
        order.id,
        order.customer,
        order.email,
        fmt.currency(order.total),
        fmt.date(order.date),
        order.items,
        chip(order.status.badge())
    )
}

/// Role name, permission count and users.
#[must_use]
pub fn role_line(role: &Role) -> String {
    format!(
        "{:<18} ({})  {} permission(s), {} user(s)  {}",
        role.display_name,
        role.name,
        role.permissions_count(),
        role.users_count,
        chip(role.badge())
    )
}

/// Title, author, relative time and engagement of one post.
#[must_use]
pub fn wall_line(post: &WallPost, fmt: &Formatter, now: DateTime<Utc>) -> String {
    let pin = if post.is_pinned { "📌 " } else { "" };
    let mut line = format!(
        "{pin}{} {}  by {} ({}), {}  ♥ {}  💬 {}  👁 {}",
        chip(post.kind.badge()),
        post.title,
        post.author.name,
        post.author.role,
        fmt.relative(post.timestamp, now),
        post.reactions.total(),
        post.comments,
        post.views
    );
    if !post.tags.is_empty() {
        let _ = write!(line, "  #{}", post.tags.join(" #"));
    }
    line
}

fn distribution_block<C: Copy + PartialEq>(
    dist: &Distribution<C>,
    label: impl Fn(C) -> String,
    fmt: &Formatter,
) -> String {
    dist.iter()
        .map(|(category, count)| {
            format!(
                "  {:<14} {:>4}  {}",
                label(category),
                count,
                fmt.progress_bar(dist.percentage(category), BAR_WIDTH)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Product header cards.
#[must_use]
pub fn product_summary(summary: &ProductSummary, fmt: &Formatter) -> String {
    format!(
        "Products: {}  Inventory value: {}  Units sold: {}  Needs restock: {}\n{}",
        summary.by_status.total(),
        fmt.currency(summary.inventory_value),
        summary.total_sales,
        summary.needs_restock(),
        distribution_block(&summary.by_status, |s| s.label().to_string(), fmt)
    )
}

/// Order header cards.
#[must_use]
pub fn order_summary(summary: &OrderSummary, fmt: &Formatter) -> String {
    format!(
        "Orders: {}  Revenue: {}  Average order: {}  Cancelled: {}\n{}",
        summary.by_status.total(),
        fmt.currency(summary.revenue),
        fmt.currency(summary.average_order_value),
        fmt.percentage(summary.cancellation_rate()),
        distribution_block(&summary.by_status, |s| s.label().to_string(), fmt)
    )
}

/// Role header cards and the user distribution bars.
#[must_use]
pub fn role_summary(summary: &RoleSummary, fmt: &Formatter) -> String {
    let mut out = format!(
        "Roles: {}  Active: {} ({})  Inactive: {}  Users: {}",
        summary.total,
        summary.active,
        fmt.percentage(summary.active_rate()),
        summary.inactive(),
        summary.total_users
    );
    for share in &summary.shares {
        let _ = write!(
            out,
            "\n  {:<18} {:>4}  {}",
            share.display_name,
            share.users,
            fmt.progress_bar(share.percentage, BAR_WIDTH)
        );
    }
    out
}

/// Wall header cards.
#[must_use]
pub fn wall_summary(summary: &WallSummary, fmt: &Formatter) -> String {
    format!(
        "Posts: {}  Pinned: {}  Engagement: {}  Views: {}\n{}",
        summary.by_kind.total(),
        summary.pinned,
        summary.engagement,
        summary.views,
        distribution_block(&summary.by_kind, |k| k.badge().label.to_string(), fmt)
    )
}

/// Permissions grouped by module. With coverage, each module header shows
/// how many of its permissions the selected role holds.
#[must_use]
pub fn permission_groups(
    permissions: &[Permission],
    coverage: Option<&BTreeMap<&str, ModuleCoverage>>,
    granted: impl Fn(&Permission) -> bool,
) -> String {
    let groups = group_by_module(permissions);
    if groups.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let mut out = String::new();
    for (module, perms) in groups {
        if !out.is_empty() {
            out.push('\n');
        }
        match coverage.and_then(|c| c.get(module)) {
            Some(cov) if cov.is_full() => {
                let _ = write!(out, "{module} ({}/{}, full)", cov.granted, cov.total);
            }
            Some(cov) => {
                let _ = write!(out, "{module} ({}/{})", cov.granted, cov.total);
            }
            None => out.push_str(module),
        }
        for permission in perms {
            let mark = if coverage.is_some() && granted(permission) {
                "x"
            } else {
                " "
            };
            let _ = write!(
                out,
                "\n  [{mark}] {:<10} {}",
                permission.action(),
                permission.display_name
            );
        }
    }
    out
}

fn fields_block(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("  {key}: {s}"),
            other => format!("  {key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Analytics payload as `key: value` lines.
#[must_use]
pub fn analytics(data: &DashboardAnalytics) -> String {
    if data.fields.is_empty() {
        return "Analytics\n  (no metrics for this range)".to_string();
    }
    format!("Analytics\n{}", fields_block(&data.fields))
}

/// Route plan header and fields.
#[must_use]
pub fn route_plan(plan: &RoutePlan) -> String {
    format!("Route plan #{}\n{}", plan.id, fields_block(&plan.fields))
}

/// Renders a remote view: data through `loaded`, otherwise the matching
/// loading, error or not-found panel.
pub fn view<T>(state: &ViewState<T>, loaded: impl Fn(&T) -> String) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Loaded(data) => loaded(data),
        ViewState::Failed(message) => {
            format!("Error: {message}\nRun the command again to retry.")
        }
        ViewState::NotFound(message) => format!("Not found: {message}"),
    }
}
