//! Role and permission records for the access-management pages.

use crate::{
    core::filter::Filterable,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeSet, str::FromStr};

/// A role that groups permissions and is assigned to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier
    pub id: i64,
    /// Machine name (e.g., "admin")
    pub name: String,
    /// Human-readable name (e.g., "Administrator")
    pub display_name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Inactive roles stay assigned but grant nothing
    pub is_active: bool,
    /// Granted permission ids
    #[serde(default)]
    pub permissions: BTreeSet<i64>,
    /// Number of users holding this role
    #[serde(default)]
    pub users_count: u32,
}

impl Role {
    /// Label used for the status column and selector.
    pub const ACTIVE_LABEL: &'static str = "Active";
    /// Label for inactive roles.
    pub const INACTIVE_LABEL: &'static str = "Inactive";

    /// Number of granted permissions, always recomputed from the set.
    #[must_use]
    pub fn permissions_count(&self) -> usize {
        self.permissions.len()
    }

    /// Whether `permission_id` is granted by this role.
    #[must_use]
    pub fn has_permission(&self, permission_id: i64) -> bool {
        self.permissions.contains(&permission_id)
    }

    /// Active/Inactive label.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_active {
            Self::ACTIVE_LABEL
        } else {
            Self::INACTIVE_LABEL
        }
    }
}

/// Role fields a selector can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoleField {
    /// Machine name
    Name,
    /// Human-readable name
    DisplayName,
    /// Description
    Description,
    /// Active/Inactive label
    Status,
}

impl FromStr for RoleField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "display_name" => Ok(Self::DisplayName),
            "description" => Ok(Self::Description),
            "status" => Ok(Self::Status),
            other => Err(Error::UnknownField {
                entity: Role::ENTITY,
                field: other.to_string(),
            }),
        }
    }
}

impl Filterable for Role {
    type Field = RoleField;

    const ENTITY: &'static str = "role";
    const SEARCH_FIELDS: &'static [RoleField] = &[
        RoleField::Name,
        RoleField::DisplayName,
        RoleField::Description,
    ];

    fn field_value(&self, field: RoleField) -> Cow<'_, str> {
        match field {
            RoleField::Name => Cow::Borrowed(&self.name),
            RoleField::DisplayName => Cow::Borrowed(&self.display_name),
            RoleField::Description => Cow::Borrowed(&self.description),
            RoleField::Status => Cow::Borrowed(self.status_label()),
        }
    }
}

/// A single permission, named `module.action` (e.g., "orders.view")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique identifier
    pub id: i64,
    /// Dotted name
    pub name: String,
    /// Human-readable name
    pub display_name: String,
}

impl Permission {
    /// Module the permission belongs to: the part before the first dot, or
    /// the whole name when there is none.
    #[must_use]
    pub fn module(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(module, _)| module)
    }

    /// Action part after the first dot, empty when there is none.
    #[must_use]
    pub fn action(&self) -> &str {
        self.name.split_once('.').map_or("", |(_, action)| action)
    }
}

/// Permission fields a selector can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PermissionField {
    /// Dotted name
    Name,
    /// Human-readable name
    DisplayName,
    /// Module prefix
    Module,
}

impl FromStr for PermissionField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "display_name" => Ok(Self::DisplayName),
            "module" => Ok(Self::Module),
            other => Err(Error::UnknownField {
                entity: Permission::ENTITY,
                field: other.to_string(),
            }),
        }
    }
}

impl Filterable for Permission {
    type Field = PermissionField;

    const ENTITY: &'static str = "permission";
    const SEARCH_FIELDS: &'static [PermissionField] =
        &[PermissionField::Name, PermissionField::DisplayName];

    fn field_value(&self, field: PermissionField) -> Cow<'_, str> {
        match field {
            PermissionField::Name => Cow::Borrowed(&self.name),
            PermissionField::DisplayName => Cow::Borrowed(&self.display_name),
            PermissionField::Module => Cow::Borrowed(self.module()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn permission(id: i64, name: &str) -> Permission {
        Permission {
            id,
            name: name.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_permission_module_and_action() {
        let p = permission(1, "orders.view");
        assert_eq!(p.module(), "orders");
        assert_eq!(p.action(), "view");

        let nested = permission(2, "reports.sales.export");
        assert_eq!(nested.module(), "reports");
        assert_eq!(nested.action(), "sales.export");

        let bare = permission(3, "superuser");
        assert_eq!(bare.module(), "superuser");
        assert_eq!(bare.action(), "");
    }

    #[test]
    fn test_permissions_count_ignores_payload_count() {
        let json = r#"{
            "id": 1,
            "name": "editor",
            "display_name": "Editor",
            "description": "Edits content",
            "is_active": true,
            "permissions": [3, 1, 3, 2],
            "permissions_count": 99,
            "users_count": 4
        }"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.permissions_count(), 3);
        assert!(role.has_permission(2));
        assert!(!role.has_permission(4));
    }

    #[test]
    fn test_status_label() {
        let json = r#"{"id":2,"name":"legacy","display_name":"Legacy","is_active":false}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.field_value(RoleField::Status), "Inactive");
        assert_eq!(role.permissions_count(), 0);
    }
}
