//! Permission grouping for the role editor and permission matrix.

use crate::models::{Permission, Role};
use std::collections::BTreeMap;

/// Groups permissions by module (the prefix before the dot). Modules come out
/// in name order; permissions keep their input order within a module.
#[must_use]
pub fn group_by_module(permissions: &[Permission]) -> BTreeMap<&str, Vec<&Permission>> {
    let mut groups: BTreeMap<&str, Vec<&Permission>> = BTreeMap::new();
    for permission in permissions {
        groups.entry(permission.module()).or_default().push(permission);
    }
    groups
}

/// Granted versus available permissions for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCoverage {
    /// Permissions of the module the role holds
    pub granted: usize,
    /// Permissions the module defines
    pub total: usize,
}

impl ModuleCoverage {
    /// Every permission of the module is granted.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.total > 0 && self.granted == self.total
    }
}

/// Per-module coverage of `role` over the known `permissions`.
///
/// Permission ids on the role that are not in `permissions` are ignored.
#[must_use]
pub fn granted_by_module<'a>(
    role: &Role,
    permissions: &'a [Permission],
) -> BTreeMap<&'a str, ModuleCoverage> {
    group_by_module(permissions)
        .into_iter()
        .map(|(module, perms)| {
            let granted = perms.iter().filter(|p| role.has_permission(p.id)).count();
            (
                module,
                ModuleCoverage {
                    granted,
                    total: perms.len(),
                },
            )
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_group_by_module() {
        let permissions = sample_permissions();
        let groups = group_by_module(&permissions);

        let modules: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(modules, vec!["orders", "products", "roles", "wall"]);

        let orders: Vec<&str> = groups["orders"].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(orders, vec!["orders.view", "orders.edit"]);
    }

    #[test]
    fn test_group_by_module_empty() {
        assert!(group_by_module(&[]).is_empty());
    }

    #[test]
    fn test_granted_by_module() {
        let permissions = sample_permissions();
        let roles = sample_roles();
        let manager = &roles[1];

        let coverage = granted_by_module(manager, &permissions);

        assert_eq!(coverage["orders"], ModuleCoverage { granted: 2, total: 2 });
        assert!(coverage["products"].is_full());
        assert_eq!(coverage["wall"].granted, 0);
        assert!(!coverage["roles"].is_full());
    }

    #[test]
    fn test_unknown_permission_ids_are_ignored() {
        let permissions = sample_permissions();
        let ghost = role(9, "ghost", "Ghost", "", true, &[42, 1], 0);

        let coverage = granted_by_module(&ghost, &permissions);
        let granted: usize = coverage.values().map(|c| c.granted).sum();
        assert_eq!(granted, 1);
        assert_eq!(coverage["orders"].granted, 1);
        assert_eq!(ghost.permissions_count(), 2);
    }
}
