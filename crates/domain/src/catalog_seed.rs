//! Reference data installed into every client catalog.
//!
//! The seed is loaded once at startup and never mutated afterwards; per-client
//! changes go through the grant store.

use std::collections::BTreeSet;
use std::str::FromStr;

use kontora_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{PermissionName, RoleName};

/// Standard CRUD actions registered for every seeded module.
pub const DEFAULT_MODULE_ACTIONS: &[&str] = &["read", "create", "update", "delete"];

/// Module whose actions are expanded into permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSeed {
    /// Module segment used in permission names.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Actions registered for the module.
    #[serde(default = "default_actions")]
    pub actions: Vec<String>,
}

fn default_actions() -> Vec<String> {
    DEFAULT_MODULE_ACTIONS
        .iter()
        .map(|action| (*action).to_owned())
        .collect()
}

/// Standalone permission outside the module/action grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSeed {
    /// Permission name.
    pub name: PermissionName,
    /// Display label.
    pub label: String,
}

/// System role with its default grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSeed {
    /// Role name.
    pub name: RoleName,
    /// Display label.
    pub label: String,
    /// Authority level.
    pub level: i32,
    /// Granted permission names; `module.*` expands to every action of the module.
    #[serde(default)]
    pub grants: Vec<String>,
}

/// Immutable reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    /// Modules expanded into `module.action` permissions.
    pub modules: Vec<ModuleSeed>,
    /// Extra permissions.
    #[serde(default)]
    pub permissions: Vec<PermissionSeed>,
    /// System roles.
    pub roles: Vec<RoleSeed>,
}

impl CatalogSeed {
    /// Returns the built-in catalog.
    pub fn builtin() -> AppResult<Self> {
        let modules = [
            ("contacts", "Contacts"),
            ("production", "Production"),
            ("users", "Users"),
            ("custom_fields", "Custom fields"),
            ("chat", "Chat"),
            ("backups", "Backups"),
        ]
        .into_iter()
        .map(|(name, label)| ModuleSeed {
            name: name.to_owned(),
            label: label.to_owned(),
            actions: default_actions(),
        })
        .collect();

        let permissions = vec![
            PermissionSeed {
                name: PermissionName::from_str("roles.manage")?,
                label: "Roles: manage".to_owned(),
            },
            PermissionSeed {
                name: PermissionName::from_str("permissions.manage")?,
                label: "Permissions: manage".to_owned(),
            },
        ];

        let roles = vec![
            role_seed("ADMIN", "Administrator", 100, &[])?,
            role_seed(
                "MANAGER",
                "Manager",
                50,
                &[
                    "contacts.*",
                    "production.*",
                    "custom_fields.*",
                    "chat.*",
                    "users.read",
                    "backups.read",
                ],
            )?,
            role_seed(
                "EMPLOYEE",
                "Employee",
                10,
                &[
                    "contacts.read",
                    "contacts.create",
                    "contacts.update",
                    "production.read",
                    "production.update",
                    "custom_fields.read",
                    "chat.read",
                    "chat.create",
                ],
            )?,
            role_seed(
                "VIEWER",
                "Viewer",
                1,
                &["contacts.read", "production.read", "chat.read"],
            )?,
        ];

        let seed = Self {
            modules,
            permissions,
            roles,
        };
        seed.validate()?;
        Ok(seed)
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json(value: &str) -> AppResult<Self> {
        let seed: Self = serde_json::from_str(value)
            .map_err(|error| AppError::Validation(format!("invalid catalog seed: {error}")))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Checks the seed is internally consistent.
    pub fn validate(&self) -> AppResult<()> {
        let permissions = self.expanded_permissions()?;
        let known: BTreeSet<&PermissionName> =
            permissions.iter().map(|permission| &permission.name).collect();

        let mut role_names = BTreeSet::new();
        for role in &self.roles {
            if !role_names.insert(role.name.clone()) {
                return Err(AppError::Validation(format!(
                    "catalog seed declares role '{}' more than once",
                    role.name
                )));
            }

            for permission in self.role_grants(role)? {
                if !known.contains(&permission) {
                    return Err(AppError::Validation(format!(
                        "catalog seed role '{}' grants unknown permission '{permission}'",
                        role.name
                    )));
                }
            }
        }

        if !role_names.contains(&RoleName::admin()) {
            return Err(AppError::Validation(
                "catalog seed must declare the ADMIN role".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expands modules and extra entries into the full permission list.
    pub fn expanded_permissions(&self) -> AppResult<Vec<PermissionSeed>> {
        let mut seen = BTreeSet::new();
        let mut expanded = Vec::new();

        let module_permissions = self.modules.iter().flat_map(|module| {
            module.actions.iter().map(move |action| {
                PermissionName::new(module.name.as_str(), action.as_str(), None).map(|name| {
                    PermissionSeed {
                        name,
                        label: format!("{}: {action}", module.label),
                    }
                })
            })
        });

        for permission in module_permissions {
            let permission = permission?;
            if seen.insert(permission.name.clone()) {
                expanded.push(permission);
            }
        }

        for permission in &self.permissions {
            if !seen.insert(permission.name.clone()) {
                return Err(AppError::Validation(format!(
                    "catalog seed declares permission '{}' more than once",
                    permission.name
                )));
            }
            expanded.push(permission.clone());
        }

        Ok(expanded)
    }

    /// Resolves a role's grant patterns into concrete permission names.
    pub fn role_grants(&self, role: &RoleSeed) -> AppResult<Vec<PermissionName>> {
        let mut names = BTreeSet::new();

        for pattern in &role.grants {
            match pattern.strip_suffix(".*") {
                Some(module_name) => {
                    let module = self
                        .modules
                        .iter()
                        .find(|module| module.name == module_name)
                        .ok_or_else(|| {
                            AppError::Validation(format!(
                                "catalog seed role '{}' references unknown module '{module_name}'",
                                role.name
                            ))
                        })?;
                    for action in &module.actions {
                        names.insert(PermissionName::new(
                            module.name.as_str(),
                            action.as_str(),
                            None,
                        )?);
                    }
                }
                None => {
                    names.insert(PermissionName::from_str(pattern)?);
                }
            }
        }

        Ok(names.into_iter().collect())
    }
}

fn role_seed(name: &str, label: &str, level: i32, grants: &[&str]) -> AppResult<RoleSeed> {
    Ok(RoleSeed {
        name: RoleName::new(name)?,
        label: label.to_owned(),
        level,
        grants: grants.iter().map(|grant| (*grant).to_owned()).collect(),
    })
}
