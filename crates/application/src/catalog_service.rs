use std::sync::Arc;

use tracing::{info, warn};

use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    CatalogSeed, Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName,
    RoleSeed,
};

use crate::{GrantRepository, PermissionCatalogRepository};

mod permissions;
mod roles;
mod seed;

/// Input payload for registering a custom permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Permission name.
    pub name: PermissionName,
    /// Display label.
    pub label: String,
}

/// Input payload for creating a custom role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name in client scope.
    pub name: RoleName,
    /// Display label.
    pub label: String,
    /// Authority level.
    pub level: i32,
}

/// Partial role update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New name, rejected for system roles.
    pub name: Option<RoleName>,
    /// New display label.
    pub label: Option<String>,
    /// New authority level.
    pub level: Option<i32>,
}

/// Counts of records created while seeding one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSeedReport {
    /// Newly created permissions.
    pub created_permissions: usize,
    /// Newly created roles.
    pub created_roles: usize,
    /// Role grants written for newly created roles.
    pub created_role_grants: usize,
}

/// Application service for permission and role definitions.
#[derive(Clone)]
pub struct CatalogService {
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    grant_repository: Arc<dyn GrantRepository>,
    seed: Arc<CatalogSeed>,
}

impl CatalogService {
    /// Creates a new service from repositories and the startup catalog seed.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        grant_repository: Arc<dyn GrantRepository>,
        seed: Arc<CatalogSeed>,
    ) -> Self {
        Self {
            catalog_repository,
            grant_repository,
            seed,
        }
    }
}
