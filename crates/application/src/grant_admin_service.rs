use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    Permission, PermissionId, Role, RoleId, RoleLookup, RolePermissionGrant, UserId,
    UserPermissionGrant,
};

use crate::{GrantRepository, PermissionCatalogRepository, UserDirectory};

mod role_grants;
mod user_grants;
#[cfg(test)]
mod tests;

/// Input payload for setting a role stance on one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertRoleGrantInput {
    /// Target role.
    pub role_id: RoleId,
    /// Target permission.
    pub permission_id: PermissionId,
    /// Grant (`true`) or explicit deny (`false`).
    pub granted: bool,
}

/// Input payload for setting a direct user override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertUserGrantInput {
    /// Target user.
    pub user_id: UserId,
    /// Target permission.
    pub permission_id: PermissionId,
    /// Grant (`true`) or revocation (`false`).
    pub granted: bool,
    /// Optional expiry; must lie in the future.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Application service for administering grant associations.
///
/// Each call writes exactly one association row.
#[derive(Clone)]
pub struct GrantAdminService {
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    grant_repository: Arc<dyn GrantRepository>,
    user_directory: Arc<dyn UserDirectory>,
}

impl GrantAdminService {
    /// Creates a new grant administration service.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        grant_repository: Arc<dyn GrantRepository>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            catalog_repository,
            grant_repository,
            user_directory,
        }
    }

    async fn require_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<Role> {
        self.catalog_repository
            .find_role(client_id, &RoleLookup::Id(role_id))
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "role '{role_id}' does not exist in client '{client_id}'"
                ))
            })
    }

    async fn require_user(&self, client_id: &ClientId, user_id: UserId) -> AppResult<()> {
        self.user_directory
            .find_user_access_profile(client_id, user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' does not exist in client '{client_id}'"
                ))
            })
    }

    async fn require_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Permission> {
        self.catalog_repository
            .find_permission(client_id, permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "permission '{permission_id}' does not exist in client '{client_id}'"
                ))
            })
    }

    /// Deactivated permissions accept denials and revocations but no new allows.
    async fn require_grantable_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<Permission> {
        let permission = self.require_permission(client_id, permission_id).await?;
        if granted && !permission.is_active() {
            return Err(AppError::Validation(format!(
                "permission '{}' is deactivated and cannot be granted",
                permission.name()
            )));
        }
        Ok(permission)
    }
}
