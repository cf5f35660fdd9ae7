use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use kontora_application::{GrantRepository, PermissionCatalogRepository, UserDirectory};
use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName,
    RolePermissionGrant, UserAccessProfile, UserId, UserPermissionGrant,
};

mod catalog;
mod grants;
#[cfg(test)]
mod tests;

/// In-memory implementation of every access port.
///
/// Used for tests and local runs without PostgreSQL. State is lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    permissions: RwLock<HashMap<(ClientId, PermissionId), Permission>>,
    roles: RwLock<HashMap<(ClientId, RoleId), Role>>,
    role_grants: RwLock<HashMap<(ClientId, RoleId, PermissionId), RolePermissionGrant>>,
    user_grants: RwLock<HashMap<(ClientId, UserId, PermissionId), UserPermissionGrant>>,
    users: RwLock<HashMap<(ClientId, UserId), UserAccessProfile>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the access profile of a user.
    pub async fn save_user_profile(&self, client_id: &ClientId, profile: UserAccessProfile) {
        self.users
            .write()
            .await
            .insert((client_id.clone(), profile.id), profile);
    }

    async fn permission_by_id(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Permission> {
        self.permissions
            .read()
            .await
            .get(&(client_id.clone(), permission_id))
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "permission '{permission_id}' does not exist in client '{client_id}'"
                ))
            })
    }
}

#[async_trait]
impl UserDirectory for InMemoryAccessRepository {
    async fn find_user_access_profile(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Option<UserAccessProfile>> {
        Ok(self
            .users
            .read()
            .await
            .get(&(client_id.clone(), user_id))
            .cloned())
    }
}
