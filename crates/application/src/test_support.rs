use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName,
    RolePermissionGrant, UserAccessProfile, UserId, UserPermissionGrant,
};

use crate::{GrantRepository, PermissionCatalogRepository, UserDirectory};

/// Single fake backing every access port, keyed by client.
#[derive(Default)]
pub(crate) struct FakeAccessStore {
    pub(crate) permissions: Mutex<Vec<(ClientId, Permission)>>,
    pub(crate) roles: Mutex<Vec<(ClientId, Role)>>,
    pub(crate) role_grants: Mutex<Vec<(ClientId, RolePermissionGrant)>>,
    pub(crate) user_grants: Mutex<Vec<(ClientId, UserPermissionGrant)>>,
    pub(crate) users: Mutex<HashMap<(ClientId, UserId), UserAccessProfile>>,
    pub(crate) fail_reads: Mutex<bool>,
    pub(crate) fail_role_grant_writes: Mutex<bool>,
}

pub(crate) fn client(value: &str) -> ClientId {
    match ClientId::new(value) {
        Ok(client_id) => client_id,
        Err(error) => panic!("invalid fixture client '{value}': {error}"),
    }
}

pub(crate) fn permission_name(value: &str) -> PermissionName {
    match value.parse() {
        Ok(name) => name,
        Err(error) => panic!("invalid fixture permission '{value}': {error}"),
    }
}

pub(crate) fn role_name(value: &str) -> RoleName {
    match RoleName::new(value) {
        Ok(name) => name,
        Err(error) => panic!("invalid fixture role '{value}': {error}"),
    }
}

impl FakeAccessStore {
    pub(crate) async fn add_permission(&self, client_id: &ClientId, name: &str) -> PermissionId {
        let permission = match Permission::new(PermissionId::new(), permission_name(name), name, false)
        {
            Ok(permission) => permission,
            Err(error) => panic!("invalid fixture permission: {error}"),
        };
        let permission_id = permission.id();
        self.permissions
            .lock()
            .await
            .push((client_id.clone(), permission));
        permission_id
    }

    pub(crate) async fn add_role(&self, client_id: &ClientId, name: &str, is_system: bool) -> RoleId {
        let role = match Role::new(RoleId::new(), role_name(name), name, 10, is_system) {
            Ok(role) => role,
            Err(error) => panic!("invalid fixture role: {error}"),
        };
        let role_id = role.id();
        self.roles.lock().await.push((client_id.clone(), role));
        role_id
    }

    pub(crate) async fn add_user(
        &self,
        client_id: &ClientId,
        primary_role: &str,
        is_active: bool,
    ) -> UserId {
        let user_id = UserId::new();
        self.users.lock().await.insert(
            (client_id.clone(), user_id),
            UserAccessProfile {
                id: user_id,
                primary_role: role_name(primary_role),
                role_assignments: Vec::new(),
                is_active,
            },
        );
        user_id
    }

    pub(crate) async fn assign_role(&self, client_id: &ClientId, user_id: UserId, role: &str) {
        if let Some(profile) = self
            .users
            .lock()
            .await
            .get_mut(&(client_id.clone(), user_id))
        {
            profile.role_assignments.push(role_name(role));
        }
    }

    async fn check_reads(&self) -> AppResult<()> {
        if *self.fail_reads.lock().await {
            return Err(AppError::Internal("grant store unavailable".to_owned()));
        }
        Ok(())
    }

    async fn permission_by_id(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Permission> {
        self.permissions
            .lock()
            .await
            .iter()
            .find(|(stored_client_id, permission)| {
                stored_client_id == client_id && permission.id() == permission_id
            })
            .map(|(_, permission)| permission.clone())
            .ok_or_else(|| AppError::NotFound(format!("permission '{permission_id}'")))
    }
}

#[async_trait]
impl PermissionCatalogRepository for FakeAccessStore {
    async fn find_permission_by_name(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .find(|(stored_client_id, permission)| {
                stored_client_id == client_id && permission.name() == name
            })
            .map(|(_, permission)| permission.clone()))
    }

    async fn find_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        Ok(self.permission_by_id(client_id, permission_id).await.ok())
    }

    async fn list_permissions(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
        include_inactive: bool,
    ) -> AppResult<Vec<Permission>> {
        let mut values: Vec<Permission> = self
            .permissions
            .lock()
            .await
            .iter()
            .filter(|(stored_client_id, permission)| {
                stored_client_id == client_id
                    && (include_inactive || permission.is_active())
                    && module.is_none_or(|module| permission.module() == module)
            })
            .map(|(_, permission)| permission.clone())
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(values)
    }

    async fn create_permission(&self, client_id: &ClientId, permission: Permission) -> AppResult<()> {
        if self
            .find_permission_by_name(client_id, permission.name())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "permission '{}' already exists",
                permission.name()
            )));
        }
        self.permissions
            .lock()
            .await
            .push((client_id.clone(), permission));
        Ok(())
    }

    async fn set_permission_active(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        is_active: bool,
    ) -> AppResult<()> {
        let mut permissions = self.permissions.lock().await;
        let Some(entry) = permissions.iter_mut().find(|(stored_client_id, permission)| {
            stored_client_id == client_id && permission.id() == permission_id
        }) else {
            return Err(AppError::NotFound(format!("permission '{permission_id}'")));
        };
        entry.1 = entry.1.clone().with_active(is_active);
        Ok(())
    }

    async fn find_role(&self, client_id: &ClientId, lookup: &RoleLookup) -> AppResult<Option<Role>> {
        self.check_reads().await?;
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|(stored_client_id, role)| {
                stored_client_id == client_id
                    && match lookup {
                        RoleLookup::Id(role_id) => role.id() == *role_id,
                        RoleLookup::Name(role_name) => role.name() == role_name,
                    }
            })
            .map(|(_, role)| role.clone()))
    }

    async fn find_roles_by_names(
        &self,
        client_id: &ClientId,
        names: &[RoleName],
    ) -> AppResult<Vec<Role>> {
        self.check_reads().await?;
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|(stored_client_id, role)| {
                stored_client_id == client_id && names.contains(role.name())
            })
            .map(|(_, role)| role.clone())
            .collect())
    }

    async fn list_roles(&self, client_id: &ClientId) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|(stored_client_id, _)| stored_client_id == client_id)
            .map(|(_, role)| role.clone())
            .collect())
    }

    async fn create_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if roles
            .iter()
            .any(|(stored_client_id, stored)| stored_client_id == client_id && stored.name() == role.name())
        {
            return Err(AppError::Conflict(format!("role '{}' already exists", role.name())));
        }
        roles.push((client_id.clone(), role));
        Ok(())
    }

    async fn update_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        let Some(entry) = roles
            .iter_mut()
            .find(|(stored_client_id, stored)| stored_client_id == client_id && stored.id() == role.id())
        else {
            return Err(AppError::NotFound(format!("role '{}'", role.id())));
        };
        entry.1 = role;
        Ok(())
    }

    async fn delete_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<()> {
        self.roles
            .lock()
            .await
            .retain(|(stored_client_id, role)| !(stored_client_id == client_id && role.id() == role_id));
        self.role_grants
            .lock()
            .await
            .retain(|(stored_client_id, grant)| {
                !(stored_client_id == client_id && grant.role_id == role_id)
            });
        Ok(())
    }
}

#[async_trait]
impl GrantRepository for FakeAccessStore {
    async fn list_role_grants(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
    ) -> AppResult<Vec<RolePermissionGrant>> {
        self.list_role_grants_for_roles(client_id, &[role_id]).await
    }

    async fn list_role_grants_for_roles(
        &self,
        client_id: &ClientId,
        role_ids: &[RoleId],
    ) -> AppResult<Vec<RolePermissionGrant>> {
        self.check_reads().await?;
        Ok(self
            .role_grants
            .lock()
            .await
            .iter()
            .filter(|(stored_client_id, grant)| {
                stored_client_id == client_id && role_ids.contains(&grant.role_id)
            })
            .map(|(_, grant)| grant.clone())
            .collect())
    }

    async fn list_user_grants(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        self.check_reads().await?;
        Ok(self
            .user_grants
            .lock()
            .await
            .iter()
            .filter(|(stored_client_id, grant)| {
                stored_client_id == client_id && grant.user_id == user_id && grant.is_active_at(now)
            })
            .map(|(_, grant)| grant.clone())
            .collect())
    }

    async fn upsert_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<RolePermissionGrant> {
        if *self.fail_role_grant_writes.lock().await {
            return Err(AppError::Internal("grant store unavailable".to_owned()));
        }
        let permission = self.permission_by_id(client_id, permission_id).await?;
        let mut grants = self.role_grants.lock().await;
        let now = Utc::now();

        if let Some((_, grant)) = grants.iter_mut().find(|(stored_client_id, grant)| {
            stored_client_id == client_id
                && grant.role_id == role_id
                && grant.permission_id == permission_id
        }) {
            grant.granted = granted;
            grant.updated_at = now;
            return Ok(grant.clone());
        }

        let grant = RolePermissionGrant {
            id: Uuid::new_v4(),
            role_id,
            permission_id,
            permission_name: permission.name().clone(),
            granted,
            updated_at: now,
        };
        grants.push((client_id.clone(), grant.clone()));
        Ok(grant)
    }

    async fn upsert_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<UserPermissionGrant> {
        let permission = self.permission_by_id(client_id, permission_id).await?;
        let mut grants = self.user_grants.lock().await;
        let now = Utc::now();

        if let Some((_, grant)) = grants.iter_mut().find(|(stored_client_id, grant)| {
            stored_client_id == client_id
                && grant.user_id == user_id
                && grant.permission_id == permission_id
        }) {
            grant.granted = granted;
            grant.expires_at = expires_at;
            grant.updated_at = now;
            return Ok(grant.clone());
        }

        let grant = UserPermissionGrant {
            id: Uuid::new_v4(),
            user_id,
            permission_id,
            permission_name: permission.name().clone(),
            granted,
            expires_at,
            updated_at: now,
        };
        grants.push((client_id.clone(), grant.clone()));
        Ok(grant)
    }

    async fn remove_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.role_grants.lock().await.retain(|(stored_client_id, grant)| {
            !(stored_client_id == client_id
                && grant.role_id == role_id
                && grant.permission_id == permission_id)
        });
        Ok(())
    }

    async fn remove_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.user_grants.lock().await.retain(|(stored_client_id, grant)| {
            !(stored_client_id == client_id
                && grant.user_id == user_id
                && grant.permission_id == permission_id)
        });
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for FakeAccessStore {
    async fn find_user_access_profile(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Option<UserAccessProfile>> {
        Ok(self
            .users
            .lock()
            .await
            .get(&(client_id.clone(), user_id))
            .cloned())
    }
}
