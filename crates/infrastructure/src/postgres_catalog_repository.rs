use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use kontora_application::PermissionCatalogRepository;
use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName,
};

mod permissions;
mod roles;

/// PostgreSQL-backed repository for permission and role definitions.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: Uuid,
    name: String,
    label: String,
    is_system: bool,
    is_active: bool,
}

impl PermissionRow {
    fn into_permission(self, client_id: &ClientId) -> AppResult<Permission> {
        let name = PermissionName::from_str(self.name.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode permission '{}' for client '{client_id}': {error}",
                self.name
            ))
        })?;

        Ok(Permission::new(
            PermissionId::from_uuid(self.id),
            name,
            self.label,
            self.is_system,
        )?
        .with_active(self.is_active))
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    label: String,
    level: i32,
    is_system: bool,
}

impl RoleRow {
    fn into_role(self, client_id: &ClientId) -> AppResult<Role> {
        let name = RoleName::new(self.name.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode role '{}' for client '{client_id}': {error}",
                self.name
            ))
        })?;

        Role::new(
            RoleId::from_uuid(self.id),
            name,
            self.label,
            self.level,
            self.is_system,
        )
    }
}

fn map_conflict(error: sqlx::Error, message: String) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(message);
    }

    AppError::Internal(format!("{message}: {error}"))
}

#[async_trait]
impl PermissionCatalogRepository for PostgresCatalogRepository {
    async fn find_permission_by_name(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Option<Permission>> {
        self.find_permission_by_name_impl(client_id, name).await
    }

    async fn find_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        self.find_permission_impl(client_id, permission_id).await
    }

    async fn list_permissions(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
        include_inactive: bool,
    ) -> AppResult<Vec<Permission>> {
        self.list_permissions_impl(client_id, module, include_inactive)
            .await
    }

    async fn create_permission(
        &self,
        client_id: &ClientId,
        permission: Permission,
    ) -> AppResult<()> {
        self.create_permission_impl(client_id, permission).await
    }

    async fn set_permission_active(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        is_active: bool,
    ) -> AppResult<()> {
        self.set_permission_active_impl(client_id, permission_id, is_active)
            .await
    }

    async fn find_role(
        &self,
        client_id: &ClientId,
        lookup: &RoleLookup,
    ) -> AppResult<Option<Role>> {
        self.find_role_impl(client_id, lookup).await
    }

    async fn find_roles_by_names(
        &self,
        client_id: &ClientId,
        names: &[RoleName],
    ) -> AppResult<Vec<Role>> {
        self.find_roles_by_names_impl(client_id, names).await
    }

    async fn list_roles(&self, client_id: &ClientId) -> AppResult<Vec<Role>> {
        self.list_roles_impl(client_id).await
    }

    async fn create_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        self.create_role_impl(client_id, role).await
    }

    async fn update_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        self.update_role_impl(client_id, role).await
    }

    async fn delete_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<()> {
        self.delete_role_impl(client_id, role_id).await
    }
}
