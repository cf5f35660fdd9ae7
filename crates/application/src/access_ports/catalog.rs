use async_trait::async_trait;

use kontora_core::{AppResult, ClientId};
use kontora_domain::{Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName};

/// Repository port for permission and role definitions.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Finds a permission by name, active or not.
    async fn find_permission_by_name(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Option<Permission>>;

    /// Finds a permission by id, active or not.
    async fn find_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>>;

    /// Lists permissions ordered by name, optionally filtered by module.
    async fn list_permissions(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
        include_inactive: bool,
    ) -> AppResult<Vec<Permission>>;

    /// Persists a new permission. Fails with a conflict when the name is taken.
    async fn create_permission(&self, client_id: &ClientId, permission: Permission)
    -> AppResult<()>;

    /// Toggles the activity flag of a permission.
    async fn set_permission_active(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        is_active: bool,
    ) -> AppResult<()>;

    /// Finds a role by id or name.
    async fn find_role(&self, client_id: &ClientId, lookup: &RoleLookup)
    -> AppResult<Option<Role>>;

    /// Finds every existing role among the given names.
    async fn find_roles_by_names(
        &self,
        client_id: &ClientId,
        names: &[RoleName],
    ) -> AppResult<Vec<Role>>;

    /// Lists roles ordered by descending level, then name.
    async fn list_roles(&self, client_id: &ClientId) -> AppResult<Vec<Role>>;

    /// Persists a new role. Fails with a conflict when the name is taken.
    async fn create_role(&self, client_id: &ClientId, role: Role) -> AppResult<()>;

    /// Replaces a stored role definition.
    async fn update_role(&self, client_id: &ClientId, role: Role) -> AppResult<()>;

    /// Deletes a role together with its grant associations.
    async fn delete_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<()>;
}
