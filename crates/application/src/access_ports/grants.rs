use async_trait::async_trait;
use chrono::{DateTime, Utc};

use kontora_core::{AppResult, ClientId};
use kontora_domain::{PermissionId, RoleId, RolePermissionGrant, UserId, UserPermissionGrant};

/// Repository port for role-level and user-level grant associations.
///
/// Every write is atomic per association row; no write spans several rows.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Lists all associations of one role, granted or denied.
    async fn list_role_grants(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
    ) -> AppResult<Vec<RolePermissionGrant>>;

    /// Lists all associations of several roles in one read.
    async fn list_role_grants_for_roles(
        &self,
        client_id: &ClientId,
        role_ids: &[RoleId],
    ) -> AppResult<Vec<RolePermissionGrant>>;

    /// Lists the user's direct grants that are still active at `now`.
    async fn list_user_grants(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>>;

    /// Creates or updates the association for `(role, permission)`.
    async fn upsert_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<RolePermissionGrant>;

    /// Creates or updates the association for `(user, permission)`.
    async fn upsert_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<UserPermissionGrant>;

    /// Deletes the association; a missing row is not an error.
    async fn remove_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()>;

    /// Deletes the association; a missing row is not an error.
    async fn remove_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<()>;
}
