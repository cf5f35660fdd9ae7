use super::*;

impl GrantAdminService {
    /// Lists every stance a role takes, granted or denied.
    pub async fn list_role_grants(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
    ) -> AppResult<Vec<RolePermissionGrant>> {
        self.require_role(client_id, role_id).await?;
        self.grant_repository
            .list_role_grants(client_id, role_id)
            .await
    }

    /// Creates or updates a role stance on one permission.
    pub async fn upsert_role_grant(
        &self,
        client_id: &ClientId,
        input: UpsertRoleGrantInput,
    ) -> AppResult<RolePermissionGrant> {
        let role = self.require_role(client_id, input.role_id).await?;
        let permission = self
            .require_grantable_permission(client_id, input.permission_id, input.granted)
            .await?;

        let grant = self
            .grant_repository
            .upsert_role_grant(client_id, input.role_id, input.permission_id, input.granted)
            .await?;

        info!(
            %client_id,
            role = %role.name(),
            permission = %permission.name(),
            granted = input.granted,
            "saved role grant"
        );
        Ok(grant)
    }

    /// Removes a role stance, returning the role to "no opinion".
    ///
    /// Succeeds whether or not the role or the association still exists.
    pub async fn remove_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.grant_repository
            .remove_role_grant(client_id, role_id, permission_id)
            .await?;

        info!(%client_id, %role_id, %permission_id, "removed role grant");
        Ok(())
    }
}
