use super::*;

impl GrantAdminService {
    /// Lists the user's direct overrides that are active now.
    pub async fn list_user_grants(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        self.require_user(client_id, user_id).await?;
        self.grant_repository
            .list_user_grants(client_id, user_id, Utc::now())
            .await
    }

    /// Creates or updates a direct override.
    pub async fn upsert_user_grant(
        &self,
        client_id: &ClientId,
        input: UpsertUserGrantInput,
    ) -> AppResult<UserPermissionGrant> {
        if let Some(expires_at) = input.expires_at
            && expires_at <= Utc::now()
        {
            return Err(AppError::Validation(format!(
                "expiry '{}' must lie in the future",
                expires_at.to_rfc3339()
            )));
        }

        self.require_user(client_id, input.user_id).await?;
        let permission = self
            .require_grantable_permission(client_id, input.permission_id, input.granted)
            .await?;

        let grant = self
            .grant_repository
            .upsert_user_grant(
                client_id,
                input.user_id,
                input.permission_id,
                input.granted,
                input.expires_at,
            )
            .await?;

        info!(
            %client_id,
            user_id = %input.user_id,
            permission = %permission.name(),
            granted = input.granted,
            expires_at = ?input.expires_at,
            "saved user grant"
        );
        Ok(grant)
    }

    /// Removes a direct override.
    pub async fn remove_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.grant_repository
            .remove_user_grant(client_id, user_id, permission_id)
            .await?;

        info!(%client_id, %user_id, %permission_id, "removed user grant");
        Ok(())
    }
}
