use super::*;

impl AuthorizationService {
    /// Resolves one permission for a user.
    pub async fn resolve(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission: &PermissionName,
    ) -> AppResult<Decision> {
        let snapshot = self.load_snapshot(client_id, user_id, Utc::now()).await?;
        let decision = snapshot.evaluate(permission);

        debug!(
            %client_id,
            %user_id,
            %permission,
            allowed = decision.allowed,
            source = %decision.source,
            "resolved permission"
        );

        Ok(decision)
    }

    /// Loads everything a resolution needs, evaluated at one instant.
    ///
    /// Grants are only fetched for active, non-admin users: the first two
    /// precedence rules never look at them.
    pub(super) async fn load_snapshot(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        evaluated_at: DateTime<Utc>,
    ) -> AppResult<AccessSnapshot> {
        let Some(profile) = self
            .user_directory
            .find_user_access_profile(client_id, user_id)
            .await?
        else {
            return Ok(AccessSnapshot::unknown_subject(evaluated_at));
        };

        if !profile.is_active || profile.holds_admin_role() {
            return Ok(AccessSnapshot::new(
                profile,
                Vec::new(),
                Vec::new(),
                evaluated_at,
            ));
        }

        let role_names: Vec<RoleName> = profile.effective_role_names().into_iter().collect();
        let role_ids: Vec<_> = self
            .catalog_repository
            .find_roles_by_names(client_id, role_names.as_slice())
            .await?
            .iter()
            .map(|role| role.id())
            .collect();

        let role_grants = if role_ids.is_empty() {
            Vec::new()
        } else {
            self.grant_repository
                .list_role_grants_for_roles(client_id, role_ids.as_slice())
                .await?
        };

        let user_grants = self
            .grant_repository
            .list_user_grants(client_id, user_id, evaluated_at)
            .await?;

        let snapshot = AccessSnapshot::new(profile, user_grants, role_grants, evaluated_at);
        for permission in snapshot.duplicate_direct_grants() {
            warn!(
                %client_id,
                %user_id,
                %permission,
                "duplicate direct grants found; using the most recently updated row"
            );
        }

        Ok(snapshot)
    }
}
