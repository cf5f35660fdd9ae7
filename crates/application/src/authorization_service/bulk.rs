use super::*;

impl AuthorizationService {
    /// Resolves several permissions against one snapshot.
    ///
    /// The user and grants are loaded once and every name is evaluated at the
    /// same instant, so a grant cannot expire halfway through the batch.
    pub async fn resolve_all(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permissions: &[PermissionName],
    ) -> AppResult<BTreeMap<PermissionName, Decision>> {
        let snapshot = self.load_snapshot(client_id, user_id, Utc::now()).await?;
        Ok(snapshot.evaluate_all(permissions))
    }

    /// Whether at least one of the permissions is allowed. An empty set is never allowed.
    pub async fn has_any(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permissions: &[PermissionName],
    ) -> AppResult<bool> {
        let decisions = self.resolve_all(client_id, user_id, permissions).await?;
        Ok(decisions.values().any(|decision| decision.allowed))
    }

    /// Whether every permission is allowed. An empty set is vacuously allowed.
    pub async fn has_all(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permissions: &[PermissionName],
    ) -> AppResult<bool> {
        let decisions = self.resolve_all(client_id, user_id, permissions).await?;
        Ok(decisions.values().all(|decision| decision.allowed))
    }

    /// Lists the active catalog permissions the user is allowed.
    ///
    /// Deactivated permissions are skipped here even when grants still
    /// reference them.
    pub async fn effective_permissions(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Vec<EffectivePermission>> {
        let catalog = self
            .catalog_repository
            .list_permissions(client_id, None, false)
            .await?;
        let snapshot = self.load_snapshot(client_id, user_id, Utc::now()).await?;

        Ok(catalog
            .into_iter()
            .filter(Permission::is_active)
            .filter_map(|permission| {
                let decision = snapshot.evaluate(permission.name());
                decision.allowed.then_some(EffectivePermission {
                    permission,
                    decision,
                })
            })
            .collect())
    }
}
