use super::*;

#[async_trait]
impl GrantRepository for InMemoryAccessRepository {
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
        let mut values: Vec<RolePermissionGrant> = self
            .role_grants
            .read()
            .await
            .iter()
            .filter_map(|((stored_client_id, role_id, _), grant)| {
                (stored_client_id == client_id && role_ids.contains(role_id))
                    .then_some(grant.clone())
            })
            .collect();

        values.sort_by(|left, right| left.permission_name.cmp(&right.permission_name));
        Ok(values)
    }

    async fn list_user_grants(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        let mut values: Vec<UserPermissionGrant> = self
            .user_grants
            .read()
            .await
            .iter()
            .filter_map(|((stored_client_id, stored_user_id, _), grant)| {
                (stored_client_id == client_id
                    && *stored_user_id == user_id
                    && grant.is_active_at(now))
                .then_some(grant.clone())
            })
            .collect();

        values.sort_by(|left, right| left.permission_name.cmp(&right.permission_name));
        Ok(values)
    }

    async fn upsert_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<RolePermissionGrant> {
        let permission = self.permission_by_id(client_id, permission_id).await?;
        let mut grants = self.role_grants.write().await;
        let now = Utc::now();

        let grant = grants
            .entry((client_id.clone(), role_id, permission_id))
            .and_modify(|grant| {
                grant.granted = granted;
                grant.updated_at = now;
            })
            .or_insert_with(|| RolePermissionGrant {
                id: Uuid::new_v4(),
                role_id,
                permission_id,
                permission_name: permission.name().clone(),
                granted,
                updated_at: now,
            });

        Ok(grant.clone())
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
        let mut grants = self.user_grants.write().await;
        let now = Utc::now();

        let grant = grants
            .entry((client_id.clone(), user_id, permission_id))
            .and_modify(|grant| {
                grant.granted = granted;
                grant.expires_at = expires_at;
                grant.updated_at = now;
            })
            .or_insert_with(|| UserPermissionGrant {
                id: Uuid::new_v4(),
                user_id,
                permission_id,
                permission_name: permission.name().clone(),
                granted,
                expires_at,
                updated_at: now,
            });

        Ok(grant.clone())
    }

    async fn remove_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.role_grants
            .write()
            .await
            .remove(&(client_id.clone(), role_id, permission_id));
        Ok(())
    }

    async fn remove_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.user_grants
            .write()
            .await
            .remove(&(client_id.clone(), user_id, permission_id));
        Ok(())
    }
}
