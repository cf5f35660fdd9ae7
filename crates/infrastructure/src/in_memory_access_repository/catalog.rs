use super::*;

#[async_trait]
impl PermissionCatalogRepository for InMemoryAccessRepository {
    async fn find_permission_by_name(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .read()
            .await
            .iter()
            .find(|((stored_client_id, _), permission)| {
                stored_client_id == client_id && permission.name() == name
            })
            .map(|(_, permission)| permission.clone()))
    }

    async fn find_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .read()
            .await
            .get(&(client_id.clone(), permission_id))
            .cloned())
    }

    async fn list_permissions(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
        include_inactive: bool,
    ) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        let mut values: Vec<Permission> = permissions
            .iter()
            .filter_map(|((stored_client_id, _), permission)| {
                (stored_client_id == client_id
                    && (include_inactive || permission.is_active())
                    && module.is_none_or(|module| permission.module() == module))
                .then_some(permission.clone())
            })
            .collect();

        values.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(values)
    }

    async fn create_permission(
        &self,
        client_id: &ClientId,
        permission: Permission,
    ) -> AppResult<()> {
        let mut permissions = self.permissions.write().await;
        if permissions
            .iter()
            .any(|((stored_client_id, _), stored)| {
                stored_client_id == client_id && stored.name() == permission.name()
            })
        {
            return Err(AppError::Conflict(format!(
                "permission '{}' already exists for client '{client_id}'",
                permission.name()
            )));
        }

        permissions.insert((client_id.clone(), permission.id()), permission);
        Ok(())
    }

    async fn set_permission_active(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        is_active: bool,
    ) -> AppResult<()> {
        let mut permissions = self.permissions.write().await;
        let key = (client_id.clone(), permission_id);
        let Some(permission) = permissions.remove(&key) else {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' does not exist in client '{client_id}'"
            )));
        };

        permissions.insert(key, permission.with_active(is_active));
        Ok(())
    }

    async fn find_role(
        &self,
        client_id: &ClientId,
        lookup: &RoleLookup,
    ) -> AppResult<Option<Role>> {
        let roles = self.roles.read().await;
        let role = match lookup {
            RoleLookup::Id(role_id) => roles.get(&(client_id.clone(), *role_id)),
            RoleLookup::Name(role_name) => roles
                .iter()
                .find(|((stored_client_id, _), role)| {
                    stored_client_id == client_id && role.name() == role_name
                })
                .map(|(_, role)| role),
        };

        Ok(role.cloned())
    }

    async fn find_roles_by_names(
        &self,
        client_id: &ClientId,
        names: &[RoleName],
    ) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .filter_map(|((stored_client_id, _), role)| {
                (stored_client_id == client_id && names.contains(role.name()))
                    .then_some(role.clone())
            })
            .collect())
    }

    async fn list_roles(&self, client_id: &ClientId) -> AppResult<Vec<Role>> {
        let mut values: Vec<Role> = self
            .roles
            .read()
            .await
            .iter()
            .filter_map(|((stored_client_id, _), role)| {
                (stored_client_id == client_id).then_some(role.clone())
            })
            .collect();

        values.sort_by(|left, right| {
            right
                .level()
                .cmp(&left.level())
                .then_with(|| left.name().cmp(right.name()))
        });
        Ok(values)
    }

    async fn create_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        if roles.iter().any(|((stored_client_id, _), stored)| {
            stored_client_id == client_id && stored.name() == role.name()
        }) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists for client '{client_id}'",
                role.name()
            )));
        }

        roles.insert((client_id.clone(), role.id()), role);
        Ok(())
    }

    async fn update_role(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        if roles.iter().any(|((stored_client_id, stored_id), stored)| {
            stored_client_id == client_id && *stored_id != role.id() && stored.name() == role.name()
        }) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists for client '{client_id}'",
                role.name()
            )));
        }

        let key = (client_id.clone(), role.id());
        if !roles.contains_key(&key) {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist in client '{client_id}'",
                role.id()
            )));
        }

        roles.insert(key, role);
        Ok(())
    }

    async fn delete_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<()> {
        self.roles
            .write()
            .await
            .remove(&(client_id.clone(), role_id));
        self.role_grants
            .write()
            .await
            .retain(|(stored_client_id, stored_role_id, _), _| {
                !(stored_client_id == client_id && *stored_role_id == role_id)
            });
        Ok(())
    }
}
