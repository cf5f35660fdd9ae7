use super::*;

impl CatalogService {
    /// Returns a role by id or name.
    pub async fn get_role(&self, client_id: &ClientId, lookup: &RoleLookup) -> AppResult<Role> {
        self.catalog_repository
            .find_role(client_id, lookup)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "role '{lookup}' does not exist in client '{client_id}'"
                ))
            })
    }

    /// Lists client roles.
    pub async fn list_roles(&self, client_id: &ClientId) -> AppResult<Vec<Role>> {
        self.catalog_repository.list_roles(client_id).await
    }

    /// Creates a custom role.
    pub async fn create_role(&self, client_id: &ClientId, input: CreateRoleInput) -> AppResult<Role> {
        let role = Role::new(RoleId::new(), input.name, input.label, input.level, false)?;
        self.catalog_repository
            .create_role(client_id, role.clone())
            .await?;

        info!(%client_id, role = %role.name(), "created role");
        Ok(role)
    }

    /// Updates role label, level and, for custom roles, name.
    pub async fn update_role(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        let mut role = self.get_role(client_id, &RoleLookup::Id(role_id)).await?;
        role.apply_update(input.name, input.label, input.level)?;

        self.catalog_repository
            .update_role(client_id, role.clone())
            .await?;

        info!(%client_id, role = %role.name(), "updated role");
        Ok(role)
    }

    /// Deletes a custom role and its grant associations.
    pub async fn delete_role(&self, client_id: &ClientId, role_id: RoleId) -> AppResult<()> {
        let role = self.get_role(client_id, &RoleLookup::Id(role_id)).await?;
        if role.is_system() {
            return Err(AppError::Validation(format!(
                "system role '{}' cannot be deleted",
                role.name()
            )));
        }

        self.catalog_repository.delete_role(client_id, role_id).await?;

        info!(%client_id, role = %role.name(), "deleted role");
        Ok(())
    }
}
