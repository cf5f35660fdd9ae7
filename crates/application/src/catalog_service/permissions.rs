use super::*;

impl CatalogService {
    /// Returns a permission by name, including deactivated entries.
    pub async fn get_permission(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Permission> {
        self.catalog_repository
            .find_permission_by_name(client_id, name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "permission '{name}' does not exist in client '{client_id}'"
                ))
            })
    }

    /// Lists active permissions, optionally restricted to one module.
    pub async fn list_permissions(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
    ) -> AppResult<Vec<Permission>> {
        let module = module.map(str::trim).filter(|value| !value.is_empty());
        self.catalog_repository
            .list_permissions(client_id, module, false)
            .await
    }

    /// Registers a custom (non-system) permission.
    pub async fn create_permission(
        &self,
        client_id: &ClientId,
        input: CreatePermissionInput,
    ) -> AppResult<Permission> {
        let permission = Permission::new(PermissionId::new(), input.name, input.label, false)?;
        self.catalog_repository
            .create_permission(client_id, permission.clone())
            .await?;

        info!(%client_id, permission = %permission.name(), "created permission");
        Ok(permission)
    }

    /// Soft-deletes a custom permission.
    ///
    /// Grant rows referencing it are kept; they stop appearing in effective
    /// permission listings.
    pub async fn deactivate_permission(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        let permission = self
            .catalog_repository
            .find_permission(client_id, permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "permission '{permission_id}' does not exist in client '{client_id}'"
                ))
            })?;

        if permission.is_system() {
            return Err(AppError::Validation(format!(
                "system permission '{}' cannot be deleted",
                permission.name()
            )));
        }

        self.catalog_repository
            .set_permission_active(client_id, permission_id, false)
            .await?;

        info!(%client_id, permission = %permission.name(), "deactivated permission");
        Ok(())
    }
}
