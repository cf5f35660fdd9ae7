use super::*;

impl PostgresCatalogRepository {
    pub(super) async fn find_permission_by_name_impl(
        &self,
        client_id: &ClientId,
        name: &PermissionName,
    ) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, label, is_system, is_active
            FROM access_permissions
            WHERE client_id = $1 AND name = $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(name.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find permission '{name}' for client '{client_id}': {error}"
            ))
        })?;

        row.map(|row| row.into_permission(client_id)).transpose()
    }

    pub(super) async fn find_permission_impl(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, label, is_system, is_active
            FROM access_permissions
            WHERE client_id = $1 AND id = $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(permission_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find permission '{permission_id}' for client '{client_id}': {error}"
            ))
        })?;

        row.map(|row| row.into_permission(client_id)).transpose()
    }

    pub(super) async fn list_permissions_impl(
        &self,
        client_id: &ClientId,
        module: Option<&str>,
        include_inactive: bool,
    ) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, label, is_system, is_active
            FROM access_permissions
            WHERE client_id = $1
              AND ($2::TEXT IS NULL OR module = $2)
              AND ($3 OR is_active)
            ORDER BY name
            "#,
        )
        .bind(client_id.as_str())
        .bind(module)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list permissions for client '{client_id}': {error}"
            ))
        })?;

        rows.into_iter()
            .map(|row| row.into_permission(client_id))
            .collect()
    }

    pub(super) async fn create_permission_impl(
        &self,
        client_id: &ClientId,
        permission: Permission,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_permissions (id, client_id, name, module, label, is_system, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(permission.id().as_uuid())
        .bind(client_id.as_str())
        .bind(permission.name().to_string())
        .bind(permission.module())
        .bind(permission.label())
        .bind(permission.is_system())
        .bind(permission.is_active())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                format!(
                    "permission '{}' already exists for client '{client_id}'",
                    permission.name()
                ),
            )
        })?;

        Ok(())
    }

    pub(super) async fn set_permission_active_impl(
        &self,
        client_id: &ClientId,
        permission_id: PermissionId,
        is_active: bool,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE access_permissions
            SET is_active = $3
            WHERE client_id = $1 AND id = $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(permission_id.as_uuid())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update permission '{permission_id}' for client '{client_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' does not exist in client '{client_id}'"
            )));
        }

        Ok(())
    }
}
