use super::*;

impl PostgresCatalogRepository {
    pub(super) async fn find_role_impl(
        &self,
        client_id: &ClientId,
        lookup: &RoleLookup,
    ) -> AppResult<Option<Role>> {
        let query = match lookup {
            RoleLookup::Id(role_id) => sqlx::query_as::<_, RoleRow>(
                r#"
                SELECT id, name, label, level, is_system
                FROM access_roles
                WHERE client_id = $1 AND id = $2
                "#,
            )
            .bind(client_id.as_str())
            .bind(role_id.as_uuid()),
            RoleLookup::Name(role_name) => sqlx::query_as::<_, RoleRow>(
                r#"
                SELECT id, name, label, level, is_system
                FROM access_roles
                WHERE client_id = $1 AND name = $2
                "#,
            )
            .bind(client_id.as_str())
            .bind(role_name.as_str().to_owned()),
        };

        let row = query.fetch_optional(&self.pool).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to find role '{lookup}' for client '{client_id}': {error}"
            ))
        })?;

        row.map(|row| row.into_role(client_id)).transpose()
    }

    pub(super) async fn find_roles_by_names_impl(
        &self,
        client_id: &ClientId,
        names: &[RoleName],
    ) -> AppResult<Vec<Role>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = names.iter().map(|name| name.as_str().to_owned()).collect();
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, label, level, is_system
            FROM access_roles
            WHERE client_id = $1 AND name = ANY($2)
            "#,
        )
        .bind(client_id.as_str())
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load roles for client '{client_id}': {error}"
            ))
        })?;

        rows.into_iter().map(|row| row.into_role(client_id)).collect()
    }

    pub(super) async fn list_roles_impl(&self, client_id: &ClientId) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, label, level, is_system
            FROM access_roles
            WHERE client_id = $1
            ORDER BY level DESC, name
            "#,
        )
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list roles for client '{client_id}': {error}"
            ))
        })?;

        rows.into_iter().map(|row| row.into_role(client_id)).collect()
    }

    pub(super) async fn create_role_impl(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_roles (id, client_id, name, label, level, is_system)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(client_id.as_str())
        .bind(role.name().as_str())
        .bind(role.label())
        .bind(role.level())
        .bind(role.is_system())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                format!(
                    "role '{}' already exists for client '{client_id}'",
                    role.name()
                ),
            )
        })?;

        Ok(())
    }

    pub(super) async fn update_role_impl(&self, client_id: &ClientId, role: Role) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE access_roles
            SET name = $3, label = $4, level = $5
            WHERE client_id = $1 AND id = $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(role.id().as_uuid())
        .bind(role.name().as_str())
        .bind(role.label())
        .bind(role.level())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                format!(
                    "role '{}' already exists for client '{client_id}'",
                    role.name()
                ),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist in client '{client_id}'",
                role.id()
            )));
        }

        Ok(())
    }

    /// Grant rows go with the role through `ON DELETE CASCADE`.
    pub(super) async fn delete_role_impl(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM access_roles
            WHERE client_id = $1 AND id = $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(role_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete role '{role_id}' for client '{client_id}': {error}"
            ))
        })?;

        Ok(())
    }
}
