use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use kontora_application::GrantRepository;
use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{
    PermissionId, PermissionName, RoleId, RolePermissionGrant, UserId, UserPermissionGrant,
};


/// PostgreSQL-backed repository for role and user grant associations.
#[derive(Clone)]
pub struct PostgresGrantRepository {
    pool: PgPool,
}

impl PostgresGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleGrantRow {
    id: Uuid,
    role_id: Uuid,
    permission_id: Uuid,
    permission_name: String,
    granted: bool,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct UserGrantRow {
    id: Uuid,
    user_id: Uuid,
    permission_id: Uuid,
    permission_name: String,
    granted: bool,
    expires_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

fn decode_permission_name(value: &str, client_id: &ClientId) -> AppResult<PermissionName> {
    PermissionName::from_str(value).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode granted permission '{value}' for client '{client_id}': {error}"
        ))
    })
}

impl RoleGrantRow {
    fn into_grant(self, client_id: &ClientId) -> AppResult<RolePermissionGrant> {
        Ok(RolePermissionGrant {
            id: self.id,
            role_id: RoleId::from_uuid(self.role_id),
            permission_id: PermissionId::from_uuid(self.permission_id),
            permission_name: decode_permission_name(self.permission_name.as_str(), client_id)?,
            granted: self.granted,
            updated_at: self.updated_at,
        })
    }
}

impl UserGrantRow {
    fn into_grant(self, client_id: &ClientId) -> AppResult<UserPermissionGrant> {
        Ok(UserPermissionGrant {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            permission_id: PermissionId::from_uuid(self.permission_id),
            permission_name: decode_permission_name(self.permission_name.as_str(), client_id)?,
            granted: self.granted,
            expires_at: self.expires_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl GrantRepository for PostgresGrantRepository {
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
        let role_ids: Vec<Uuid> = role_ids.iter().map(RoleId::as_uuid).collect();
        let rows = sqlx::query_as::<_, RoleGrantRow>(
            r#"
            SELECT
                grants.id,
                grants.role_id,
                grants.permission_id,
                permissions.name AS permission_name,
                grants.granted,
                grants.updated_at
            FROM access_role_permissions AS grants
            INNER JOIN access_permissions AS permissions
                ON permissions.client_id = grants.client_id
                AND permissions.id = grants.permission_id
            WHERE grants.client_id = $1
              AND grants.role_id = ANY($2)
            ORDER BY permissions.name
            "#,
        )
        .bind(client_id.as_str())
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load role grants for client '{client_id}': {error}"
            ))
        })?;

        rows.into_iter().map(|row| row.into_grant(client_id)).collect()
    }

    async fn list_user_grants(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        let rows = sqlx::query_as::<_, UserGrantRow>(
            r#"
            SELECT
                grants.id,
                grants.user_id,
                grants.permission_id,
                permissions.name AS permission_name,
                grants.granted,
                grants.expires_at,
                grants.updated_at
            FROM access_user_permissions AS grants
            INNER JOIN access_permissions AS permissions
                ON permissions.client_id = grants.client_id
                AND permissions.id = grants.permission_id
            WHERE grants.client_id = $1
              AND grants.user_id = $2
              AND (grants.expires_at IS NULL OR grants.expires_at > $3)
            ORDER BY permissions.name, grants.updated_at DESC
            "#,
        )
        .bind(client_id.as_str())
        .bind(user_id.as_uuid())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load direct grants for user '{user_id}' in client '{client_id}': {error}"
            ))
        })?;

        rows.into_iter().map(|row| row.into_grant(client_id)).collect()
    }

    async fn upsert_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<RolePermissionGrant> {
        let row = sqlx::query_as::<_, RoleGrantRow>(
            r#"
            WITH saved AS (
                INSERT INTO access_role_permissions (id, client_id, role_id, permission_id, granted)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (client_id, role_id, permission_id)
                DO UPDATE SET granted = EXCLUDED.granted, updated_at = now()
                RETURNING id, client_id, role_id, permission_id, granted, updated_at
            )
            SELECT
                saved.id,
                saved.role_id,
                saved.permission_id,
                permissions.name AS permission_name,
                saved.granted,
                saved.updated_at
            FROM saved
            INNER JOIN access_permissions AS permissions
                ON permissions.client_id = saved.client_id
                AND permissions.id = saved.permission_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id.as_str())
        .bind(role_id.as_uuid())
        .bind(permission_id.as_uuid())
        .bind(granted)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save grant of '{permission_id}' to role '{role_id}' in client '{client_id}': {error}"
            ))
        })?;

        row.into_grant(client_id)
    }

    async fn upsert_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<UserPermissionGrant> {
        let row = sqlx::query_as::<_, UserGrantRow>(
            r#"
            WITH saved AS (
                INSERT INTO access_user_permissions (
                    id, client_id, user_id, permission_id, granted, expires_at
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (client_id, user_id, permission_id)
                DO UPDATE SET
                    granted = EXCLUDED.granted,
                    expires_at = EXCLUDED.expires_at,
                    updated_at = now()
                RETURNING id, client_id, user_id, permission_id, granted, expires_at, updated_at
            )
            SELECT
                saved.id,
                saved.user_id,
                saved.permission_id,
                permissions.name AS permission_name,
                saved.granted,
                saved.expires_at,
                saved.updated_at
            FROM saved
            INNER JOIN access_permissions AS permissions
                ON permissions.client_id = saved.client_id
                AND permissions.id = saved.permission_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id.as_str())
        .bind(user_id.as_uuid())
        .bind(permission_id.as_uuid())
        .bind(granted)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save grant of '{permission_id}' to user '{user_id}' in client '{client_id}': {error}"
            ))
        })?;

        row.into_grant(client_id)
    }

    async fn remove_role_grant(
        &self,
        client_id: &ClientId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM access_role_permissions
            WHERE client_id = $1 AND role_id = $2 AND permission_id = $3
            "#,
        )
        .bind(client_id.as_str())
        .bind(role_id.as_uuid())
        .bind(permission_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to remove grant of '{permission_id}' from role '{role_id}': {error}"
            ))
        })?;

        Ok(())
    }

    async fn remove_user_grant(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM access_user_permissions
            WHERE client_id = $1 AND user_id = $2 AND permission_id = $3
            "#,
        )
        .bind(client_id.as_str())
        .bind(user_id.as_uuid())
        .bind(permission_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to remove grant of '{permission_id}' from user '{user_id}': {error}"
            ))
        })?;

        Ok(())
    }
}
