use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use kontora_application::UserDirectory;
use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{RoleName, UserAccessProfile, UserId};

/// PostgreSQL-backed read model of user access profiles.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserProfileRow {
    primary_role: String,
    is_active: bool,
    role_assignments: Vec<String>,
}

fn decode_role(value: &str, user_id: UserId) -> AppResult<RoleName> {
    RoleName::new(value).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode role '{value}' of user '{user_id}': {error}"
        ))
    })
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user_access_profile(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Option<UserAccessProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT
                users.primary_role,
                users.is_active,
                COALESCE(
                    ARRAY_AGG(assignments.role_name ORDER BY assignments.role_name)
                        FILTER (WHERE assignments.role_name IS NOT NULL),
                    ARRAY[]::TEXT[]
                ) AS role_assignments
            FROM access_users AS users
            LEFT JOIN access_user_role_assignments AS assignments
                ON assignments.client_id = users.client_id
                AND assignments.user_id = users.id
            WHERE users.client_id = $1 AND users.id = $2
            GROUP BY users.primary_role, users.is_active
            "#,
        )
        .bind(client_id.as_str())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load user '{user_id}' for client '{client_id}': {error}"
            ))
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role_assignments = row
            .role_assignments
            .iter()
            .map(|role| decode_role(role.as_str(), user_id))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(UserAccessProfile {
            id: user_id,
            primary_role: decode_role(row.primary_role.as_str(), user_id)?,
            role_assignments,
            is_active: row.is_active,
        }))
    }
}
