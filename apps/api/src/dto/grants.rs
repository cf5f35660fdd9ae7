use kontora_domain::{RolePermissionGrant, UserPermissionGrant};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for setting a role stance on a permission.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-role-grant-request.ts"
)]
pub struct UpsertRoleGrantRequest {
    pub role_id: String,
    pub permission_id: String,
    pub granted: bool,
    pub client_id: String,
}

/// Incoming payload for removing a role stance.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/remove-role-grant-request.ts"
)]
pub struct RemoveRoleGrantRequest {
    pub role_id: String,
    pub permission_id: String,
    pub client_id: String,
}

/// API representation of a role grant association.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-grant-response.ts"
)]
pub struct RoleGrantResponse {
    pub id: String,
    pub role_id: String,
    pub permission_id: String,
    pub permission: String,
    pub granted: bool,
    pub updated_at: String,
}

impl From<RolePermissionGrant> for RoleGrantResponse {
    fn from(value: RolePermissionGrant) -> Self {
        Self {
            id: value.id.to_string(),
            role_id: value.role_id.to_string(),
            permission_id: value.permission_id.to_string(),
            permission: value.permission_name.to_string(),
            granted: value.granted,
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for setting a direct user override.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-user-grant-request.ts"
)]
pub struct UpsertUserGrantRequest {
    pub user_id: String,
    pub permission_id: String,
    pub granted: bool,
    /// RFC3339 timestamp.
    pub expires_at: Option<String>,
    pub client_id: String,
}

/// Incoming payload for removing a direct user override.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/remove-user-grant-request.ts"
)]
pub struct RemoveUserGrantRequest {
    pub user_id: String,
    pub permission_id: String,
    pub client_id: String,
}

/// API representation of a direct user override.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-grant-response.ts"
)]
pub struct UserGrantResponse {
    pub id: String,
    pub user_id: String,
    pub permission_id: String,
    pub permission: String,
    pub granted: bool,
    pub expires_at: Option<String>,
    pub updated_at: String,
}

impl From<UserPermissionGrant> for UserGrantResponse {
    fn from(value: UserPermissionGrant) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            permission_id: value.permission_id.to_string(),
            permission: value.permission_name.to_string(),
            granted: value.granted,
            expires_at: value.expires_at.map(|expires_at| expires_at.to_rfc3339()),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
