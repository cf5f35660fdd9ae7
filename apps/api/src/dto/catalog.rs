use kontora_application::CatalogSeedReport;
use kontora_domain::{Permission, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string for permission listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionListQuery {
    pub client_id: String,
    pub module: Option<String>,
}

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub id: String,
    pub name: String,
    pub module: String,
    pub action: String,
    pub resource: Option<String>,
    pub label: String,
    pub is_system: bool,
    pub is_active: bool,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            module: value.module().to_owned(),
            action: value.action().to_owned(),
            resource: value.resource().map(str::to_owned),
            label: value.label().to_owned(),
            is_system: value.is_system(),
            is_active: value.is_active(),
        }
    }
}

/// Incoming payload for custom permission creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-permission-request.ts"
)]
pub struct CreatePermissionRequest {
    pub client_id: String,
    pub name: String,
    pub label: String,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub label: String,
    pub level: i32,
    pub is_system: bool,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            label: value.label().to_owned(),
            level: value.level(),
            is_system: value.is_system(),
        }
    }
}

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub client_id: String,
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub level: i32,
}

/// Incoming payload for role updates; absent fields are unchanged.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    pub client_id: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub level: Option<i32>,
}

/// Records created by a catalog seed run.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-seed-report-response.ts"
)]
pub struct CatalogSeedReportResponse {
    pub created_permissions: usize,
    pub created_roles: usize,
    pub created_role_grants: usize,
}

impl From<CatalogSeedReport> for CatalogSeedReportResponse {
    fn from(value: CatalogSeedReport) -> Self {
        Self {
            created_permissions: value.created_permissions,
            created_roles: value.created_roles,
            created_role_grants: value.created_role_grants,
        }
    }
}
