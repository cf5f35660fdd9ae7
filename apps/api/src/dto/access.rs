use kontora_application::EffectivePermission;
use kontora_domain::{Decision, PermissionName};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for a single permission check.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-request.ts"
)]
pub struct CheckPermissionRequest {
    pub user_id: String,
    pub permission: String,
    pub client_id: String,
}

/// Outcome of a single permission check.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-response.ts"
)]
pub struct CheckPermissionResponse {
    pub has_permission: bool,
    pub source: String,
}

impl From<Decision> for CheckPermissionResponse {
    fn from(value: Decision) -> Self {
        Self {
            has_permission: value.allowed,
            source: value.source.as_str().to_owned(),
        }
    }
}

/// Incoming payload for a batch permission check.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-many-permissions-request.ts"
)]
pub struct CheckManyPermissionsRequest {
    pub user_id: String,
    pub permissions: Vec<String>,
    pub client_id: String,
}

/// Per-permission entry of a batch check.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-decision-response.ts"
)]
pub struct PermissionDecisionResponse {
    pub permission: String,
    pub has_permission: bool,
    pub source: String,
}

impl PermissionDecisionResponse {
    pub fn new(permission: &PermissionName, decision: Decision) -> Self {
        Self {
            permission: permission.to_string(),
            has_permission: decision.allowed,
            source: decision.source.as_str().to_owned(),
        }
    }
}

/// Outcome of a batch permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-many-permissions-response.ts"
)]
pub struct CheckManyPermissionsResponse {
    pub permissions: Vec<PermissionDecisionResponse>,
}

/// Composition mode of a guard request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/guard-mode.ts"
)]
pub enum GuardMode {
    #[default]
    Any,
    All,
}

/// Incoming payload for an any/all guard.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/guard-permissions-request.ts"
)]
pub struct GuardPermissionsRequest {
    pub user_id: String,
    pub permissions: Vec<String>,
    pub client_id: String,
    #[serde(default)]
    pub mode: GuardMode,
}

/// Outcome of an any/all guard.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/guard-permissions-response.ts"
)]
pub struct GuardPermissionsResponse {
    pub allowed: bool,
}

/// Catalog permission a user is allowed, with the deciding rule.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permission-response.ts"
)]
pub struct EffectivePermissionResponse {
    pub permission_id: String,
    pub permission: String,
    pub label: String,
    pub source: String,
}

impl From<EffectivePermission> for EffectivePermissionResponse {
    fn from(value: EffectivePermission) -> Self {
        Self {
            permission_id: value.permission.id().to_string(),
            permission: value.permission.name().to_string(),
            label: value.permission.label().to_owned(),
            source: value.decision.source.as_str().to_owned(),
        }
    }
}
