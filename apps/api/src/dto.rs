mod access;
mod catalog;
mod common;
mod grants;

pub use access::{
    CheckManyPermissionsRequest, CheckManyPermissionsResponse, CheckPermissionRequest,
    CheckPermissionResponse, EffectivePermissionResponse, GuardMode, GuardPermissionsRequest,
    GuardPermissionsResponse, PermissionDecisionResponse,
};
pub use catalog::{
    CatalogSeedReportResponse, CreatePermissionRequest, CreateRoleRequest, PermissionListQuery,
    PermissionResponse, RoleResponse, UpdateRoleRequest,
};
pub use common::{ClientQuery, HealthResponse};
pub use grants::{
    RemoveRoleGrantRequest, RemoveUserGrantRequest, RoleGrantResponse, UpsertRoleGrantRequest,
    UpsertUserGrantRequest, UserGrantResponse,
};
