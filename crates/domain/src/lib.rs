//! Domain entities and invariants for access control.

#![forbid(unsafe_code)]

mod catalog_seed;
mod decision;
mod grant;
mod permission;
mod resolution;
mod role;
mod user;

pub use catalog_seed::{CatalogSeed, DEFAULT_MODULE_ACTIONS, ModuleSeed, PermissionSeed, RoleSeed};
pub use decision::{Decision, DecisionSource};
pub use grant::{RolePermissionGrant, UserPermissionGrant};
pub use permission::{PERMISSION_SEGMENT_MAX_LENGTH, Permission, PermissionId, PermissionName};
pub use resolution::AccessSnapshot;
pub use role::{ADMIN_ROLE_NAME, ROLE_NAME_MAX_LENGTH, Role, RoleId, RoleLookup, RoleName};
pub use user::{UserAccessProfile, UserId};
