//! Application services and ports for client-scoped authorization.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod catalog_service;
mod grant_admin_service;

#[cfg(test)]
mod test_support;

pub use access_ports::{GrantRepository, PermissionCatalogRepository, UserDirectory};
pub use authorization_service::{AuthorizationService, EffectivePermission};
pub use catalog_service::{
    CatalogSeedReport, CatalogService, CreatePermissionInput, CreateRoleInput, UpdateRoleInput,
};
pub use grant_admin_service::{GrantAdminService, UpsertRoleGrantInput, UpsertUserGrantInput};
