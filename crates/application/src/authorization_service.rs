use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{AccessSnapshot, Decision, Permission, PermissionName, RoleName, UserId};

use crate::{GrantRepository, PermissionCatalogRepository, UserDirectory};

mod bulk;
mod resolution;

/// Catalog permission allowed for a user, with the rule that allowed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermission {
    /// Catalog entry.
    pub permission: Permission,
    /// Allowing decision.
    pub decision: Decision,
}

/// Application service resolving client-scoped permission checks.
///
/// Checks never fail for "no permission" or for an unknown user: both resolve
/// to a deny decision. Storage failures are propagated unchanged.
#[derive(Clone)]
pub struct AuthorizationService {
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    grant_repository: Arc<dyn GrantRepository>,
    user_directory: Arc<dyn UserDirectory>,
}

impl AuthorizationService {
    /// Creates a new authorization service from repository implementations.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        grant_repository: Arc<dyn GrantRepository>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            catalog_repository,
            grant_repository,
            user_directory,
        }
    }

    /// Ensures a user holds the permission, failing with `Forbidden` otherwise.
    pub async fn require_permission(
        &self,
        client_id: &ClientId,
        user_id: UserId,
        permission: &PermissionName,
    ) -> AppResult<()> {
        let decision = self.resolve(client_id, user_id, permission).await?;
        if decision.allowed {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing permission '{permission}' in client '{client_id}'"
        )))
    }
}
