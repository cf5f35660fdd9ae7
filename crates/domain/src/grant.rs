use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PermissionId, PermissionName, RoleId, UserId};

/// Role stance on one permission.
///
/// A stored row with `granted = false` is an explicit deny; the absence of a
/// row means the role has no opinion. Both resolve to "not granted by role".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionGrant {
    /// Stable association id.
    pub id: Uuid,
    /// Role the association belongs to.
    pub role_id: RoleId,
    /// Permission the association targets.
    pub permission_id: PermissionId,
    /// Name of the targeted permission.
    pub permission_name: PermissionName,
    /// Grant (`true`) or explicit deny (`false`).
    pub granted: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Direct per-user override of one permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissionGrant {
    /// Stable association id.
    pub id: Uuid,
    /// User the override applies to.
    pub user_id: UserId,
    /// Permission the association targets.
    pub permission_id: PermissionId,
    /// Name of the targeted permission.
    pub permission_name: PermissionName,
    /// Grant (`true`) or revocation (`false`).
    pub granted: bool,
    /// Optional expiry; expired rows are inert.
    pub expires_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserPermissionGrant {
    /// Whether the override still applies at `now`.
    ///
    /// A grant expiring exactly at `now` is already expired.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|expires_at| expires_at > now)
            .unwrap_or(true)
    }
}
