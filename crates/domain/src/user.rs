use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kontora_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RoleName;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid user id '{value}': {error}")))
    }
}

/// Access-relevant projection of a user, as read from the entity store.
///
/// The primary role and the role-assignment join are kept as two separate
/// fields; both are inspected by the admin override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessProfile {
    /// User identifier.
    pub id: UserId,
    /// Primary role carried on the user row.
    pub primary_role: RoleName,
    /// Additional role assignments from the membership join.
    pub role_assignments: Vec<RoleName>,
    /// Inactive users fail every permission check.
    pub is_active: bool,
}

impl UserAccessProfile {
    /// Whether the user holds the built-in super-role in either field.
    #[must_use]
    pub fn holds_admin_role(&self) -> bool {
        self.primary_role.is_admin() || self.role_assignments.iter().any(RoleName::is_admin)
    }

    /// Returns the distinct role names whose grants apply to the user.
    #[must_use]
    pub fn effective_role_names(&self) -> BTreeSet<RoleName> {
        std::iter::once(self.primary_role.clone())
            .chain(self.role_assignments.iter().cloned())
            .collect()
    }
}
