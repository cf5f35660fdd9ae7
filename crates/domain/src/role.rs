use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kontora_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the built-in super-role that bypasses every grant.
pub const ADMIN_ROLE_NAME: &str = "ADMIN";

/// Maximum accepted length of a role name.
pub const ROLE_NAME_MAX_LENGTH: usize = 64;

/// Unique identifier for a role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a new random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
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

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RoleId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid role id '{value}': {error}")))
    }
}

/// Validated role name, unique within one client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "role name must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(format!(
                "role name '{trimmed}' must not contain whitespace"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the built-in super-role name.
    #[must_use]
    pub fn admin() -> Self {
        Self(ADMIN_ROLE_NAME.to_owned())
    }

    /// Whether this is the built-in super-role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN_ROLE_NAME
    }

    /// Returns the underlying name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Role lookup key accepted by catalog reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleLookup {
    /// Lookup by stable id.
    Id(RoleId),
    /// Lookup by unique name.
    Name(RoleName),
}

impl RoleLookup {
    /// Parses an id-or-name path value. UUID-shaped values are treated as ids.
    pub fn parse(value: &str) -> AppResult<Self> {
        match Uuid::parse_str(value.trim()) {
            Ok(uuid) => Ok(Self::Id(RoleId::from_uuid(uuid))),
            Err(_) => RoleName::new(value).map(Self::Name),
        }
    }
}

impl Display for RoleLookup {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(role_id) => write!(formatter, "{role_id}"),
            Self::Name(role_name) => write!(formatter, "{role_name}"),
        }
    }
}

/// Role definition in one client scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: RoleName,
    label: NonEmptyString,
    level: i32,
    is_system: bool,
}

impl Role {
    /// Creates a role definition.
    ///
    /// `level` is informational: higher means more authority, but only the
    /// [`ADMIN_ROLE_NAME`] role carries special meaning during resolution.
    pub fn new(
        id: RoleId,
        name: RoleName,
        label: impl Into<String>,
        level: i32,
        is_system: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name,
            label: NonEmptyString::new(label)?,
            level,
            is_system,
        })
    }

    /// Returns the stable role id.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the authority level.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Whether the role is system-managed.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Applies an administrative update.
    ///
    /// System roles keep their name; renaming one is rejected.
    pub fn apply_update(
        &mut self,
        name: Option<RoleName>,
        label: Option<String>,
        level: Option<i32>,
    ) -> AppResult<()> {
        if let Some(name) = name.as_ref()
            && self.is_system
            && name != &self.name
        {
            return Err(AppError::Validation(format!(
                "system role '{}' cannot be renamed",
                self.name
            )));
        }

        let label = label.map(NonEmptyString::new).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }

        if let Some(label) = label {
            self.label = label;
        }

        if let Some(level) = level {
            self.level = level;
        }

        Ok(())
    }
}
