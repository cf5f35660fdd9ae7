use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kontora_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted length of one permission name segment.
pub const PERMISSION_SEGMENT_MAX_LENGTH: usize = 64;

/// Unique identifier for a permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a new random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
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

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PermissionId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid permission id '{value}': {error}")))
    }
}

/// Tagged permission identifier following the `module.action[.resource]` convention.
///
/// Names are parsed once at the boundary so that a typo surfaces as a
/// validation error instead of silently resolving to a default deny.
/// Segments are lowercase ASCII letters, digits, `_` or `-`, and must start
/// with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionName {
    module: String,
    action: String,
    resource: Option<String>,
}

impl PermissionName {
    /// Builds a permission name from its parts.
    pub fn new(
        module: impl Into<String>,
        action: impl Into<String>,
        resource: Option<String>,
    ) -> AppResult<Self> {
        let module = module.into();
        let action = action.into();
        validate_segment("module", module.as_str())?;
        validate_segment("action", action.as_str())?;
        if let Some(resource) = resource.as_deref() {
            validate_segment("resource", resource)?;
        }

        Ok(Self {
            module,
            action,
            resource,
        })
    }

    /// Parses a transport value into a permission name.
    pub fn from_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }

    /// Returns the module segment.
    #[must_use]
    pub fn module(&self) -> &str {
        self.module.as_str()
    }

    /// Returns the action segment.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }

    /// Returns the optional resource segment.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

fn validate_segment(kind: &str, value: &str) -> AppResult<()> {
    let mut characters = value.chars();
    let starts_with_letter = characters
        .next()
        .map(|first| first.is_ascii_lowercase())
        .unwrap_or(false);

    if !starts_with_letter {
        return Err(AppError::Validation(format!(
            "permission {kind} '{value}' must start with a lowercase letter"
        )));
    }

    if value.len() > PERMISSION_SEGMENT_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "permission {kind} '{value}' must not exceed {PERMISSION_SEGMENT_MAX_LENGTH} characters"
        )));
    }

    if !characters.all(|character| {
        character.is_ascii_lowercase()
            || character.is_ascii_digit()
            || character == '_'
            || character == '-'
    }) {
        return Err(AppError::Validation(format!(
            "permission {kind} '{value}' may only contain lowercase letters, digits, '_' or '-'"
        )));
    }

    Ok(())
}

impl FromStr for PermissionName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = value.trim().split('.').collect();
        match segments.as_slice() {
            [module, action] => Self::new(*module, *action, None),
            [module, action, resource] => Self::new(*module, *action, Some((*resource).to_owned())),
            _ => Err(AppError::Validation(format!(
                "permission '{value}' must follow 'module.action' or 'module.action.resource'"
            ))),
        }
    }
}

impl Display for PermissionName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.resource {
            Some(resource) => write!(formatter, "{}.{}.{resource}", self.module, self.action),
            None => write!(formatter, "{}.{}", self.module, self.action),
        }
    }
}

impl Serialize for PermissionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PermissionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(value.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Permission catalog entry in one client scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    name: PermissionName,
    label: NonEmptyString,
    is_system: bool,
    is_active: bool,
}

impl Permission {
    /// Creates an active permission definition.
    pub fn new(
        id: PermissionId,
        name: PermissionName,
        label: impl Into<String>,
        is_system: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name,
            label: NonEmptyString::new(label)?,
            is_system,
            is_active: true,
        })
    }

    /// Returns a copy with the given activity flag, used when rehydrating stored rows.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns the stable permission id.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &PermissionName {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the module the permission belongs to.
    #[must_use]
    pub fn module(&self) -> &str {
        self.name.module()
    }

    /// Returns the permission action.
    #[must_use]
    pub fn action(&self) -> &str {
        self.name.action()
    }

    /// Returns the optional permission resource.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.name.resource()
    }

    /// Whether the permission is built-in and cannot be deleted.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Whether the permission is still part of the active catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
