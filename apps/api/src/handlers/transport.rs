use std::str::FromStr;

use chrono::{DateTime, Utc};
use kontora_core::{AppError, AppResult, ClientId};
use kontora_domain::{PermissionId, PermissionName, RoleId, UserId};

pub(super) fn client_id(value: &str) -> AppResult<ClientId> {
    ClientId::new(value)
}

pub(super) fn user_id(value: &str) -> AppResult<UserId> {
    UserId::from_str(value)
}

pub(super) fn role_id(value: &str) -> AppResult<RoleId> {
    RoleId::from_str(value)
}

pub(super) fn permission_id(value: &str) -> AppResult<PermissionId> {
    PermissionId::from_str(value)
}

pub(super) fn permission_name(value: &str) -> AppResult<PermissionName> {
    PermissionName::from_transport(value)
}

pub(super) fn permission_names(values: &[String]) -> AppResult<Vec<PermissionName>> {
    values
        .iter()
        .map(|value| permission_name(value.as_str()))
        .collect()
}

pub(super) fn expiry(value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    value
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|error| {
                    AppError::Validation(format!("invalid expiresAt '{value}': {error}"))
                })
        })
        .transpose()
}
