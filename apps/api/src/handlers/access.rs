use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::debug;

use crate::dto::{
    CheckManyPermissionsRequest, CheckManyPermissionsResponse, CheckPermissionRequest,
    CheckPermissionResponse, ClientQuery, EffectivePermissionResponse, GuardMode,
    GuardPermissionsRequest, GuardPermissionsResponse, PermissionDecisionResponse,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

use super::transport;

pub async fn check_permission_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CheckPermissionRequest>,
) -> ApiResult<Json<CheckPermissionResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let user_id = transport::user_id(payload.user_id.as_str())?;
    let permission = transport::permission_name(payload.permission.as_str())?;

    let decision = state
        .authorization_service
        .resolve(&client_id, user_id, &permission)
        .await?;

    Ok(Json(CheckPermissionResponse::from(decision)))
}

/// Entries are returned in request order; repeated names repeat their decision.
pub async fn check_many_permissions_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CheckManyPermissionsRequest>,
) -> ApiResult<Json<CheckManyPermissionsResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let user_id = transport::user_id(payload.user_id.as_str())?;
    let permissions = transport::permission_names(payload.permissions.as_slice())?;

    let decisions = state
        .authorization_service
        .resolve_all(&client_id, user_id, permissions.as_slice())
        .await?;

    let permissions = permissions
        .iter()
        .filter_map(|permission| {
            decisions
                .get(permission)
                .map(|decision| PermissionDecisionResponse::new(permission, *decision))
        })
        .collect();

    Ok(Json(CheckManyPermissionsResponse { permissions }))
}

pub async fn guard_permissions_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<GuardPermissionsRequest>,
) -> ApiResult<Json<GuardPermissionsResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let user_id = transport::user_id(payload.user_id.as_str())?;
    let permissions = transport::permission_names(payload.permissions.as_slice())?;

    let allowed = match payload.mode {
        GuardMode::Any => {
            state
                .authorization_service
                .has_any(&client_id, user_id, permissions.as_slice())
                .await?
        }
        GuardMode::All => {
            state
                .authorization_service
                .has_all(&client_id, user_id, permissions.as_slice())
                .await?
        }
    };

    debug!(%client_id, %user_id, mode = ?payload.mode, allowed, "evaluated permission guard");
    Ok(Json(GuardPermissionsResponse { allowed }))
}

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<Vec<EffectivePermissionResponse>>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let user_id = transport::user_id(user_id.as_str())?;

    let permissions = state
        .authorization_service
        .effective_permissions(&client_id, user_id)
        .await?
        .into_iter()
        .map(EffectivePermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}
