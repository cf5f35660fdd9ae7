use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use kontora_application::{UpsertRoleGrantInput, UpsertUserGrantInput};
use kontora_domain::RoleLookup;

use crate::dto::{
    ClientQuery, RemoveRoleGrantRequest, RemoveUserGrantRequest, RoleGrantResponse,
    UpsertRoleGrantRequest, UpsertUserGrantRequest, UserGrantResponse,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

use super::transport;

/// Accepts a role id or a role name.
pub async fn list_role_grants_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<Vec<RoleGrantResponse>>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let lookup = RoleLookup::parse(role.as_str())?;
    let role = state.catalog_service.get_role(&client_id, &lookup).await?;

    let grants = state
        .grant_admin_service
        .list_role_grants(&client_id, role.id())
        .await?
        .into_iter()
        .map(RoleGrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn list_user_grants_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<Vec<UserGrantResponse>>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let user_id = transport::user_id(user_id.as_str())?;

    let grants = state
        .grant_admin_service
        .list_user_grants(&client_id, user_id)
        .await?
        .into_iter()
        .map(UserGrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn upsert_role_grant_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpsertRoleGrantRequest>,
) -> ApiResult<Json<RoleGrantResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let grant = state
        .grant_admin_service
        .upsert_role_grant(
            &client_id,
            UpsertRoleGrantInput {
                role_id: transport::role_id(payload.role_id.as_str())?,
                permission_id: transport::permission_id(payload.permission_id.as_str())?,
                granted: payload.granted,
            },
        )
        .await?;

    Ok(Json(RoleGrantResponse::from(grant)))
}

pub async fn remove_role_grant_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RemoveRoleGrantRequest>,
) -> ApiResult<StatusCode> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    state
        .grant_admin_service
        .remove_role_grant(
            &client_id,
            transport::role_id(payload.role_id.as_str())?,
            transport::permission_id(payload.permission_id.as_str())?,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn upsert_user_grant_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpsertUserGrantRequest>,
) -> ApiResult<Json<UserGrantResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let grant = state
        .grant_admin_service
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id: transport::user_id(payload.user_id.as_str())?,
                permission_id: transport::permission_id(payload.permission_id.as_str())?,
                granted: payload.granted,
                expires_at: transport::expiry(payload.expires_at.as_deref())?,
            },
        )
        .await?;

    Ok(Json(UserGrantResponse::from(grant)))
}

pub async fn remove_user_grant_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RemoveUserGrantRequest>,
) -> ApiResult<StatusCode> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    state
        .grant_admin_service
        .remove_user_grant(
            &client_id,
            transport::user_id(payload.user_id.as_str())?,
            transport::permission_id(payload.permission_id.as_str())?,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
