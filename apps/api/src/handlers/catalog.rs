use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use kontora_application::{CreatePermissionInput, CreateRoleInput, UpdateRoleInput};
use kontora_domain::{RoleLookup, RoleName};

use crate::dto::{
    CatalogSeedReportResponse, ClientQuery, CreatePermissionRequest, CreateRoleRequest,
    PermissionListQuery, PermissionResponse, RoleResponse, UpdateRoleRequest,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

use super::transport;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Query(query): Query<PermissionListQuery>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let permissions = state
        .catalog_service
        .list_permissions(&client_id, query.module.as_deref())
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn get_permission_handler(
    State(state): State<AppState>,
    Path(permission): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<PermissionResponse>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let name = transport::permission_name(permission.as_str())?;
    let permission = state.catalog_service.get_permission(&client_id, &name).await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let permission = state
        .catalog_service
        .create_permission(
            &client_id,
            CreatePermissionInput {
                name: transport::permission_name(payload.name.as_str())?,
                label: payload.label,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn deactivate_permission_handler(
    State(state): State<AppState>,
    Path(permission): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<StatusCode> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let permission_id = transport::permission_id(permission.as_str())?;
    state
        .catalog_service
        .deactivate_permission(&client_id, permission_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let roles = state
        .catalog_service
        .list_roles(&client_id)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<RoleResponse>> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let lookup = RoleLookup::parse(role.as_str())?;
    let role = state.catalog_service.get_role(&client_id, &lookup).await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let role = state
        .catalog_service
        .create_role(
            &client_id,
            CreateRoleInput {
                name: RoleName::new(payload.name)?,
                label: payload.label,
                level: payload.level,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
    ApiJson(payload): ApiJson<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let client_id = transport::client_id(payload.client_id.as_str())?;
    let role_id = transport::role_id(role.as_str())?;
    let role = state
        .catalog_service
        .update_role(
            &client_id,
            role_id,
            UpdateRoleInput {
                name: payload.name.map(RoleName::new).transpose()?,
                label: payload.label,
                level: payload.level,
            },
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<StatusCode> {
    let client_id = transport::client_id(query.client_id.as_str())?;
    let role_id = transport::role_id(role.as_str())?;
    state.catalog_service.delete_role(&client_id, role_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn seed_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<CatalogSeedReportResponse>> {
    let client_id = transport::client_id(client_id.as_str())?;
    let report = state.catalog_service.seed_client(&client_id).await?;

    Ok(Json(CatalogSeedReportResponse::from(report)))
}
