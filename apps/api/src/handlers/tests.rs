use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{Duration, Utc};

use kontora_core::{AppError, ClientId};
use kontora_domain::{CatalogSeed, PermissionName, RoleLookup, RoleName, UserAccessProfile, UserId};
use kontora_infrastructure::InMemoryAccessRepository;

use crate::api_router::build_router;
use crate::api_services::compose_state;
use crate::dto::{
    CheckManyPermissionsRequest, CheckPermissionRequest, ClientQuery, GuardMode,
    GuardPermissionsRequest, UpsertRoleGrantRequest, UpsertUserGrantRequest,
};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

use super::{access, catalog, grants};

const CLIENT: &str = "acme";

struct Fixture {
    state: AppState,
    repository: Arc<InMemoryAccessRepository>,
}

async fn seeded_fixture() -> Fixture {
    let repository = Arc::new(InMemoryAccessRepository::new());
    let Ok(seed) = CatalogSeed::builtin() else {
        panic!("builtin seed invalid");
    };
    let state = compose_state(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        seed,
    );

    let Ok(client_id) = ClientId::new(CLIENT) else {
        panic!("invalid client");
    };
    assert!(state.catalog_service.seed_client(&client_id).await.is_ok());

    Fixture { state, repository }
}

async fn add_user(fixture: &Fixture, role: &str, is_active: bool) -> UserId {
    let Ok(client_id) = ClientId::new(CLIENT) else {
        panic!("invalid client");
    };
    let Ok(primary_role) = RoleName::new(role) else {
        panic!("invalid role");
    };
    let user_id = UserId::new();
    fixture
        .repository
        .save_user_profile(
            &client_id,
            UserAccessProfile {
                id: user_id,
                primary_role,
                role_assignments: Vec::new(),
                is_active,
            },
        )
        .await;
    user_id
}

fn check_request(user_id: UserId, permission: &str) -> ApiJson<CheckPermissionRequest> {
    ApiJson(CheckPermissionRequest {
        user_id: user_id.to_string(),
        permission: permission.to_owned(),
        client_id: CLIENT.to_owned(),
    })
}

async fn permission_id(fixture: &Fixture, name: &str) -> String {
    let Ok(client_id) = ClientId::new(CLIENT) else {
        panic!("invalid client");
    };
    let Ok(name) = name.parse::<PermissionName>() else {
        panic!("invalid permission name");
    };
    match fixture
        .state
        .catalog_service
        .get_permission(&client_id, &name)
        .await
    {
        Ok(permission) => permission.id().to_string(),
        Err(error) => panic!("permission missing: {error}"),
    }
}

#[tokio::test]
async fn router_builds_without_route_conflicts() {
    let fixture = seeded_fixture().await;
    assert!(build_router(fixture.state, "http://localhost:3000").is_ok());
}

#[tokio::test]
async fn check_reports_role_source_for_seeded_employee() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "EMPLOYEE", true).await;

    let response = access::check_permission_handler(
        State(fixture.state.clone()),
        check_request(user_id, "contacts.read"),
    )
    .await;
    let Ok(Json(response)) = response else {
        panic!("check failed");
    };
    assert!(response.has_permission);
    assert_eq!(response.source, "role");

    let denied = access::check_permission_handler(
        State(fixture.state),
        check_request(user_id, "backups.delete"),
    )
    .await;
    let Ok(Json(denied)) = denied else {
        panic!("check failed");
    };
    assert!(!denied.has_permission);
    assert_eq!(denied.source, "none");
}

#[tokio::test]
async fn check_rejects_malformed_permission_names() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "EMPLOYEE", true).await;

    let response = access::check_permission_handler(
        State(fixture.state),
        check_request(user_id, "Contacts Read"),
    )
    .await;

    assert!(matches!(response, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn check_for_unknown_user_is_a_denial_not_an_error() {
    let fixture = seeded_fixture().await;

    let response = access::check_permission_handler(
        State(fixture.state),
        check_request(UserId::new(), "contacts.read"),
    )
    .await;

    let Ok(Json(response)) = response else {
        panic!("unknown user surfaced as an error");
    };
    assert!(!response.has_permission);
    assert_eq!(response.source, "none");
}

#[tokio::test]
async fn check_many_preserves_request_order() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "ADMIN", true).await;

    let response = access::check_many_permissions_handler(
        State(fixture.state),
        ApiJson(CheckManyPermissionsRequest {
            user_id: user_id.to_string(),
            permissions: vec!["users.delete".to_owned(), "anything.whatever".to_owned()],
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    let Ok(Json(response)) = response else {
        panic!("batch check failed");
    };

    let names: Vec<&str> = response
        .permissions
        .iter()
        .map(|entry| entry.permission.as_str())
        .collect();
    assert_eq!(names, vec!["users.delete", "anything.whatever"]);
    assert!(
        response
            .permissions
            .iter()
            .all(|entry| entry.has_permission && entry.source == "admin")
    );
}

#[tokio::test]
async fn guard_supports_any_and_all_modes() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "VIEWER", true).await;
    let request = |mode| {
        ApiJson(GuardPermissionsRequest {
            user_id: user_id.to_string(),
            permissions: vec!["chat.read".to_owned(), "chat.delete".to_owned()],
            client_id: CLIENT.to_owned(),
            mode,
        })
    };

    let any =
        access::guard_permissions_handler(State(fixture.state.clone()), request(GuardMode::Any))
            .await;
    let all = access::guard_permissions_handler(State(fixture.state), request(GuardMode::All)).await;

    assert!(matches!(any, Ok(Json(ref response)) if response.allowed));
    assert!(matches!(all, Ok(Json(ref response)) if !response.allowed));
}

#[tokio::test]
async fn direct_revocation_flows_through_grant_endpoints() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "EMPLOYEE", true).await;
    let contacts_read = permission_id(&fixture, "contacts.read").await;

    let saved = grants::upsert_user_grant_handler(
        State(fixture.state.clone()),
        ApiJson(UpsertUserGrantRequest {
            user_id: user_id.to_string(),
            permission_id: contacts_read.clone(),
            granted: false,
            expires_at: Some((Utc::now() + Duration::days(1)).to_rfc3339()),
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    let Ok(Json(saved)) = saved else {
        panic!("user grant rejected");
    };
    assert!(!saved.granted);
    assert_eq!(saved.permission, "contacts.read");

    let check = access::check_permission_handler(
        State(fixture.state.clone()),
        check_request(user_id, "contacts.read"),
    )
    .await;
    assert!(matches!(
        check,
        Ok(Json(ref response)) if !response.has_permission && response.source == "direct"
    ));

    let listed = grants::list_user_grants_handler(
        State(fixture.state),
        Path(user_id.to_string()),
        Query(ClientQuery {
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    assert!(matches!(listed, Ok(Json(ref grants)) if grants.len() == 1));
}

#[tokio::test]
async fn user_grant_rejects_malformed_expiry() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "EMPLOYEE", true).await;
    let contacts_read = permission_id(&fixture, "contacts.read").await;

    let response = grants::upsert_user_grant_handler(
        State(fixture.state),
        ApiJson(UpsertUserGrantRequest {
            user_id: user_id.to_string(),
            permission_id: contacts_read,
            granted: true,
            expires_at: Some("tomorrow".to_owned()),
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;

    assert!(matches!(response, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn role_grant_endpoint_changes_role_decision() {
    let fixture = seeded_fixture().await;
    let user_id = add_user(&fixture, "VIEWER", true).await;
    let Ok(client_id) = ClientId::new(CLIENT) else {
        panic!("invalid client");
    };
    let Ok(viewer_name) = RoleName::new("VIEWER") else {
        panic!("invalid role");
    };
    let viewer = fixture
        .state
        .catalog_service
        .get_role(&client_id, &RoleLookup::Name(viewer_name))
        .await;
    let Ok(viewer) = viewer else {
        panic!("VIEWER missing");
    };
    let backups_read = permission_id(&fixture, "backups.read").await;

    let saved = grants::upsert_role_grant_handler(
        State(fixture.state.clone()),
        ApiJson(UpsertRoleGrantRequest {
            role_id: viewer.id().to_string(),
            permission_id: backups_read,
            granted: true,
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    assert!(saved.is_ok());

    let check = access::check_permission_handler(
        State(fixture.state.clone()),
        check_request(user_id, "backups.read"),
    )
    .await;
    assert!(matches!(
        check,
        Ok(Json(ref response)) if response.has_permission && response.source == "role"
    ));

    let listed = grants::list_role_grants_handler(
        State(fixture.state),
        Path("VIEWER".to_owned()),
        Query(ClientQuery {
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    assert!(matches!(listed, Ok(Json(ref grants)) if grants.len() == 4));
}

#[tokio::test]
async fn system_role_delete_maps_to_bad_request() {
    let fixture = seeded_fixture().await;
    let role = catalog::get_role_handler(
        State(fixture.state.clone()),
        Path("ADMIN".to_owned()),
        Query(ClientQuery {
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;
    let Ok(Json(role)) = role else {
        panic!("ADMIN missing");
    };

    let deleted = catalog::delete_role_handler(
        State(fixture.state),
        Path(role.id),
        Query(ClientQuery {
            client_id: CLIENT.to_owned(),
        }),
    )
    .await;

    let Err(error) = deleted else {
        panic!("system role deleted");
    };
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reseeding_reports_nothing_new() {
    let fixture = seeded_fixture().await;

    let report = catalog::seed_client_handler(State(fixture.state), Path(CLIENT.to_owned())).await;

    let Ok(Json(report)) = report else {
        panic!("reseed failed");
    };
    assert_eq!(report.created_permissions, 0);
    assert_eq!(report.created_roles, 0);
}

#[test]
fn error_statuses_follow_error_kind() {
    let cases = [
        (AppError::Validation(String::new()), StatusCode::BAD_REQUEST),
        (AppError::NotFound(String::new()), StatusCode::NOT_FOUND),
        (AppError::Conflict(String::new()), StatusCode::CONFLICT),
        (AppError::Forbidden(String::new()), StatusCode::FORBIDDEN),
        (
            AppError::Internal(String::new()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        assert_eq!(ApiError(error).into_response().status(), status);
    }
}
