use std::sync::Arc;

use chrono::{Duration, Utc};

use kontora_core::AppError;
use kontora_domain::{Decision, RoleId, UserId};

use crate::AuthorizationService;
use crate::PermissionCatalogRepository;
use crate::test_support::{FakeAccessStore, client, permission_name};

use super::{GrantAdminService, UpsertRoleGrantInput, UpsertUserGrantInput};

fn service(store: &Arc<FakeAccessStore>) -> GrantAdminService {
    GrantAdminService::new(store.clone(), store.clone(), store.clone())
}

#[tokio::test]
async fn role_grant_upsert_flips_existing_association() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;
    let viewer = store.add_role(&client_id, "VIEWER", true).await;
    let grants = service(&store);

    let first = grants
        .upsert_role_grant(
            &client_id,
            UpsertRoleGrantInput {
                role_id: viewer,
                permission_id: chat_read,
                granted: true,
            },
        )
        .await;
    let second = grants
        .upsert_role_grant(
            &client_id,
            UpsertRoleGrantInput {
                role_id: viewer,
                permission_id: chat_read,
                granted: false,
            },
        )
        .await;
    assert!(first.is_ok());
    assert!(second.is_ok());

    let listed = grants
        .list_role_grants(&client_id, viewer)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].granted);

    assert!(grants.remove_role_grant(&client_id, viewer, chat_read).await.is_ok());
    assert!(
        grants
            .remove_role_grant(&client_id, viewer, chat_read)
            .await
            .is_ok()
    );
    let after = grants
        .list_role_grants(&client_id, viewer)
        .await
        .unwrap_or_default();
    assert!(after.is_empty());
}

#[tokio::test]
async fn role_grants_require_existing_role() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;

    let result = service(&store)
        .upsert_role_grant(
            &client_id,
            UpsertRoleGrantInput {
                role_id: RoleId::new(),
                permission_id: chat_read,
                granted: true,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deactivated_permissions_cannot_be_granted() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;
    let user_id = store.add_user(&client_id, "EMPLOYEE", true).await;
    assert!(
        store
            .set_permission_active(&client_id, chat_read, false)
            .await
            .is_ok()
    );

    let result = service(&store)
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id,
                permission_id: chat_read,
                granted: true,
                expires_at: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn deactivated_permissions_still_accept_revocations() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;
    let employee = store.add_role(&client_id, "EMPLOYEE", true).await;
    let user_id = store.add_user(&client_id, "EMPLOYEE", true).await;
    let grants = service(&store);
    let authorization = AuthorizationService::new(store.clone(), store.clone(), store.clone());
    let name = permission_name("chat.read");

    let allow = UpsertRoleGrantInput {
        role_id: employee,
        permission_id: chat_read,
        granted: true,
    };
    assert!(grants.upsert_role_grant(&client_id, allow).await.is_ok());
    assert!(
        store
            .set_permission_active(&client_id, chat_read, false)
            .await
            .is_ok()
    );
    assert_eq!(
        authorization.resolve(&client_id, user_id, &name).await.ok(),
        Some(Decision::role())
    );

    let revoke = grants
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id,
                permission_id: chat_read,
                granted: false,
                expires_at: None,
            },
        )
        .await;
    assert!(revoke.is_ok());
    assert_eq!(
        authorization.resolve(&client_id, user_id, &name).await.ok(),
        Some(Decision::direct(false))
    );

    let deny = grants
        .upsert_role_grant(
            &client_id,
            UpsertRoleGrantInput {
                granted: false,
                ..allow
            },
        )
        .await;
    assert!(deny.is_ok_and(|grant| !grant.granted));

    let reallow = grants.upsert_role_grant(&client_id, allow).await;
    assert!(matches!(reallow, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn removing_grant_of_unknown_role_is_a_no_op() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;
    let grants = service(&store);

    let unknown_role = grants
        .remove_role_grant(&client_id, RoleId::new(), chat_read)
        .await;
    let unknown_user = grants
        .remove_user_grant(&client_id, UserId::new(), chat_read)
        .await;

    assert!(unknown_role.is_ok());
    assert!(unknown_user.is_ok());
}

#[tokio::test]
async fn user_grants_reject_past_expiry() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;
    let user_id = store.add_user(&client_id, "EMPLOYEE", true).await;

    let result = service(&store)
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id,
                permission_id: chat_read,
                granted: true,
                expires_at: Some(Utc::now() - Duration::minutes(1)),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn user_grants_require_known_user() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let chat_read = store.add_permission(&client_id, "chat.read").await;

    let result = service(&store)
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id: UserId::new(),
                permission_id: chat_read,
                granted: true,
                expires_at: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn saved_user_grant_is_visible_to_resolution() {
    let store = Arc::new(FakeAccessStore::default());
    let client_id = client("acme");
    let backups_create = store.add_permission(&client_id, "backups.create").await;
    let user_id = store.add_user(&client_id, "EMPLOYEE", true).await;
    let grants = service(&store);
    let authorization = AuthorizationService::new(store.clone(), store.clone(), store.clone());
    let name = permission_name("backups.create");

    let saved = grants
        .upsert_user_grant(
            &client_id,
            UpsertUserGrantInput {
                user_id,
                permission_id: backups_create,
                granted: true,
                expires_at: Some(Utc::now() + Duration::hours(1)),
            },
        )
        .await;
    assert!(saved.is_ok());
    assert_eq!(
        authorization.resolve(&client_id, user_id, &name).await.ok(),
        Some(Decision::direct(true))
    );
    assert_eq!(
        grants
            .list_user_grants(&client_id, user_id)
            .await
            .map(|listed| listed.len())
            .ok(),
        Some(1)
    );

    assert!(
        grants
            .remove_user_grant(&client_id, user_id, backups_create)
            .await
            .is_ok()
    );
    assert_eq!(
        authorization.resolve(&client_id, user_id, &name).await.ok(),
        Some(Decision::deny())
    );
}
