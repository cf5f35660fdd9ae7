use std::str::FromStr;

use chrono::{Duration, Utc};

use kontora_application::{GrantRepository, PermissionCatalogRepository, UserDirectory};
use kontora_core::{AppError, ClientId};
use kontora_domain::{
    Permission, PermissionId, PermissionName, Role, RoleId, RoleLookup, RoleName,
    UserAccessProfile, UserId,
};

use super::InMemoryAccessRepository;

fn client(value: &str) -> ClientId {
    match ClientId::new(value) {
        Ok(client_id) => client_id,
        Err(error) => panic!("invalid client: {error}"),
    }
}

fn permission(name: &str) -> Permission {
    let Ok(name) = PermissionName::from_str(name) else {
        panic!("invalid permission name");
    };
    let label = name.to_string();
    match Permission::new(PermissionId::new(), name, label, false) {
        Ok(permission) => permission,
        Err(error) => panic!("invalid permission: {error}"),
    }
}

fn role(name: &str, level: i32) -> Role {
    let Ok(role_name) = RoleName::new(name) else {
        panic!("invalid role name");
    };
    match Role::new(RoleId::new(), role_name, name, level, false) {
        Ok(role) => role,
        Err(error) => panic!("invalid role: {error}"),
    }
}

#[tokio::test]
async fn permission_names_are_unique_per_client() {
    let repository = InMemoryAccessRepository::new();
    let acme = client("acme");
    let globex = client("globex");

    assert!(
        repository
            .create_permission(&acme, permission("chat.read"))
            .await
            .is_ok()
    );
    assert!(matches!(
        repository
            .create_permission(&acme, permission("chat.read"))
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(
        repository
            .create_permission(&globex, permission("chat.read"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn roles_list_by_descending_level() {
    let repository = InMemoryAccessRepository::new();
    let acme = client("acme");
    for (name, level) in [("VIEWER", 1), ("ADMIN", 100), ("EMPLOYEE", 10)] {
        assert!(repository.create_role(&acme, role(name, level)).await.is_ok());
    }

    let names: Vec<String> = repository
        .list_roles(&acme)
        .await
        .unwrap_or_default()
        .iter()
        .map(|role| role.name().to_string())
        .collect();
    assert_eq!(names, vec!["ADMIN", "EMPLOYEE", "VIEWER"]);
}

#[tokio::test]
async fn renaming_role_onto_existing_name_conflicts() {
    let repository = InMemoryAccessRepository::new();
    let acme = client("acme");
    let viewer = role("VIEWER", 1);
    let employee = role("EMPLOYEE", 10);
    assert!(repository.create_role(&acme, viewer.clone()).await.is_ok());
    assert!(repository.create_role(&acme, employee).await.is_ok());

    let mut renamed = viewer;
    let Ok(name) = RoleName::new("EMPLOYEE") else {
        panic!("invalid role name");
    };
    assert!(renamed.apply_update(Some(name), None, None).is_ok());

    assert!(matches!(
        repository.update_role(&acme, renamed).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn deleting_role_drops_its_grants() {
    let repository = InMemoryAccessRepository::new();
    let acme = client("acme");
    let chat_read = permission("chat.read");
    let viewer = role("VIEWER", 1);
    assert!(repository.create_permission(&acme, chat_read.clone()).await.is_ok());
    assert!(repository.create_role(&acme, viewer.clone()).await.is_ok());
    assert!(
        repository
            .upsert_role_grant(&acme, viewer.id(), chat_read.id(), true)
            .await
            .is_ok()
    );

    assert!(repository.delete_role(&acme, viewer.id()).await.is_ok());

    let lookup = repository
        .find_role(&acme, &RoleLookup::Id(viewer.id()))
        .await;
    assert_eq!(lookup.ok(), Some(None));
    assert!(
        repository
            .list_role_grants(&acme, viewer.id())
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn user_grant_upsert_replaces_expiry_and_filters_expired() {
    let repository = InMemoryAccessRepository::new();
    let acme = client("acme");
    let chat_read = permission("chat.read");
    let user_id = UserId::new();
    assert!(repository.create_permission(&acme, chat_read.clone()).await.is_ok());

    let expiry = Utc::now() + Duration::minutes(5);
    assert!(
        repository
            .upsert_user_grant(&acme, user_id, chat_read.id(), true, Some(expiry))
            .await
            .is_ok()
    );
    let before = repository
        .list_user_grants(&acme, user_id, Utc::now())
        .await
        .unwrap_or_default();
    assert_eq!(before.len(), 1);

    let after_expiry = repository
        .list_user_grants(&acme, user_id, expiry)
        .await
        .unwrap_or_default();
    assert!(after_expiry.is_empty());

    assert!(
        repository
            .upsert_user_grant(&acme, user_id, chat_read.id(), false, None)
            .await
            .is_ok()
    );
    let replaced = repository
        .list_user_grants(&acme, user_id, expiry)
        .await
        .unwrap_or_default();
    assert_eq!(replaced.len(), 1);
    assert!(!replaced[0].granted);
    assert_eq!(replaced[0].expires_at, None);
}

#[tokio::test]
async fn grants_on_unknown_permissions_are_rejected() {
    let repository = InMemoryAccessRepository::new();
    let result = repository
        .upsert_role_grant(&client("acme"), RoleId::new(), PermissionId::new(), true)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn user_profiles_are_client_scoped() {
    let repository = InMemoryAccessRepository::new();
    let user_id = UserId::new();
    repository
        .save_user_profile(
            &client("acme"),
            UserAccessProfile {
                id: user_id,
                primary_role: RoleName::admin(),
                role_assignments: Vec::new(),
                is_active: true,
            },
        )
        .await;

    let home = repository
        .find_user_access_profile(&client("acme"), user_id)
        .await;
    let foreign = repository
        .find_user_access_profile(&client("globex"), user_id)
        .await;

    assert!(matches!(home, Ok(Some(_))));
    assert!(matches!(foreign, Ok(None)));
}
