use std::sync::Arc;

use kontora_application::{
    AuthorizationService, CatalogService, GrantAdminService, GrantRepository,
    PermissionCatalogRepository, UserDirectory,
};
use kontora_domain::CatalogSeed;
use kontora_infrastructure::{
    PostgresCatalogRepository, PostgresGrantRepository, PostgresUserDirectory,
};
use sqlx::PgPool;

use crate::state::AppState;

pub fn build_app_state(pool: PgPool, seed: CatalogSeed) -> AppState {
    let catalog_repository: Arc<dyn PermissionCatalogRepository> =
        Arc::new(PostgresCatalogRepository::new(pool.clone()));
    let grant_repository: Arc<dyn GrantRepository> =
        Arc::new(PostgresGrantRepository::new(pool.clone()));
    let user_directory: Arc<dyn UserDirectory> = Arc::new(PostgresUserDirectory::new(pool));

    compose_state(catalog_repository, grant_repository, user_directory, seed)
}

pub(crate) fn compose_state(
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    grant_repository: Arc<dyn GrantRepository>,
    user_directory: Arc<dyn UserDirectory>,
    seed: CatalogSeed,
) -> AppState {
    AppState {
        authorization_service: AuthorizationService::new(
            catalog_repository.clone(),
            grant_repository.clone(),
            user_directory.clone(),
        ),
        catalog_service: CatalogService::new(
            catalog_repository.clone(),
            grant_repository.clone(),
            Arc::new(seed),
        ),
        grant_admin_service: GrantAdminService::new(
            catalog_repository,
            grant_repository,
            user_directory,
        ),
    }
}
