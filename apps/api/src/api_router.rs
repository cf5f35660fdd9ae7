use axum::Router;
use axum::routing::{get, post, put};
use kontora_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

/// Path segments shared by several methods use one parameter name, so
/// `{permission}` is a name for reads and an id for deletes, and `{role}` is
/// an id or a name for reads and an id for writes.
pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let access_routes = Router::new()
        .route(
            "/api/permissions/check",
            post(handlers::access::check_permission_handler),
        )
        .route(
            "/api/permissions/check-many",
            post(handlers::access::check_many_permissions_handler),
        )
        .route(
            "/api/permissions/guard",
            post(handlers::access::guard_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/effective-permissions",
            get(handlers::access::effective_permissions_handler),
        );

    let catalog_routes = Router::new()
        .route(
            "/api/permissions",
            get(handlers::catalog::list_permissions_handler)
                .post(handlers::catalog::create_permission_handler),
        )
        .route(
            "/api/permissions/{permission}",
            get(handlers::catalog::get_permission_handler)
                .delete(handlers::catalog::deactivate_permission_handler),
        )
        .route(
            "/api/roles",
            get(handlers::catalog::list_roles_handler).post(handlers::catalog::create_role_handler),
        )
        .route(
            "/api/roles/{role}",
            get(handlers::catalog::get_role_handler)
                .put(handlers::catalog::update_role_handler)
                .delete(handlers::catalog::delete_role_handler),
        )
        .route(
            "/api/clients/{client_id}/seed",
            post(handlers::catalog::seed_client_handler),
        );

    let grant_routes = Router::new()
        .route(
            "/api/roles/{role}/permissions",
            get(handlers::grants::list_role_grants_handler),
        )
        .route(
            "/api/users/{user_id}/permissions",
            get(handlers::grants::list_user_grants_handler),
        )
        .route(
            "/api/role-permissions",
            put(handlers::grants::upsert_role_grant_handler)
                .delete(handlers::grants::remove_role_grant_handler),
        )
        .route(
            "/api/user-permissions",
            put(handlers::grants::upsert_user_grant_handler)
                .delete(handlers::grants::remove_user_grant_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(access_routes)
        .merge(catalog_routes)
        .merge(grant_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
