use kontora_application::{AuthorizationService, CatalogService, GrantAdminService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub catalog_service: CatalogService,
    pub grant_admin_service: GrantAdminService,
}
