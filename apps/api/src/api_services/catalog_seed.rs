use std::path::Path;

use kontora_application::CatalogService;
use kontora_core::{AppError, ClientId};
use kontora_domain::CatalogSeed;
use tracing::info;

/// Loads the catalog seed from a JSON file, or the built-in catalog when no path is set.
pub async fn load_catalog_seed(path: Option<&Path>) -> Result<CatalogSeed, AppError> {
    let Some(path) = path else {
        return CatalogSeed::builtin();
    };

    let document = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to read catalog seed '{}': {error}",
            path.display()
        ))
    })?;

    let seed = CatalogSeed::from_json(document.as_str())?;
    info!(path = %path.display(), roles = seed.roles.len(), "loaded catalog seed");
    Ok(seed)
}

pub async fn seed_configured_clients(
    catalog_service: &CatalogService,
    client_ids: &[ClientId],
) -> Result<(), AppError> {
    for client_id in client_ids {
        catalog_service.seed_client(client_id).await?;
    }

    Ok(())
}
