use async_trait::async_trait;

use kontora_core::{AppResult, ClientId};
use kontora_domain::{UserAccessProfile, UserId};

/// Read port onto the entity store that owns user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the access profile for a user in the client scope.
    async fn find_user_access_profile(
        &self,
        client_id: &ClientId,
        user_id: UserId,
    ) -> AppResult<Option<UserAccessProfile>>;
}
