use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query string carrying the client scope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    pub client_id: String,
}
