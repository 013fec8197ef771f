use vulkan_api::routes;
use vulkan_core::models::Domain;

use crate::error::ApiResult;
use crate::gateway::Gateway;

/// `GET /domains`
pub async fn list_domains(gateway: &Gateway) -> ApiResult<Vec<Domain>> {
    gateway.get(routes::GET_DOMAINS).await
}
