//! Account writes. Each successful write invalidates the affected domain's
//! account list; failed writes leave the cache alone and are never retried.

use tracing::info;
use vulkan_api::models::MessageResponse;
use vulkan_core::models::{EmailAccount, NewAccount, PasswordChange};

use crate::error::ApiResult;
use crate::gateway::Gateway;
use crate::query::{QueryClient, QueryKey};
use crate::services::emails;

#[derive(Clone)]
pub struct Mutations {
    gateway: Gateway,
    queries: QueryClient,
}

impl Mutations {
    pub fn new(gateway: Gateway, queries: QueryClient) -> Self {
        Self { gateway, queries }
    }

    pub async fn create_account(
        &self,
        domain_id: &str,
        account: &NewAccount,
    ) -> ApiResult<EmailAccount> {
        let created = emails::create_account(&self.gateway, domain_id, account).await?;
        info!(domain_id, id = %created.id, "account created");
        self.invalidate(domain_id);
        Ok(created)
    }

    pub async fn delete_account(
        &self,
        domain_id: &str,
        account_id: &str,
    ) -> ApiResult<MessageResponse> {
        let response = emails::delete_account(&self.gateway, domain_id, account_id).await?;
        info!(domain_id, id = account_id, "account deleted");
        self.invalidate(domain_id);
        Ok(response)
    }

    pub async fn toggle_block(&self, domain_id: &str, account_id: &str) -> ApiResult<EmailAccount> {
        let updated = emails::toggle_block(&self.gateway, domain_id, account_id).await?;
        info!(domain_id, id = account_id, blocked = updated.is_blocked, "account status changed");
        self.invalidate(domain_id);
        Ok(updated)
    }

    pub async fn update_storage(
        &self,
        domain_id: &str,
        account_id: &str,
        storage: u64,
    ) -> ApiResult<EmailAccount> {
        let updated = emails::update_storage(&self.gateway, domain_id, account_id, storage).await?;
        info!(domain_id, id = account_id, storage, "account storage changed");
        self.invalidate(domain_id);
        Ok(updated)
    }

    pub async fn update_password(
        &self,
        domain_id: &str,
        account_id: &str,
        change: &PasswordChange,
    ) -> ApiResult<MessageResponse> {
        let response = emails::update_password(&self.gateway, domain_id, account_id, change).await?;
        info!(domain_id, id = account_id, "account password changed");
        self.invalidate(domain_id);
        Ok(response)
    }

    fn invalidate(&self, domain_id: &str) {
        self.queries
            .invalidate(&QueryKey::Accounts(domain_id.to_string()));
    }
}
