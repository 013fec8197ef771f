//! # vulkan_client
//!
//! Typed client for the Vulkan backend: the gateway and its transports, the
//! per-route access functions, the read cache and the account writes.

pub mod config;
pub mod error;
pub mod gateway;
pub mod mutations;
pub mod query;
pub mod services;
pub mod transport;

use std::sync::Arc;

use tracing::info;
use vulkan_core::models::Credentials;
use vulkan_core::session::{Session, SessionError};

pub use crate::config::ClientConfig;
pub use crate::error::{ApiError, ApiResult};
pub use crate::gateway::Gateway;
pub use crate::mutations::Mutations;
pub use crate::query::{QueryClient, QueryData, QueryKey, QueryState};
use crate::transport::Transport;

/// Gateway, read cache and writes bound to one session.
#[derive(Clone)]
pub struct Client {
    pub gateway: Gateway,
    pub queries: QueryClient,
    pub mutations: Mutations,
}

impl Client {
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        Self::with_transport(config.transport(), session, config.read_retries)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, session: Session, read_retries: u32) -> Self {
        let gateway = Gateway::new(transport, session);
        info!(backend = %gateway.describe(), "client ready");
        let queries = QueryClient::new(read_retries);
        let mutations = Mutations::new(gateway.clone(), queries.clone());
        Self {
            gateway,
            queries,
            mutations,
        }
    }

    pub fn session(&self) -> &Session {
        self.gateway.session()
    }

    /// Ask the backend for a token for `credentials`.
    pub async fn authenticate(&self, credentials: &Credentials) -> ApiResult<String> {
        services::auth::login(&self.gateway, credentials).await
    }

    /// Forget the token and every cached read.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.queries.clear();
        self.session().logout()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use vulkan_core::models::{Domain, NewAccount, PasswordChange};

    use super::*;
    use crate::transport::SimulatedTransport;

    fn client() -> Client {
        Client::with_transport(
            Arc::new(SimulatedTransport::seeded(Duration::ZERO)),
            Session::in_memory(),
            1,
        )
    }

    fn admin() -> Credentials {
        Credentials {
            email: "admin@vulkan.com".into(),
            password: "123456".into(),
        }
    }

    fn accounts_key(id: &str) -> QueryKey {
        QueryKey::Accounts(id.into())
    }

    #[tokio::test]
    async fn login_then_list_domains() {
        let client = client();
        let token = client.authenticate(&admin()).await.unwrap();
        assert_eq!(token, "fake-jtw-token");

        let state = client.queries.domains(&client.gateway).await;
        assert_eq!(
            state,
            QueryState::Success(vec![
                Domain::new("1", "empresa.com"),
                Domain::new("2", "startup.io"),
            ])
        );
    }

    #[tokio::test]
    async fn wrong_credentials_are_unauthorized() {
        let client = client();
        let err = client
            .authenticate(&Credentials {
                email: "admin@vulkan.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn create_invalidates_and_next_read_includes_account() {
        let client = client();
        let before = client.queries.accounts(&client.gateway, Some("2")).await;
        assert!(matches!(before, QueryState::Success(ref a) if a.len() == 1));

        let created = client
            .mutations
            .create_account(
                "2",
                &NewAccount {
                    email: "dev@startup.io".into(),
                    password: "secret1".into(),
                    storage: 1024,
                },
            )
            .await
            .unwrap();
        assert_eq!(client.queries.peek(&accounts_key("2")), QueryState::Idle);

        let QueryState::Success(after) = client.queries.accounts(&client.gateway, Some("2")).await
        else {
            panic!("expected accounts");
        };
        assert_eq!(after.len(), 2);
        let found = after.iter().find(|a| a.id == created.id).unwrap();
        assert_eq!(found.email, "dev@startup.io");
        assert_eq!(found.storage, 1024);
        assert_eq!(found.domain_id, "2");
        assert!(!found.is_blocked);
        assert!(!["1", "2", "3"].contains(&found.id.as_str()));
    }

    #[tokio::test]
    async fn toggling_twice_restores_state() {
        let client = client();
        let first = client.mutations.toggle_block("1", "2").await.unwrap();
        assert!(!first.is_blocked);
        let second = client.mutations.toggle_block("1", "2").await.unwrap();
        assert!(second.is_blocked);
    }

    #[tokio::test]
    async fn delete_missing_account_is_not_found_and_keeps_cache() {
        let client = client();
        client.queries.accounts(&client.gateway, Some("1")).await;

        let err = client
            .mutations
            .delete_account("1", "missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(matches!(
            client.queries.peek(&accounts_key("1")),
            QueryState::Success(_)
        ));
    }

    #[tokio::test]
    async fn malformed_account_ids_never_reach_other_accounts() {
        let client = client();
        for id in ["1?x", "1#x", "1/password", "1 ", ""] {
            let err = client.mutations.delete_account("1", id).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound(_)), "{id:?}");
            let err = client.mutations.toggle_block("1", id).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound(_)), "{id:?}");
        }
        let err = client
            .mutations
            .update_storage("1?x", "1", 2048)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let QueryState::Success(accounts) = client.queries.accounts(&client.gateway, Some("1")).await
        else {
            panic!("expected accounts");
        };
        let ids: Vec<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert!(accounts.iter().all(|a| a.storage != 2048));
        assert!(accounts.iter().find(|a| a.id == "2").unwrap().is_blocked);
    }

    #[tokio::test]
    async fn create_under_unknown_domain_is_not_found() {
        let client = client();
        let err = client
            .mutations
            .create_account(
                "99",
                &NewAccount {
                    email: "dev@startup.io".into(),
                    password: "secret1".into(),
                    storage: 1024,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound("Domain not found".into()));
        let state = client.queries.accounts(&client.gateway, Some("99")).await;
        assert_eq!(state, QueryState::Success(Vec::new()));
    }

    #[tokio::test]
    async fn delete_removes_account_from_next_list() {
        let client = client();
        client.mutations.delete_account("1", "1").await.unwrap();
        let QueryState::Success(accounts) = client.queries.accounts(&client.gateway, Some("1")).await
        else {
            panic!("expected accounts");
        };
        assert!(accounts.iter().all(|a| a.id != "1"));
    }

    #[tokio::test]
    async fn storage_and_password_writes_invalidate() {
        let client = client();
        client.queries.accounts(&client.gateway, Some("1")).await;
        let updated = client
            .mutations
            .update_storage("1", "1", 2048)
            .await
            .unwrap();
        assert_eq!(updated.storage, 2048);
        assert_eq!(client.queries.peek(&accounts_key("1")), QueryState::Idle);

        client.queries.accounts(&client.gateway, Some("1")).await;
        client
            .mutations
            .update_password(
                "1",
                "1",
                &PasswordChange {
                    password: "abcdef".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(client.queries.peek(&accounts_key("1")), QueryState::Idle);
    }

    #[tokio::test]
    async fn logout_clears_session_and_cache() {
        let client = client();
        client.session().login("fake-jtw-token").unwrap();
        client.queries.domains(&client.gateway).await;

        client.logout().unwrap();

        assert!(!client.session().is_authenticated());
        assert_eq!(client.queries.peek(&QueryKey::Domains), QueryState::Idle);
    }
}
