//! Keyed query cache for backend reads.
//!
//! Concurrent fetches of one key share a single in-flight request. Results
//! stay cached until the key is invalidated. A failed read is retried
//! `retries` times before the error is cached.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;
use vulkan_core::models::{Domain, EmailAccount};

use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;
use crate::services;

/// Identity of a cached read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Domains,
    /// Account list of one domain.
    Accounts(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Domains => f.write_str("domains"),
            QueryKey::Accounts(domain_id) => write!(f, "accounts[{domain_id}]"),
        }
    }
}

/// Payload of a cached read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryData {
    Domains(Vec<Domain>),
    Accounts(Vec<EmailAccount>),
}

/// What a view sees for one read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryState<T> {
    /// Disabled: a parameter of the read is not known yet.
    Idle,
    Pending,
    Error(ApiError),
    Success(T),
}

impl<T> QueryState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => QueryState::Success(data),
            Err(e) => QueryState::Error(e),
        }
    }
}

type SharedFetch = Shared<BoxFuture<'static, ApiResult<QueryData>>>;

enum Entry {
    InFlight { generation: u64, fetch: SharedFetch },
    Ready(QueryData),
    Failed(ApiError),
}

#[derive(Default)]
struct Cache {
    entries: HashMap<QueryKey, Entry>,
    next_generation: u64,
}

/// Shared handle to the read cache.
#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<Mutex<Cache>>,
    retries: u32,
}

impl QueryClient {
    pub fn new(retries: u32) -> Self {
        Self {
            cache: Arc::new(Mutex::new(Cache::default())),
            retries,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `key`, joining or starting a fetch when
    /// there is none.
    ///
    /// `load` is called once per attempt.
    pub async fn fetch<F>(&self, key: QueryKey, load: F) -> ApiResult<QueryData>
    where
        F: Fn() -> BoxFuture<'static, ApiResult<QueryData>> + Send + Sync + 'static,
    {
        let (generation, fetch) = {
            let mut cache = self.lock();
            match cache.entries.get(&key) {
                Some(Entry::Ready(data)) => return Ok(data.clone()),
                Some(Entry::InFlight { generation, fetch }) => {
                    debug!(%key, "joining in-flight fetch");
                    (*generation, fetch.clone())
                }
                Some(Entry::Failed(_)) | None => {
                    cache.next_generation += 1;
                    let generation = cache.next_generation;
                    let fetch = with_retries(key.clone(), self.retries, load)
                        .boxed()
                        .shared();
                    debug!(%key, generation, "starting fetch");
                    cache.entries.insert(
                        key.clone(),
                        Entry::InFlight {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    (generation, fetch)
                }
            }
        };

        let result = fetch.await;

        let mut cache = self.lock();
        let current = matches!(
            cache.entries.get(&key),
            Some(Entry::InFlight { generation: g, .. }) if *g == generation
        );
        if current {
            let entry = match &result {
                Ok(data) => Entry::Ready(data.clone()),
                Err(e) => Entry::Failed(e.clone()),
            };
            cache.entries.insert(key, entry);
        } else {
            debug!(%key, generation, "discarding superseded fetch result");
        }
        result
    }

    /// Current state of `key` without fetching.
    pub fn peek(&self, key: &QueryKey) -> QueryState<QueryData> {
        match self.lock().entries.get(key) {
            None => QueryState::Idle,
            Some(Entry::InFlight { .. }) => QueryState::Pending,
            Some(Entry::Failed(e)) => QueryState::Error(e.clone()),
            Some(Entry::Ready(data)) => QueryState::Success(data.clone()),
        }
    }

    /// Drop the cached value for `key`; the next fetch goes to the backend.
    pub fn invalidate(&self, key: &QueryKey) {
        if self.lock().entries.remove(key).is_some() {
            debug!(%key, "invalidated");
        }
    }

    /// Drop every cached value.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Domain list.
    pub async fn domains(&self, gateway: &Gateway) -> QueryState<Vec<Domain>> {
        let gateway = gateway.clone();
        let result = self
            .fetch(QueryKey::Domains, move || {
                let gateway = gateway.clone();
                async move {
                    services::domains::list_domains(&gateway)
                        .await
                        .map(QueryData::Domains)
                }
                .boxed()
            })
            .await;
        QueryState::from_result(result.map(|data| match data {
            QueryData::Domains(domains) => domains,
            QueryData::Accounts(_) => Vec::new(),
        }))
    }

    /// Account list of `domain_id`; [`QueryState::Idle`] while the id is unknown.
    pub async fn accounts(
        &self,
        gateway: &Gateway,
        domain_id: Option<&str>,
    ) -> QueryState<Vec<EmailAccount>> {
        let Some(domain_id) = domain_id else {
            return QueryState::Idle;
        };
        let gateway = gateway.clone();
        let id = domain_id.to_string();
        let result = self
            .fetch(QueryKey::Accounts(id.clone()), move || {
                let gateway = gateway.clone();
                let id = id.clone();
                async move {
                    services::emails::list_accounts(&gateway, &id)
                        .await
                        .map(QueryData::Accounts)
                }
                .boxed()
            })
            .await;
        QueryState::from_result(result.map(|data| match data {
            QueryData::Accounts(accounts) => accounts,
            QueryData::Domains(_) => Vec::new(),
        }))
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_READ_RETRIES)
    }
}

async fn with_retries<F>(key: QueryKey, retries: u32, load: F) -> ApiResult<QueryData>
where
    F: Fn() -> BoxFuture<'static, ApiResult<QueryData>>,
{
    let mut attempt = 0;
    loop {
        match load().await {
            Ok(data) => return Ok(data),
            Err(e) if attempt < retries => {
                attempt += 1;
                debug!(%key, attempt, error = %e, "retrying read");
            }
            Err(e) => return Err(e),
        }
    }
}
