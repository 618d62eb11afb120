//! Memoizing cache for remote queries.
//!
//! Each key owns one slot. The first request for a key starts the fetch and
//! stores it as a shared future; requests arriving before it settles await
//! the same future instead of fetching again. A successful result stays in
//! memory for the lifetime of the cache. What happens to a failure depends
//! on [`FailurePolicy`].
//!
//! The fetch future is lazy: it makes progress only while at least one
//! caller awaits it. A caller that gives up (for example because its pointer
//! pipeline was cancelled) leaves the pending slot in place and the next
//! caller for that key picks it up where it stopped.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, FetchError>>>;

/// What the cache does with a failed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Forget the failure; the next request for the key fetches again.
    #[default]
    Retry,
    /// Keep the failure and hand it to every later request for the key.
    Remember,
}

/// Observable state of one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Resolved,
    Failed,
}

enum Slot<V> {
    Pending {
        generation: u64,
        fetch: SharedFetch<V>,
    },
    Resolved(V),
    Failed(FetchError),
}

impl<V> Slot<V> {
    fn state(&self) -> SlotState {
        match self {
            Slot::Pending { .. } => SlotState::Pending,
            Slot::Resolved(_) => SlotState::Resolved,
            Slot::Failed(_) => SlotState::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Fetches started
    pub fetches: u64,
    /// Requests served from a resolved slot
    pub hits: u64,
    /// Requests that joined a pending fetch
    pub joins: u64,
    /// Fetches that settled with an error
    pub failures: u64,
}

#[derive(Default)]
struct Counters {
    fetches: AtomicU64,
    hits: AtomicU64,
    joins: AtomicU64,
    failures: AtomicU64,
}

pub struct KeyedResourceCache<K, V> {
    name: &'static str,
    policy: FailurePolicy,
    slots: Mutex<HashMap<K, Slot<V>>>,
    next_generation: AtomicU64,
    counters: Counters,
}

impl<K, V> KeyedResourceCache<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self::with_policy(name, FailurePolicy::default())
    }

    pub fn with_policy(name: &'static str, policy: FailurePolicy) -> Self {
        Self {
            name,
            policy,
            slots: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
            counters: Counters::default(),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns the value for `key`, calling `fetch` only if no slot exists.
    ///
    /// `fetch` runs under the slot lock and must only build the future;
    /// the work happens when the future is polled.
    pub async fn get<F, Fut>(&self, key: &K, fetch: F) -> Result<V, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let (generation, pending) = {
            let mut slots = self.lock();
            match slots.get(key) {
                Some(Slot::Resolved(value)) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("[{}] hit {:?}", self.name, key);
                    return Ok(value.clone());
                }
                Some(Slot::Failed(error)) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("[{}] remembered failure for {:?}", self.name, key);
                    return Err(error.clone());
                }
                Some(Slot::Pending { generation, fetch }) => {
                    self.counters.joins.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("[{}] joining pending fetch for {:?}", self.name, key);
                    (*generation, fetch.clone())
                }
                None => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let fetch = fetch().boxed().shared();
                    slots.insert(
                        key.clone(),
                        Slot::Pending {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    self.counters.fetches.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("[{}] fetching {:?}", self.name, key);
                    (generation, fetch)
                }
            }
        };

        let result = pending.await;
        self.settle(key, generation, &result);
        result
    }

    /// Resolved value for `key`, without fetching.
    pub fn peek(&self, key: &K) -> Option<V> {
        match self.lock().get(key) {
            Some(Slot::Resolved(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn state(&self, key: &K) -> Option<SlotState> {
        self.lock().get(key).map(Slot::state)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            fetches: self.counters.fetches.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            joins: self.counters.joins.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Moves the slot out of `Pending`. Only the first caller to get here for
    /// a given fetch does anything; a slot that was replaced by a newer fetch
    /// in the meantime is left alone.
    fn settle(&self, key: &K, generation: u64, result: &Result<V, FetchError>) {
        let mut slots = self.lock();
        let is_current = matches!(
            slots.get(key),
            Some(Slot::Pending { generation: current, .. }) if *current == generation
        );
        if !is_current {
            return;
        }

        match result {
            Ok(value) => {
                slots.insert(key.clone(), Slot::Resolved(value.clone()));
            }
            Err(error) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("[{}] fetch for {:?} failed: {}", self.name, key, error);
                match self.policy {
                    FailurePolicy::Retry => {
                        slots.remove(key);
                    }
                    FailurePolicy::Remember => {
                        slots.insert(key.clone(), Slot::Failed(error.clone()));
                    }
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
