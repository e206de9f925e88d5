//! Per-key memoization for expensive query-backed computations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::Result;

/// Memoizes computations by canonical request key.
///
/// Guarantees at most one in-flight computation per key: concurrent callers
/// for the same key await the first caller's computation instead of issuing
/// their own. Successful results live for the cache's lifetime (no eviction
/// or expiry); failures are never stored, so a later call for the same key
/// retries.
///
/// The cache is an explicit component owned by whoever scopes the
/// deduplication (one per UI session, typically), not ambient global state.
pub struct ResultCache<T> {
    /// One slot per key; the slot's cell is set exactly once, on success.
    slots: Mutex<HashMap<String, Arc<OnceCell<T>>>>,
}

impl<T> ResultCache<T>
where
    T: Clone + Send + Sync,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored result for `key`, computing it if absent.
    ///
    /// If another caller is already computing the same key, this awaits that
    /// computation rather than invoking `compute`. A failed computation
    /// leaves the key unset and propagates the error to every waiter.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        if slot.initialized() {
            debug!(key, "cache hit");
        }
        let value = slot.get_or_try_init(compute).await?;
        Ok(value.clone())
    }

    /// Returns the stored result for `key` without triggering computation.
    ///
    /// Keys whose computation is still in flight, or only ever failed, read
    /// as absent.
    pub async fn peek(&self, key: &str) -> Option<T> {
        let slots = self.slots.lock().await;
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of stored (successfully computed) results.
    pub async fn len(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    /// Whether no results are stored yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T> Default for ResultCache<T>
where
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
