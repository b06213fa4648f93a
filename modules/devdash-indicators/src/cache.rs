// In-memory TTL cache with stale-while-error reads.
//
// Constructed once per process and shared behind an Arc. Entries are only
// checked for age on read; nothing is swept. Keys are built from
// compile-time strings only, so the key space is bounded by the catalog.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: &'static str,
    name: &'static str,
}

impl CacheKey {
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

#[derive(Default)]
pub struct TtlCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Return the entry for `key` if it is younger than `ttl`, otherwise run
    /// `fetcher` and store its result.
    ///
    /// When `fetcher` fails and an entry exists (expired or not), the stale
    /// value is returned instead of the error. The lock is not held while
    /// fetching, so concurrent misses on one key each fetch.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        fetcher: F,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        E: fmt::Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cached: Option<(T, Instant)> = {
            let entries = self.entries.lock().await;
            entries.get(&key).and_then(|entry| {
                entry
                    .data
                    .downcast_ref::<T>()
                    .map(|value| (value.clone(), entry.stored_at))
            })
        };

        if let Some((value, stored_at)) = &cached {
            if stored_at.elapsed() < ttl {
                debug!(key = %key, "Cache hit");
                return Ok(value.clone());
            }
        }

        match fetcher().await {
            Ok(value) => {
                let entry = CacheEntry {
                    data: Arc::new(value.clone()),
                    stored_at: Instant::now(),
                };
                self.entries.lock().await.insert(key, entry);
                debug!(key = %key, "Cache filled");
                Ok(value)
            }
            Err(e) => match cached {
                Some((stale, stored_at)) => {
                    warn!(
                        key = %key,
                        error = %e,
                        age_secs = stored_at.elapsed().as_secs(),
                        "Fetch failed, serving stale cache entry"
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }
}
