use crate::models::error::AppError;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

/// Logical identity of a cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products,
    Suppliers,
    PriceTrends,
}

impl QueryKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Suppliers => "suppliers",
            Self::PriceTrends => "price-trends",
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type CachedValue = Rc<dyn Any>;
type SharedFetch = Shared<LocalBoxFuture<'static, Result<CachedValue, AppError>>>;

enum Entry {
    Ready { value: CachedValue, stale: bool },
    Pending { fetch: SharedFetch, generation: u64 },
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    generations: HashMap<QueryKey, u64>,
}

impl Inner {
    fn generation(&self, key: QueryKey) -> u64 {
        self.generations.get(&key).copied().unwrap_or(0)
    }
}

/// Client-side cache of read results keyed by [`QueryKey`].
///
/// A fresh entry is served without a request. Reads of a key that is already
/// being fetched await the same request, unless the key was invalidated after
/// that request started. Failures are never cached.
#[derive(Default)]
pub struct QueryCache {
    inner: RefCell<Inner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, running `fetcher` only when the
    /// entry is missing or stale and no fetch started since the last
    /// invalidation is already in flight.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Rc<T>, AppError>
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>> + 'static,
    {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            let current = inner.generation(key);
            match inner.entries.get(&key) {
                Some(Entry::Ready {
                    value,
                    stale: false,
                }) => return downcast(key, value.clone()),
                Some(Entry::Pending { fetch, generation }) if *generation == current => {
                    log::debug!("Joining in-flight fetch of {key}");
                    fetch.clone()
                }
                // Missing, stale, or in flight from before an invalidation.
                // A superseded fetch still answers its own waiters but never settles the entry.
                _ => {
                    log::debug!("Fetching {key}");
                    let request = fetcher();
                    let fetch = async move { request.await.map(|v| Rc::new(v) as CachedValue) }
                        .boxed_local()
                        .shared();
                    inner.entries.insert(
                        key,
                        Entry::Pending {
                            fetch: fetch.clone(),
                            generation: current,
                        },
                    );
                    fetch
                }
            }
        };

        let result = pending.clone().await;
        self.settle(key, &pending, &result);
        downcast(key, result?)
    }

    /// Moves a pending entry to its outcome. Only the first waiter to settle
    /// a given fetch has any effect.
    fn settle(&self, key: QueryKey, fetch: &SharedFetch, result: &Result<CachedValue, AppError>) {
        let mut inner = self.inner.borrow_mut();
        let generation = match inner.entries.get(&key) {
            Some(Entry::Pending {
                fetch: current,
                generation,
            }) if current.ptr_eq(fetch) => *generation,
            _ => return,
        };

        match result {
            Ok(value) => {
                let stale = inner.generation(key) != generation;
                inner.entries.insert(
                    key,
                    Entry::Ready {
                        value: value.clone(),
                        stale,
                    },
                );
            }
            Err(e) => {
                log::debug!("Fetch of {key} failed: {e}");
                inner.entries.remove(&key);
            }
        }
    }

    /// Marks `key` stale so the next read goes back to the store.
    pub fn invalidate(&self, key: QueryKey) {
        let mut inner = self.inner.borrow_mut();
        *inner.generations.entry(key).or_insert(0) += 1;
        if let Some(Entry::Ready { stale, .. }) = inner.entries.get_mut(&key) {
            *stale = true;
        }
        log::debug!("Invalidated {key}");
    }

    /// Number of invalidations `key` has seen.
    pub fn invalidations(&self, key: QueryKey) -> u64 {
        self.inner.borrow().generation(key)
    }

    /// True when `key` holds a value that must be refetched before use.
    pub fn is_stale(&self, key: QueryKey) -> bool {
        matches!(
            self.inner.borrow().entries.get(&key),
            Some(Entry::Ready { stale: true, .. })
        )
    }

    pub fn is_pending(&self, key: QueryKey) -> bool {
        matches!(
            self.inner.borrow().entries.get(&key),
            Some(Entry::Pending { .. })
        )
    }

    /// The cached value, fresh or stale, without fetching.
    pub fn peek<T: 'static>(&self, key: QueryKey) -> Option<Rc<T>> {
        match self.inner.borrow().entries.get(&key) {
            Some(Entry::Ready { value, .. }) => value.clone().downcast().ok(),
            _ => None,
        }
    }
}

fn downcast<T: 'static>(key: QueryKey, value: CachedValue) -> Result<Rc<T>, AppError> {
    value
        .downcast()
        .map_err(|_| AppError::DataError(format!("Cached {key} has an unexpected type")))
}
