//! Session-scoped catalog cache with single-flight loading.
//!
//! Each category is fetched at most once per session. Concurrent
//! [`CatalogStore::ensure_loaded`] calls for a category that is still loading
//! join the pending fetch instead of issuing their own, so exactly one call
//! reaches the [`CatalogSource`]. A failed fetch is reported to every joined
//! caller and leaves the category unloaded; the next call retries.

use super::source::CatalogSource;
use crate::domain::{Category, FetchError, Item};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type CatalogLoad = Shared<BoxFuture<'static, Result<Arc<[Item]>, FetchError>>>;

enum Slot {
    Loaded(Arc<[Item]>),
    Pending {
        /// Distinguishes a retry from the attempt that failed before it.
        attempt: u64,
        load: CatalogLoad,
    },
}

pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    slots: Mutex<HashMap<Category, Slot>>,
    attempts: AtomicU64,
}

impl CatalogStore {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the items of `category`, fetching them if no load is cached.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the (possibly shared) fetch.
    pub async fn ensure_loaded(&self, category: Category) -> Result<Arc<[Item]>, FetchError> {
        let (attempt, load) = {
            let mut slots = self.lock();
            match slots.get(&category) {
                Some(Slot::Loaded(items)) => return Ok(Arc::clone(items)),
                Some(Slot::Pending { attempt, load }) => {
                    tracing::debug!(%category, attempt, "joining pending catalog fetch");
                    (*attempt, load.clone())
                }
                None => {
                    let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::debug!(%category, attempt, "starting catalog fetch");
                    let load = self.start_fetch(category);
                    slots.insert(
                        category,
                        Slot::Pending {
                            attempt,
                            load: load.clone(),
                        },
                    );
                    (attempt, load)
                }
            }
        };

        let outcome = load.await;
        self.settle(category, attempt, &outcome);
        outcome
    }

    /// Items of `category` if a fetch has completed, without fetching.
    #[must_use]
    pub fn cached(&self, category: Category) -> Option<Arc<[Item]>> {
        match self.lock().get(&category) {
            Some(Slot::Loaded(items)) => Some(Arc::clone(items)),
            _ => None,
        }
    }

    fn start_fetch(&self, category: Category) -> CatalogLoad {
        let source = Arc::clone(&self.source);
        async move {
            source
                .fetch(category)
                .await
                .map(Arc::<[Item]>::from)
                .map_err(|e| FetchError::new(category, e.to_string()))
        }
        .boxed()
        .shared()
    }

    /// Replaces the pending slot of `attempt` with its outcome. Slots that
    /// already moved on (settled by another joined caller) are left alone.
    fn settle(&self, category: Category, attempt: u64, outcome: &Result<Arc<[Item]>, FetchError>) {
        let mut slots = self.lock();
        let ours = matches!(
            slots.get(&category),
            Some(Slot::Pending { attempt: pending, .. }) if *pending == attempt
        );
        if !ours {
            return;
        }

        match outcome {
            Ok(items) => {
                tracing::debug!(%category, count = items.len(), "catalog cached");
                slots.insert(category, Slot::Loaded(Arc::clone(items)));
            }
            Err(e) => {
                tracing::warn!(%category, error = %e, "catalog fetch failed, slot cleared for retry");
                slots.remove(&category);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Category, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Counts fetches and fails the first `failures` of them.
    struct CountingSource {
        calls: AtomicUsize,
        failures: usize,
    }

    impl CountingSource {
        fn new(failures: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                failures,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch(&self, category: Category) -> Result<Vec<Item>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if call < self.failures {
                return Err(CatalogError::Http("503 Service Unavailable".to_string()));
            }
            Ok(vec![Item::named(format!("{category} one")), Item::named(format!("{category} two"))])
        }
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let source = CountingSource::new(0);
        let store = CatalogStore::new(source.clone());

        let (a, b) = tokio::join!(
            store.ensure_loaded(Category::Plugins),
            store.ensure_loaded(Category::Plugins)
        );

        assert_eq!(source.calls(), 1);
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(store.cached(Category::Plugins).map(|items| items.len()), Some(2));
    }

    #[tokio::test]
    async fn loaded_category_is_not_refetched() {
        let source = CountingSource::new(0);
        let store = CatalogStore::new(source.clone());

        store.ensure_loaded(Category::Products).await.unwrap();
        store.ensure_loaded(Category::Products).await.unwrap();
        store.ensure_loaded(Category::Plugins).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn failure_reaches_every_joined_caller_then_retries() {
        let source = CountingSource::new(1);
        let store = CatalogStore::new(source.clone());

        let (a, b) = tokio::join!(
            store.ensure_loaded(Category::Products),
            store.ensure_loaded(Category::Products)
        );
        let error = a.unwrap_err();
        assert_eq!(b.unwrap_err(), error);
        assert_eq!(error.category, Category::Products);
        assert!(store.cached(Category::Products).is_none());

        let items = store.ensure_loaded(Category::Products).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(source.calls(), 2);
    }
}
