//! Memoizing wrapper over a resolution strategy.
//!
//! [`MemoizingResolver`] guarantees that for any key, at most one
//! resolution result is ever retained and observable, even when many
//! threads race to resolve the same key for the first time. Concurrent
//! racers may each invoke the wrapped strategy (duplicate work is
//! tolerated), but only the first insert wins; every racer, including
//! the losers, returns the winning value. This trades a bounded amount
//! of duplicated computation for lock-free reads on the memoized path.
//!
//! # Architecture
//!
//! Two independent memo tables back the two lookup paths: a
//! single-instance table keyed on [`ServiceKey`] holding
//! `Option<SharedInstance>` (absence is memoized as an answer, not
//! retried), and a multi-instance table holding [`SharedSequence`]s.
//! Both are sharded concurrent maps; a lookup on one key never contends
//! with a lookup on another, and the only critical section is the
//! conditional insert itself.
//!
//! A strategy error is never memoized: it propagates to the caller and
//! the key stays eligible for resolution on the next call.
//!
//! Cache hit/miss metrics are emitted per operation, plus a discard
//! counter for computations that lost the insert race (see
//! [`telemetry`](crate::telemetry)).

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::Result;
use crate::key::{ServiceKey, SharedInstance, SharedSequence};
use crate::resolver::ServiceResolver;
use crate::telemetry;

/// Wraps a [`ServiceResolver`] and memoizes its answers per key.
///
/// The wrapped strategy is captured at construction and never changes;
/// swapping strategies means building a new cache (the registry does
/// exactly that). Entries live for the cache's lifetime; there is no
/// eviction.
///
/// ```rust
/// use std::sync::Arc;
/// use mimir::{DefaultResolver, MemoizingResolver, ResolverExt};
///
/// #[derive(Default)]
/// struct Session;
///
/// fn main() -> mimir::Result<()> {
///     let cache = MemoizingResolver::new(Arc::new(
///         DefaultResolver::new().with_default::<Session>(),
///     ));
///     let first = cache.one_of::<Session>()?.unwrap();
///     let second = cache.one_of::<Session>()?.unwrap();
///     assert!(Arc::ptr_eq(&first, &second));
///     Ok(())
/// }
/// ```
pub struct MemoizingResolver {
    name: String,
    inner: Arc<dyn ServiceResolver>,
    one: DashMap<ServiceKey, Option<SharedInstance>>,
    many: DashMap<ServiceKey, SharedSequence>,
}

impl MemoizingResolver {
    /// Wrap a strategy. The cache starts empty.
    pub fn new(inner: Arc<dyn ServiceResolver>) -> Self {
        Self {
            name: format!("memoized({})", inner.name()),
            inner,
            one: DashMap::new(),
            many: DashMap::new(),
        }
    }

    /// The wrapped strategy.
    pub fn inner(&self) -> &Arc<dyn ServiceResolver> {
        &self.inner
    }

    fn record_hit(operation: &'static str) {
        metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation).increment(1);
    }

    fn record_miss(operation: &'static str) {
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation).increment(1);
    }

    fn record_discard(operation: &'static str) {
        metrics::counter!(telemetry::DISCARDED_RESULTS_TOTAL, "operation" => operation)
            .increment(1);
    }
}

impl ServiceResolver for MemoizingResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>> {
        if let Some(hit) = self.one.get(&key) {
            Self::record_hit("resolve_one");
            return Ok(hit.value().clone());
        }
        Self::record_miss("resolve_one");

        // Compute outside any table lock. Racers for the same key may
        // all get here; the insert below picks exactly one winner.
        let candidate = self.inner.resolve_one(key)?;

        match self.one.entry(key) {
            Entry::Occupied(winner) => {
                // Someone else inserted between our lookup and now.
                // Drop our candidate, return theirs.
                Self::record_discard("resolve_one");
                Ok(winner.get().clone())
            }
            Entry::Vacant(slot) => {
                let stored = slot.insert(candidate);
                Ok(stored.value().clone())
            }
        }
    }

    fn resolve_many(&self, key: ServiceKey) -> Result<SharedSequence> {
        if let Some(hit) = self.many.get(&key) {
            Self::record_hit("resolve_many");
            return Ok(Arc::clone(hit.value()));
        }
        Self::record_miss("resolve_many");

        let candidate = self.inner.resolve_many(key)?;

        match self.many.entry(key) {
            Entry::Occupied(winner) => {
                Self::record_discard("resolve_many");
                Ok(Arc::clone(winner.get()))
            }
            Entry::Vacant(slot) => {
                let stored = slot.insert(candidate);
                Ok(Arc::clone(stored.value()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::MimirError;
    use crate::key::shared;

    struct Token;

    /// Strategy that counts invocations and returns a fresh allocation
    /// each time it is asked.
    #[derive(Default)]
    struct CountingResolver {
        one_calls: AtomicUsize,
        many_calls: AtomicUsize,
        absent: bool,
    }

    impl ServiceResolver for CountingResolver {
        fn name(&self) -> &str {
            "counting"
        }

        fn resolve_one(&self, _key: ServiceKey) -> Result<Option<SharedInstance>> {
            self.one_calls.fetch_add(1, Ordering::SeqCst);
            if self.absent {
                Ok(None)
            } else {
                Ok(Some(shared(Token)))
            }
        }

        fn resolve_many(&self, _key: ServiceKey) -> Result<SharedSequence> {
            self.many_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![shared(Token)].into())
        }
    }

    #[test]
    fn second_lookup_skips_the_strategy() {
        let strategy = Arc::new(CountingResolver::default());
        let cache = MemoizingResolver::new(Arc::clone(&strategy) as Arc<dyn ServiceResolver>);
        let key = ServiceKey::of::<Token>();

        let first = cache.resolve_one(key).unwrap().unwrap();
        let second = cache.resolve_one(key).unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(strategy.one_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn absence_is_memoized() {
        let strategy = Arc::new(CountingResolver {
            absent: true,
            ..CountingResolver::default()
        });
        let cache = MemoizingResolver::new(Arc::clone(&strategy) as Arc<dyn ServiceResolver>);
        let key = ServiceKey::of::<Token>();

        for _ in 0..5 {
            assert!(cache.resolve_one(key).unwrap().is_none());
        }
        assert_eq!(strategy.one_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn sequences_keep_identity() {
        let strategy = Arc::new(CountingResolver::default());
        let cache = MemoizingResolver::new(Arc::clone(&strategy) as Arc<dyn ServiceResolver>);
        let key = ServiceKey::of::<Token>();

        let first = cache.resolve_many(key).unwrap();
        let second = cache.resolve_many(key).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(strategy.many_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tables_are_independent() {
        let strategy = Arc::new(CountingResolver::default());
        let cache = MemoizingResolver::new(Arc::clone(&strategy) as Arc<dyn ServiceResolver>);
        let key = ServiceKey::of::<Token>();

        cache.resolve_one(key).unwrap();
        cache.resolve_many(key).unwrap();
        cache.resolve_one(key).unwrap();
        cache.resolve_many(key).unwrap();

        assert_eq!(strategy.one_calls.load(Ordering::SeqCst), 1);
        assert_eq!(strategy.many_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn errors_are_not_memoized() {
        struct FlakyResolver {
            calls: AtomicUsize,
        }

        impl ServiceResolver for FlakyResolver {
            fn name(&self) -> &str {
                "flaky"
            }

            fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(MimirError::resolution(key, "first call fails"))
                } else {
                    Ok(Some(shared(Token)))
                }
            }

            fn resolve_many(&self, _key: ServiceKey) -> Result<SharedSequence> {
                Ok(Vec::new().into())
            }
        }

        let strategy = Arc::new(FlakyResolver {
            calls: AtomicUsize::new(0),
        });
        let cache = MemoizingResolver::new(Arc::clone(&strategy) as Arc<dyn ServiceResolver>);
        let key = ServiceKey::of::<Token>();

        assert!(cache.resolve_one(key).is_err());
        // The failure was not retained: the next call reaches the
        // strategy again and its result is memoized from then on.
        assert!(cache.resolve_one(key).unwrap().is_some());
        assert!(cache.resolve_one(key).unwrap().is_some());
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 2);
    }
}
