//! Process-wide resolver lifecycle.
//!
//! A [`ResolverRegistry`] publishes the active [`ServiceResolver`]
//! together with the [`MemoizingResolver`] built over it, as one
//! atomically-replaceable binding. Readers never observe a cache that
//! wraps anything other than the published resolver: installs build the
//! new pair first and swap a single reference.
//!
//! Installs are expected at startup/configuration time; `current()` and
//! `current_cached()` are hot-path reads and cost one lock-free pointer
//! load.
//!
//! Registries are plain values: construct one and inject it wherever
//! resolution is needed. For code that wants the classic process-global,
//! [`ResolverRegistry::global`] exposes a `'static` handle lazily
//! initialized with the default strategy.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use tracing::info;

use crate::Result;
use crate::cache::MemoizingResolver;
use crate::key::{ServiceKey, SharedInstance, SharedSequence};
use crate::resolver::{DefaultResolver, FnResolver, LocatorFns, ServiceResolver};
use crate::telemetry;

/// The active resolver and its cache, replaced as a unit.
struct Binding {
    resolver: Arc<dyn ServiceResolver>,
    cached: Arc<MemoizingResolver>,
}

impl Binding {
    fn over(resolver: Arc<dyn ServiceResolver>) -> Self {
        let cached = Arc::new(MemoizingResolver::new(Arc::clone(&resolver)));
        Self { resolver, cached }
    }
}

/// Publishes the active resolution strategy and its memoizing cache.
///
/// ```rust
/// use std::sync::Arc;
/// use mimir::{DefaultResolver, ResolverRegistry, ResolverExt};
///
/// #[derive(Default)]
/// struct Mailer;
///
/// fn main() -> mimir::Result<()> {
///     let registry = ResolverRegistry::new();
///     registry.set_resolver(Arc::new(
///         DefaultResolver::new().with_default::<Mailer>(),
///     ));
///
///     let mailer = registry.current_cached().one_of::<Mailer>()?;
///     assert!(mailer.is_some());
///     Ok(())
/// }
/// ```
pub struct ResolverRegistry {
    binding: ArcSwap<Binding>,
}

impl ResolverRegistry {
    /// A registry bound to an empty [`DefaultResolver`].
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(DefaultResolver::new()))
    }

    /// A registry bound to a caller-supplied strategy.
    pub fn with_resolver(resolver: Arc<dyn ServiceResolver>) -> Self {
        Self {
            binding: ArcSwap::from_pointee(Binding::over(resolver)),
        }
    }

    /// The process-global registry, initialized with the default
    /// strategy on first touch and valid for the process lifetime.
    pub fn global() -> &'static ResolverRegistry {
        static GLOBAL: LazyLock<ResolverRegistry> = LazyLock::new(ResolverRegistry::new);
        &GLOBAL
    }

    /// The active (uncached) resolver.
    pub fn current(&self) -> Arc<dyn ServiceResolver> {
        Arc::clone(&self.binding.load().resolver)
    }

    /// The memoizing cache over the active resolver.
    ///
    /// The returned cache keeps answering even after a later install;
    /// it simply stops being the published one.
    pub fn current_cached(&self) -> Arc<MemoizingResolver> {
        Arc::clone(&self.binding.load().cached)
    }

    /// Install a strategy, replacing the resolver and its cache as a
    /// unit. The old binding's memo tables are discarded, not merged.
    pub fn set_resolver(&self, resolver: Arc<dyn ServiceResolver>) {
        info!(resolver = resolver.name(), "installing resolver");
        metrics::counter!(telemetry::RESOLVER_SWAPS_TOTAL).increment(1);
        self.binding.store(Arc::new(Binding::over(resolver)));
    }

    /// Install a strategy built from a pair of plain functions.
    pub fn set_fns<O, M>(&self, one: O, many: M)
    where
        O: Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync + 'static,
        M: Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync + 'static,
    {
        self.set_resolver(Arc::new(FnResolver::new(one, many)));
    }

    /// Validate a runtime-assembled locator shape and install it.
    ///
    /// # Errors
    ///
    /// [`MimirError::LocatorIncomplete`](crate::MimirError::LocatorIncomplete)
    /// if the descriptor is missing either method; the previously active
    /// resolver remains current.
    pub fn set_locator(&self, locator: LocatorFns) -> Result<()> {
        let resolver = locator.into_resolver()?;
        self.set_resolver(Arc::new(resolver));
        Ok(())
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
