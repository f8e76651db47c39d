//! Constructor-table fallback strategy.

use std::collections::HashMap;

use tracing::debug;

use crate::Result;
use crate::key::{ServiceKey, SharedInstance, SharedSequence, shared};
use crate::resolver::ServiceResolver;

type Constructor = Box<dyn Fn() -> Result<SharedInstance> + Send + Sync>;

/// The out-of-the-box fallback strategy: a table of registered
/// constructors, one per key.
///
/// Keys without a registered constructor (the analog of interfaces and
/// other non-constructible shapes) resolve to absent. A constructor
/// that fails is also reported as absent; this strategy never surfaces
/// an error from `resolve_one`, and `resolve_many` is always empty.
///
/// Registration is builder-style and happens before the resolver is
/// shared; the table is immutable afterwards.
///
/// ```rust
/// use mimir::{DefaultResolver, ResolverExt};
///
/// #[derive(Default)]
/// struct Clock;
///
/// fn main() -> mimir::Result<()> {
///     let resolver = DefaultResolver::new()
///         .with_default::<Clock>();
///     assert!(resolver.one_of::<Clock>()?.is_some());
///     assert!(resolver.one_of::<String>()?.is_none());
///     Ok(())
/// }
/// ```
#[derive(Default)]
pub struct DefaultResolver {
    constructors: HashMap<ServiceKey, Constructor>,
}

impl DefaultResolver {
    /// Create an empty resolver: every key resolves to absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible constructor for `T`.
    pub fn with_constructor<T, F>(mut self, construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        self.constructors.insert(
            ServiceKey::of::<T>(),
            Box::new(move || construct().map(shared)),
        );
        self
    }

    /// Register `T::default` as the constructor for `T`.
    pub fn with_default<T>(self) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.with_constructor(|| Ok(T::default()))
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl ServiceResolver for DefaultResolver {
    fn name(&self) -> &str {
        "default"
    }

    fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>> {
        let Some(construct) = self.constructors.get(&key) else {
            return Ok(None);
        };
        match construct() {
            Ok(instance) => Ok(Some(instance)),
            Err(error) => {
                debug!(key = %key, %error, "constructor failed, resolving as absent");
                Ok(None)
            }
        }
    }

    fn resolve_many(&self, _key: ServiceKey) -> Result<SharedSequence> {
        Ok(Vec::new().into())
    }
}
