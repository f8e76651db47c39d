//! Resolution strategies and the capability trait they implement.
//!
//! A [`ServiceResolver`] turns a [`ServiceKey`] into zero-or-one shared
//! instance (`resolve_one`) or zero-or-more shared instances
//! (`resolve_many`). Strategies are swappable behind the trait; the
//! memoizing cache and the registry are generic over it.
//!
//! Three strategies ship with the crate:
//! - [`DefaultResolver`] — constructor-table fallback; absent for
//!   unregistered keys, never errors.
//! - [`FnResolver`] — adapter over a pair of plain functions.
//! - [`LocatorResolver`] / [`LocatorFns`] — adapter over an external
//!   locator, validated against the required two-method shape at
//!   install time.
//!
//! # Error semantics
//!
//! `resolve_one` returning `Ok(None)` means the key legitimately has no
//! value; the cache memoizes that as an answer. `Err(_)` means the
//! strategy failed; the cache propagates it and memoizes nothing.

mod default;
mod delegate;
mod locator;

pub use default::DefaultResolver;
pub use delegate::FnResolver;
pub use locator::{LocatorFns, LocatorResolver, ServiceLocator};

use std::sync::Arc;

use crate::Result;
use crate::key::{ServiceKey, SharedInstance, SharedSequence};

/// The capability every resolution strategy implements.
///
/// Implementations must be safe for unbounded concurrent callers; no
/// method may block on another caller.
pub trait ServiceResolver: Send + Sync {
    /// Strategy name for logging/debugging.
    fn name(&self) -> &str;

    /// Resolve the primary value for a key.
    ///
    /// `Ok(None)` is an answer ("this key has no value"), not a failure.
    fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>>;

    /// Resolve all values registered for a key, in order. Possibly empty.
    fn resolve_many(&self, key: ServiceKey) -> Result<SharedSequence>;
}

/// Typed downcast helpers over any [`ServiceResolver`].
///
/// Callers request by type rather than by hand-built key, and get back
/// `Arc<T>` instead of an untyped handle:
///
/// ```rust
/// use std::sync::Arc;
/// use mimir::{DefaultResolver, ResolverExt};
///
/// #[derive(Default)]
/// struct AuditLog;
///
/// fn main() -> mimir::Result<()> {
///     let resolver = DefaultResolver::new().with_default::<AuditLog>();
///     let log: Option<Arc<AuditLog>> = resolver.one_of::<AuditLog>()?;
///     assert!(log.is_some());
///     Ok(())
/// }
/// ```
pub trait ResolverExt: ServiceResolver {
    /// Resolve the primary value for `T`, downcast to `Arc<T>`.
    ///
    /// A resolved value of a different concrete type is reported as
    /// absent rather than an error: the key carries the type identity,
    /// so a mismatch can only come from a strategy answering a key it
    /// did not understand.
    fn one_of<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        Ok(self
            .resolve_one(ServiceKey::of::<T>())?
            .and_then(|instance| instance.downcast::<T>().ok()))
    }

    /// Resolve all values for `T`, keeping only those that downcast.
    fn many_of<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>> {
        Ok(self
            .resolve_many(ServiceKey::of::<T>())?
            .iter()
            .filter_map(|instance| Arc::clone(instance).downcast::<T>().ok())
            .collect())
    }
}

impl<R: ServiceResolver + ?Sized> ResolverExt for R {}
