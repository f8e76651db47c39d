//! External locator adapters.
//!
//! Two ways in, one contract: an external "locator" is any object that
//! can produce a single instance and all instances for a key.
//!
//! - A type that implements [`ServiceLocator`] conforms statically;
//!   wrap it in [`LocatorResolver`] and install it directly.
//! - An integration that assembles the shape at runtime hands over a
//!   [`LocatorFns`] descriptor instead. Both method slots must be
//!   filled; a missing slot is a configuration error at install time,
//!   never a silent no-op.

use std::sync::Arc;

use crate::error::{MimirError, Result};
use crate::key::{ServiceKey, SharedInstance, SharedSequence};
use crate::resolver::{FnResolver, ServiceResolver};

/// The two-method shape an external locator must expose.
pub trait ServiceLocator: Send + Sync {
    /// Produce the single instance for a key, or absent.
    fn get_instance(&self, key: ServiceKey) -> Result<Option<SharedInstance>>;

    /// Produce all instances for a key, in order.
    fn get_all_instances(&self, key: ServiceKey) -> Result<SharedSequence>;
}

/// [`ServiceResolver`] over any statically conforming [`ServiceLocator`].
pub struct LocatorResolver<L> {
    locator: L,
}

impl<L: ServiceLocator> LocatorResolver<L> {
    /// Wrap a locator.
    pub fn new(locator: L) -> Self {
        Self { locator }
    }
}

impl<L: ServiceLocator> ServiceResolver for LocatorResolver<L> {
    fn name(&self) -> &str {
        "locator"
    }

    fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>> {
        self.locator.get_instance(key)
    }

    fn resolve_many(&self, key: ServiceKey) -> Result<SharedSequence> {
        self.locator.get_all_instances(key)
    }
}

type InstanceFn = Arc<dyn Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync>;
type AllInstancesFn = Arc<dyn Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync>;

/// Runtime-assembled locator shape, validated when installed.
///
/// The descriptor mirrors a foreign object that may or may not expose
/// the required methods: each slot is optional while the descriptor is
/// being built, and [`into_resolver`](LocatorFns::into_resolver) (called
/// by [`ResolverRegistry::set_locator`](crate::ResolverRegistry::set_locator))
/// rejects a descriptor with an empty slot, naming the missing method.
#[derive(Clone, Default)]
pub struct LocatorFns {
    get_instance: Option<InstanceFn>,
    get_all_instances: Option<AllInstancesFn>,
}

impl LocatorFns {
    /// Start an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the single-instance slot.
    pub fn get_instance<F>(mut self, f: F) -> Self
    where
        F: Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync + 'static,
    {
        self.get_instance = Some(Arc::new(f));
        self
    }

    /// Fill the all-instances slot.
    pub fn get_all_instances<F>(mut self, f: F) -> Self
    where
        F: Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync + 'static,
    {
        self.get_all_instances = Some(Arc::new(f));
        self
    }

    /// Validate the shape and adapt it into a resolver.
    ///
    /// # Errors
    ///
    /// [`MimirError::LocatorIncomplete`] if either slot is empty.
    pub fn into_resolver(self) -> Result<FnResolver> {
        let one = self.get_instance.ok_or(MimirError::LocatorIncomplete {
            missing: "get_instance",
        })?;
        let many = self
            .get_all_instances
            .ok_or(MimirError::LocatorIncomplete {
                missing: "get_all_instances",
            })?;
        Ok(FnResolver::named(
            "locator",
            move |key| one(key),
            move |key| many(key),
        ))
    }
}
