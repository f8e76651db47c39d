//! Lookup keys and shared instance handles.
//!
//! A [`ServiceKey`] is the identity a resolution is requested under: the
//! `TypeId` of the requested type, carrying the type's name for logging.
//! Keys are `Copy` and never mutated; equality and hashing use the
//! `TypeId` only, so two keys for the same type are interchangeable no
//! matter where they were constructed.
//!
//! Resolved values travel as [`SharedInstance`] (`Arc<dyn Any>`) so that
//! one resolution can be handed to any number of callers. Identity
//! guarantees in the cache layer are in terms of `Arc::ptr_eq` on these
//! handles.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A resolved value shared between all callers.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// An ordered, immutable sequence of resolved values.
///
/// `Arc<[_]>` rather than `Vec<_>` so a memoized sequence keeps one
/// identity across every lookup that returns it.
pub type SharedSequence = Arc<[SharedInstance]>;

/// Wrap a value as a [`SharedInstance`].
pub fn shared<T: Send + Sync + 'static>(value: T) -> SharedInstance {
    Arc::new(value)
}

/// Identity of a requested service: the requested type.
///
/// ```rust
/// use mimir::ServiceKey;
///
/// struct AuditLog;
/// trait Greeter {}
///
/// let concrete = ServiceKey::of::<AuditLog>();
/// let abstraction = ServiceKey::of::<dyn Greeter>();
/// assert_ne!(concrete, abstraction);
/// assert_eq!(concrete, ServiceKey::of::<AuditLog>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Key for the type `T`. `?Sized` so trait objects work too:
    /// `ServiceKey::of::<dyn Greeter>()`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The requested type's name, for diagnostics only.
    ///
    /// Not part of the key's identity; the compiler does not guarantee
    /// type names are unique or stable.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
