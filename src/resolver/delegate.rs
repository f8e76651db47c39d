//! Function-pair adapter strategy.

use crate::Result;
use crate::key::{ServiceKey, SharedInstance, SharedSequence};
use crate::resolver::ServiceResolver;

type OneFn = Box<dyn Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync>;
type ManyFn = Box<dyn Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync>;

/// Adapts a pair of plain functions into a [`ServiceResolver`].
///
/// Unlike [`DefaultResolver`](crate::DefaultResolver), nothing is
/// swallowed here: an error from either function propagates to the
/// caller as-is, and the memoizing cache will not retain it.
///
/// ```rust
/// use mimir::{FnResolver, ServiceKey, ServiceResolver, shared};
///
/// fn main() -> mimir::Result<()> {
///     let resolver = FnResolver::new(
///         |_key| Ok(Some(shared("hello".to_string()))),
///         |_key| Ok(Vec::new().into()),
///     );
///     let value = resolver.resolve_one(ServiceKey::of::<String>())?;
///     assert!(value.is_some());
///     Ok(())
/// }
/// ```
pub struct FnResolver {
    name: &'static str,
    one: OneFn,
    many: ManyFn,
}

impl FnResolver {
    /// Wrap a single-value function and a multi-value function.
    pub fn new<O, M>(one: O, many: M) -> Self
    where
        O: Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync + 'static,
        M: Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync + 'static,
    {
        Self::named("fn-pair", one, many)
    }

    pub(crate) fn named<O, M>(name: &'static str, one: O, many: M) -> Self
    where
        O: Fn(ServiceKey) -> Result<Option<SharedInstance>> + Send + Sync + 'static,
        M: Fn(ServiceKey) -> Result<SharedSequence> + Send + Sync + 'static,
    {
        Self {
            name,
            one: Box::new(one),
            many: Box::new(many),
        }
    }
}

impl std::fmt::Debug for FnResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ServiceResolver for FnResolver {
    fn name(&self) -> &str {
        self.name
    }

    fn resolve_one(&self, key: ServiceKey) -> Result<Option<SharedInstance>> {
        (self.one)(key)
    }

    fn resolve_many(&self, key: ServiceKey) -> Result<SharedSequence> {
        (self.many)(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MimirError;
    use crate::key::shared;

    struct Marker;

    #[test]
    fn forwards_both_paths() {
        let resolver = FnResolver::new(
            |_| Ok(Some(shared(7_u32))),
            |_| Ok(vec![shared(1_u32), shared(2_u32)].into()),
        );
        let key = ServiceKey::of::<Marker>();
        assert!(resolver.resolve_one(key).unwrap().is_some());
        assert_eq!(resolver.resolve_many(key).unwrap().len(), 2);
    }

    #[test]
    fn errors_propagate_unchanged() {
        let resolver = FnResolver::new(
            |key| Err(MimirError::resolution(key, "backing store down")),
            |_| Ok(Vec::new().into()),
        );
        let result = resolver.resolve_one(ServiceKey::of::<Marker>());
        assert!(matches!(result, Err(MimirError::Resolution { .. })));
    }
}
