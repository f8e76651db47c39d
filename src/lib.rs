//! Mimir - pluggable service resolution with race-safe memoization
//!
//! This crate provides a stable [`ServiceResolver`] trait that abstracts
//! over resolution strategies, a [`MemoizingResolver`] that guarantees
//! at-most-one retained result per key under unbounded concurrency, and
//! a [`ResolverRegistry`] that publishes the active (strategy, cache)
//! pair behind a single lock-free swap. A [`SingleEntryGate`] rounds out
//! the toolkit as the smallest form of the same first-caller-wins
//! pattern.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mimir::{DefaultResolver, ResolverExt, ResolverRegistry};
//!
//! #[derive(Default)]
//! struct UserStore;
//!
//! fn main() -> mimir::Result<()> {
//!     let registry = ResolverRegistry::with_resolver(Arc::new(
//!         DefaultResolver::new().with_default::<UserStore>(),
//!     ));
//!
//!     // The raw strategy allocates per call; the cache pins one winner.
//!     let cached = registry.current_cached();
//!     let first = cached.one_of::<UserStore>()?.unwrap();
//!     let second = cached.one_of::<UserStore>()?.unwrap();
//!     assert!(Arc::ptr_eq(&first, &second));
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency model
//!
//! Every operation is synchronous and non-blocking with respect to other
//! callers: memoized reads are lock-free, a first resolution holds a
//! per-shard lock only for the conditional insert, and registry reads
//! are a single atomic pointer load. Concurrent first-lookups of the
//! same key may each run the underlying strategy; exactly one result is
//! retained and returned to all of them.

pub mod cache;
pub mod error;
pub mod gate;
pub mod key;
pub mod registry;
pub mod resolver;
pub mod telemetry;

// Re-export main types at crate root
pub use cache::MemoizingResolver;
pub use error::{MimirError, Result};
pub use gate::SingleEntryGate;
pub use key::{ServiceKey, SharedInstance, SharedSequence, shared};
pub use registry::ResolverRegistry;
pub use resolver::{
    DefaultResolver, FnResolver, LocatorFns, LocatorResolver, ResolverExt, ServiceLocator,
    ServiceResolver,
};
