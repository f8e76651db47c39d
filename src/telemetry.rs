//! Telemetry metric name constants.
//!
//! Centralised metric names for mimir operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `mimir_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation` — lookup path: "resolve_one" or "resolve_many"

/// Total memo-table hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "mimir_cache_hits_total";

/// Total memo-table misses (each miss invokes the wrapped resolver).
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "mimir_cache_misses_total";

/// Total computed results discarded because a concurrent racer's insert
/// won the memo-table slot.
///
/// Labels: `operation`.
pub const DISCARDED_RESULTS_TOTAL: &str = "mimir_discarded_results_total";

/// Total resolver installations through a registry. Constructing a
/// registry is not counted; every `set_*` call is.
pub const RESOLVER_SWAPS_TOTAL: &str = "mimir_resolver_swaps_total";
