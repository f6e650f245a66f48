//! Cache port — the pluggable store behind read-through caching.
//!
//! A cache instance belongs to exactly one service and is never shared
//! across entity types. Values are type-erased; the owning service knows
//! what type it stored under each key.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A cached result, shared with every reader that hits it.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Key of a cached read: the operation name and its arguments, rendered as
/// `name(arg1, arg2)`.
///
/// Keys depend only on the name and the argument values, so identical calls
/// always map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of an operation taking no arguments.
    #[must_use]
    pub fn operation(name: &str) -> Self {
        Self(format!("{name}()"))
    }

    /// Key of an operation and its display-rendered arguments.
    #[must_use]
    pub fn with_args(name: &str, args: &[&dyn fmt::Display]) -> Self {
        let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
        Self(format!("{name}({})", rendered.join(", ")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed cache with wholesale invalidation.
///
/// Operations are not required to be mutually exclusive: a `put` racing with
/// a `clear` may leave an entry behind until the next `clear`.
pub trait CacheProvider: Send + Sync {
    /// Look up a value.
    fn get(&self, key: &CacheKey) -> Option<CachedValue>;

    /// Store a value, replacing any previous one.
    fn put(&self, key: CacheKey, value: CachedValue);

    /// Drop every entry.
    fn clear(&self);

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Cache that never stores anything. Services configured with it behave as
/// plain pass-throughs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

impl CacheProvider for NoOpCache {
    fn get(&self, _key: &CacheKey) -> Option<CachedValue> {
        None
    }

    fn put(&self, _key: CacheKey, _value: CachedValue) {}

    fn clear(&self) {}

    fn name(&self) -> &'static str {
        "noop"
    }
}
