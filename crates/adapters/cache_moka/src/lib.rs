//! # crudhub-adapter-cache-moka
//!
//! Cache adapter using [moka](https://docs.rs/moka).
//!
//! ## Responsibilities
//! - Implement the `CacheProvider` port defined in `crudhub-app::ports`
//! - Bound the number of cached results and optionally expire them
//! - Track hit and miss counts
//!
//! ## Dependency rule
//! Depends on `crudhub-app` (for the port trait) only.
//! The `app` and `domain` crates must never reference this adapter.

mod provider;

pub use provider::{CacheStats, MokaCacheConfig, MokaCacheProvider};
