//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the service core and the outside world.
//! They are defined here (in `app`) so that both the core and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod cache;
pub mod factory;
pub mod repository;
pub mod transaction;

pub use cache::{CacheKey, CacheProvider, CachedValue, NoOpCache};
pub use factory::CrudServiceFactory;
pub use repository::{CrudRepository, PagingAndSortingRepository};
pub use transaction::{NoTransaction, TransactionBoundary, TransactionMode, in_transaction};
