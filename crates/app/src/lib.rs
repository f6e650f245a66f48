//! # crudhub-app
//!
//! Application layer — the CRUD service core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement (driven/outbound ports):
//!   - `CrudRepository` / `PagingAndSortingRepository` — persistence per entity
//!   - `CacheProvider` — pluggable `get/put/clear` cache, no-op by default
//!   - `TransactionBoundary` — explicit transactional wrapper
//!   - `CrudServiceFactory` — repository and service generation
//! - Provide the **driving ports**:
//!   - `CrudService` and its default `CachingCrudService`
//!   - `ServiceRegistry` — first-wins mapping from entity type to service
//!   - `LazyResolutionFactory` — use what was discovered, else generate
//!   - `ReadService` — read-only facade over the registry
//!
//! ## Dependency rule
//! Depends on `crudhub-domain` only (plus `dashmap` for concurrent maps).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod discovery;
pub mod ports;
pub mod registry;
pub mod resolution;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
