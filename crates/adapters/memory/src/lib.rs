//! # crudhub-adapter-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `crudhub-app::ports`
//!   over a process-local ordered map
//! - Sort entities by property using their `serde_json` representation
//! - Provide [`GeneratingFactory`], the default generation collaborator used
//!   when the host discovered no repository or service for an entity type
//!
//! ## Dependency rule
//! Depends on `crudhub-app` (for port traits) and `crudhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod factory;
pub mod repository;
mod sorting;

pub use factory::{CachePolicy, GeneratingFactory};
pub use repository::InMemoryRepository;
