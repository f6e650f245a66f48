//! # crudhub-domain
//!
//! Shared vocabulary for the crudhub service layer.
//!
//! ## Responsibilities
//! - Describe what an **entity** is ([`Entity`](entity::Entity)) and how its
//!   instances are identified ([`Identifier`](entity::Identifier))
//! - Provide the [`EntityType`](entity_type::EntityType) discriminator used as
//!   the key space of registries and caches
//! - Paging and sorting request/response types shared by repositories and
//!   services
//! - The error taxonomy every layer converts into
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or adapter crates.

pub mod entity;
pub mod entity_type;
pub mod error;
pub mod id;
pub mod paging;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use uuid;
}
