//! Entity and identifier traits.
//!
//! Every kind of record handled by the service layer implements [`Entity`].
//! The trait carries the entity's [`EntityType`] name and its identifier type,
//! so nothing needs to be inferred at runtime.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::entity_type::EntityType;

/// Unique key of one entity instance within its [`EntityType`].
pub trait Identifier:
    Clone + Eq + Hash + Ord + fmt::Display + fmt::Debug + Send + Sync + 'static
{
    /// Produce a fresh identifier, used by stores that assign ids on save.
    fn generate() -> Self;
}

/// A persistable domain record.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Identifier type of this entity.
    type Id: Identifier;

    /// Human readable name of the entity kind (e.g. `"Order"`).
    const NAME: &'static str;

    /// The identifier, or `None` while the entity has never been saved.
    fn id(&self) -> Option<Self::Id>;

    /// Assign an identifier. Called by stores when saving a new entity.
    fn set_id(&mut self, id: Self::Id);

    /// Whether the entity has not been persisted yet.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// The [`EntityType`] describing this entity.
    #[must_use]
    fn entity_type() -> EntityType {
        EntityType::of::<Self>()
    }
}

static NEXT_NUMERIC_ID: AtomicU64 = AtomicU64::new(1);

impl Identifier for u64 {
    fn generate() -> Self {
        NEXT_NUMERIC_ID.fetch_add(1, Ordering::Relaxed)
    }
}
