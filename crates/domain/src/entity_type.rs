//! Entity type discriminator.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::entity::Entity;

/// Identifies a kind of domain entity.
///
/// Two values are equal when they describe the same Rust type; the name is
/// only carried for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct EntityType {
    name: &'static str,
    type_id: TypeId,
}

impl EntityType {
    /// The entity type of `T`.
    #[must_use]
    pub fn of<T: Entity>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
        }
    }

    /// Name of the entity kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this value describes `T`.
    #[must_use]
    pub fn is<T: Entity>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Apple;

    #[derive(Debug, Clone, Serialize)]
    struct Pear;

    impl Entity for Apple {
        type Id = u64;
        const NAME: &'static str = "Fruit";

        fn id(&self) -> Option<u64> {
            None
        }

        fn set_id(&mut self, _id: u64) {}
    }

    impl Entity for Pear {
        type Id = u64;
        const NAME: &'static str = "Fruit";

        fn id(&self) -> Option<u64> {
            None
        }

        fn set_id(&mut self, _id: u64) {}
    }

    #[test]
    fn should_be_equal_when_describing_same_type() {
        assert_eq!(EntityType::of::<Apple>(), EntityType::of::<Apple>());
    }

    #[test]
    fn should_differ_when_types_differ_even_with_same_name() {
        let apple = EntityType::of::<Apple>();
        let pear = EntityType::of::<Pear>();
        assert_eq!(apple.name(), pear.name());
        assert_ne!(apple, pear);
        assert!(apple.is::<Apple>());
        assert!(!apple.is::<Pear>());
    }

    #[test]
    fn should_hash_by_type() {
        let mut set = HashSet::new();
        set.insert(EntityType::of::<Apple>());
        set.insert(EntityType::of::<Apple>());
        set.insert(EntityType::of::<Pear>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn should_display_name() {
        assert_eq!(EntityType::of::<Apple>().to_string(), "Fruit");
    }
}
