//! Discovery inputs — the flat lists of already-constructed services and
//! repositories the host hands over at startup.
//!
//! Both wrappers erase the entity type so instances for different entities
//! can travel in one list; typed access is recovered by downcasting with the
//! entity type the caller asks for.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;

use crate::ports::{CrudRepository, PagingAndSortingRepository};
use crate::services::CrudService;

/// A service instance found by the host, keyed by the entity type it reports.
#[derive(Clone)]
pub struct DiscoveredService {
    entity_type: EntityType,
    declared_for: EntityType,
    instance: Arc<dyn Any + Send + Sync>,
}

impl DiscoveredService {
    /// Wrap a service of entity `T`.
    #[must_use]
    pub fn new<T: Entity>(service: Arc<dyn CrudService<T>>) -> Self {
        Self {
            entity_type: service.entity_type(),
            declared_for: EntityType::of::<T>(),
            instance: Arc::new(service),
        }
    }

    /// The entity type reported by the service itself.
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Whether the reported entity type matches the service's Rust entity type.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.entity_type == self.declared_for
    }

    pub(crate) fn downcast<T: Entity>(&self) -> Option<Arc<dyn CrudService<T>>> {
        self.instance
            .downcast_ref::<Arc<dyn CrudService<T>>>()
            .cloned()
    }
}

/// Capability level of a discovered repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryCapability {
    /// Only the basic [`CrudRepository`] operations.
    Crud,
    /// The full [`PagingAndSortingRepository`] contract.
    PagingAndSorting,
}

/// A repository instance found by the host.
#[derive(Clone)]
pub struct DiscoveredRepository {
    entity_type: EntityType,
    capability: RepositoryCapability,
    instance: Arc<dyn Any + Send + Sync>,
}

impl DiscoveredRepository {
    /// Wrap a repository supporting paging and sorting.
    #[must_use]
    pub fn paging_and_sorting<T: Entity>(
        repository: Arc<dyn PagingAndSortingRepository<T>>,
    ) -> Self {
        Self {
            entity_type: EntityType::of::<T>(),
            capability: RepositoryCapability::PagingAndSorting,
            instance: Arc::new(repository),
        }
    }

    /// Wrap a repository offering only the basic operations.
    #[must_use]
    pub fn crud<T: Entity>(repository: Arc<dyn CrudRepository<T>>) -> Self {
        Self {
            entity_type: EntityType::of::<T>(),
            capability: RepositoryCapability::Crud,
            instance: Arc::new(repository),
        }
    }

    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    #[must_use]
    pub fn capability(&self) -> RepositoryCapability {
        self.capability
    }

    /// The repository as a paging and sorting repository of `T`, if it was
    /// discovered with that capability.
    #[must_use]
    pub fn as_paging_and_sorting<T: Entity>(
        &self,
    ) -> Option<Arc<dyn PagingAndSortingRepository<T>>> {
        self.instance
            .downcast_ref::<Arc<dyn PagingAndSortingRepository<T>>>()
            .cloned()
    }
}

/// Repositories discovered by the host, one per entity type (first wins).
#[derive(Default)]
pub struct RepositoryCatalog {
    repositories: DashMap<EntityType, DiscoveredRepository>,
}

impl RepositoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the host's discovery list, in discovery order.
    #[must_use]
    pub fn from_discovered(repositories: impl IntoIterator<Item = DiscoveredRepository>) -> Self {
        let catalog = Self::new();
        for repository in repositories {
            catalog.register(repository);
        }
        catalog
    }

    /// Add a repository unless one is already known for its entity type.
    ///
    /// Returns `true` when the repository was added.
    pub fn register(&self, repository: DiscoveredRepository) -> bool {
        match self.repositories.entry(repository.entity_type) {
            Entry::Occupied(_) => {
                tracing::debug!(
                    entity_type = %repository.entity_type,
                    "repository already registered, ignoring later discovery"
                );
                false
            }
            Entry::Vacant(slot) => {
                tracing::debug!(
                    entity_type = %repository.entity_type,
                    capability = ?repository.capability,
                    "registering repository"
                );
                slot.insert(repository);
                true
            }
        }
    }

    /// The repository discovered for `entity_type`, if any.
    #[must_use]
    pub fn lookup(&self, entity_type: &EntityType) -> Option<DiscoveredRepository> {
        self.repositories.get(entity_type).map(|entry| entry.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
