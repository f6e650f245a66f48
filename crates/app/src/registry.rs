//! Service registry — the mapping from entity type to its service instance.
//!
//! Populated once from the host's discovery list, then read concurrently by
//! every request. Insertion is first-wins: a later service for an entity type
//! that already has one is discarded. Nothing is ever removed or replaced, so
//! a lookup always returns the same instance for a given entity type.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::{CrudError, PreconditionViolation, UnregisteredServiceError};

use crate::discovery::DiscoveredService;
use crate::services::CrudService;

/// First-wins registry of CRUD services.
#[derive(Default)]
pub struct ServiceRegistry {
    services: DashMap<EntityType, DiscoveredService>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the registration pass over the host's discovery list, in
    /// discovery order.
    #[must_use]
    pub fn from_discovered(services: impl IntoIterator<Item = DiscoveredService>) -> Self {
        tracing::debug!("registering discovered services");
        let registry = Self::new();
        for service in services {
            registry.register(service);
        }
        registry
    }

    /// Register a service under the entity type it reports.
    ///
    /// Returns `true` when the service was added, `false` when another
    /// service already holds its entity type or when the reported entity
    /// type does not match the service's entity.
    pub fn register(&self, service: DiscoveredService) -> bool {
        let entity_type = service.entity_type();
        if !service.is_consistent() {
            tracing::warn!(
                %entity_type,
                "rejecting service whose entity type does not match its entity"
            );
            return false;
        }
        match self.services.entry(entity_type) {
            Entry::Occupied(_) => {
                tracing::debug!(
                    %entity_type,
                    "service already registered, ignoring later discovery"
                );
                false
            }
            Entry::Vacant(slot) => {
                tracing::debug!(%entity_type, "registering service");
                slot.insert(service);
                true
            }
        }
    }

    /// Register `service` unless its entity type is taken, and return
    /// whichever instance holds the entity type afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionViolation::EntityTypeMismatch`] when the service
    /// reports an entity type other than `T`.
    pub fn register_or_existing<T: Entity>(
        &self,
        service: Arc<dyn CrudService<T>>,
    ) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        let discovered = DiscoveredService::new(Arc::clone(&service));
        if !discovered.is_consistent() {
            return Err(PreconditionViolation::EntityTypeMismatch {
                declared: discovered.entity_type().name(),
                actual: T::NAME,
            }
            .into());
        }
        let winner = self
            .services
            .entry(discovered.entity_type())
            .or_insert(discovered);
        Ok(winner.downcast::<T>().unwrap_or(service))
    }

    /// The service bound to `T`, if any.
    #[must_use]
    pub fn find_service<T: Entity>(&self) -> Option<Arc<dyn CrudService<T>>> {
        let entity_type = EntityType::of::<T>();
        tracing::trace!(%entity_type, "requested service");
        self.services
            .get(&entity_type)
            .and_then(|entry| entry.downcast::<T>())
    }

    /// The service bound to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnregisteredService`] when no service is bound to `T`.
    pub fn get_service<T: Entity>(&self) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        self.find_service::<T>().ok_or_else(|| {
            UnregisteredServiceError {
                entity: T::NAME,
            }
            .into()
        })
    }

    #[must_use]
    pub fn contains(&self, entity_type: &EntityType) -> bool {
        self.services.contains_key(entity_type)
    }

    /// Entity types with a bound service, in no particular order.
    #[must_use]
    pub fn entity_types(&self) -> Vec<EntityType> {
        self.services.iter().map(|entry| *entry.key()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
