//! Lazy resolution — find the repository and service of an entity type on
//! first use, generating defaults only when nothing was discovered.
//!
//! Resolution is deferred until a caller actually asks, so every instance the
//! host discovers is guaranteed to be registered by then. A discovered
//! service always wins over a generated one.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::CrudError;

use crate::discovery::RepositoryCatalog;
use crate::ports::{CrudServiceFactory, PagingAndSortingRepository};
use crate::registry::ServiceRegistry;
use crate::services::CrudService;

/// Factory preferring discovered instances and delegating to a generator
/// otherwise.
///
/// Generated repositories are memoized per entity type and generated
/// services are offered to the registry, so concurrent first resolutions of
/// the same entity type end up sharing one instance. Two threads may still
/// both call the generator; only one result is kept.
pub struct LazyResolutionFactory<G> {
    repositories: Arc<RepositoryCatalog>,
    services: Arc<ServiceRegistry>,
    generated_repositories: DashMap<EntityType, Arc<dyn Any + Send + Sync>>,
    generator: G,
}

impl<G: CrudServiceFactory> LazyResolutionFactory<G> {
    /// Create a factory over the discovered `repositories` and `services`.
    /// Nothing is resolved until first use.
    pub fn new(
        repositories: Arc<RepositoryCatalog>,
        services: Arc<ServiceRegistry>,
        generator: G,
    ) -> Self {
        Self {
            repositories,
            services,
            generated_repositories: DashMap::new(),
            generator,
        }
    }

    /// Resolve the service of `T`, resolving a repository first only when no
    /// service is registered yet.
    ///
    /// # Errors
    ///
    /// Returns the generator's error when a default has to be built and
    /// cannot be.
    pub fn resolve<T: Entity>(&self) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        if let Some(service) = self.services.find_service::<T>() {
            return Ok(service);
        }
        let repository = self.resolve_repository::<T>()?;
        self.resolve_service::<T>(repository)
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.services
    }

    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn generated_repository<T: Entity>(
        &self,
        entity_type: &EntityType,
    ) -> Option<Arc<dyn PagingAndSortingRepository<T>>> {
        self.generated_repositories
            .get(entity_type)
            .and_then(|entry| {
                entry
                    .downcast_ref::<Arc<dyn PagingAndSortingRepository<T>>>()
                    .cloned()
            })
    }
}

impl<G: CrudServiceFactory> CrudServiceFactory for LazyResolutionFactory<G> {
    fn resolve_repository<T: Entity>(
        &self,
    ) -> Result<Arc<dyn PagingAndSortingRepository<T>>, CrudError> {
        let entity_type = EntityType::of::<T>();
        if let Some(discovered) = self.repositories.lookup(&entity_type) {
            if let Some(repository) = discovered.as_paging_and_sorting::<T>() {
                return Ok(repository);
            }
            tracing::debug!(
                %entity_type,
                capability = ?discovered.capability(),
                "discovered repository does not support paging and sorting"
            );
        }
        if let Some(repository) = self.generated_repository::<T>(&entity_type) {
            return Ok(repository);
        }

        tracing::debug!(%entity_type, "generating repository as none is defined");
        let generated = self.generator.resolve_repository::<T>()?;
        let winner = self
            .generated_repositories
            .entry(entity_type)
            .or_insert_with(|| Arc::new(Arc::clone(&generated)));
        Ok(winner
            .downcast_ref::<Arc<dyn PagingAndSortingRepository<T>>>()
            .cloned()
            .unwrap_or(generated))
    }

    fn resolve_service<T: Entity>(
        &self,
        repository: Arc<dyn PagingAndSortingRepository<T>>,
    ) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        if let Some(service) = self.services.find_service::<T>() {
            return Ok(service);
        }

        let entity_type = EntityType::of::<T>();
        tracing::debug!(%entity_type, "generating service as none is defined");
        let generated = self.generator.resolve_service::<T>(repository)?;
        self.services.register_or_existing(generated)
    }
}
