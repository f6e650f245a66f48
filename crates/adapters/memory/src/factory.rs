//! Default generation collaborator.

use std::sync::Arc;

use crudhub_app::ports::{
    CacheProvider, CrudServiceFactory, NoTransaction, PagingAndSortingRepository,
    TransactionBoundary,
};
use crudhub_app::services::{CachingCrudService, CrudService};
use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::CrudError;

use crate::repository::InMemoryRepository;

/// Decides which cache, if any, a generated service of an entity type gets.
///
/// Called once per generated service, so returning a fresh provider gives
/// every service its own cache.
pub type CachePolicy = Arc<dyn Fn(&EntityType) -> Option<Arc<dyn CacheProvider>> + Send + Sync>;

/// Generates an [`InMemoryRepository`] and a [`CachingCrudService`] for
/// any entity type.
#[derive(Clone)]
pub struct GeneratingFactory {
    cache_policy: CachePolicy,
    transactions: Arc<dyn TransactionBoundary>,
}

fn no_cache(_: &EntityType) -> Option<Arc<dyn CacheProvider>> {
    None
}

impl Default for GeneratingFactory {
    fn default() -> Self {
        Self {
            cache_policy: Arc::new(no_cache),
            transactions: Arc::new(NoTransaction),
        }
    }
}

impl GeneratingFactory {
    /// Factory generating uncached services without transactions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&EntityType) -> Option<Arc<dyn CacheProvider>> + Send + Sync + 'static,
    {
        self.cache_policy = Arc::new(policy);
        self
    }

    #[must_use]
    pub fn with_transactions(mut self, transactions: Arc<dyn TransactionBoundary>) -> Self {
        self.transactions = transactions;
        self
    }
}

impl CrudServiceFactory for GeneratingFactory {
    fn resolve_repository<T: Entity>(
        &self,
    ) -> Result<Arc<dyn PagingAndSortingRepository<T>>, CrudError> {
        Ok(Arc::new(InMemoryRepository::<T>::new()))
    }

    fn resolve_service<T: Entity>(
        &self,
        repository: Arc<dyn PagingAndSortingRepository<T>>,
    ) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        let entity_type = T::entity_type();
        let mut builder = CachingCrudService::<T>::builder()
            .entity_type(entity_type)
            .repository(repository)
            .transactions(Arc::clone(&self.transactions));
        if let Some(cache) = (self.cache_policy)(&entity_type) {
            tracing::debug!(%entity_type, cache = cache.name(), "attaching cache");
            builder = builder.cache(cache);
        }
        Ok(Arc::new(builder.build()?))
    }
}
