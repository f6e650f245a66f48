//! Default CRUD service — delegates to the repository, with an optional
//! read-through cache in front of `find_all` and `find`.
//!
//! Invalidation is coarse: every successful mutation clears the whole cache of
//! the instance before returning. Cache access is not synchronized; a read
//! racing with a mutation may re-insert a stale entry, which the next
//! mutation removes.

use std::sync::Arc;

use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::{CrudError, PreconditionViolation};
use crudhub_domain::paging::{Page, PageRequest, Sort};

use crate::ports::{
    CacheKey, CacheProvider, NoOpCache, NoTransaction, PagingAndSortingRepository,
    TransactionBoundary, TransactionMode, in_transaction,
};
use crate::services::CrudService;

const FIND_ALL: &str = "findAll";
const FIND: &str = "find";

/// CRUD service for entities of type `T`.
pub struct CachingCrudService<T: Entity> {
    entity_type: EntityType,
    repository: Arc<dyn PagingAndSortingRepository<T>>,
    cache: Arc<dyn CacheProvider>,
    transactions: Arc<dyn TransactionBoundary>,
}

impl<T: Entity> CachingCrudService<T> {
    /// Create an uncached service backed by `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionViolation::EntityTypeMismatch`] when
    /// `entity_type` does not describe `T`.
    pub fn new(
        entity_type: EntityType,
        repository: Arc<dyn PagingAndSortingRepository<T>>,
    ) -> Result<Self, CrudError> {
        Self::builder()
            .entity_type(entity_type)
            .repository(repository)
            .build()
    }

    /// Create a builder for constructing a [`CachingCrudService`].
    #[must_use]
    pub fn builder() -> CachingCrudServiceBuilder<T> {
        CachingCrudServiceBuilder::default()
    }

    /// Replace the cache. Entries of the previous cache are not carried over.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the transaction boundary.
    #[must_use]
    pub fn with_transactions(mut self, transactions: Arc<dyn TransactionBoundary>) -> Self {
        self.transactions = transactions;
        self
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn PagingAndSortingRepository<T>> {
        &self.repository
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<dyn CacheProvider> {
        &self.cache
    }

    fn read<R, F>(&self, op: F) -> Result<R, CrudError>
    where
        F: FnMut() -> Result<R, CrudError>,
    {
        in_transaction(self.transactions.as_ref(), TransactionMode::ReadOnly, op)
    }

    fn read_through<R, F>(&self, key: CacheKey, retrieve: F) -> Result<R, CrudError>
    where
        R: Clone + Send + Sync + 'static,
        F: FnMut() -> Result<R, CrudError>,
    {
        if let Some(cached) = self.cache.get(&key) {
            match cached.downcast::<R>() {
                Ok(value) => {
                    tracing::trace!(entity_type = %self.entity_type, %key, "cache hit");
                    return Ok(R::clone(&value));
                }
                Err(_) => {
                    tracing::debug!(
                        entity_type = %self.entity_type,
                        %key,
                        "ignoring cached value of unexpected type"
                    );
                }
            }
        }
        tracing::trace!(entity_type = %self.entity_type, %key, "cache miss");
        let result = self.read(retrieve)?;
        self.cache.put(key, Arc::new(result.clone()));
        Ok(result)
    }

    fn evict_all(&self) {
        tracing::trace!(
            entity_type = %self.entity_type,
            cache = self.cache.name(),
            "clearing cache"
        );
        self.cache.clear();
    }
}

impl<T: Entity> CrudService<T> for CachingCrudService<T> {
    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        self.read_through(CacheKey::operation(FIND_ALL), || self.repository.find_all())
    }

    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError> {
        self.read(|| self.repository.find_all_sorted(sort))
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        self.read(|| self.repository.find_page(request))
    }

    fn find(&self, id: &T::Id) -> Result<Option<T>, CrudError> {
        self.read_through(CacheKey::with_args(FIND, &[id]), || {
            self.repository.find_by_id(id)
        })
    }

    #[tracing::instrument(skip(self, entity), fields(entity_type = %self.entity_type))]
    fn save(&self, entity: T) -> Result<T, CrudError> {
        let saved = in_transaction(
            self.transactions.as_ref(),
            TransactionMode::ReadWrite,
            || self.repository.save(entity.clone()),
        )?;
        self.evict_all();
        Ok(saved)
    }

    #[tracing::instrument(skip(self), fields(entity_type = %self.entity_type))]
    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError> {
        in_transaction(
            self.transactions.as_ref(),
            TransactionMode::ReadWrite,
            || self.repository.delete_by_id(id),
        )?;
        self.evict_all();
        Ok(())
    }
}

/// Step-by-step builder for [`CachingCrudService`].
pub struct CachingCrudServiceBuilder<T: Entity> {
    entity_type: Option<EntityType>,
    repository: Option<Arc<dyn PagingAndSortingRepository<T>>>,
    cache: Option<Arc<dyn CacheProvider>>,
    transactions: Option<Arc<dyn TransactionBoundary>>,
}

impl<T: Entity> Default for CachingCrudServiceBuilder<T> {
    fn default() -> Self {
        Self {
            entity_type: None,
            repository: None,
            cache: None,
            transactions: None,
        }
    }
}

impl<T: Entity> CachingCrudServiceBuilder<T> {
    #[must_use]
    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    #[must_use]
    pub fn repository(mut self, repository: Arc<dyn PagingAndSortingRepository<T>>) -> Self {
        self.repository = Some(repository);
        self
    }

    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn transactions(mut self, transactions: Arc<dyn TransactionBoundary>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    /// Consume the builder, check the dependencies and return the service.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Precondition`] when the entity type or the
    /// repository is missing, or when the entity type does not describe `T`.
    pub fn build(self) -> Result<CachingCrudService<T>, CrudError> {
        let entity_type = self
            .entity_type
            .ok_or(PreconditionViolation::MissingEntityType)?;
        if !entity_type.is::<T>() {
            return Err(PreconditionViolation::EntityTypeMismatch {
                declared: entity_type.name(),
                actual: T::NAME,
            }
            .into());
        }
        let repository = self
            .repository
            .ok_or(PreconditionViolation::MissingRepository)?;

        Ok(CachingCrudService {
            entity_type,
            repository,
            cache: self.cache.unwrap_or_else(|| Arc::new(NoOpCache)),
            transactions: self.transactions.unwrap_or_else(|| Arc::new(NoTransaction)),
        })
    }
}
