//! Generation port — builds repositories and services for an entity type.

use std::sync::Arc;

use crudhub_domain::entity::Entity;
use crudhub_domain::error::CrudError;

use crate::ports::repository::PagingAndSortingRepository;
use crate::services::CrudService;

/// Produces the repository and the service of an entity type.
///
/// Implemented by the generation collaborators that synthesize defaults, and
/// by [`LazyResolutionFactory`](crate::resolution::LazyResolutionFactory),
/// which prefers discovered instances and delegates to a generator otherwise.
pub trait CrudServiceFactory: Send + Sync {
    /// Resolve a repository for `T` supporting paging and sorting.
    ///
    /// # Errors
    ///
    /// Returns an error when no repository can be produced.
    fn resolve_repository<T: Entity>(
        &self,
    ) -> Result<Arc<dyn PagingAndSortingRepository<T>>, CrudError>;

    /// Resolve the service of `T`, backed by `repository` when a new one has
    /// to be built.
    ///
    /// # Errors
    ///
    /// Returns an error when no service can be produced.
    fn resolve_service<T: Entity>(
        &self,
        repository: Arc<dyn PagingAndSortingRepository<T>>,
    ) -> Result<Arc<dyn CrudService<T>>, CrudError>;
}
