//! Repository ports — persistence for one entity type.
//!
//! Implementations are synchronous and are expected to be called from inside
//! whatever transactional scope the caller set up. Store failures are reported
//! as [`CrudError::Storage`] and are never retried by the service layer.

use std::sync::Arc;

use crudhub_domain::entity::Entity;
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};

/// Basic create/read/delete access to the entities of type `T`.
pub trait CrudRepository<T: Entity>: Send + Sync {
    /// Get every entity, in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn find_all(&self) -> Result<Vec<T>, CrudError>;

    /// Get an entity by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, CrudError>;

    /// Insert or update an entity, returning the stored version (which may
    /// carry a newly assigned identifier).
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn save(&self, entity: T) -> Result<T, CrudError>;

    /// Delete an entity by its identifier. Deleting a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError>;

    /// Number of stored entities.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn count(&self) -> Result<u64, CrudError> {
        Ok(self.find_all()?.len() as u64)
    }
}

/// Repository capability required by the lazy resolution factory: the basic
/// operations plus sorted and paged reads.
pub trait PagingAndSortingRepository<T: Entity>: CrudRepository<T> {
    /// Get every entity ordered by `sort`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError>;

    /// Get one page of entities, ordered by the request's sort.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Storage`] when the store fails.
    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError>;
}

impl<T: Entity, R: CrudRepository<T> + ?Sized> CrudRepository<T> for Arc<R> {
    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, CrudError> {
        (**self).find_by_id(id)
    }

    fn save(&self, entity: T) -> Result<T, CrudError> {
        (**self).save(entity)
    }

    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError> {
        (**self).delete_by_id(id)
    }

    fn count(&self) -> Result<u64, CrudError> {
        (**self).count()
    }
}

impl<T: Entity, R: PagingAndSortingRepository<T> + ?Sized> PagingAndSortingRepository<T>
    for Arc<R>
{
    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError> {
        (**self).find_all_sorted(sort)
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        (**self).find_page(request)
    }
}
