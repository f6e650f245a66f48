//! The uniform CRUD interface bound to one entity type.

use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::{CrudError, NotFoundError, PreconditionViolation};
use crudhub_domain::paging::{Page, PageRequest, Sort};

/// Create/read/update/delete operations over the entities of type `T`.
///
/// [`CachingCrudService`](super::CachingCrudService) is the default
/// implementation. Entities with custom business rules implement this trait
/// themselves and are registered in place of the default.
pub trait CrudService<T: Entity>: Send + Sync {
    /// The entity type this service is bound to.
    fn entity_type(&self) -> EntityType;

    /// Get every entity.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn find_all(&self) -> Result<Vec<T>, CrudError>;

    /// Get every entity ordered by `sort`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError>;

    /// Get one page of entities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError>;

    /// Look up an entity by id. A missing entity is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn find(&self, id: &T::Id) -> Result<Option<T>, CrudError>;

    /// Look up an entity by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::NotFound`] when no entity with `id` exists, or a
    /// storage error from the repository.
    fn get_one(&self, id: &T::Id) -> Result<T, CrudError> {
        self.find(id)?.ok_or_else(|| {
            NotFoundError {
                entity: self.entity_type().name(),
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Insert or update an entity and return the stored version.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn save(&self, entity: T) -> Result<T, CrudError>;

    /// Delete an entity by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError>;

    /// Delete an entity, using its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionViolation::MissingIdentifier`] when the entity
    /// was never saved, or a storage error from the repository.
    fn delete(&self, entity: &T) -> Result<(), CrudError> {
        let id = entity
            .id()
            .ok_or(PreconditionViolation::MissingIdentifier { entity: T::NAME })?;
        self.delete_by_id(&id)
    }
}
