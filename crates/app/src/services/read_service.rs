//! Read service — read-only access to any registered entity type.
//!
//! Meant for internal callers that must never mutate: the type simply has no
//! save or delete methods.

use std::sync::Arc;

use crudhub_domain::entity::Entity;
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};

use crate::registry::ServiceRegistry;

/// Read-only facade over the [`ServiceRegistry`].
#[derive(Clone)]
pub struct ReadService {
    registry: Arc<ServiceRegistry>,
}

impl ReadService {
    /// Create a read service resolving its delegates from `registry`.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Get every entity of type `T` ordered by `sort`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnregisteredService`] when no service is bound to
    /// `T`, or the error of the underlying service.
    pub fn find_all_sorted<T: Entity>(&self, sort: &Sort) -> Result<Vec<T>, CrudError> {
        self.registry.get_service::<T>()?.find_all_sorted(sort)
    }

    /// Get one page of entities of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnregisteredService`] when no service is bound to
    /// `T`, or the error of the underlying service.
    pub fn find_page<T: Entity>(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        self.registry.get_service::<T>()?.find_page(request)
    }

    /// Get the entity of type `T` with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::NotFound`] when it does not exist,
    /// [`CrudError::UnregisteredService`] when no service is bound to `T`, or
    /// the error of the underlying service.
    pub fn get_one<T: Entity>(&self, id: &T::Id) -> Result<T, CrudError> {
        self.registry.get_service::<T>()?.get_one(id)
    }
}
