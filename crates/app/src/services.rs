//! Services — the uniform CRUD surface bound to one entity type.

pub mod caching_crud_service;
pub mod crud_service;
pub mod read_service;

pub use caching_crud_service::{CachingCrudService, CachingCrudServiceBuilder};
pub use crud_service::CrudService;
pub use read_service::ReadService;
