//! Error taxonomy shared across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CrudError`]
//! via `#[from]` or a `From` impl. Store-level failures are boxed into
//! [`CrudError::Storage`] and propagated unchanged; nothing here retries.

/// Top-level error returned by repositories, services and registries.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// The requested entity does not exist.
    #[error("entity not found")]
    NotFound(#[from] NotFoundError),

    /// No service is bound to the requested entity type.
    #[error("service not registered")]
    UnregisteredService(#[from] UnregisteredServiceError),

    /// A required dependency or argument was missing or inconsistent.
    #[error("precondition violated")]
    Precondition(#[from] PreconditionViolation),

    /// The underlying store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CrudError {
    /// Wrap a store failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

/// No entity of kind `entity` exists with identifier `id`.
#[derive(Debug, thiserror::Error)]
#[error("could not find entity '{entity}' with id: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// No service instance is bound to entity kind `entity`.
#[derive(Debug, thiserror::Error)]
#[error("no service registered for entity '{entity}'")]
pub struct UnregisteredServiceError {
    pub entity: &'static str,
}

/// A construction or call precondition did not hold.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionViolation {
    #[error("entity type is required")]
    MissingEntityType,

    #[error("repository is required")]
    MissingRepository,

    #[error("entity type '{declared}' does not describe entity '{actual}'")]
    EntityTypeMismatch {
        declared: &'static str,
        actual: &'static str,
    },

    #[error("entity '{entity}' has no identifier")]
    MissingIdentifier { entity: &'static str },

    #[error("transaction boundary returned without running the operation")]
    TransactionNotExecuted,
}
