//! Wiring — the discovery pass, lazy resolution and seeding.

use std::sync::Arc;

use crudhub_adapter_cache_moka::MokaCacheProvider;
use crudhub_adapter_memory::{GeneratingFactory, InMemoryRepository};
use crudhub_app::discovery::{DiscoveredRepository, DiscoveredService, RepositoryCatalog};
use crudhub_app::ports::CacheProvider;
use crudhub_app::registry::ServiceRegistry;
use crudhub_app::resolution::LazyResolutionFactory;
use crudhub_app::services::{CrudService, ReadService};
use crudhub_domain::entity::Entity;
use crudhub_domain::error::CrudError;

use crate::catalog::{Customer, Order, Product, ProductService};
use crate::config::Config;
use crate::seed::{Seed, SeedReport};

/// Every service of the daemon, resolved on demand.
pub struct Hub {
    factory: LazyResolutionFactory<GeneratingFactory>,
    reader: ReadService,
}

impl Hub {
    /// Register the host-provided product repository and service, and
    /// generate everything else with caches chosen by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Precondition`] if the product service cannot be
    /// assembled.
    pub fn new(config: &Config) -> Result<Self, CrudError> {
        let products = Arc::new(InMemoryRepository::<Product>::new());
        let repositories = RepositoryCatalog::from_discovered([
            DiscoveredRepository::paging_and_sorting::<Product>(products.clone()),
        ]);
        let services = ServiceRegistry::from_discovered([DiscoveredService::new::<Product>(
            Arc::new(ProductService::new(products)?),
        )]);

        let cache = config.cache.clone();
        let moka = config.moka_config();
        let generator = GeneratingFactory::new().with_cache_policy(move |entity_type| {
            cache
                .caches(entity_type.name())
                .then(|| Arc::new(MokaCacheProvider::new(moka)) as Arc<dyn CacheProvider>)
        });

        Ok(Self::from_parts(repositories, services, generator))
    }

    /// Assemble a hub over already discovered repositories and services.
    #[must_use]
    pub fn from_parts(
        repositories: RepositoryCatalog,
        services: ServiceRegistry,
        generator: GeneratingFactory,
    ) -> Self {
        let factory =
            LazyResolutionFactory::new(Arc::new(repositories), Arc::new(services), generator);
        let reader = ReadService::new(Arc::clone(factory.registry()));
        Self { factory, reader }
    }

    /// Resolve the service of every served entity type.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn resolve_all(&self) -> Result<(), CrudError> {
        self.factory.resolve::<Order>()?;
        self.factory.resolve::<Customer>()?;
        self.factory.resolve::<Product>()?;
        Ok(())
    }

    /// The service of `T`, resolved on first use.
    ///
    /// # Errors
    ///
    /// Returns the failure to generate a missing service.
    pub fn service<T: Entity>(&self) -> Result<Arc<dyn CrudService<T>>, CrudError> {
        self.factory.resolve::<T>()
    }

    #[must_use]
    pub fn reader(&self) -> &ReadService {
        &self.reader
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        self.factory.registry()
    }

    /// Save every entity of `seed` through its service, customers first.
    ///
    /// # Errors
    ///
    /// Stops at the first failing save and returns its error.
    pub fn seed(&self, seed: Seed) -> Result<SeedReport, CrudError> {
        let report = SeedReport {
            customers: self.save_all(seed.customers)?,
            products: self.save_all(seed.products)?,
            orders: self.save_all(seed.orders)?,
        };
        tracing::info!(
            customers = report.customers,
            products = report.products,
            orders = report.orders,
            "seeded entities"
        );
        Ok(report)
    }

    fn save_all<T: Entity>(&self, entities: Vec<T>) -> Result<usize, CrudError> {
        let service = self.service::<T>()?;
        let count = entities.len();
        for entity in entities {
            service.save(entity)?;
        }
        Ok(count)
    }
}
