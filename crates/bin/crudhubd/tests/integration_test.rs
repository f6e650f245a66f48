//! End-to-end tests for the full crudhubd stack.
//!
//! Each test assembles the real registry, lazy resolution factory, in-memory
//! repositories and moka caches, and drives them through the service and
//! read APIs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use crudhub_adapter_cache_moka::MokaCacheProvider;
use crudhub_adapter_memory::{GeneratingFactory, InMemoryRepository};
use crudhub_app::discovery::{DiscoveredRepository, DiscoveredService, RepositoryCatalog};
use crudhub_app::ports::{
    CacheProvider, CrudRepository, CrudServiceFactory, PagingAndSortingRepository,
};
use crudhub_app::registry::ServiceRegistry;
use crudhub_app::resolution::LazyResolutionFactory;
use crudhub_app::services::{CrudService, ReadService};
use crudhub_domain::entity::Entity;
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};
use crudhubd::catalog::{Customer, CustomerId, Order, Product, ProductService};
use crudhubd::cli::{self, Command};
use crudhubd::config::Config;
use crudhubd::hub::Hub;
use crudhubd::seed::Seed;

/// In-memory repository counting `find_all` calls.
struct CountingRepository<T: Entity> {
    inner: InMemoryRepository<T>,
    find_all_calls: AtomicUsize,
}

impl<T: Entity> Default for CountingRepository<T> {
    fn default() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            find_all_calls: AtomicUsize::new(0),
        }
    }
}

impl<T: Entity> CountingRepository<T> {
    fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }
}

impl<T: Entity> CrudRepository<T> for CountingRepository<T> {
    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all()
    }

    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, CrudError> {
        self.inner.find_by_id(id)
    }

    fn save(&self, entity: T) -> Result<T, CrudError> {
        self.inner.save(entity)
    }

    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError> {
        self.inner.delete_by_id(id)
    }
}

impl<T: Entity> PagingAndSortingRepository<T> for CountingRepository<T> {
    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError> {
        self.inner.find_all_sorted(sort)
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        self.inner.find_page(request)
    }
}

fn caching_customers() -> GeneratingFactory {
    GeneratingFactory::new().with_cache_policy(|entity_type| {
        entity_type
            .is::<Customer>()
            .then(|| Arc::new(MokaCacheProvider::default()) as Arc<dyn CacheProvider>)
    })
}

// ---------------------------------------------------------------------------
// Uncached generation
// ---------------------------------------------------------------------------

#[test]
fn should_generate_uncached_order_service_that_reflects_writes() {
    let factory = LazyResolutionFactory::new(
        Arc::new(RepositoryCatalog::new()),
        Arc::new(ServiceRegistry::new()),
        GeneratingFactory::new(),
    );

    let repository = factory.resolve_repository::<Order>().unwrap();
    let service = factory.resolve_service::<Order>(repository).unwrap();

    let first = service.find_all().unwrap();
    assert!(first.is_empty());

    let saved = service.save(Order::new(None, 2_500)).unwrap();
    assert!(saved.id.is_some());
    assert_eq!(service.find_all().unwrap(), vec![saved]);
}

// ---------------------------------------------------------------------------
// Cached generation
// ---------------------------------------------------------------------------

#[test]
fn should_serve_customer_list_from_cache_until_saved() {
    let repository = Arc::new(CountingRepository::<Customer>::default());
    let factory = LazyResolutionFactory::new(
        Arc::new(RepositoryCatalog::from_discovered([
            DiscoveredRepository::paging_and_sorting::<Customer>(repository.clone()),
        ])),
        Arc::new(ServiceRegistry::new()),
        caching_customers(),
    );
    let service = factory.resolve::<Customer>().unwrap();

    service.find_all().unwrap();
    assert_eq!(repository.find_all_calls(), 1);

    service.find_all().unwrap();
    assert_eq!(repository.find_all_calls(), 1);

    service.save(Customer::new("Bea", "bea@example.com")).unwrap();
    let customers = service.find_all().unwrap();
    assert_eq!(repository.find_all_calls(), 2);
    assert_eq!(customers.len(), 1);
}

#[test]
fn should_return_empty_from_find_and_fail_get_one_for_missing_id() {
    let factory = LazyResolutionFactory::new(
        Arc::new(RepositoryCatalog::new()),
        Arc::new(ServiceRegistry::new()),
        caching_customers(),
    );
    let service = factory.resolve::<Customer>().unwrap();
    let missing = CustomerId::new();

    assert_eq!(service.find(&missing).unwrap(), None);
    match service.get_one(&missing) {
        Err(CrudError::NotFound(err)) => {
            assert_eq!(err.entity, "Customer");
            assert_eq!(err.id, missing.to_string());
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Registry and precedence
// ---------------------------------------------------------------------------

#[test]
fn should_prefer_host_service_over_generation() {
    let host: Arc<dyn CrudService<Product>> = Arc::new(
        ProductService::new(Arc::new(InMemoryRepository::<Product>::new())).unwrap(),
    );
    let factory = LazyResolutionFactory::new(
        Arc::new(RepositoryCatalog::new()),
        Arc::new(ServiceRegistry::from_discovered([DiscoveredService::new(
            host.clone(),
        )])),
        GeneratingFactory::new(),
    );

    let unrelated = factory.generator().resolve_repository::<Product>().unwrap();
    let resolved = factory.resolve_service::<Product>(unrelated.clone()).unwrap();
    assert!(Arc::ptr_eq(&resolved, &host));

    resolved.save(Product::new("cb-9", "Cable", 900)).unwrap();
    assert_eq!(unrelated.count().unwrap(), 0);
}

#[test]
fn should_keep_first_of_two_services_for_same_entity() {
    let first: Arc<dyn CrudService<Product>> = Arc::new(
        ProductService::new(Arc::new(InMemoryRepository::<Product>::new())).unwrap(),
    );
    let second: Arc<dyn CrudService<Product>> = Arc::new(
        ProductService::new(Arc::new(InMemoryRepository::<Product>::new())).unwrap(),
    );
    let registry = ServiceRegistry::from_discovered([
        DiscoveredService::new(first.clone()),
        DiscoveredService::new(second.clone()),
    ]);

    let found = registry.get_service::<Product>().unwrap();
    assert!(Arc::ptr_eq(&found, &first));
    assert!(Arc::ptr_eq(&found, &registry.get_service::<Product>().unwrap()));
    assert!(!Arc::ptr_eq(&found, &second));
}

#[test]
fn should_converge_when_two_threads_resolve_unseen_entity() {
    let factory = LazyResolutionFactory::new(
        Arc::new(RepositoryCatalog::new()),
        Arc::new(ServiceRegistry::new()),
        GeneratingFactory::new(),
    );
    let barrier = Barrier::new(2);

    let services: Vec<Arc<dyn CrudService<Order>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    let repository = factory.resolve_repository::<Order>().unwrap();
                    factory.resolve_service::<Order>(repository).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let registered = factory.registry().get_service::<Order>().unwrap();
    assert!(services.iter().all(|s| Arc::ptr_eq(s, &registered)));

    services[0].save(Order::new(None, 10)).unwrap();
    assert_eq!(services[1].find_all().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Read service and command line
// ---------------------------------------------------------------------------

#[test]
fn should_read_sorted_and_paged_results_through_read_service() {
    let hub = Hub::new(&Config::default()).unwrap();
    hub.resolve_all().unwrap();
    hub.seed(Seed {
        orders: vec![
            Order::new(None, 300),
            Order::new(None, 100),
            Order::new(None, 200),
        ],
        ..Seed::default()
    })
    .unwrap();

    let reader: &ReadService = hub.reader();
    let sorted = reader
        .find_all_sorted::<Order>(&Sort::by("total_cents"))
        .unwrap();
    let totals: Vec<u64> = sorted.iter().map(|o| o.total_cents).collect();
    assert_eq!(totals, vec![100, 200, 300]);

    let request = PageRequest::of(1, 2).with_sort(Sort::by("total_cents").descending());
    let page = reader.find_page::<Order>(&request).unwrap();
    assert_eq!(page.content().len(), 1);
    assert_eq!(page.content()[0].total_cents, 100);
    assert_eq!(page.total_pages(), 2);
}

#[test]
fn should_fail_read_for_entity_without_service() {
    let hub = Hub::new(&Config::default()).unwrap();
    let result = hub.reader().find_all_sorted::<Order>(&Sort::unsorted());
    assert!(matches!(result, Err(CrudError::UnregisteredService(_))));
}

#[test]
fn should_list_types_after_resolution() {
    let hub = Hub::new(&Config::default()).unwrap();
    let before = cli::execute(&hub, &Command::Types).unwrap();
    assert_eq!(before, serde_json::json!(["Product"]));

    hub.resolve_all().unwrap();
    let after = cli::execute(&hub, &Command::Types).unwrap();
    assert_eq!(after, serde_json::json!(["Customer", "Order", "Product"]));
}
