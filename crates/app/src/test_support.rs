//! Fakes shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crudhub_domain::entity::{Entity, Identifier};
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};

use crate::ports::{
    CacheKey, CacheProvider, CachedValue, CrudRepository, PagingAndSortingRepository,
    TransactionBoundary, TransactionMode,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: Option<u64>,
    pub customer: String,
    pub total_cents: u64,
}

impl Order {
    pub fn new(customer: &str, total_cents: u64) -> Self {
        Self {
            id: None,
            customer: customer.to_string(),
            total_cents,
        }
    }
}

impl Entity for Order {
    type Id = u64;
    const NAME: &'static str = "Order";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: Option<u64>,
    pub name: String,
}

impl Customer {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

impl Entity for Customer {
    type Id = u64;
    const NAME: &'static str = "Customer";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

/// In-memory repository counting the calls it receives.
pub struct CountingRepository<T: Entity> {
    store: Mutex<BTreeMap<T::Id, T>>,
    find_all_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
    save_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl<T: Entity> Default for CountingRepository<T> {
    fn default() -> Self {
        Self {
            store: Mutex::new(BTreeMap::new()),
            find_all_calls: AtomicUsize::new(0),
            find_by_id_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }
}

impl<T: Entity> CountingRepository<T> {
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl<T: Entity> CrudRepository<T> for CountingRepository<T> {
    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, CrudError> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.lock().unwrap().get(id).cloned())
    }

    fn save(&self, mut entity: T) -> Result<T, CrudError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let id = entity.id().unwrap_or_else(T::Id::generate);
        entity.set_id(id.clone());
        self.store.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.store.lock().unwrap().remove(id);
        Ok(())
    }
}

impl<T: Entity> PagingAndSortingRepository<T> for CountingRepository<T> {
    fn find_all_sorted(&self, _sort: &Sort) -> Result<Vec<T>, CrudError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        let store = self.store.lock().unwrap();
        let content = store
            .values()
            .skip(usize::try_from(request.offset()).unwrap())
            .take(request.size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, store.len() as u64))
    }
}

/// Repository whose every call fails with a storage error.
pub struct FailingRepository;

fn unavailable() -> CrudError {
    CrudError::storage(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "store unavailable",
    ))
}

impl<T: Entity> CrudRepository<T> for FailingRepository {
    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        Err(unavailable())
    }

    fn find_by_id(&self, _id: &T::Id) -> Result<Option<T>, CrudError> {
        Err(unavailable())
    }

    fn save(&self, _entity: T) -> Result<T, CrudError> {
        Err(unavailable())
    }

    fn delete_by_id(&self, _id: &T::Id) -> Result<(), CrudError> {
        Err(unavailable())
    }
}

impl<T: Entity> PagingAndSortingRepository<T> for FailingRepository {
    fn find_all_sorted(&self, _sort: &Sort) -> Result<Vec<T>, CrudError> {
        Err(unavailable())
    }

    fn find_page(&self, _request: &PageRequest) -> Result<Page<T>, CrudError> {
        Err(unavailable())
    }
}

/// Hash map backed cache counting clears.
#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<CacheKey, CachedValue>>,
    clears: AtomicUsize,
}

impl MapCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CacheProvider for MapCache {
    fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: CacheKey, value: CachedValue) {
        self.entries.lock().unwrap().insert(key, value);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().clear();
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

/// Boundary recording the mode and outcome of every transaction.
#[derive(Default)]
pub struct RecordingTransactions {
    log: Mutex<Vec<(TransactionMode, bool)>>,
}

impl RecordingTransactions {
    pub fn log(&self) -> Vec<(TransactionMode, bool)> {
        self.log.lock().unwrap().clone()
    }
}

impl TransactionBoundary for RecordingTransactions {
    fn execute(
        &self,
        mode: TransactionMode,
        work: &mut dyn FnMut() -> Result<(), CrudError>,
    ) -> Result<(), CrudError> {
        let result = work();
        self.log.lock().unwrap().push((mode, result.is_ok()));
        result
    }
}
