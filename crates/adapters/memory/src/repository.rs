//! In-memory implementation of [`PagingAndSortingRepository`].

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crudhub_app::ports::{CrudRepository, PagingAndSortingRepository};
use crudhub_domain::entity::{Entity, Identifier};
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};

use crate::error::StorageError;
use crate::sorting::sort_entities;

/// Process-local repository keeping entities ordered by identifier.
pub struct InMemoryRepository<T: Entity> {
    entities: RwLock<BTreeMap<T::Id, T>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `entities`, assigning identifiers
    /// to those without one.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let mut map = BTreeMap::new();
        for mut entity in entities {
            let id = entity.id().unwrap_or_else(T::Id::generate);
            entity.set_id(id.clone());
            map.insert(id, entity);
        }
        Self {
            entities: RwLock::new(map),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<T::Id, T>>, StorageError> {
        self.entities.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<T::Id, T>>, StorageError> {
        self.entities.write().map_err(|_| StorageError::Poisoned)
    }
}

impl<T: Entity> CrudRepository<T> for InMemoryRepository<T> {
    fn find_all(&self) -> Result<Vec<T>, CrudError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, CrudError> {
        Ok(self.read()?.get(id).cloned())
    }

    fn save(&self, mut entity: T) -> Result<T, CrudError> {
        let id = entity.id().unwrap_or_else(T::Id::generate);
        entity.set_id(id.clone());
        tracing::trace!(entity_type = T::NAME, %id, "storing entity");
        self.write()?.insert(id, entity.clone());
        Ok(entity)
    }

    fn delete_by_id(&self, id: &T::Id) -> Result<(), CrudError> {
        if self.write()?.remove(id).is_none() {
            tracing::trace!(entity_type = T::NAME, %id, "nothing to delete");
        }
        Ok(())
    }

    fn count(&self) -> Result<u64, CrudError> {
        Ok(self.read()?.len() as u64)
    }
}

impl<T: Entity> PagingAndSortingRepository<T> for InMemoryRepository<T> {
    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<T>, CrudError> {
        let entities = self.find_all()?;
        Ok(sort_entities(entities, sort).map_err(StorageError::from)?)
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<T>, CrudError> {
        let entities = self.find_all_sorted(request.sort())?;
        let total = entities.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = entities
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Plant {
        id: Option<u64>,
        name: String,
        height_cm: u32,
    }

    impl Plant {
        fn new(name: &str, height_cm: u32) -> Self {
            Self {
                id: None,
                name: name.to_string(),
                height_cm,
            }
        }
    }

    impl Entity for Plant {
        type Id = u64;
        const NAME: &'static str = "Plant";

        fn id(&self) -> Option<u64> {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = Some(id);
        }
    }

    fn garden() -> InMemoryRepository<Plant> {
        InMemoryRepository::with_entities([
            Plant::new("fern", 40),
            Plant::new("basil", 20),
            Plant::new("cactus", 15),
            Plant::new("aloe", 30),
            Plant::new("mint", 25),
        ])
    }

    #[test]
    fn should_assign_identifier_when_saving_new_entity() {
        let repo = InMemoryRepository::<Plant>::new();
        let saved = repo.save(Plant::new("ivy", 10)).unwrap();

        let id = saved.id.unwrap();
        assert_eq!(repo.find_by_id(&id).unwrap(), Some(saved));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn should_replace_entity_when_saving_with_existing_identifier() {
        let repo = InMemoryRepository::<Plant>::new();
        let mut saved = repo.save(Plant::new("ivy", 10)).unwrap();
        saved.height_cm = 12;

        let updated = repo.save(saved.clone()).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_all().unwrap()[0].height_cm, 12);
    }

    #[test]
    fn should_return_none_when_entity_is_missing() {
        let repo = InMemoryRepository::<Plant>::new();
        assert_eq!(repo.find_by_id(&42).unwrap(), None);
    }

    #[test]
    fn should_ignore_delete_of_unknown_identifier() {
        let repo = garden();
        repo.delete_by_id(&u64::MAX).unwrap();
        assert_eq!(repo.count().unwrap(), 5);
    }

    #[test]
    fn should_delete_stored_entity() {
        let repo = garden();
        let id = repo.find_all().unwrap()[0].id.unwrap();
        repo.delete_by_id(&id).unwrap();
        assert_eq!(repo.find_by_id(&id).unwrap(), None);
        assert_eq!(repo.count().unwrap(), 4);
    }

    #[test]
    fn should_sort_by_property() {
        let repo = garden();
        let sorted = repo
            .find_all_sorted(&Sort::by("height_cm").descending())
            .unwrap();
        let heights: Vec<u32> = sorted.iter().map(|p| p.height_cm).collect();
        assert_eq!(heights, vec![40, 30, 25, 20, 15]);
    }

    #[test]
    fn should_page_through_sorted_entities() {
        let repo = garden();
        let request = PageRequest::of(1, 2).with_sort(Sort::by("name"));

        let page = repo.find_page(&request).unwrap();
        let names: Vec<&str> = page.content().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cactus", "fern"]);
        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn should_return_empty_page_past_the_end() {
        let repo = garden();
        let page = repo.find_page(&PageRequest::of(10, 2)).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 5);
        assert!(!page.has_next());
    }
}
