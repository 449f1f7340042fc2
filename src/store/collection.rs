use crate::models::{Camera, Incident};

/// Record stored in a [`Collection`].
pub trait Record: Clone {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl Record for Camera {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Record for Incident {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// In-memory collection with store-owned identifier assignment.
///
/// The counter only moves forward under the collection's single mutation
/// path, so identifiers are never reused, including after the highest-id
/// record is deleted.
pub struct Collection<T: Record> {
    items: Vec<T>,
    next_id: i64,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed from fixture records, picking up the counter past the highest id.
    pub fn seed(items: Vec<T>) -> Self {
        let next_id = items.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self { items, next_id }
    }

    pub fn all(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Insert a record, assigning the next identifier. Returns a copy of the
    /// stored record.
    pub fn insert(&mut self, mut item: T) -> T {
        item.set_id(self.next_id);
        self.next_id += 1;
        self.items.push(item.clone());
        item
    }

    /// Apply a mutation to the record with the given id. Returns a copy of
    /// the updated record, or None if absent.
    pub fn update_with<F>(&mut self, id: i64, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        mutate(item);
        Some(item.clone())
    }

    /// Remove and return the record with the given id.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
