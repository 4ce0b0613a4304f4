//! Authoritative in-memory roster.

use shared::domain::{UserId, UserRecord};

/// Ordered sequence of user records. Every mutation returns the full
/// collection as it stands afterwards.
#[derive(Debug, Clone, Default)]
pub struct UserCollectionStore {
    records: Vec<UserRecord>,
}

impl UserCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the collection, keeping the given order.
    pub fn replace(&mut self, records: Vec<UserRecord>) -> &[UserRecord] {
        self.records = records;
        &self.records
    }

    /// Prepends `record`. Uniqueness of its id is the caller's concern.
    pub fn insert(&mut self, record: UserRecord) -> &[UserRecord] {
        self.records.insert(0, record);
        &self.records
    }

    /// Swaps the record with `id` for `replacement` at the same position.
    /// Unknown ids leave the collection unchanged.
    pub fn update(&mut self, id: UserId, replacement: UserRecord) -> &[UserRecord] {
        if let Some(slot) = self.records.iter_mut().find(|record| record.id == id) {
            *slot = replacement;
        }
        &self.records
    }

    /// Removes the record with `id`, if any.
    pub fn delete(&mut self, id: UserId) -> &[UserRecord] {
        if let Some(index) = self.records.iter().position(|record| record.id == id) {
            self.records.remove(index);
        }
        &self.records
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
