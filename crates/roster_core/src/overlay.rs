//! Local-only mutations kept on top of whatever the remote source returns.

use std::collections::{HashMap, HashSet};

use shared::domain::{UserId, UserRecord};
use tracing::debug;

/// Hands out ids for locally created records. The counter only moves
/// forward, so deleting records never frees an id for reuse.
#[derive(Debug, Clone)]
pub struct LocalIdAllocator {
    next: i64,
}

impl Default for LocalIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl LocalIdAllocator {
    pub fn observe<'a>(&mut self, records: impl IntoIterator<Item = &'a UserRecord>) {
        if let Some(max) = records.into_iter().map(|record| record.id.0).max() {
            self.next = self.next.max(max.saturating_add(1));
        }
    }

    /// Keeps every id up to and including `id` out of local allocation.
    pub fn reserve_through(&mut self, id: UserId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }

    pub fn allocate(&mut self) -> UserId {
        let id = UserId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Output of [`LocalOverlay::apply`]. `rekeyed` lists `(old, new)` ids of
/// local records that had to move out of the way of a remote id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged {
    pub records: Vec<UserRecord>,
    pub rekeyed: Vec<(UserId, UserId)>,
}

#[derive(Debug, Clone, Default)]
pub struct LocalOverlay {
    /// Newest first, matching their order in the roster.
    created: Vec<UserRecord>,
    edited: HashMap<UserId, UserRecord>,
    deleted: HashSet<UserId>,
}

impl LocalOverlay {
    pub fn record_create(&mut self, record: UserRecord) {
        self.deleted.remove(&record.id);
        self.created.insert(0, record);
    }

    pub fn record_edit(&mut self, record: UserRecord) {
        if let Some(slot) = self.created.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        } else {
            self.edited.insert(record.id, record);
        }
    }

    pub fn record_delete(&mut self, id: UserId) {
        if let Some(index) = self.created.iter().position(|r| r.id == id) {
            self.created.remove(index);
            return;
        }
        self.edited.remove(&id);
        self.deleted.insert(id);
    }

    /// Merges the overlay into a freshly fetched set of records: local
    /// creations first, then the remote records with local edits substituted
    /// and local deletions removed. Local records whose id now clashes with a
    /// remote one are given a fresh id.
    pub fn apply(&mut self, remote: Vec<UserRecord>, ids: &mut LocalIdAllocator) -> Merged {
        ids.observe(&remote);
        let remote_ids: HashSet<UserId> = remote.iter().map(|record| record.id).collect();

        let mut rekeyed = Vec::new();
        for record in &mut self.created {
            if remote_ids.contains(&record.id) {
                let fresh = ids.allocate();
                debug!(old_id = record.id.0, new_id = fresh.0, "re-keyed local record");
                rekeyed.push((record.id, fresh));
                record.id = fresh;
            }
        }

        let mut merged = Vec::with_capacity(self.created.len() + remote.len());
        merged.extend(self.created.iter().cloned());
        merged.extend(
            remote
                .into_iter()
                .filter(|record| !self.deleted.contains(&record.id))
                .map(|record| self.edited.get(&record.id).cloned().unwrap_or(record)),
        );
        Merged {
            records: merged,
            rekeyed,
        }
    }

    pub fn clear(&mut self) {
        self.created.clear();
        self.edited.clear();
        self.deleted.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.edited.is_empty() && self.deleted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, first_name: &str) -> UserRecord {
        UserRecord {
            id: UserId(id),
            first_name: first_name.to_string(),
            last_name: "Remote".to_string(),
            username: None,
            email: format!("{id}@example.test"),
            image: String::new(),
        }
    }

    fn ids(records: &[UserRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn allocator_never_reuses_ids_after_delete() {
        let mut alloc = LocalIdAllocator::default();
        alloc.observe(&[user(1, "a"), user(2, "b"), user(3, "c")]);
        assert_eq!(alloc.allocate(), UserId(4));

        // Observing a shorter roster must not move the counter back.
        alloc.observe(&[user(1, "a")]);
        assert_eq!(alloc.allocate(), UserId(5));
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut alloc = LocalIdAllocator::default();
        alloc.observe(&[user(1, "a"), user(2, "b")]);
        alloc.reserve_through(UserId(12));
        assert_eq!(alloc.allocate(), UserId(13));

        alloc.reserve_through(UserId(5));
        assert_eq!(alloc.allocate(), UserId(14));
    }

    #[test]
    fn empty_overlay_passes_remote_records_through() {
        let mut overlay = LocalOverlay::default();
        let mut alloc = LocalIdAllocator::default();
        let remote = vec![user(1, "a"), user(2, "b")];
        assert_eq!(overlay.apply(remote.clone(), &mut alloc).records, remote);
        assert!(overlay.is_empty());
    }

    #[test]
    fn reapplies_creates_edits_and_deletes() {
        let mut overlay = LocalOverlay::default();
        let mut alloc = LocalIdAllocator::default();
        overlay.record_create(user(10, "local"));
        overlay.record_edit(user(2, "edited"));
        overlay.record_delete(UserId(3));

        let merged = overlay
            .apply(vec![user(1, "a"), user(2, "b"), user(3, "c")], &mut alloc)
            .records;

        assert_eq!(ids(&merged), vec![10, 1, 2]);
        assert_eq!(merged[2].first_name, "edited");
    }

    #[test]
    fn deleting_a_local_record_leaves_no_tombstone() {
        let mut overlay = LocalOverlay::default();
        overlay.record_create(user(10, "local"));
        overlay.record_delete(UserId(10));
        assert!(overlay.is_empty());
    }

    #[test]
    fn colliding_local_record_is_rekeyed() {
        let mut overlay = LocalOverlay::default();
        let mut alloc = LocalIdAllocator::default();
        alloc.observe(&[user(6, "f")]);
        overlay.record_create(user(alloc.allocate().0, "local"));

        let merged = overlay.apply(vec![user(7, "g"), user(8, "h")], &mut alloc);

        assert_eq!(ids(&merged.records), vec![9, 7, 8]);
        assert_eq!(merged.records[0].first_name, "local");
        assert_eq!(merged.rekeyed, vec![(UserId(7), UserId(9))]);
    }
}
