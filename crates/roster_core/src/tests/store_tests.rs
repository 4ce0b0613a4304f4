use std::num::NonZeroU32;

use super::*;
use crate::pagination;

fn user(id: i64, first_name: &str) -> UserRecord {
    UserRecord {
        id: UserId(id),
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        username: None,
        email: format!("{}@example.test", first_name.to_ascii_lowercase()),
        image: format!("https://img.example.test/{id}.jpg"),
    }
}

fn seeded() -> UserCollectionStore {
    let mut store = UserCollectionStore::new();
    store.replace(vec![user(1, "Ada"), user(2, "Brian"), user(3, "Cleo")]);
    store
}

fn ids(records: &[UserRecord]) -> Vec<i64> {
    records.iter().map(|record| record.id.0).collect()
}

#[test]
fn replace_discards_previous_records() {
    let mut store = seeded();
    let records = store.replace(vec![user(9, "Zed")]);
    assert_eq!(ids(records), vec![9]);
}

#[test]
fn replace_twice_with_same_records_is_idempotent() {
    let mut store = seeded();
    let incoming = vec![user(4, "Dana"), user(5, "Eli")];

    let first = store.replace(incoming.clone()).to_vec();
    let second = store.replace(incoming).to_vec();
    assert_eq!(first, second);
}

#[test]
fn insert_prepends_newest_first() {
    let mut store = seeded();
    let records = store.insert(user(4, "Dana"));
    assert_eq!(ids(records), vec![4, 1, 2, 3]);
}

#[test]
fn update_keeps_length_and_position() {
    let mut store = seeded();
    let before = store.records().to_vec();

    let mut replacement = user(2, "Bea");
    replacement.username = Some("bea".to_string());
    let after = store.update(UserId(2), replacement.clone()).to_vec();

    assert_eq!(after.len(), before.len());
    assert_eq!(after[1], replacement);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
}

#[test]
fn update_with_unknown_id_is_noop() {
    let mut store = seeded();
    let before = store.records().to_vec();
    let after = store.update(UserId(42), user(42, "Ghost")).to_vec();
    assert_eq!(after, before);
}

#[test]
fn delete_removes_exactly_one_record() {
    let mut store = seeded();
    let records = store.delete(UserId(2));
    assert_eq!(ids(records), vec![1, 3]);
    assert_eq!(store.len(), 2);
}

#[test]
fn delete_with_unknown_id_is_noop() {
    let mut store = seeded();
    store.delete(UserId(7));
    assert_eq!(ids(store.records()), vec![1, 2, 3]);
}

#[test]
fn lookups_reflect_current_records() {
    let mut store = seeded();
    assert!(store.contains(UserId(1)));
    store.delete(UserId(1));
    assert!(!store.contains(UserId(1)));
    assert_eq!(store.get(UserId(3)).map(|r| r.first_name.as_str()), Some("Cleo"));
    assert!(!store.is_empty());
}

fn page_size(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("non-zero")
}

#[test]
fn inserted_record_leads_the_first_page_window() {
    let mut store = seeded();
    let newest = user(4, "Dana");
    let records = store.insert(newest.clone());

    let window = pagination::compute(records, page_size(2), 1);
    assert_eq!(window.visible.first(), Some(&newest));
    assert_eq!(ids(&window.visible), vec![4, 1]);
}

#[test]
fn replacing_twice_yields_the_same_window() {
    let mut store = seeded();
    let incoming: Vec<UserRecord> = (10..=14).map(|id| user(id, "Same")).collect();

    let first = pagination::compute(store.replace(incoming.clone()), page_size(2), 2);
    let second = pagination::compute(store.replace(incoming), page_size(2), 2);
    assert_eq!(first, second);
    assert_eq!(ids(&first.visible), vec![12, 13]);
    assert_eq!(first.page_count, 3);
}
