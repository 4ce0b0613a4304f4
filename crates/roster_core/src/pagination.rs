//! Fixed-size window over the roster.

use std::num::NonZeroU32;

use serde::Serialize;
use shared::domain::UserRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Window {
    pub visible: Vec<UserRecord>,
    pub page_count: u32,
}

/// Slice `[(page - 1) * size, page * size)` of `collection`, clipped to its
/// bounds. Page 0 and pages past the end produce an empty window.
pub fn compute(collection: &[UserRecord], page_size: NonZeroU32, current_page: u32) -> Window {
    let size = page_size.get() as usize;
    let last_index = (current_page as usize).saturating_mul(size);
    let first_index = last_index.saturating_sub(size);

    let visible = if current_page == 0 || first_index >= collection.len() {
        Vec::new()
    } else {
        collection[first_index..last_index.min(collection.len())].to_vec()
    };

    Window {
        visible,
        page_count: page_count(collection.len(), page_size),
    }
}

pub fn page_count(len: usize, page_size: NonZeroU32) -> u32 {
    let pages = len.div_ceil(page_size.get() as usize);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use shared::domain::UserId;

    use super::*;

    fn roster(len: i64) -> Vec<UserRecord> {
        (1..=len)
            .map(|id| UserRecord {
                id: UserId(id),
                first_name: format!("First{id}"),
                last_name: format!("Last{id}"),
                username: None,
                email: format!("user{id}@example.test"),
                image: String::new(),
            })
            .collect()
    }

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("non-zero")
    }

    #[test]
    fn last_partial_page_holds_the_remainder() {
        let collection = roster(25);
        let window = compute(&collection, size(10), 3);

        let ids: Vec<i64> = window.visible.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);
        assert_eq!(window.page_count, 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let collection = roster(25);
        let window = compute(&collection, size(10), 4);
        assert!(window.visible.is_empty());
        assert_eq!(window.page_count, 3);
    }

    #[test]
    fn page_zero_is_empty() {
        assert!(compute(&roster(5), size(2), 0).visible.is_empty());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let window = compute(&[], size(10), 1);
        assert!(window.visible.is_empty());
        assert_eq!(window.page_count, 0);
    }

    #[test]
    fn window_never_exceeds_page_size_or_collection() {
        for len in [0, 1, 7, 10, 11, 30] {
            let collection = roster(len);
            for page_size in [1, 3, 10, 50] {
                for page in 1..=6 {
                    let window = compute(&collection, size(page_size), page);
                    assert!(window.visible.len() <= page_size as usize);
                    assert!(window.visible.len() <= collection.len());
                }
            }
        }
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let window = compute(&roster(3), size(u32::MAX), u32::MAX);
        assert!(window.visible.is_empty());
        assert_eq!(window.page_count, 1);
    }
}
