//! Capped history collections
//!
//! Core of the local result store: an ordered list, newest first, that never
//! grows past its cap. Eviction is pure FIFO-by-age; adding to a full list
//! drops the oldest entries.

use crate::types::{CommunityPost, ScanRecord};

/// Maximum retained scan history entries
pub const MAX_SCAN_HISTORY: usize = 12;

/// Maximum retained community posts
pub const MAX_COMMUNITY_POSTS: usize = 20;

/// Records that can be deleted by identifier
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for ScanRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for CommunityPost {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered collection capped at a fixed maximum count
///
/// Invariants: `len() <= cap` at all times; iteration order is strict
/// insertion order, newest first.
#[derive(Debug, Clone)]
pub struct CappedList<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T: HasId> CappedList<T> {
    /// Empty list with the given cap
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    /// Wrap an already-ordered list, trimming it to the cap
    pub fn from_items(mut items: Vec<T>, cap: usize) -> Self {
        items.truncate(cap);
        Self { items, cap }
    }

    /// Prepend a record, then truncate to the cap
    pub fn add(&mut self, record: T) {
        self.items.insert(0, record);
        self.items.truncate(self.cap);
    }

    /// Remove exactly the record with a matching id; no-op if not found
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All records in stored order (newest first)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(id: &str, timestamp: i64) -> ScanRecord {
        ScanRecord {
            id: id.to_string(),
            timestamp,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_keeps_newest_first() {
        let mut list = CappedList::new(MAX_SCAN_HISTORY);
        list.add(scan("a", 1));
        list.add(scan("b", 2));
        list.add(scan("c", 3));

        let ids: Vec<&str> = list.items().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_add_beyond_cap_evicts_oldest() {
        let mut list = CappedList::new(12);
        for i in 1..=13 {
            list.add(scan(&format!("t{}", i), i));
        }

        assert_eq!(list.len(), 12);
        let ids: Vec<&str> = list.items().iter().map(|r| r.id()).collect();
        assert_eq!(ids.first(), Some(&"t13"));
        assert_eq!(ids.last(), Some(&"t2"));
        assert!(!ids.contains(&"t1"));
    }

    #[test]
    fn test_delete_removes_exactly_one_and_keeps_order() {
        let mut list = CappedList::new(12);
        list.add(scan("a", 1));
        list.add(scan("b", 2));
        list.add(scan("c", 3));

        list.delete("b");

        let ids: Vec<&str> = list.items().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut list = CappedList::new(12);
        list.add(scan("a", 1));

        list.delete("nope");

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].id(), "a");
    }

    #[test]
    fn test_clear_empties_the_list() {
        let mut list = CappedList::new(12);
        list.add(scan("a", 1));
        list.add(scan("b", 2));

        list.clear();

        assert!(list.is_empty());
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_from_items_trims_to_cap() {
        let items: Vec<ScanRecord> = (0..30).map(|i| scan(&format!("s{}", i), i)).collect();
        let list = CappedList::from_items(items, MAX_COMMUNITY_POSTS);
        assert_eq!(list.len(), 20);
    }
}
