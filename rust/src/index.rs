//! Activity name interning.
//!
//! Maps activity names to dense integer handles so the graph can store its
//! nodes in a `Vec` and refer to neighbours by index.

use rustc_hash::FxHashMap;

/// Handle of an activity inside an [`ActivityIndex`] (and the graph arena).
pub type ActivityId = u32;

/// Bidirectional name <-> handle mapping. Handles are assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    ids: FxHashMap<String, ActivityId>,
    names: Vec<String>,
}

impl ActivityIndex {
    /// Look up `name`, assigning the next handle if it has not been seen.
    ///
    /// Returns the handle and whether it was newly created.
    pub fn get_or_insert(&mut self, name: &str) -> (ActivityId, bool) {
        if let Some(&id) = self.ids.get(name) {
            return (id, false);
        }
        let id = self.names.len() as ActivityId;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        (id, true)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<ActivityId> {
        self.ids.get(name).copied()
    }

    /// Name for a handle. Handles always come from this index, so an unknown
    /// handle resolves to an empty string rather than panicking.
    #[inline]
    pub fn name(&self, id: ActivityId) -> &str {
        self.names.get(id as usize).map(String::as_str).unwrap_or("")
    }

    /// Names in handle (insertion) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_assigned_in_first_seen_order() {
        let mut index = ActivityIndex::default();

        let (start, created_start) = index.get_or_insert("Start");
        let (a, created_a) = index.get_or_insert("A");
        let (again, created_again) = index.get_or_insert("Start");

        assert_eq!((start, a), (0, 1));
        assert!(created_start && created_a);
        assert_eq!(again, start);
        assert!(!created_again);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_lookup_and_names() {
        let mut index = ActivityIndex::default();
        assert!(index.is_empty());
        index.get_or_insert("A");
        index.get_or_insert("B");

        assert_eq!(index.get("B"), Some(1));
        assert_eq!(index.get("missing"), None);
        assert_eq!(index.name(0), "A");
        assert_eq!(index.name(42), "");
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
