//! Selection set keyed by restaurant id.

use eatsavvy_domain::RestaurantId;
use std::collections::BTreeSet;

/// Ids the user has checked
///
/// Ids survive record replacement: an id whose record is no longer loaded
/// stays in the set and simply matches nothing visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RestaurantId>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id
    pub fn select(&mut self, id: RestaurantId) {
        self.ids.insert(id);
    }

    /// Remove an id
    pub fn deselect(&mut self, id: &RestaurantId) {
        self.ids.remove(id);
    }

    /// Flip membership of an id, returning whether it is now selected
    pub fn toggle(&mut self, id: RestaurantId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Whether an id is selected
    pub fn contains(&self, id: &RestaurantId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids, including ones not currently loaded
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop every id
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the whole set
    pub fn replace_with(&mut self, ids: impl IntoIterator<Item = RestaurantId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Iterate selected ids in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &RestaurantId> {
        self.ids.iter()
    }

    /// Owned copy of the selected ids
    pub fn to_vec(&self) -> Vec<RestaurantId> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RestaurantId {
        RestaurantId::new(s).unwrap()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(id("a")));
        assert!(selection.contains(&id("a")));
        assert!(!selection.toggle(id("a")));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut selection = Selection::new();
        selection.select(id("a"));
        selection.select(id("a"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_deselect_missing_is_noop() {
        let mut selection = Selection::new();
        selection.select(id("a"));
        selection.deselect(&id("b"));
        assert_eq!(selection.to_vec(), vec![id("a")]);
    }

    #[test]
    fn test_replace_with() {
        let mut selection = Selection::new();
        selection.select(id("old"));
        selection.replace_with(vec![id("x"), id("y")]);
        assert!(!selection.contains(&id("old")));
        assert_eq!(selection.len(), 2);
    }
}
