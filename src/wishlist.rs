//! Wishlist

use tracing::debug;

use crate::items::ItemId;

/// Saved-for-later product ids, unique and kept in the order they were saved.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    ids: Vec<ItemId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save an id. Returns `false` when it was already saved.
    pub fn add(&mut self, id: impl Into<ItemId>) -> bool {
        let id = id.into();

        if self.contains(id.as_str()) {
            debug!(%id, "already in wishlist");

            return false;
        }

        debug!(%id, "added to wishlist");

        self.ids.push(id);

        true
    }

    /// Whether an id has been saved.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved.as_str() == id)
    }

    /// Iterate over saved ids in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Number of saved ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_twice_keeps_one_entry() {
        let mut wishlist = Wishlist::new();

        assert!(wishlist.add("x"));
        assert!(!wishlist.add("x"));

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains("x"));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut wishlist = Wishlist::new();

        wishlist.add("b");
        wishlist.add("a");
        wishlist.add("b");

        let ids: Vec<&str> = wishlist.iter().map(ItemId::as_str).collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn new_wishlist_is_empty() {
        let wishlist = Wishlist::new();

        assert!(wishlist.is_empty());
        assert!(!wishlist.contains("x"));
    }
}
