//! Bounded, rank-ordered selection of catalog items.

use crate::catalog::{Catalog, ItemId};
use std::cmp::Reverse;

/// Maximum number of items in a selection.
pub const MAX_SELECTION: usize = 5;

/// Ordered set of selected ids.
///
/// Members are always ordered by descending sort key, then ascending id.
/// The set never holds duplicates nor more than [`MAX_SELECTION`] ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `id`.
    ///
    /// Adding fails (returns `false`, nothing changes) when the set is full or
    /// `id` is not in the catalog. Removing always succeeds, even for an id
    /// that is not selected.
    pub fn try_toggle(&mut self, catalog: &Catalog, id: ItemId, desired: bool) -> bool {
        if desired {
            if self.is_full() || !catalog.contains(id) {
                return false;
            }
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        } else {
            self.ids.retain(|&selected| selected != id);
        }
        self.restore_order(catalog);
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SELECTION
    }

    fn restore_order(&mut self, catalog: &Catalog) {
        self.ids.sort_by_key(|&id| {
            let sort_key = catalog.record(id).map_or(i32::MIN, |r| r.sort_key);
            (Reverse(sort_key), id)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;
    use image::{Rgba, RgbaImage};
    use std::collections::HashMap;

    /// Items 1..=8 with sort keys 10, 20, .. 80; item 9 ties with item 4.
    fn catalog() -> Catalog {
        let mut records: Vec<CatalogRecord> = (1..=8)
            .map(|id| CatalogRecord::new(id, format!("n{id}"), id * 10, "g", format!("a{id}")))
            .collect();
        records.push(CatalogRecord::new(9, "n9", 40, "g", "a9"));
        let icons: HashMap<ItemId, RgbaImage> = (1..=9)
            .map(|id| (id, RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))))
            .collect();
        Catalog::from_parts(records, icons).unwrap()
    }

    #[test]
    fn test_orders_by_descending_sort_key() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        for id in [2, 7, 1, 5] {
            assert!(selection.try_toggle(&catalog, id, true));
        }
        assert_eq!(selection.ids(), &[7, 5, 2, 1]);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        selection.try_toggle(&catalog, 9, true);
        selection.try_toggle(&catalog, 4, true);
        assert_eq!(selection.ids(), &[4, 9]);
    }

    #[test]
    fn test_capacity_guard() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        for id in 1..=5 {
            assert!(selection.try_toggle(&catalog, id, true));
        }
        assert!(selection.is_full());
        let before = selection.clone();

        assert!(!selection.try_toggle(&catalog, 6, true));
        assert_eq!(selection, before);
        // re-adding a member while full is still refused
        assert!(!selection.try_toggle(&catalog, 3, true));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        for step in 0..200 {
            let id = (step * 7 % 9) + 1;
            let desired = step % 3 != 0;
            selection.try_toggle(&catalog, id, desired);
            assert!(selection.len() <= MAX_SELECTION);
        }
    }

    #[test]
    fn test_remove_absent_succeeds() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        assert!(selection.try_toggle(&catalog, 3, false));
        assert!(selection.ids().is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        assert!(selection.try_toggle(&catalog, 3, true));
        assert!(selection.try_toggle(&catalog, 3, true));
        assert_eq!(selection.ids(), &[3]);
    }

    #[test]
    fn test_unknown_id_rejected() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        assert!(!selection.try_toggle(&catalog, 42, true));
        assert!(selection.ids().is_empty());
    }

    #[test]
    fn test_reselect_yields_same_order() {
        let catalog = catalog();
        let mut contiguous = SelectionSet::new();
        for id in [1, 3, 6] {
            contiguous.try_toggle(&catalog, id, true);
        }

        let mut toggled = SelectionSet::new();
        for id in [6, 3] {
            toggled.try_toggle(&catalog, id, true);
        }
        toggled.try_toggle(&catalog, 3, false);
        toggled.try_toggle(&catalog, 1, true);
        toggled.try_toggle(&catalog, 3, true);

        assert_eq!(contiguous.ids(), toggled.ids());
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        selection.try_toggle(&catalog, 1, true);
        selection.clear();
        assert!(selection.ids().is_empty());
        assert!(!selection.contains(1));
    }
}
