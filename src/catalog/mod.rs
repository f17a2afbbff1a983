//! Item catalog for tilestrip
//!
//! The catalog is loaded once at startup from a comma-separated record file
//! plus one icon bitmap per item, and never changes afterwards. Any failure
//! while loading degrades to an empty catalog.
//!
//! # Architecture
//!
//! - `record.rs` - `CatalogRecord` and `CatalogGroup`
//! - `loader.rs` - record file parsing and icon loading

mod loader;
mod record;

pub use loader::load_catalog_or_empty;
pub use record::{CatalogGroup, CatalogRecord, ItemId};

use crate::error::{Error, Result};
use image::RgbaImage;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Immutable set of selectable items, their groups and their icons.
#[derive(Debug, Default)]
pub struct Catalog {
    records: HashMap<ItemId, CatalogRecord>,
    groups: Vec<CatalogGroup>,
    icons: HashMap<ItemId, RgbaImage>,
}

impl Catalog {
    /// A catalog with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a catalog from parsed records and their icons.
    ///
    /// Groups keep the order in which their names first appear in `records`;
    /// members of a group are ordered by ascending sort key, ties keeping
    /// record order. Duplicate ids and records without an icon are errors.
    pub fn from_parts(
        records: Vec<CatalogRecord>,
        mut icons: HashMap<ItemId, RgbaImage>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut groups: Vec<(String, Vec<&CatalogRecord>)> = Vec::new();

        for record in &records {
            if !seen.insert(record.id) {
                return Err(catalog_error(format!("duplicate id {}", record.id)));
            }
            if !icons.contains_key(&record.id) {
                return Err(catalog_error(format!("no icon for id {}", record.id)));
            }

            match groups.iter_mut().find(|(name, _)| *name == record.group_name) {
                Some((_, members)) => members.push(record),
                None => groups.push((record.group_name.clone(), vec![record])),
            }
        }

        let groups = groups
            .into_iter()
            .map(|(name, mut members)| {
                members.sort_by_key(|r| r.sort_key);
                CatalogGroup {
                    name,
                    members: members.iter().map(|r| r.id).collect(),
                }
            })
            .collect();

        let records: HashMap<ItemId, CatalogRecord> =
            records.into_iter().map(|r| (r.id, r)).collect();
        icons.retain(|id, _| records.contains_key(id));

        Ok(Self {
            records,
            groups,
            icons,
        })
    }

    pub fn record(&self, id: ItemId) -> Option<&CatalogRecord> {
        self.records.get(&id)
    }

    pub fn icon(&self, id: ItemId) -> Option<&RgbaImage> {
        self.icons.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.records.contains_key(&id)
    }

    /// Groups in display order.
    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn catalog_error(message: String) -> Error {
    Error::CatalogLoad {
        path: PathBuf::new(),
        message,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn icon() -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))
    }

    fn icons_for(ids: &[ItemId]) -> HashMap<ItemId, RgbaImage> {
        ids.iter().map(|&id| (id, icon())).collect()
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.groups().is_empty());
        assert!(catalog.record(1).is_none());
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let records = vec![
            CatalogRecord::new(1, "a", 300, "front", "A"),
            CatalogRecord::new(2, "b", 100, "back", "B"),
            CatalogRecord::new(3, "c", 200, "front", "C"),
        ];
        let catalog = Catalog::from_parts(records, icons_for(&[1, 2, 3])).unwrap();

        let names: Vec<&str> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["front", "back"]);
        assert_eq!(catalog.groups()[0].members, vec![3, 1]);
        assert_eq!(catalog.groups()[1].members, vec![2]);
    }

    #[test]
    fn test_group_members_ties_keep_record_order() {
        let records = vec![
            CatalogRecord::new(9, "x", 50, "g", "X"),
            CatalogRecord::new(4, "y", 50, "g", "Y"),
        ];
        let catalog = Catalog::from_parts(records, icons_for(&[4, 9])).unwrap();
        assert_eq!(catalog.groups()[0].members, vec![9, 4]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let records = vec![
            CatalogRecord::new(1, "a", 1, "g", "A"),
            CatalogRecord::new(1, "b", 2, "g", "B"),
        ];
        let result = Catalog::from_parts(records, icons_for(&[1]));
        assert!(matches!(result, Err(Error::CatalogLoad { .. })));
    }

    #[test]
    fn test_missing_icon_rejected() {
        let records = vec![CatalogRecord::new(7, "a", 1, "g", "A")];
        let result = Catalog::from_parts(records, HashMap::new());
        assert!(matches!(result, Err(Error::CatalogLoad { .. })));
    }

    #[test]
    fn test_lookup_by_id() {
        let records = vec![CatalogRecord::new(5, "five", 10, "g", "V")];
        let catalog = Catalog::from_parts(records, icons_for(&[5, 6])).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(5));
        assert_eq!(catalog.record(5).unwrap().alias_text, "V");
        assert!(catalog.icon(5).is_some());
        assert!(catalog.icon(6).is_none());
    }
}
