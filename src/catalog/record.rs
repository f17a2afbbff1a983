//! Catalog record types.

/// Identifier of a catalog item. Unique across the catalog.
pub type ItemId = i32;

/// One selectable item, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: ItemId,
    /// Name shown under the icon; may span two lines
    pub display_name: String,
    /// Rank used to order a selection (highest drawn leftmost)
    pub sort_key: i32,
    pub group_name: String,
    /// Text written into the clipboard cells
    pub alias_text: String,
}

impl CatalogRecord {
    pub fn new(
        id: ItemId,
        display_name: impl Into<String>,
        sort_key: i32,
        group_name: impl Into<String>,
        alias_text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            sort_key,
            group_name: group_name.into(),
            alias_text: alias_text.into(),
        }
    }
}

/// A named group of items, members ordered by ascending sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    pub name: String,
    pub members: Vec<ItemId>,
}
