//! Read-side catalog queries over the ingested reference tables.
//!
//! This is the surface a presentation layer (web, CLI, desktop) builds its
//! search box on: flat `{name, index, category}` entries plus a small
//! ranking function. Ranking prefers exact matches, then prefixes, then
//! substrings.

use std::fmt;

use sqlx::Row;

use crate::infrastructure::persistence::{Store, StoreError};

/// The searchable entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Classes,
    Spells,
    Races,
    Monsters,
    Equipment,
    Features,
    Subclasses,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Classes,
        Category::Spells,
        Category::Races,
        Category::Monsters,
        Category::Equipment,
        Category::Features,
        Category::Subclasses,
    ];

    fn table(self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Spells => "spells",
            Self::Races => "races",
            Self::Monsters => "monsters",
            Self::Equipment => "equipment",
            Self::Features => "features",
            Self::Subclasses => "subclasses",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.table()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One searchable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub index: String,
    pub category: Category,
}

/// List every entry across all searchable categories.
pub async fn list_entries(store: &Store) -> Result<Vec<CatalogEntry>, StoreError> {
    let mut entries = Vec::new();
    for category in Category::ALL {
        let rows = sqlx::query(&format!(
            "SELECT idx, name FROM {} ORDER BY idx",
            category.table()
        ))
        .fetch_all(store.pool())
        .await
        .map_err(|e| StoreError::database("list_entries", e))?;

        for row in rows {
            entries.push(CatalogEntry {
                index: row.get("idx"),
                name: row.get("name"),
                category,
            });
        }
    }
    Ok(entries)
}

/// Look one entry up by its index within a category.
pub async fn get_by_index(
    store: &Store,
    category: Category,
    index: &str,
) -> Result<Option<CatalogEntry>, StoreError> {
    let row = sqlx::query(&format!(
        "SELECT idx, name FROM {} WHERE idx = ?",
        category.table()
    ))
    .bind(index)
    .fetch_optional(store.pool())
    .await
    .map_err(|e| StoreError::database("get_by_index", e))?;

    Ok(row.map(|row| CatalogEntry {
        index: row.get("idx"),
        name: row.get("name"),
        category,
    }))
}

/// Relevance of one entry for a lowercased query.
fn rank(entry: &CatalogEntry, query: &str) -> u32 {
    let name = entry.name.to_lowercase();
    let index = entry.index.to_lowercase();

    if name == query || index == query {
        100
    } else if name.starts_with(query) || index.starts_with(query) {
        50
    } else if name.contains(query) || index.contains(query) {
        20
    } else {
        0
    }
}

/// Search the entries. Exact name/index matches short-circuit; otherwise all
/// substring matches are returned, best-ranked first.
pub fn search(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let query = query.to_lowercase();

    let exact: Vec<CatalogEntry> = entries
        .iter()
        .filter(|e| e.name.to_lowercase() == query || e.index.to_lowercase() == query)
        .cloned()
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let mut matches: Vec<CatalogEntry> = entries
        .iter()
        .filter(|e| rank(e, &query) > 0)
        .cloned()
        .collect();
    matches.sort_by_key(|e| std::cmp::Reverse(rank(e, &query)));
    matches
}
