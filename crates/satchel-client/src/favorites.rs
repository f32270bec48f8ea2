//! The persisted favorites list.
//!
//! A flat JSON array of item names stored under a fixed file name in the
//! configured storage directory. The file is written by older client
//! versions too, so loading is lenient: a malformed file loads as empty and
//! non-string entries are discarded.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

/// File name of the persisted favorites list.
pub const FAVORITES_FILE: &str = "satchel-favorites.json";

/// The set of item names the player marked as favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    names: BTreeSet<String>,
}

impl Favorites {
    /// Create an empty favorites list.
    pub const fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// The storage path under the given directory.
    pub fn path_in(storage_dir: &Path) -> PathBuf {
        storage_dir.join(FAVORITES_FILE)
    }

    /// Load from the given directory. A missing or malformed file loads as
    /// an empty list.
    pub fn load(storage_dir: &Path) -> Self {
        match std::fs::read_to_string(Self::path_in(storage_dir)) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Self::new(),
        }
    }

    /// Parse from a JSON string, keeping only string entries.
    pub fn from_json(json: &str) -> Self {
        let parsed: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "Favorites file is malformed, starting empty");
                return Self::new();
            }
        };
        let Value::Array(entries) = parsed else {
            warn!("Favorites file is not an array, starting empty");
            return Self::new();
        };
        let names = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect();
        Self { names }
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.names).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Persist to the given directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn save(&self, storage_dir: &Path) -> std::io::Result<()> {
        std::fs::write(Self::path_in(storage_dir), self.to_json())?;
        debug!(count = self.names.len(), "Favorites persisted");
        Ok(())
    }

    /// Toggle an item's favorite status. Returns whether the item is a
    /// favorite afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_owned());
            true
        }
    }

    /// Whether the named item is a favorite.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate the favorite item names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_string_entries_are_discarded() {
        let favorites = Favorites::from_json(r#"["water", 7, null, "bread", {"a":1}]"#);
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("water"));
        assert!(favorites.contains("bread"));
    }

    #[test]
    fn malformed_json_loads_empty() {
        let favorites = Favorites::from_json("not json at all");
        assert!(favorites.is_empty());
    }

    #[test]
    fn non_array_json_loads_empty() {
        let favorites = Favorites::from_json(r#"{"water": true}"#);
        assert!(favorites.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle("water"));
        assert!(favorites.contains("water"));
        assert!(!favorites.toggle("water"));
        assert!(!favorites.contains("water"));
    }

    #[test]
    fn json_roundtrip_is_sorted_and_stable() {
        let mut favorites = Favorites::new();
        favorites.toggle("water");
        favorites.toggle("bread");
        assert_eq!(favorites.to_json(), r#"["bread","water"]"#);
        assert_eq!(Favorites::from_json(&favorites.to_json()), favorites);
    }

    #[test]
    fn missing_file_loads_empty() {
        let favorites = Favorites::load(Path::new("/nonexistent/satchel-test"));
        assert!(favorites.is_empty());
    }
}
