//! Item definitions registered by the authority at runtime.
//!
//! Item types are content, not code: the authority pushes a `registerItem`
//! event per definition and the client keeps them in an [`ItemCatalog`].
//! The transfer engine consults the catalog for stackability and unit
//! weight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const fn default_stack() -> bool {
    true
}

/// A registered item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemSpec {
    /// Item type id, unique within the catalog.
    pub name: String,

    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Weight of a single unit, in grams.
    #[serde(default)]
    pub weight: u32,

    /// Whether stacks of this item may be merged. Defaults to true.
    #[serde(default = "default_stack")]
    pub stack: bool,

    /// Display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The set of item definitions known to the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    specs: BTreeMap<String, ItemSpec>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    /// Register (or replace) an item definition.
    pub fn register(&mut self, spec: ItemSpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    /// Look up a definition by item name.
    pub fn get(&self, name: &str) -> Option<&ItemSpec> {
        self.specs.get(name)
    }

    /// Whether the named item may be stacked. `None` when unregistered.
    pub fn is_stackable(&self, name: &str) -> Option<bool> {
        self.specs.get(name).map(|s| s.stack)
    }

    /// Unit weight in grams for the named item. `None` when unregistered.
    pub fn unit_weight(&self, name: &str) -> Option<u32> {
        self.specs.get(name).map(|s| s.weight)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
