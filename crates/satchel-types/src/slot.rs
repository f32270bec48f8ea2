//! A single addressable position within an inventory.
//!
//! Slots are sparse: a slot with no `name` is *empty* but keeps its index so
//! the grid stays positionally stable for the UI and for index-based
//! operations. Weight is denormalized per slot (count x unit weight) to
//! avoid repeated catalog lookups.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::metadata::Metadata;

/// One inventory position, empty or holding a single item stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Slot {
    /// 1-based index, unique within an inventory, stable for its lifetime.
    pub slot: u32,

    /// Item type id. Absent means the slot is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stack size. Absent is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Total stack weight in grams (count x unit weight).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    /// Open string-keyed metadata bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Slot {
    /// Create an empty slot holding only its index.
    pub const fn empty(slot: u32) -> Self {
        Self {
            slot,
            name: None,
            count: None,
            weight: None,
            metadata: None,
        }
    }

    /// Create a filled slot.
    pub const fn filled(slot: u32, name: String, count: u32, weight: u32) -> Self {
        Self {
            slot,
            name: Some(name),
            count: Some(count),
            weight: Some(weight),
            metadata: None,
        }
    }

    /// Attach a metadata bag, builder-style.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether the slot holds an item stack.
    pub const fn has_item(&self) -> bool {
        self.name.is_some()
    }

    /// Whether the slot is empty.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Stack size, zero when empty or unset.
    pub fn item_count(&self) -> u32 {
        self.count.unwrap_or(0)
    }

    /// Stack weight in grams, zero when empty or unset.
    pub fn item_weight(&self) -> u32 {
        self.weight.unwrap_or(0)
    }

    /// Clear the slot down to its index, keeping positional stability.
    pub fn clear(&mut self) {
        self.name = None;
        self.count = None;
        self.weight = None;
        self.metadata = None;
    }

    /// Take the slot's contents, leaving it empty. The index stays put.
    pub fn take_contents(&mut self) -> Self {
        let contents = self.clone();
        self.clear();
        contents
    }

    /// Replace the slot's contents with another slot's, keeping this index.
    pub fn put_contents(&mut self, contents: Self) {
        self.name = contents.name;
        self.count = contents.count;
        self.weight = contents.weight;
        self.metadata = contents.metadata;
    }
}
