//! Inventory containers: an ordered, sparse sequence of slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::InventoryId;
use crate::slot::Slot;

/// The kind of container an inventory represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum InventoryKind {
    /// The local player's own inventory.
    Player,
    /// A world container (trunk, storage box, ...).
    Container,
    /// A shop listing.
    Shop,
    /// A crafting bench.
    Crafting,
    /// The trade projection surface.
    Trade,
    /// A persistent stash.
    Stash,
}

/// A slot-based inventory.
///
/// `items` is sparse and indexed by `Slot::slot`; indices absent from the
/// vector are empty positions. `max_weight` is enforced by the authority --
/// client-side checks are advisory only, and optimistic operations may
/// transiently exceed it pending rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Inventory {
    /// Unique inventory id within the session.
    pub id: InventoryId,

    /// Container kind.
    #[serde(rename = "type")]
    pub kind: InventoryKind,

    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Slot capacity.
    pub slots: u32,

    /// Maximum total weight in grams, if the container is weight-limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u32>,

    /// Sparse slot sequence.
    pub items: Vec<Slot>,

    /// Access-group constraint (group name -> required grade).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, u32>>,
}

impl Inventory {
    /// Create an empty inventory with the given capacity.
    pub const fn new(id: InventoryId, kind: InventoryKind, slots: u32) -> Self {
        Self {
            id,
            kind,
            label: None,
            slots,
            max_weight: None,
            items: Vec::new(),
            groups: None,
        }
    }

    /// Set the weight limit, builder-style.
    #[must_use]
    pub const fn with_max_weight(mut self, max_weight: u32) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    /// Look up a slot by its 1-based index.
    pub fn slot(&self, index: u32) -> Option<&Slot> {
        self.items.iter().find(|s| s.slot == index)
    }

    /// Look up a slot mutably by its 1-based index.
    pub fn slot_mut(&mut self, index: u32) -> Option<&mut Slot> {
        self.items.iter_mut().find(|s| s.slot == index)
    }

    /// Get the slot entry at `index`, materializing an empty one if the
    /// sparse sequence has no entry there yet.
    pub fn ensure_slot(&mut self, index: u32) -> &mut Slot {
        let pos = match self.items.iter().position(|s| s.slot == index) {
            Some(pos) => pos,
            None => {
                self.items.push(Slot::empty(index));
                self.items.len().saturating_sub(1)
            }
        };
        // `pos` is valid: it came from `position` or the push above.
        #[allow(clippy::indexing_slicing)]
        &mut self.items[pos]
    }

    /// Number of occupied slots.
    pub fn used_slots(&self) -> u32 {
        let used = self.items.iter().filter(|s| s.has_item()).count();
        u32::try_from(used).unwrap_or(u32::MAX)
    }

    /// Number of free slots remaining.
    pub fn free_slots(&self) -> u32 {
        self.slots.saturating_sub(self.used_slots())
    }

    /// Total weight of all stacks, in grams.
    ///
    /// Returns `None` if the sum overflows `u32`.
    pub fn total_weight(&self) -> Option<u32> {
        let mut total: u32 = 0;
        for slot in &self.items {
            total = total.checked_add(slot.item_weight())?;
        }
        Some(total)
    }

    /// First empty slot index within capacity, if any.
    pub fn find_empty_slot(&self) -> Option<u32> {
        (1..=self.slots).find(|&index| self.slot(index).is_none_or(Slot::is_empty))
    }

    /// First occupied slot holding the given item type, if any.
    pub fn find_stack_target(&self, name: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .map(|s| s.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory_with(slots: u32, items: Vec<Slot>) -> Inventory {
        let mut inv = Inventory::new(InventoryId::from("test"), InventoryKind::Player, slots);
        inv.items = items;
        inv
    }

    #[test]
    fn slot_lookup_is_index_based() {
        let inv = inventory_with(
            5,
            vec![
                Slot::filled(3, "iron".to_owned(), 5, 3000),
                Slot::filled(1, "water".to_owned(), 2, 200),
            ],
        );
        assert_eq!(inv.slot(1).and_then(|s| s.name.as_deref()), Some("water"));
        assert_eq!(inv.slot(3).and_then(|s| s.name.as_deref()), Some("iron"));
        assert!(inv.slot(2).is_none());
    }

    #[test]
    fn used_and_free_slots_ignore_empty_entries() {
        let inv = inventory_with(
            4,
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::empty(2),
                Slot::filled(4, "bread".to_owned(), 1, 200),
            ],
        );
        assert_eq!(inv.used_slots(), 2);
        assert_eq!(inv.free_slots(), 2);
    }

    #[test]
    fn total_weight_sums_stacks() {
        let inv = inventory_with(
            4,
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::filled(2, "iron".to_owned(), 5, 3000),
            ],
        );
        assert_eq!(inv.total_weight(), Some(3200));
    }

    #[test]
    fn find_empty_slot_prefers_lowest_index() {
        let inv = inventory_with(
            3,
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::empty(2),
                Slot::filled(3, "bread".to_owned(), 1, 200),
            ],
        );
        assert_eq!(inv.find_empty_slot(), Some(2));
    }

    #[test]
    fn find_empty_slot_none_when_full() {
        let inv = inventory_with(
            2,
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::filled(2, "bread".to_owned(), 1, 200),
            ],
        );
        assert_eq!(inv.find_empty_slot(), None);
    }

    #[test]
    fn ensure_slot_materializes_missing_entry() {
        let mut inv = inventory_with(5, Vec::new());
        assert!(inv.slot(4).is_none());
        inv.ensure_slot(4).name = Some("copper".to_owned());
        assert_eq!(inv.slot(4).and_then(|s| s.name.as_deref()), Some("copper"));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let inv = inventory_with(1, Vec::new());
        let json = serde_json::to_string(&inv).unwrap_or_default();
        assert!(json.contains(r#""type":"player""#));
    }

    #[test]
    fn find_stack_target_matches_name() {
        let inv = inventory_with(
            3,
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::filled(2, "bread".to_owned(), 1, 200),
            ],
        );
        assert_eq!(inv.find_stack_target("bread"), Some(2));
        assert_eq!(inv.find_stack_target("gold"), None);
    }
}
