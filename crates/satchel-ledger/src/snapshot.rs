//! History snapshots for optimistic rollback.
//!
//! A snapshot is a deep copy of both inventories captured immediately
//! before an authoritative command is dispatched. The system serializes
//! authoritative commands, so exactly one snapshot is outstanding at a
//! time; restoring it must reproduce the pre-command state verbatim.

use satchel_types::Inventory;
use serde::{Deserialize, Serialize};

/// A deep copy of the inventory pair at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// The primary inventory as captured.
    left_inventory: Inventory,
    /// The secondary inventory as captured.
    right_inventory: Inventory,
}

impl LedgerSnapshot {
    /// Capture a snapshot from the current inventory pair.
    pub fn capture(left: &Inventory, right: &Inventory) -> Self {
        Self {
            left_inventory: left.clone(),
            right_inventory: right.clone(),
        }
    }

    /// Read access to the captured primary inventory.
    pub const fn left(&self) -> &Inventory {
        &self.left_inventory
    }

    /// Read access to the captured secondary inventory.
    pub const fn right(&self) -> &Inventory {
        &self.right_inventory
    }

    /// Consume the snapshot, yielding the captured pair.
    pub fn into_inventories(self) -> (Inventory, Inventory) {
        (self.left_inventory, self.right_inventory)
    }
}

#[cfg(test)]
mod tests {
    use satchel_types::{InventoryId, InventoryKind, Slot};

    use super::*;

    #[test]
    fn capture_is_a_deep_copy() {
        let mut left = Inventory::new(InventoryId::from("player"), InventoryKind::Player, 3);
        left.items = vec![Slot::filled(1, "water".to_owned(), 5, 500)];
        let right = Inventory::new(InventoryId::from("shop"), InventoryKind::Shop, 3);

        let snapshot = LedgerSnapshot::capture(&left, &right);

        // Mutating the live inventory leaves the snapshot untouched.
        if let Some(slot) = left.slot_mut(1) {
            slot.count = Some(1);
        }
        assert_eq!(
            snapshot.left().slot(1).map(Slot::item_count),
            Some(5)
        );
    }

    #[test]
    fn into_inventories_returns_captured_pair() {
        let left = Inventory::new(InventoryId::from("player"), InventoryKind::Player, 3);
        let right = Inventory::new(InventoryId::from("shop"), InventoryKind::Shop, 3);
        let snapshot = LedgerSnapshot::capture(&left, &right);
        let (restored_left, restored_right) = snapshot.into_inventories();
        assert_eq!(restored_left, left);
        assert_eq!(restored_right, right);
    }
}
