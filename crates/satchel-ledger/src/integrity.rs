//! Invariant checks over inventories.
//!
//! Two invariants hold for any inventory after any sequence of transfer
//! operations: no two non-empty slots share an index, and the total unit
//! count per item type is conserved unless an operation was rejected.
//! The first is verified here; the second is a counting helper used by
//! conservation assertions in tests and debug paths.

use std::collections::BTreeSet;

use satchel_types::Inventory;

use crate::LedgerError;

/// Verify that no two non-empty slots in the inventory share an index.
pub fn verify_unique_slots(inventory: &Inventory) -> Result<(), LedgerError> {
    let mut seen = BTreeSet::new();
    for slot in inventory.items.iter().filter(|s| s.has_item()) {
        if !seen.insert(slot.slot) {
            return Err(LedgerError::DuplicateSlot {
                inventory: inventory.id.clone(),
                slot: slot.slot,
            });
        }
    }
    Ok(())
}

/// Total unit count of the named item across the inventory.
///
/// Returns `None` if the sum overflows `u32`.
pub fn total_count(inventory: &Inventory, name: &str) -> Option<u32> {
    let mut total: u32 = 0;
    for slot in &inventory.items {
        if slot.name.as_deref() == Some(name) {
            total = total.checked_add(slot.item_count())?;
        }
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use satchel_types::{InventoryId, InventoryKind, Slot};

    use super::*;

    fn inventory_with(items: Vec<Slot>) -> Inventory {
        let mut inv = Inventory::new(InventoryId::from("test"), InventoryKind::Player, 10);
        inv.items = items;
        inv
    }

    #[test]
    fn unique_slots_pass() {
        let inv = inventory_with(vec![
            Slot::filled(1, "water".to_owned(), 2, 200),
            Slot::filled(2, "water".to_owned(), 3, 300),
        ]);
        assert!(verify_unique_slots(&inv).is_ok());
    }

    #[test]
    fn duplicate_index_fails() {
        let inv = inventory_with(vec![
            Slot::filled(1, "water".to_owned(), 2, 200),
            Slot::filled(1, "bread".to_owned(), 1, 200),
        ]);
        assert!(matches!(
            verify_unique_slots(&inv),
            Err(LedgerError::DuplicateSlot { slot: 1, .. })
        ));
    }

    #[test]
    fn duplicate_empty_entries_are_tolerated() {
        // Empty placeholders never collide -- only non-empty slots count.
        let inv = inventory_with(vec![Slot::empty(1), Slot::empty(1)]);
        assert!(verify_unique_slots(&inv).is_ok());
    }

    #[test]
    fn total_count_sums_matching_stacks() {
        let inv = inventory_with(vec![
            Slot::filled(1, "water".to_owned(), 2, 200),
            Slot::filled(2, "water".to_owned(), 3, 300),
            Slot::filled(3, "bread".to_owned(), 1, 200),
        ]);
        assert_eq!(total_count(&inv, "water"), Some(5));
        assert_eq!(total_count(&inv, "bread"), Some(1));
        assert_eq!(total_count(&inv, "gold"), Some(0));
    }
}
