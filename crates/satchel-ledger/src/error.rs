//! Error types for the slot ledger.

use satchel_types::InventoryId;

/// Errors that can occur while addressing or verifying the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No inventory with the given id is held by the ledger.
    #[error("unknown inventory: {0}")]
    UnknownInventory(InventoryId),

    /// The addressed slot index is outside the inventory's capacity.
    #[error("slot {slot} is out of range for inventory {inventory} (capacity {capacity})")]
    SlotOutOfRange {
        /// The inventory addressed.
        inventory: InventoryId,
        /// The offending slot index.
        slot: u32,
        /// The inventory's capacity.
        capacity: u32,
    },

    /// Two non-empty slots share the same index.
    #[error("duplicate slot index {slot} in inventory {inventory}")]
    DuplicateSlot {
        /// The inventory holding the duplicates.
        inventory: InventoryId,
        /// The duplicated index.
        slot: u32,
    },
}
