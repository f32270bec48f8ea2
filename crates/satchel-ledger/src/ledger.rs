//! The slot ledger: both open inventories as ordered slot arrays.
//!
//! The ledger is pure data plus invariant checks. It holds exactly two
//! inventories -- the primary ("left", normally the player's own) and the
//! secondary ("right", whatever is being interacted with) -- and exposes
//! slot lookup by `(inventory id, slot index)`.
//!
//! Mutation flows through the transfer engine; authoritative slot updates
//! are applied here in delivery order and win over optimistic state.

use satchel_types::{Inventory, InventoryId, InventoryKind, Slot};
use tracing::debug;

use crate::LedgerError;
use crate::snapshot::LedgerSnapshot;

/// Which of the two held inventories a lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerSide {
    /// The primary (player) inventory.
    Left,
    /// The secondary inventory.
    Right,
}

/// The two open inventories.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLedger {
    left: Inventory,
    right: Inventory,
}

impl SlotLedger {
    /// Create a ledger from an initial inventory pair.
    pub const fn new(left: Inventory, right: Inventory) -> Self {
        Self { left, right }
    }

    /// Create an empty placeholder ledger, used before the `init` push.
    pub fn unopened() -> Self {
        Self {
            left: Inventory::new(InventoryId::new(""), InventoryKind::Player, 0),
            right: Inventory::new(InventoryId::new(""), InventoryKind::Container, 0),
        }
    }

    /// Replace both inventories wholesale (the `init` push).
    pub fn setup(&mut self, left: Inventory, right: Inventory) {
        debug!(left = %left.id, right = %right.id, "Inventory pair replaced");
        self.left = left;
        self.right = right;
    }

    /// The primary inventory.
    pub const fn left(&self) -> &Inventory {
        &self.left
    }

    /// The secondary inventory.
    pub const fn right(&self) -> &Inventory {
        &self.right
    }

    /// Which side the given inventory id resolves to, if either.
    pub fn side_of(&self, id: &InventoryId) -> Option<LedgerSide> {
        if self.left.id == *id {
            Some(LedgerSide::Left)
        } else if self.right.id == *id {
            Some(LedgerSide::Right)
        } else {
            None
        }
    }

    /// Look up an inventory by id.
    pub fn inventory(&self, id: &InventoryId) -> Result<&Inventory, LedgerError> {
        match self.side_of(id) {
            Some(LedgerSide::Left) => Ok(&self.left),
            Some(LedgerSide::Right) => Ok(&self.right),
            None => Err(LedgerError::UnknownInventory(id.clone())),
        }
    }

    /// Look up an inventory mutably by id.
    pub fn inventory_mut(&mut self, id: &InventoryId) -> Result<&mut Inventory, LedgerError> {
        match self.side_of(id) {
            Some(LedgerSide::Left) => Ok(&mut self.left),
            Some(LedgerSide::Right) => Ok(&mut self.right),
            None => Err(LedgerError::UnknownInventory(id.clone())),
        }
    }

    /// Look up a slot by `(inventory id, slot index)`.
    ///
    /// Returns `Ok(None)` for an in-range index with no sparse entry (an
    /// empty position that has never held an item).
    pub fn slot(&self, id: &InventoryId, index: u32) -> Result<Option<&Slot>, LedgerError> {
        let inventory = self.inventory(id)?;
        if index == 0 || index > inventory.slots {
            return Err(LedgerError::SlotOutOfRange {
                inventory: id.clone(),
                slot: index,
                capacity: inventory.slots,
            });
        }
        Ok(inventory.slot(index))
    }

    /// Apply an authoritative slot update, replacing the slot's contents.
    ///
    /// Updates arrive in delivery order and take precedence over any
    /// locally-optimistic state for the same slot.
    pub fn apply_slot_update(&mut self, id: &InventoryId, slot: Slot) -> Result<(), LedgerError> {
        let index = slot.slot;
        let inventory = self.inventory_mut(id)?;
        if index == 0 || index > inventory.slots {
            return Err(LedgerError::SlotOutOfRange {
                inventory: id.clone(),
                slot: index,
                capacity: inventory.slots,
            });
        }
        inventory.ensure_slot(index).put_contents(slot);
        debug!(inventory = %id, slot = index, "Authoritative slot update applied");
        Ok(())
    }

    /// Capture a deep copy of both inventories.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&self.left, &self.right)
    }

    /// Restore both inventories verbatim from a snapshot.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        let (left, right) = snapshot.into_inventories();
        debug!(left = %left.id, right = %right.id, "Ledger restored from snapshot");
        self.left = left;
        self.right = right;
    }
}
