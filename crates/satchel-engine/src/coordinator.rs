//! The optimistic command coordinator.
//!
//! Wraps every server-authoritative command in a three-phase lifecycle:
//! `Idle -> Pending -> {Fulfilled | Rejected}`. Entering `Pending` captures
//! a snapshot of both inventories and raises the busy flag; the local
//! mutation is then applied immediately so the UI reflects the change with
//! zero latency. Fulfillment discards the snapshot; rejection restores it
//! verbatim -- this is the single source of rollback logic.
//!
//! At most one command may be pending at a time. A second intent arriving
//! while pending is dropped (never interleaved), so an un-confirmed
//! optimistic state can never compound with another mutation.

use satchel_ledger::{LedgerSnapshot, SlotLedger};
use tracing::{debug, warn};

use crate::CoordinatorError;

/// Lifecycle phase of the in-flight command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandPhase {
    /// No command in flight.
    #[default]
    Idle,
    /// A command has been dispatched and awaits the authority's verdict.
    Pending,
}

/// Serializes authoritative commands and owns the rollback snapshot.
#[derive(Debug, Default)]
pub struct Coordinator {
    history: Option<LedgerSnapshot>,
}

impl Coordinator {
    /// Create an idle coordinator.
    pub const fn new() -> Self {
        Self { history: None }
    }

    /// The current lifecycle phase.
    pub const fn phase(&self) -> CommandPhase {
        match self.history {
            Some(_) => CommandPhase::Pending,
            None => CommandPhase::Idle,
        }
    }

    /// Whether a command is pending. While true, further transfer intents
    /// are suspended at the interaction layer.
    pub const fn is_busy(&self) -> bool {
        self.history.is_some()
    }

    /// Enter `Pending`: capture the pre-command snapshot.
    ///
    /// The caller applies the local mutation immediately after, then
    /// dispatches the command. Fails with [`CoordinatorError::Busy`] if a
    /// command is already pending; the new intent must be dropped.
    pub fn begin(&mut self, ledger: &SlotLedger) -> Result<(), CoordinatorError> {
        if self.history.is_some() {
            return Err(CoordinatorError::Busy);
        }
        self.history = Some(ledger.snapshot());
        debug!("Command pending, snapshot captured");
        Ok(())
    }

    /// The authority accepted the command: discard the snapshot.
    pub fn fulfill(&mut self) -> Result<(), CoordinatorError> {
        match self.history.take() {
            Some(_) => {
                debug!("Command fulfilled, snapshot discarded");
                Ok(())
            }
            None => Err(CoordinatorError::NotPending),
        }
    }

    /// The authority rejected the command: restore the ledger verbatim
    /// from the pre-command snapshot.
    pub fn reject(&mut self, ledger: &mut SlotLedger) -> Result<(), CoordinatorError> {
        match self.history.take() {
            Some(snapshot) => {
                ledger.restore(snapshot);
                warn!("Command rejected, ledger rolled back");
                Ok(())
            }
            None => Err(CoordinatorError::NotPending),
        }
    }
}

#[cfg(test)]
mod tests {
    use satchel_types::{
        Inventory, InventoryId, InventoryKind, ItemCatalog, ItemSpec, Slot, SlotRef,
        TransferRequest,
    };

    use crate::transfer::move_slots;

    use super::*;

    fn ledger() -> SlotLedger {
        let mut left = Inventory::new(InventoryId::from("player"), InventoryKind::Player, 5);
        left.items = vec![Slot::filled(1, "water".to_owned(), 5, 500)];
        let right = Inventory::new(InventoryId::from("shop"), InventoryKind::Shop, 5);
        SlotLedger::new(left, right)
    }

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.register(ItemSpec {
            name: "water".to_owned(),
            label: None,
            weight: 100,
            stack: true,
            description: None,
        });
        catalog
    }

    fn move_request() -> TransferRequest {
        TransferRequest {
            source: SlotRef {
                inventory: InventoryId::from("player"),
                slot: 1,
            },
            target: SlotRef {
                inventory: InventoryId::from("player"),
                slot: 2,
            },
            count: 2,
        }
    }

    #[test]
    fn begin_raises_busy_flag() {
        let mut coordinator = Coordinator::new();
        let ledger = ledger();
        assert!(!coordinator.is_busy());
        assert!(coordinator.begin(&ledger).is_ok());
        assert!(coordinator.is_busy());
        assert_eq!(coordinator.phase(), CommandPhase::Pending);
    }

    #[test]
    fn second_begin_while_pending_is_dropped() {
        let mut coordinator = Coordinator::new();
        let ledger = ledger();
        assert!(coordinator.begin(&ledger).is_ok());
        assert!(matches!(
            coordinator.begin(&ledger),
            Err(CoordinatorError::Busy)
        ));
    }

    #[test]
    fn fulfill_clears_busy_and_keeps_mutation() {
        let mut coordinator = Coordinator::new();
        let mut ledger = ledger();

        assert!(coordinator.begin(&ledger).is_ok());
        assert!(move_slots(&mut ledger, &catalog(), &move_request()).is_ok());
        assert!(coordinator.fulfill().is_ok());

        assert!(!coordinator.is_busy());
        assert_eq!(ledger.left().slot(1).map(Slot::item_count), Some(3));
        assert_eq!(ledger.left().slot(2).map(Slot::item_count), Some(2));
    }

    #[test]
    fn reject_restores_pre_command_state_deep_equal() {
        let mut coordinator = Coordinator::new();
        let mut ledger = ledger();
        let before = ledger.clone();

        assert!(coordinator.begin(&ledger).is_ok());
        assert!(move_slots(&mut ledger, &catalog(), &move_request()).is_ok());
        assert_ne!(ledger, before);

        assert!(coordinator.reject(&mut ledger).is_ok());
        assert!(!coordinator.is_busy());
        assert_eq!(ledger, before);
    }

    #[test]
    fn settle_without_pending_command_fails() {
        let mut coordinator = Coordinator::new();
        let mut ledger = ledger();
        assert!(matches!(
            coordinator.fulfill(),
            Err(CoordinatorError::NotPending)
        ));
        assert!(matches!(
            coordinator.reject(&mut ledger),
            Err(CoordinatorError::NotPending)
        ));
    }

    #[test]
    fn coordinator_serializes_commands_never_interleaves() {
        let mut coordinator = Coordinator::new();
        let mut ledger = ledger();

        assert!(coordinator.begin(&ledger).is_ok());
        assert!(move_slots(&mut ledger, &catalog(), &move_request()).is_ok());

        // A second intent is refused while the first is unresolved.
        assert!(matches!(
            coordinator.begin(&ledger),
            Err(CoordinatorError::Busy)
        ));

        // After rejection the next command starts from the restored state.
        assert!(coordinator.reject(&mut ledger).is_ok());
        assert!(coordinator.begin(&ledger).is_ok());
        assert_eq!(ledger.left().slot(1).map(Slot::item_count), Some(5));
    }
}
