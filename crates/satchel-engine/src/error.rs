//! Error types for the transfer engine.
//!
//! Engine errors are client-advisory: they short-circuit the operation and
//! leave the ledger untouched. Only an authority rejection (handled by the
//! coordinator) causes a structural rollback.

use satchel_ledger::LedgerError;

/// Errors that can occur while validating or applying a transfer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The source slot holds no item.
    #[error("source slot {slot} is empty")]
    EmptySource {
        /// The offending slot index.
        slot: u32,
    },

    /// The target slot is occupied and cannot receive a move.
    #[error("target slot {slot} is occupied")]
    IncompatibleTarget {
        /// The offending slot index.
        slot: u32,
    },

    /// The item type forbids stacking, or the stack targets differ.
    #[error("item {name} cannot be stacked here")]
    NotStackable {
        /// The item type in question.
        name: String,
    },

    /// The requested quantity exceeds what the source slot holds.
    #[error("insufficient source: requested {requested}, available {available}")]
    InsufficientSource {
        /// Quantity requested.
        requested: u32,
        /// Quantity actually held.
        available: u32,
    },

    /// The destination has no empty slot and no compatible stack target.
    #[error("destination inventory has no free slot for {name}")]
    OutOfSlots {
        /// The item type being placed.
        name: String,
    },

    /// The destination would exceed its weight limit.
    ///
    /// Advisory only -- the authority is the final arbiter; this check just
    /// prevents obviously-invalid optimistic commands.
    #[error("destination over weight: {current} + {added} exceeds {max} grams")]
    OverWeight {
        /// Destination weight before the transfer.
        current: u32,
        /// Weight being added.
        added: u32,
        /// The destination's limit.
        max: u32,
    },

    /// The item type has no registered definition.
    #[error("unknown item: {name}")]
    UnknownItem {
        /// The unregistered item name.
        name: String,
    },

    /// A ledger addressing error (unknown inventory, slot out of range).
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors from the optimistic command coordinator.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// A command is already pending; the new intent is dropped.
    #[error("a command is already pending")]
    Busy,

    /// No command is pending to settle.
    #[error("no command is pending")]
    NotPending,
}
