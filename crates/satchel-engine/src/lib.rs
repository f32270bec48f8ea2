//! Transfer engine for the Satchel inventory client.
//!
//! Implements the slot operations (`move`, `swap`, `stack`) over the slot
//! ledger, quantity resolution for UI intents, and the optimistic command
//! coordinator that snapshots state before each authoritative command and
//! rolls it back on rejection.
//!
//! # Modules
//!
//! - [`transfer`] -- Slot operations and drop-intent classification
//! - [`amount`] -- Quantity resolution (defaults and the split modifier)
//! - [`coordinator`] -- Optimistic command lifecycle and rollback
//! - [`error`] -- Advisory transfer errors and coordinator errors

pub mod amount;
pub mod coordinator;
pub mod error;
pub mod transfer;

pub use amount::resolve_amount;
pub use coordinator::{CommandPhase, Coordinator};
pub use error::{CoordinatorError, TransferError};
pub use transfer::{TransferOp, classify, find_transfer_target, move_slots, stack_slots, swap_slots};
