//! The slot ledger for the Satchel inventory client.
//!
//! Holds the two open inventories (primary/"left" and secondary/"right") as
//! ordered, sparse slot arrays; guarantees slot-index uniqueness per
//! inventory and positional stability (an emptied slot keeps its index).
//! Also provides the history snapshot used by the optimistic command
//! coordinator to roll back rejected commands.
//!
//! # Modules
//!
//! - [`ledger`] -- The inventory pair and slot addressing
//! - [`snapshot`] -- Deep-copy history snapshots for rollback
//! - [`integrity`] -- Invariant verification and conservation counting
//! - [`error`] -- Ledger error types

pub mod error;
pub mod integrity;
pub mod ledger;
pub mod snapshot;

pub use error::LedgerError;
pub use integrity::{total_count, verify_unique_slots};
pub use ledger::{LedgerSide, SlotLedger};
pub use snapshot::LedgerSnapshot;
