//! Shared type definitions for the Satchel inventory client.
//!
//! This crate is the single source of truth for the data model shared
//! across the workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the rendering layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`metadata`] -- Open string-keyed metadata bags and trade tracing keys
//! - [`slot`] -- A single inventory position
//! - [`inventory`] -- Slot-based inventory containers
//! - [`item`] -- Registered item definitions and the catalog
//! - [`messages`] -- Request and push channel wire payloads

pub mod ids;
pub mod inventory;
pub mod item;
pub mod messages;
pub mod metadata;
pub mod slot;

// Re-export all public types at crate root for convenience.
pub use ids::{InventoryId, InviteId, PlayerId, TradeId};
pub use inventory::{Inventory, InventoryKind};
pub use item::{ItemCatalog, ItemSpec};
pub use messages::{
    Confirmations, InventorySetup, OfferItem, PlayerRef, Push, Request, SlotRef, TradeInvite,
    TradeOffers, TradeSnapshot, TransferRequest,
};
pub use metadata::{Metadata, MetadataValue, original_slot, trade_owner};
pub use slot::Slot;
