//! Wire payloads for the two authority channels.
//!
//! The request channel ([`Request`]) carries client intents; each request
//! has an implicit success/failure resolution. The push channel ([`Push`])
//! carries authoritative events consumed by the matching state-machine
//! handler. Both use an `action`/`data` JSON envelope with camelCase
//! payload keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{InventoryId, InviteId, PlayerId, TradeId};
use crate::inventory::Inventory;
use crate::item::ItemSpec;
use crate::metadata::Metadata;

// ---------------------------------------------------------------------------
// Shared payload fragments
// ---------------------------------------------------------------------------

/// A player as named by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerRef {
    /// Numeric server id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
}

/// An item tentatively committed to a trade.
///
/// Always carries `metadata.originalSlot` tracing back to the owning
/// inventory's slot so the offer can be reverted; the item stays physically
/// owned by the offering party until completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OfferItem {
    /// Position within the trade offer list (1-based).
    pub slot: u32,
    /// Item type id.
    pub name: String,
    /// Offered quantity.
    pub count: u32,
    /// Metadata copied from the source slot plus the trade tracing keys.
    pub metadata: Metadata,
}

/// Both parties' offer lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TradeOffers {
    /// Items offered by the local player.
    #[serde(rename = "self")]
    pub own: Vec<OfferItem>,
    /// Items offered by the partner.
    pub partner: Vec<OfferItem>,
}

/// Both parties' confirmation flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Confirmations {
    /// Whether the local player has confirmed the current offers.
    #[serde(rename = "self")]
    pub own: bool,
    /// Whether the partner has confirmed the current offers.
    pub partner: bool,
}

/// A pending trade invite pushed by the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TradeInvite {
    /// Invite id, echoed back in the response.
    pub id: InviteId,
    /// The inviting player.
    pub from: PlayerRef,
    /// When the invite lapses, authority clock.
    pub expires_at: DateTime<Utc>,
}

/// The authoritative snapshot of an active trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TradeSnapshot {
    /// Trade session id.
    pub id: TradeId,
    /// The trading partner.
    pub partner: PlayerRef,
    /// Current offer lists on both sides.
    pub offers: TradeOffers,
    /// Current confirmation flags on both sides.
    pub confirmations: Confirmations,
    /// When the negotiation lapses, authority clock.
    pub expires_at: DateTime<Utc>,
}

/// One endpoint of a transfer: an inventory plus a slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SlotRef {
    /// The inventory holding the slot.
    pub inventory: InventoryId,
    /// 1-based slot index.
    pub slot: u32,
}

/// Ephemeral payload of a transfer command. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TransferRequest {
    /// Where the units come from.
    pub source: SlotRef,
    /// Where the units go.
    pub target: SlotRef,
    /// Requested quantity.
    pub count: u32,
}

/// Initial payload delivered when the inventory surface opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct InventorySetup {
    /// The primary ("left") inventory, normally the player's own.
    pub left_inventory: Inventory,
    /// The secondary ("right") inventory being interacted with.
    pub right_inventory: Inventory,
}

// ---------------------------------------------------------------------------
// Request channel (client -> authority)
// ---------------------------------------------------------------------------

/// A client intent dispatched to the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
#[serde(rename_all_fields = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Request {
    /// Move, swap, or stack units between two slots.
    TransferItems(TransferRequest),

    /// Finalize a trade with the given item lists.
    ConfirmTrade {
        /// The partner's server id.
        target_player_id: PlayerId,
        /// Items the local player gives.
        player_items: Vec<OfferItem>,
        /// Items the partner gives.
        target_items: Vec<OfferItem>,
    },

    /// Abort a trade with the given partner.
    CancelTrade {
        /// The partner's server id.
        target_player_id: PlayerId,
    },

    /// Answer a pending invite.
    TradeRespond {
        /// The invite being answered.
        trade_id: InviteId,
        /// True to accept, false to decline.
        accepted: bool,
    },

    /// Commit one inventory slot's units to the active trade.
    TradeOfferItem {
        /// The active trade.
        trade_id: TradeId,
        /// Source inventory slot index.
        slot: u32,
        /// Offered quantity.
        count: u32,
    },

    /// Withdraw an offer from the active trade.
    TradeRemoveItem {
        /// The active trade.
        trade_id: TradeId,
        /// Offer list slot index being withdrawn.
        slot: u32,
    },

    /// Confirm the current offers.
    TradeConfirm {
        /// The active trade.
        trade_id: TradeId,
    },

    /// Cancel the active trade.
    TradeCancel {
        /// The active trade.
        trade_id: TradeId,
    },

    /// Replace both offer lists wholesale.
    UpdateTradeItems {
        /// Items the local player offers.
        player_items: Vec<OfferItem>,
        /// Items the partner offers.
        target_items: Vec<OfferItem>,
    },
}

impl Request {
    /// The wire action name, for logging.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::TransferItems(_) => "transferItems",
            Self::ConfirmTrade { .. } => "confirmTrade",
            Self::CancelTrade { .. } => "cancelTrade",
            Self::TradeRespond { .. } => "tradeRespond",
            Self::TradeOfferItem { .. } => "tradeOfferItem",
            Self::TradeRemoveItem { .. } => "tradeRemoveItem",
            Self::TradeConfirm { .. } => "tradeConfirm",
            Self::TradeCancel { .. } => "tradeCancel",
            Self::UpdateTradeItems { .. } => "updateTradeItems",
        }
    }
}

// ---------------------------------------------------------------------------
// Push channel (authority -> client)
// ---------------------------------------------------------------------------

/// An authoritative event pushed to the client.
///
/// Pushes are applied in delivery order and always take precedence over any
/// locally-optimistic, unconfirmed state for the same entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Push {
    /// Open the inventory surface with both inventories.
    Init(InventorySetup),

    /// Register an item definition.
    RegisterItem(ItemSpec),

    /// Refresh the displayed weight of a linked container slot.
    ContainerWeight {
        /// The container inventory id, matched against `metadata.container`.
        container: InventoryId,
        /// New total weight in grams.
        weight: u32,
    },

    /// Close the inventory surface.
    CloseInventory,

    /// A player invited the local player to trade.
    TradeInvite(TradeInvite),

    /// The authoritative trade snapshot; moves the session to `Active`.
    TradeState(TradeSnapshot),

    /// The trade is over (completed, cancelled, or expired). Wins over any
    /// local state.
    TradeClosed,
}
