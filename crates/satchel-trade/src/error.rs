//! Error types for the trade session.

/// Errors that can occur during trade session transitions.
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    /// The operation requires an active negotiation.
    #[error("no trade is active")]
    NotTrading,

    /// The operation requires a pending invite.
    #[error("no trade invite is pending")]
    NoInvite,

    /// An invite arrived while a negotiation is already active.
    #[error("a trade negotiation is already in progress")]
    NegotiationInProgress,

    /// The inventory slot is already committed to the trade.
    #[error("slot {slot} is already offered")]
    AlreadyOffered {
        /// The inventory slot index already committed.
        slot: u32,
    },

    /// No offer occupies the given offer-list slot.
    #[error("no offer at slot {slot}")]
    NotOffered {
        /// The offer-list slot index addressed.
        slot: u32,
    },

    /// The offer item does not trace back to an inventory slot.
    #[error("offer is missing its originalSlot metadata")]
    MissingOriginalSlot,

    /// Completion was requested before both parties confirmed.
    #[error("both parties must confirm before completion")]
    NotConfirmed,

    /// The inventory slot addressed by an offer holds no item.
    #[error("inventory slot {slot} is empty")]
    EmptySlot {
        /// The empty slot index.
        slot: u32,
    },
}
