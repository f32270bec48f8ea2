//! The trade session state machine.
//!
//! `Idle -> Invited -> Active -> Idle`. The session is created on an
//! authoritative invite (or local simulation), moves to `Active` only via
//! an authoritative `tradeState` push, and is destroyed on completion,
//! cancellation, explicit close, or expiry -- all of which arrive as
//! `tradeClosed`. The client may *request* accept and cancel but never
//! unilaterally completes a trade: both confirmation flags being true is a
//! hint for the authority, not a transition.
//!
//! Expiry timestamps are only ever read: [`TradeSession::remaining`] is a
//! derived value and no timer mutates the session. A stale invite stays
//! `Invited` until the authority closes it, avoiding a race between local
//! expiry and a late-arriving confirmation.

use chrono::{DateTime, Duration, Utc};
use satchel_types::{
    Confirmations, Metadata, MetadataValue, OfferItem, PlayerRef, Slot, TradeId, TradeInvite,
    TradeOffers, TradeSnapshot, metadata,
};
use tracing::{debug, info};

use crate::TradeError;

/// The `tradeOwner` tag applied to the local player's offers.
pub const OWNER_SELF: &str = "player";

/// The `tradeOwner` tag applied to the partner's offers.
pub const OWNER_PARTNER: &str = "partner";

/// An active negotiation between the local player and a partner.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiation {
    /// The authority-issued trade id.
    pub trade_id: TradeId,
    /// The trading partner.
    pub partner: PlayerRef,
    /// Offer lists on both sides.
    pub offers: TradeOffers,
    /// Confirmation flags on both sides.
    pub confirmations: Confirmations,
    /// When the negotiation lapses, authority clock.
    pub expires_at: DateTime<Utc>,
}

/// Process-wide trade session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TradeSession {
    /// No trade activity.
    #[default]
    Idle,
    /// An invite awaits a response.
    Invited(TradeInvite),
    /// A negotiation is in progress.
    Active(Negotiation),
}

impl TradeSession {
    /// Whether no trade activity is in progress.
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether an invite awaits a response.
    pub const fn is_invited(&self) -> bool {
        matches!(self, Self::Invited(_))
    }

    /// Whether a negotiation is active.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The pending invite, if any.
    pub const fn invite(&self) -> Option<&TradeInvite> {
        match self {
            Self::Invited(invite) => Some(invite),
            _ => None,
        }
    }

    /// The active negotiation, if any.
    pub const fn negotiation(&self) -> Option<&Negotiation> {
        match self {
            Self::Active(negotiation) => Some(negotiation),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Invite handling
    // -----------------------------------------------------------------------

    /// Apply an authoritative `tradeInvite` push.
    ///
    /// Overwrites `Idle` or a previous invite. Refused while a negotiation
    /// is active -- only `tradeClosed`/`tradeState` may displace one.
    pub fn receive_invite(&mut self, invite: TradeInvite) -> Result<(), TradeError> {
        if self.is_active() {
            return Err(TradeError::NegotiationInProgress);
        }
        info!(invite = %invite.id, from = %invite.from.name, "Trade invite received");
        *self = Self::Invited(invite);
        Ok(())
    }

    /// Read the pending invite for an accept request. The session stays
    /// `Invited` until the authority pushes `tradeState`.
    pub fn accept(&self) -> Result<&TradeInvite, TradeError> {
        self.invite().ok_or(TradeError::NoInvite)
    }

    /// Decline the pending invite, returning it for the response payload.
    pub fn decline(&mut self) -> Result<TradeInvite, TradeError> {
        match core::mem::take(self) {
            Self::Invited(invite) => {
                debug!(invite = %invite.id, "Trade invite declined");
                Ok(invite)
            }
            previous => {
                *self = previous;
                Err(TradeError::NoInvite)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Authoritative pushes
    // -----------------------------------------------------------------------

    /// Apply an authoritative `tradeState` push, entering `Active`.
    ///
    /// Overwrites any state, including a pending invite -- the authority
    /// always wins.
    pub fn apply_state(&mut self, snapshot: TradeSnapshot) {
        info!(trade = %snapshot.id, partner = %snapshot.partner.name, "Trade state applied");
        *self = Self::Active(Negotiation {
            trade_id: snapshot.id,
            partner: snapshot.partner,
            offers: snapshot.offers,
            confirmations: snapshot.confirmations,
            expires_at: snapshot.expires_at,
        });
    }

    /// Apply an authoritative `tradeClosed` push: back to `Idle`
    /// unconditionally. Wins over any local state.
    pub fn apply_closed(&mut self) {
        if !self.is_idle() {
            info!("Trade closed by authority");
        }
        *self = Self::Idle;
    }

    // -----------------------------------------------------------------------
    // Offer negotiation
    // -----------------------------------------------------------------------

    /// Add an item to the local player's offers.
    ///
    /// The item must trace back to an inventory slot not already committed
    /// to the trade. Any offer change invalidates both confirmations.
    pub fn offer_add(&mut self, item: OfferItem) -> Result<(), TradeError> {
        let Self::Active(negotiation) = self else {
            return Err(TradeError::NotTrading);
        };
        let origin = metadata::original_slot(&item.metadata)
            .ok_or(TradeError::MissingOriginalSlot)?;
        let duplicate = negotiation
            .offers
            .own
            .iter()
            .any(|offer| metadata::original_slot(&offer.metadata) == Some(origin));
        if duplicate {
            return Err(TradeError::AlreadyOffered { slot: origin });
        }
        debug!(item = %item.name, count = item.count, origin, "Offer added");
        negotiation.offers.own.push(item);
        negotiation.confirmations = Confirmations::default();
        Ok(())
    }

    /// Remove the local player's offer at the given offer-list slot.
    ///
    /// Reverts visibility of the original inventory slot and invalidates
    /// both confirmations.
    pub fn offer_remove(&mut self, slot: u32) -> Result<OfferItem, TradeError> {
        let Self::Active(negotiation) = self else {
            return Err(TradeError::NotTrading);
        };
        let position = negotiation
            .offers
            .own
            .iter()
            .position(|offer| offer.slot == slot)
            .ok_or(TradeError::NotOffered { slot })?;
        let removed = negotiation.offers.own.remove(position);
        debug!(item = %removed.name, slot, "Offer removed");
        negotiation.confirmations = Confirmations::default();
        Ok(removed)
    }

    /// Set the local player's confirmation flag.
    ///
    /// Never completes the trade: even with both flags true the session
    /// stays `Active` until the authority closes it.
    pub fn confirm_own(&mut self) -> Result<(), TradeError> {
        let Self::Active(negotiation) = self else {
            return Err(TradeError::NotTrading);
        };
        negotiation.confirmations.own = true;
        debug!(
            partner_confirmed = negotiation.confirmations.partner,
            "Local confirmation set"
        );
        Ok(())
    }

    /// Clear the local player's confirmation flag, reverting an optimistic
    /// confirm the authority never accepted.
    pub fn unconfirm_own(&mut self) -> Result<(), TradeError> {
        let Self::Active(negotiation) = self else {
            return Err(TradeError::NotTrading);
        };
        negotiation.confirmations.own = false;
        debug!("Local confirmation reverted");
        Ok(())
    }

    /// The offer-list slot a new offer should take: one past the highest
    /// occupied slot, starting at 1.
    pub fn next_offer_slot(&self) -> Result<u32, TradeError> {
        let negotiation = self.negotiation().ok_or(TradeError::NotTrading)?;
        let highest = negotiation
            .offers
            .own
            .iter()
            .map(|offer| offer.slot)
            .max()
            .unwrap_or(0);
        Ok(highest.saturating_add(1))
    }

    // -----------------------------------------------------------------------
    // Derived time
    // -----------------------------------------------------------------------

    /// Remaining time before the invite or negotiation lapses.
    ///
    /// Purely derived: reads timestamps, never mutates the session. A lapsed
    /// session reads zero but keeps its state until the authority closes it.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expires_at = match self {
            Self::Idle => return None,
            Self::Invited(invite) => invite.expires_at,
            Self::Active(negotiation) => negotiation.expires_at,
        };
        Some((expires_at - now).max(Duration::zero()))
    }
}

/// Build an offer item from an inventory slot.
///
/// Copies the slot's metadata and adds the trade tracing keys:
/// `originalSlot` pointing back at the source and `tradeOwner` set to the
/// local player.
pub fn offer_from_slot(base: &Slot, trade_slot: u32, count: u32) -> Result<OfferItem, TradeError> {
    let name = base
        .name
        .clone()
        .ok_or(TradeError::EmptySlot { slot: base.slot })?;
    let mut meta: Metadata = base.metadata.clone().unwrap_or_default();
    meta.insert(
        metadata::ORIGINAL_SLOT.to_owned(),
        MetadataValue::from(base.slot),
    );
    meta.insert(
        metadata::TRADE_OWNER.to_owned(),
        MetadataValue::from(OWNER_SELF),
    );
    Ok(OfferItem {
        slot: trade_slot,
        name,
        count,
        metadata: meta,
    })
}
