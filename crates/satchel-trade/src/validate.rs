//! Advisory pre-confirmation checks on a trade.
//!
//! Run before the local confirmation request is dispatched, so an
//! obviously doomed trade never reaches the authority. Like all client
//! checks these are advisory: the authority re-validates on completion and
//! its verdict wins.

use std::fmt;

use satchel_types::{Inventory, ItemCatalog, OfferItem, metadata};
use tracing::debug;

/// Why a trade failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// The incoming offers need more free slots than the inventory has.
    InsufficientSpace,
    /// The incoming offers would push total weight past the limit.
    ExceedsCapacity,
    /// One or more offered items cannot be honored.
    InvalidItems,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InsufficientSpace => "insufficient space",
            Self::ExceedsCapacity => "exceeds capacity",
            Self::InvalidItems => "invalid items",
        };
        f.write_str(text)
    }
}

/// The outcome of a trade validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeValidation {
    /// Whether the trade may be confirmed.
    pub is_valid: bool,
    /// The first failure encountered, if any.
    pub reason: Option<ValidationReason>,
    /// Names of own offers that cannot be honored.
    pub invalid_items: Vec<String>,
}

impl TradeValidation {
    const fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
            invalid_items: Vec::new(),
        }
    }

    const fn invalid(reason: ValidationReason) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            invalid_items: Vec::new(),
        }
    }
}

/// Validate a trade from the local player's side.
///
/// Checks, in order: slot capacity for the incoming offers, that every own
/// offer still traces to a source slot holding enough of the item, and
/// that the incoming weight fits once the outgoing weight is released.
/// The first failing check decides the reason.
pub fn validate_trade_items(
    catalog: &ItemCatalog,
    own_offer: &[OfferItem],
    partner_offer: &[OfferItem],
    own_inventory: &Inventory,
) -> TradeValidation {
    let incoming = u32::try_from(partner_offer.len()).unwrap_or(u32::MAX);
    if incoming > own_inventory.free_slots() {
        debug!(
            incoming,
            free = own_inventory.free_slots(),
            "Trade invalid, not enough free slots"
        );
        return TradeValidation::invalid(ValidationReason::InsufficientSpace);
    }

    let invalid_items: Vec<String> = own_offer
        .iter()
        .filter(|offer| !offer_is_honorable(offer, own_inventory))
        .map(|offer| offer.name.clone())
        .collect();
    if !invalid_items.is_empty() {
        debug!(count = invalid_items.len(), "Trade invalid, unhonorable offers");
        return TradeValidation {
            is_valid: false,
            reason: Some(ValidationReason::InvalidItems),
            invalid_items,
        };
    }

    if let Some(max_weight) = own_inventory.max_weight {
        let current = own_inventory.total_weight().unwrap_or(u32::MAX);
        let outgoing = offers_weight(catalog, own_offer);
        let incoming = offers_weight(catalog, partner_offer);
        let after = current.saturating_sub(outgoing).saturating_add(incoming);
        if after > max_weight {
            debug!(after, max_weight, "Trade invalid, over weight limit");
            return TradeValidation::invalid(ValidationReason::ExceedsCapacity);
        }
    }

    TradeValidation::valid()
}

/// Whether the source slot still holds enough of the offered item.
fn offer_is_honorable(offer: &OfferItem, inventory: &Inventory) -> bool {
    let Some(origin) = metadata::original_slot(&offer.metadata) else {
        return false;
    };
    inventory.slot(origin).is_some_and(|slot| {
        slot.name.as_deref() == Some(offer.name.as_str()) && slot.item_count() >= offer.count
    })
}

/// Total weight of an offer list, derived from catalog unit weights.
/// Unregistered items contribute nothing.
fn offers_weight(catalog: &ItemCatalog, offers: &[OfferItem]) -> u32 {
    offers.iter().fold(0_u32, |total, offer| {
        let unit = catalog.unit_weight(&offer.name).unwrap_or(0);
        total.saturating_add(unit.saturating_mul(offer.count))
    })
}
