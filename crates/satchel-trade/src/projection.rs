//! Read-only trade views derived from the ledger and the offer lists.
//!
//! While a negotiation is active the ledger itself is never mutated by
//! offers. The trade surfaces are *projections*: the own-side view deducts
//! offered counts from their source slots, and the partner surface is built
//! by overlaying the partner's offers onto an empty grid. Both are rebuilt
//! from scratch on every offer change, so there is no incremental state to
//! drift out of sync.

use satchel_types::{
    Inventory, ItemCatalog, Metadata, MetadataValue, OfferItem, Slot, metadata,
};

/// Build the slot list for a trade surface from a side's offers.
///
/// Each offer lands at its offer-list slot with `tradeOwner` set to
/// `owner`, so the rendering layer can tell the sides apart after the
/// lists are merged into one grid. Stack weight is derived from the
/// catalog; unregistered items project with no weight.
pub fn overlay_offers(
    base: &Inventory,
    offers: &[OfferItem],
    owner: &str,
    catalog: &ItemCatalog,
) -> Vec<Slot> {
    let mut projected: Vec<Slot> = base.items.clone();
    for offer in offers {
        let mut meta: Metadata = offer.metadata.clone();
        meta.insert(
            metadata::TRADE_OWNER.to_owned(),
            MetadataValue::from(owner),
        );
        let weight = catalog
            .unit_weight(&offer.name)
            .map(|unit| unit.saturating_mul(offer.count))
            .unwrap_or(0);
        let slot =
            Slot::filled(offer.slot, offer.name.clone(), offer.count, weight).with_metadata(meta);
        match projected.iter_mut().find(|s| s.slot == offer.slot) {
            Some(existing) => *existing = slot,
            None => projected.push(slot),
        }
    }
    projected
}

/// Build the own-inventory view with offered counts held back.
///
/// Each offer traces back to its source via `originalSlot`; the projected
/// slot shows the remaining count and proportional weight, and clears
/// entirely when the whole stack is committed. The ledger is untouched --
/// removing the offer restores full visibility by simply re-projecting.
pub fn reserve_own_offers(base: &Inventory, offers: &[OfferItem]) -> Vec<Slot> {
    let mut projected: Vec<Slot> = base.items.clone();
    for offer in offers {
        let Some(origin) = metadata::original_slot(&offer.metadata) else {
            continue;
        };
        let Some(slot) = projected.iter_mut().find(|s| s.slot == origin) else {
            continue;
        };
        let remaining = slot.item_count().saturating_sub(offer.count);
        if remaining == 0 {
            slot.clear();
        } else {
            let unit = slot
                .item_weight()
                .checked_div(slot.item_count())
                .unwrap_or(0);
            slot.count = Some(remaining);
            slot.weight = Some(unit.saturating_mul(remaining));
        }
    }
    projected
}
