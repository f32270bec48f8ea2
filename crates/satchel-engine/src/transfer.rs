//! Slot transfer operations: `move`, `swap`, and `stack`.
//!
//! Every operation validates before mutating, so an advisory error leaves
//! the ledger untouched. Per-slot weights are denormalized (count x unit
//! weight) and recomputed on every mutation. Destination capacity and
//! weight checks apply to cross-inventory transfers only and are advisory:
//! the authority is the final arbiter.

use satchel_ledger::SlotLedger;
use satchel_types::{ItemCatalog, Slot, SlotRef, TransferRequest};
use tracing::debug;

use crate::TransferError;

/// The operation a drop intent resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
    /// Relocate units onto an empty slot.
    Move,
    /// Exchange the full contents of two slots.
    Swap,
    /// Merge units onto an existing stack of the same item.
    Stack,
}

/// Classify a drop intent from the source and target slot contents.
///
/// Empty target: move. Occupied by the same, stackable item: stack.
/// Anything else: swap. Mirrors the drag handler's decision so a `move`
/// reaching an occupied slot is always an incompatibility.
pub fn classify(
    ledger: &SlotLedger,
    catalog: &ItemCatalog,
    request: &TransferRequest,
) -> Result<TransferOp, TransferError> {
    let source = source_stack(ledger, &request.source)?;
    let target = ledger.slot(&request.target.inventory, request.target.slot)?;

    let Some(target) = target.filter(|s| s.has_item()) else {
        return Ok(TransferOp::Move);
    };

    if target.name == source.name {
        let name = source.name.clone().unwrap_or_default();
        match catalog.is_stackable(&name) {
            Some(true) => Ok(TransferOp::Stack),
            Some(false) => Ok(TransferOp::Swap),
            None => Err(TransferError::UnknownItem { name }),
        }
    } else {
        Ok(TransferOp::Swap)
    }
}

/// Relocate `count` units from the source slot onto an empty target slot.
///
/// The target receives a new stack with a copy of the source metadata; the
/// source is decremented and cleared entirely when the full count moves.
pub fn move_slots(
    ledger: &mut SlotLedger,
    catalog: &ItemCatalog,
    request: &TransferRequest,
) -> Result<(), TransferError> {
    let source = source_stack(ledger, &request.source)?;
    let name = source.name.clone().unwrap_or_default();
    let available = source.item_count();

    if request.count == 0 || request.count > available {
        return Err(TransferError::InsufficientSource {
            requested: request.count,
            available,
        });
    }

    let target = ledger.slot(&request.target.inventory, request.target.slot)?;
    if target.is_some_and(Slot::has_item) {
        return Err(TransferError::IncompatibleTarget {
            slot: request.target.slot,
        });
    }

    let unit = unit_weight(catalog, &source);
    let moved_weight = unit.saturating_mul(request.count);
    check_destination_weight(ledger, request, moved_weight)?;

    // Validation done -- mutate.
    let remaining = available.saturating_sub(request.count);
    {
        let inventory = ledger.inventory_mut(&request.source.inventory)?;
        let slot = inventory.ensure_slot(request.source.slot);
        if remaining == 0 {
            slot.clear();
        } else {
            slot.count = Some(remaining);
            slot.weight = Some(unit.saturating_mul(remaining));
        }
    }
    {
        let inventory = ledger.inventory_mut(&request.target.inventory)?;
        let slot = inventory.ensure_slot(request.target.slot);
        slot.name = Some(name.clone());
        slot.count = Some(request.count);
        slot.weight = Some(moved_weight);
        slot.metadata = source.metadata.clone();
    }

    debug!(
        item = %name,
        count = request.count,
        from = %request.source.inventory,
        to = %request.target.inventory,
        "Moved stack"
    );
    Ok(())
}

/// Exchange the full contents of two slots unconditionally.
///
/// Used when a non-stackable item lands on an occupied slot of a different
/// type. Slot indices stay put; only contents trade places.
pub fn swap_slots(ledger: &mut SlotLedger, request: &TransferRequest) -> Result<(), TransferError> {
    // Range-validate both endpoints before touching either.
    ledger.slot(&request.source.inventory, request.source.slot)?;
    ledger.slot(&request.target.inventory, request.target.slot)?;

    let source_contents = {
        let inventory = ledger.inventory_mut(&request.source.inventory)?;
        inventory.ensure_slot(request.source.slot).take_contents()
    };
    let target_contents = {
        let inventory = ledger.inventory_mut(&request.target.inventory)?;
        inventory.ensure_slot(request.target.slot).take_contents()
    };
    {
        let inventory = ledger.inventory_mut(&request.source.inventory)?;
        inventory
            .ensure_slot(request.source.slot)
            .put_contents(target_contents);
    }
    {
        let inventory = ledger.inventory_mut(&request.target.inventory)?;
        inventory
            .ensure_slot(request.target.slot)
            .put_contents(source_contents);
    }

    debug!(
        source = request.source.slot,
        target = request.target.slot,
        "Swapped slots"
    );
    Ok(())
}

/// Merge `count` units from the source slot onto a same-item target stack.
pub fn stack_slots(
    ledger: &mut SlotLedger,
    catalog: &ItemCatalog,
    request: &TransferRequest,
) -> Result<(), TransferError> {
    let source = source_stack(ledger, &request.source)?;
    let name = source.name.clone().unwrap_or_default();
    let available = source.item_count();

    let target = ledger
        .slot(&request.target.inventory, request.target.slot)?
        .filter(|s| s.has_item())
        .cloned();
    let Some(target) = target else {
        return Err(TransferError::NotStackable { name });
    };
    if target.name != source.name {
        return Err(TransferError::NotStackable { name });
    }

    match catalog.is_stackable(&name) {
        Some(true) => {}
        Some(false) => return Err(TransferError::NotStackable { name }),
        None => return Err(TransferError::UnknownItem { name }),
    }

    if request.count == 0 || request.count > available {
        return Err(TransferError::InsufficientSource {
            requested: request.count,
            available,
        });
    }

    let unit = unit_weight(catalog, &source);
    let moved_weight = unit.saturating_mul(request.count);
    check_destination_weight(ledger, request, moved_weight)?;

    // Validation done -- mutate.
    let remaining = available.saturating_sub(request.count);
    let merged = target.item_count().saturating_add(request.count);
    {
        let inventory = ledger.inventory_mut(&request.source.inventory)?;
        let slot = inventory.ensure_slot(request.source.slot);
        if remaining == 0 {
            slot.clear();
        } else {
            slot.count = Some(remaining);
            slot.weight = Some(unit.saturating_mul(remaining));
        }
    }
    {
        let inventory = ledger.inventory_mut(&request.target.inventory)?;
        let slot = inventory.ensure_slot(request.target.slot);
        slot.count = Some(merged);
        slot.weight = Some(unit.saturating_mul(merged));
    }

    debug!(
        item = %name,
        count = request.count,
        merged,
        "Stacked units"
    );
    Ok(())
}

/// Pick a destination slot for placing an item into an inventory.
///
/// Prefers an existing stack of the same item when stackable, then the
/// first empty slot. Rejected with `OutOfSlots` when neither exists.
pub fn find_transfer_target(
    catalog: &ItemCatalog,
    inventory: &satchel_types::Inventory,
    name: &str,
) -> Result<u32, TransferError> {
    let stackable = catalog
        .is_stackable(name)
        .ok_or_else(|| TransferError::UnknownItem {
            name: name.to_owned(),
        })?;

    if stackable {
        if let Some(slot) = inventory.find_stack_target(name) {
            return Ok(slot);
        }
    }
    inventory
        .find_empty_slot()
        .ok_or_else(|| TransferError::OutOfSlots {
            name: name.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the source endpoint to a non-empty slot, cloned for inspection.
fn source_stack(ledger: &SlotLedger, at: &SlotRef) -> Result<Slot, TransferError> {
    let slot = ledger
        .slot(&at.inventory, at.slot)?
        .filter(|s| s.has_item())
        .cloned();
    slot.ok_or(TransferError::EmptySource { slot: at.slot })
}

/// Unit weight for a stack: registered definition first, else derived from
/// the denormalized slot weight.
fn unit_weight(catalog: &ItemCatalog, slot: &Slot) -> u32 {
    let name = slot.name.as_deref().unwrap_or_default();
    catalog.unit_weight(name).unwrap_or_else(|| {
        slot.item_weight()
            .checked_div(slot.item_count().max(1))
            .unwrap_or(0)
    })
}

/// Advisory weight check for cross-inventory transfers.
fn check_destination_weight(
    ledger: &SlotLedger,
    request: &TransferRequest,
    added: u32,
) -> Result<(), TransferError> {
    if request.source.inventory == request.target.inventory {
        return Ok(());
    }
    let destination = ledger.inventory(&request.target.inventory)?;
    let Some(max) = destination.max_weight else {
        return Ok(());
    };
    let current = destination.total_weight().unwrap_or(u32::MAX);
    if current.checked_add(added).is_none_or(|total| total > max) {
        return Err(TransferError::OverWeight {
            current,
            added,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use satchel_types::{Inventory, InventoryId, InventoryKind, ItemSpec, Metadata, MetadataValue};

    use super::*;

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.register(ItemSpec {
            name: "water".to_owned(),
            label: Some("Water".to_owned()),
            weight: 100,
            stack: true,
            description: None,
        });
        catalog.register(ItemSpec {
            name: "pistol".to_owned(),
            label: Some("Pistol".to_owned()),
            weight: 1200,
            stack: false,
            description: None,
        });
        catalog.register(ItemSpec {
            name: "bread".to_owned(),
            label: Some("Bread".to_owned()),
            weight: 200,
            stack: true,
            description: None,
        });
        catalog
    }

    fn ledger_with(left_items: Vec<Slot>, right_items: Vec<Slot>) -> SlotLedger {
        let mut left = Inventory::new(InventoryId::from("player"), InventoryKind::Player, 10);
        left.items = left_items;
        let mut right =
            Inventory::new(InventoryId::from("trunk"), InventoryKind::Container, 10)
                .with_max_weight(1000);
        right.items = right_items;
        SlotLedger::new(left, right)
    }

    fn request(source: (&str, u32), target: (&str, u32), count: u32) -> TransferRequest {
        TransferRequest {
            source: SlotRef {
                inventory: InventoryId::from(source.0),
                slot: source.1,
            },
            target: SlotRef {
                inventory: InventoryId::from(target.0),
                slot: target.1,
            },
            count,
        }
    }

    // -----------------------------------------------------------------------
    // move tests
    // -----------------------------------------------------------------------

    #[test]
    fn move_partial_stack_to_empty_slot() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            Vec::new(),
        );
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 2),
        );
        assert!(result.is_ok());

        let source = ledger.left().slot(1).cloned().unwrap_or(Slot::empty(0));
        assert_eq!(source.item_count(), 3);
        assert_eq!(source.item_weight(), 300);

        let target = ledger.left().slot(2).cloned().unwrap_or(Slot::empty(0));
        assert_eq!(target.name.as_deref(), Some("water"));
        assert_eq!(target.item_count(), 2);
        assert_eq!(target.item_weight(), 200);
    }

    #[test]
    fn move_full_count_empties_source() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            Vec::new(),
        );
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 3), 5),
        );
        assert!(result.is_ok());
        assert_eq!(ledger.left().slot(1), Some(&Slot::empty(1)));
        assert_eq!(
            ledger.left().slot(3).map(Slot::item_count),
            Some(5)
        );
    }

    #[test]
    fn move_copies_source_metadata() {
        let mut meta = Metadata::new();
        meta.insert("durability".to_owned(), MetadataValue::from(75_u32));
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 4, 400).with_metadata(meta.clone())],
            Vec::new(),
        );
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 2),
        );
        assert!(result.is_ok());
        assert_eq!(
            ledger.left().slot(2).and_then(|s| s.metadata.clone()),
            Some(meta)
        );
    }

    #[test]
    fn move_onto_occupied_slot_is_incompatible() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 5, 500),
                Slot::filled(2, "bread".to_owned(), 1, 200),
            ],
            Vec::new(),
        );
        let before = ledger.clone();
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 2),
        );
        assert!(matches!(
            result,
            Err(TransferError::IncompatibleTarget { slot: 2 })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn move_from_empty_slot_fails() {
        let mut ledger = ledger_with(Vec::new(), Vec::new());
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 1),
        );
        assert!(matches!(result, Err(TransferError::EmptySource { slot: 1 })));
    }

    #[test]
    fn move_more_than_available_fails() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 2, 200)],
            Vec::new(),
        );
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 3),
        );
        assert!(matches!(
            result,
            Err(TransferError::InsufficientSource {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn cross_inventory_move_respects_weight_limit() {
        // Trunk limit is 1000g and holds 800g already.
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            vec![Slot::filled(1, "bread".to_owned(), 4, 800)],
        );
        let before = ledger.clone();
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("trunk", 2), 3),
        );
        assert!(matches!(
            result,
            Err(TransferError::OverWeight {
                current: 800,
                added: 300,
                max: 1000
            })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn cross_inventory_move_within_weight_passes() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            vec![Slot::filled(1, "bread".to_owned(), 4, 800)],
        );
        let result = move_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("trunk", 2), 2),
        );
        assert!(result.is_ok());
        assert_eq!(ledger.right().slot(2).map(Slot::item_weight), Some(200));
    }

    // -----------------------------------------------------------------------
    // swap tests
    // -----------------------------------------------------------------------

    #[test]
    fn swap_exchanges_contents_and_keeps_indices() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 5, 500),
                Slot::filled(2, "pistol".to_owned(), 1, 1200),
            ],
            Vec::new(),
        );
        let result = swap_slots(&mut ledger, &request(("player", 1), ("player", 2), 0));
        assert!(result.is_ok());

        let one = ledger.left().slot(1).cloned().unwrap_or(Slot::empty(0));
        let two = ledger.left().slot(2).cloned().unwrap_or(Slot::empty(0));
        assert_eq!(one.slot, 1);
        assert_eq!(one.name.as_deref(), Some("pistol"));
        assert_eq!(two.slot, 2);
        assert_eq!(two.name.as_deref(), Some("water"));
    }

    #[test]
    fn swap_with_empty_slot_relocates() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "pistol".to_owned(), 1, 1200)],
            Vec::new(),
        );
        let result = swap_slots(&mut ledger, &request(("player", 1), ("player", 4), 0));
        assert!(result.is_ok());
        assert!(ledger.left().slot(1).is_some_and(Slot::is_empty));
        assert_eq!(
            ledger.left().slot(4).and_then(|s| s.name.as_deref().map(str::to_owned)),
            Some("pistol".to_owned())
        );
    }

    #[test]
    fn swap_out_of_range_fails_untouched() {
        let mut ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            Vec::new(),
        );
        let before = ledger.clone();
        let result = swap_slots(&mut ledger, &request(("player", 1), ("player", 99), 0));
        assert!(result.is_err());
        assert_eq!(ledger, before);
    }

    // -----------------------------------------------------------------------
    // stack tests
    // -----------------------------------------------------------------------

    #[test]
    fn stack_merges_counts_and_weights() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 5, 500),
                Slot::filled(2, "water".to_owned(), 1, 100),
            ],
            Vec::new(),
        );
        let result = stack_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 3),
        );
        assert!(result.is_ok());
        assert_eq!(ledger.left().slot(1).map(Slot::item_count), Some(2));
        assert_eq!(ledger.left().slot(2).map(Slot::item_count), Some(4));
        assert_eq!(ledger.left().slot(2).map(Slot::item_weight), Some(400));
    }

    #[test]
    fn stack_full_count_clears_source() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::filled(2, "water".to_owned(), 1, 100),
            ],
            Vec::new(),
        );
        let result = stack_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 2),
        );
        assert!(result.is_ok());
        assert_eq!(ledger.left().slot(1), Some(&Slot::empty(1)));
        assert_eq!(ledger.left().slot(2).map(Slot::item_count), Some(3));
    }

    #[test]
    fn stack_onto_different_item_rejected_unchanged() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 3, 300),
                Slot::filled(2, "bread".to_owned(), 1, 200),
            ],
            Vec::new(),
        );
        let before = ledger.clone();
        let result = stack_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 3),
        );
        assert!(matches!(result, Err(TransferError::NotStackable { .. })));
        assert_eq!(ledger, before);
    }

    #[test]
    fn stack_of_unstackable_item_rejected() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "pistol".to_owned(), 1, 1200),
                Slot::filled(2, "pistol".to_owned(), 1, 1200),
            ],
            Vec::new(),
        );
        let result = stack_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 1),
        );
        assert!(matches!(result, Err(TransferError::NotStackable { .. })));
    }

    #[test]
    fn stack_more_than_available_rejected() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 2, 200),
                Slot::filled(2, "water".to_owned(), 1, 100),
            ],
            Vec::new(),
        );
        let result = stack_slots(
            &mut ledger,
            &catalog(),
            &request(("player", 1), ("player", 2), 5),
        );
        assert!(matches!(
            result,
            Err(TransferError::InsufficientSource {
                requested: 5,
                available: 2
            })
        ));
    }

    // -----------------------------------------------------------------------
    // classify tests
    // -----------------------------------------------------------------------

    #[test]
    fn classify_empty_target_is_move() {
        let ledger = ledger_with(
            vec![Slot::filled(1, "water".to_owned(), 5, 500)],
            Vec::new(),
        );
        let op = classify(&ledger, &catalog(), &request(("player", 1), ("player", 2), 1));
        assert!(matches!(op, Ok(TransferOp::Move)));
    }

    #[test]
    fn classify_same_stackable_item_is_stack() {
        let ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 5, 500),
                Slot::filled(2, "water".to_owned(), 1, 100),
            ],
            Vec::new(),
        );
        let op = classify(&ledger, &catalog(), &request(("player", 1), ("player", 2), 1));
        assert!(matches!(op, Ok(TransferOp::Stack)));
    }

    #[test]
    fn classify_same_unstackable_item_is_swap() {
        let ledger = ledger_with(
            vec![
                Slot::filled(1, "pistol".to_owned(), 1, 1200),
                Slot::filled(2, "pistol".to_owned(), 1, 1200),
            ],
            Vec::new(),
        );
        let op = classify(&ledger, &catalog(), &request(("player", 1), ("player", 2), 1));
        assert!(matches!(op, Ok(TransferOp::Swap)));
    }

    #[test]
    fn classify_different_items_is_swap() {
        let ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 5, 500),
                Slot::filled(2, "bread".to_owned(), 1, 200),
            ],
            Vec::new(),
        );
        let op = classify(&ledger, &catalog(), &request(("player", 1), ("player", 2), 1));
        assert!(matches!(op, Ok(TransferOp::Swap)));
    }

    // -----------------------------------------------------------------------
    // destination selection tests
    // -----------------------------------------------------------------------

    #[test]
    fn find_transfer_target_prefers_existing_stack() {
        let ledger = ledger_with(
            Vec::new(),
            vec![
                Slot::filled(3, "water".to_owned(), 2, 200),
            ],
        );
        let target = find_transfer_target(&catalog(), ledger.right(), "water");
        assert!(matches!(target, Ok(3)));
    }

    #[test]
    fn find_transfer_target_falls_back_to_empty_slot() {
        let ledger = ledger_with(
            Vec::new(),
            vec![Slot::filled(1, "bread".to_owned(), 1, 200)],
        );
        let target = find_transfer_target(&catalog(), ledger.right(), "water");
        assert!(matches!(target, Ok(2)));
    }

    #[test]
    fn find_transfer_target_out_of_slots() {
        let mut right = Inventory::new(InventoryId::from("box"), InventoryKind::Container, 1);
        right.items = vec![Slot::filled(1, "bread".to_owned(), 1, 200)];
        let target = find_transfer_target(&catalog(), &right, "pistol");
        assert!(matches!(target, Err(TransferError::OutOfSlots { .. })));
    }

    // -----------------------------------------------------------------------
    // conservation
    // -----------------------------------------------------------------------

    #[test]
    fn conservation_holds_across_operation_sequence() {
        let mut ledger = ledger_with(
            vec![
                Slot::filled(1, "water".to_owned(), 6, 600),
                Slot::filled(2, "bread".to_owned(), 2, 400),
            ],
            Vec::new(),
        );
        let catalog = catalog();

        assert!(move_slots(&mut ledger, &catalog, &request(("player", 1), ("player", 3), 2)).is_ok());
        assert!(swap_slots(&mut ledger, &request(("player", 2), ("player", 4), 0)).is_ok());
        assert!(stack_slots(&mut ledger, &catalog, &request(("player", 3), ("player", 1), 1)).is_ok());

        let water: u32 = satchel_ledger::total_count(ledger.left(), "water").unwrap_or(0);
        let bread: u32 = satchel_ledger::total_count(ledger.left(), "bread").unwrap_or(0);
        assert_eq!(water, 6);
        assert_eq!(bread, 2);
        assert!(satchel_ledger::verify_unique_slots(ledger.left()).is_ok());
    }
}
