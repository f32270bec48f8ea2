//! The inventory controller.
//!
//! Wires UI intents through the engine and trade session, the command
//! coordinator, and the authority channel. Every mutating intent follows
//! the same shape: advisory checks first (the ledger is untouched on
//! failure), optimistic local apply, dispatch, then fulfill or roll back on
//! the authority's verdict. Authoritative pushes are applied in delivery
//! order and win over any unconfirmed local state.

use chrono::{Duration, Utc};
use satchel_engine::{
    Coordinator, TransferError, TransferOp, classify, find_transfer_target, move_slots,
    resolve_amount, stack_slots, swap_slots,
};
use satchel_ledger::{LedgerSide, SlotLedger};
use satchel_trade::{
    OWNER_PARTNER, TradeError, TradeSession, ValidationReason, offer_from_slot, overlay_offers,
    reserve_own_offers, validate_trade_items,
};
use satchel_types::{
    Inventory, InventoryId, InventoryKind, InviteId, ItemCatalog, PlayerRef, Push, Request, Slot,
    SlotRef, TradeInvite, TransferRequest, metadata,
};
use tracing::{debug, info, warn};

use crate::authority::Authority;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::favorites::Favorites;

/// The client-side inventory surface.
///
/// Generic over the authority channel so tests can script verdicts.
#[derive(Debug)]
pub struct InventoryController<A: Authority> {
    authority: A,
    config: ClientConfig,
    ledger: SlotLedger,
    catalog: ItemCatalog,
    coordinator: Coordinator,
    session: TradeSession,
    favorites: Favorites,
    open: bool,
    item_amount: u32,
    split: bool,
}

impl<A: Authority> InventoryController<A> {
    /// Create a controller with an unopened ledger, loading persisted
    /// favorites from the configured storage directory.
    pub fn new(authority: A, config: ClientConfig) -> Self {
        let favorites = Favorites::load(&config.storage_dir);
        Self {
            authority,
            config,
            ledger: SlotLedger::unopened(),
            catalog: ItemCatalog::new(),
            coordinator: Coordinator::new(),
            session: TradeSession::default(),
            favorites,
            open: false,
            item_amount: 0,
            split: false,
        }
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    /// The slot ledger.
    pub const fn ledger(&self) -> &SlotLedger {
        &self.ledger
    }

    /// The item catalog.
    pub const fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The trade session.
    pub const fn session(&self) -> &TradeSession {
        &self.session
    }

    /// The favorites list.
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Whether the inventory surface is open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a command is pending with the authority.
    pub const fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    /// Remaining time before the pending invite or active negotiation
    /// lapses, read against the current clock.
    pub fn trade_remaining(&self) -> Option<Duration> {
        self.session.remaining(Utc::now())
    }

    // -----------------------------------------------------------------------
    // Intent modifiers
    // -----------------------------------------------------------------------

    /// Set the quantity the next transfer intent asks for. Zero means the
    /// whole stack.
    pub const fn set_item_amount(&mut self, amount: u32) {
        self.item_amount = amount;
    }

    /// Set whether the split modifier is held.
    pub const fn set_split(&mut self, split: bool) {
        self.split = split;
    }

    // -----------------------------------------------------------------------
    // Push dispatch
    // -----------------------------------------------------------------------

    /// Apply an authoritative push event.
    ///
    /// Pushes are applied in delivery order; a push that cannot be applied
    /// is logged and dropped rather than bubbled, since there is no caller
    /// to answer to.
    pub fn handle_push(&mut self, push: Push) {
        match push {
            Push::Init(setup) => {
                self.ledger.setup(setup.left_inventory, setup.right_inventory);
                self.open = true;
                info!("Inventory surface opened");
            }
            Push::RegisterItem(spec) => {
                debug!(item = %spec.name, "Item definition registered");
                self.catalog.register(spec);
            }
            Push::ContainerWeight { container, weight } => {
                self.refresh_container_weight(&container, weight);
            }
            Push::CloseInventory => {
                self.open = false;
                // An unanswered invite dies with the surface; an active
                // negotiation survives until the authority closes it.
                if self.session.is_invited() {
                    self.session.apply_closed();
                }
                info!("Inventory surface closed");
            }
            Push::TradeInvite(invite) => {
                if let Err(error) = self.session.receive_invite(invite) {
                    debug!(%error, "Trade invite ignored");
                }
            }
            Push::TradeState(snapshot) => self.session.apply_state(snapshot),
            Push::TradeClosed => self.session.apply_closed(),
        }
    }

    /// Update the weight of the left-inventory slot linked to the given
    /// container.
    fn refresh_container_weight(&mut self, container: &InventoryId, weight: u32) {
        let left_id = self.ledger.left().id.clone();
        let linked = self
            .ledger
            .left()
            .items
            .iter()
            .find(|slot| {
                slot.metadata
                    .as_ref()
                    .is_some_and(|m| metadata::container_link(m) == Some(container.as_str()))
            })
            .cloned();
        let Some(mut slot) = linked else {
            debug!(%container, "No slot linked to container, weight push dropped");
            return;
        };
        slot.weight = Some(weight);
        if let Err(error) = self.ledger.apply_slot_update(&left_id, slot) {
            warn!(%error, %container, "Container weight update failed");
        }
    }

    // -----------------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------------

    /// Handle a drop intent from `source` to `target`.
    ///
    /// Resolves the quantity from the current amount and split modifier,
    /// classifies the operation, applies it optimistically, and dispatches
    /// it. A rejection or channel failure rolls the ledger back verbatim.
    /// Intents arriving while a command is pending are dropped.
    pub async fn request_transfer(
        &mut self,
        source: SlotRef,
        target: SlotRef,
    ) -> Result<(), ClientError> {
        if !self.open {
            return Err(ClientError::NotOpen);
        }
        if self.coordinator.is_busy() {
            debug!("Transfer intent dropped, command pending");
            return Ok(());
        }

        let available = self
            .ledger
            .slot(&source.inventory, source.slot)?
            .map_or(0, Slot::item_count);
        let count = resolve_amount(self.item_amount, available, self.split);
        let request = TransferRequest {
            source,
            target,
            count,
        };

        let op = classify(&self.ledger, &self.catalog, &request)?;
        self.coordinator.begin(&self.ledger)?;
        let applied = match op {
            TransferOp::Move => move_slots(&mut self.ledger, &self.catalog, &request),
            TransferOp::Swap => swap_slots(&mut self.ledger, &request),
            TransferOp::Stack => stack_slots(&mut self.ledger, &self.catalog, &request),
        };
        if let Err(error) = applied {
            // Advisory check failed before any mutation took hold; settle
            // the coordinator so the next intent can proceed.
            self.coordinator.reject(&mut self.ledger)?;
            return Err(error.into());
        }

        match self.authority.request(Request::TransferItems(request)).await {
            Ok(()) => {
                self.coordinator.fulfill()?;
                Ok(())
            }
            Err(error) => {
                self.coordinator.reject(&mut self.ledger)?;
                Err(error.into())
            }
        }
    }

    /// Handle a quick-move intent: send a stack to the other inventory
    /// without an explicit target, stacking onto an existing pile when
    /// possible and taking the first empty slot otherwise.
    pub async fn quick_transfer(&mut self, source: SlotRef) -> Result<(), ClientError> {
        if !self.open {
            return Err(ClientError::NotOpen);
        }
        let name = self
            .ledger
            .slot(&source.inventory, source.slot)?
            .and_then(|s| s.name.clone())
            .ok_or(TransferError::EmptySource { slot: source.slot })?;
        let destination = match self.ledger.side_of(&source.inventory) {
            Some(LedgerSide::Left) => self.ledger.right(),
            Some(LedgerSide::Right) | None => self.ledger.left(),
        };
        let target = SlotRef {
            inventory: destination.id.clone(),
            slot: find_transfer_target(&self.catalog, destination, &name)?,
        };
        self.request_transfer(source, target).await
    }

    // -----------------------------------------------------------------------
    // Trade lifecycle
    // -----------------------------------------------------------------------

    /// Create a local `Invited` session, as if the given player had sent an
    /// invite. Uses the configured default expiry; an expiry too large for
    /// the clock arithmetic falls back to 30 seconds.
    pub fn simulate_invite(&mut self, from: PlayerRef) -> Result<InviteId, ClientError> {
        let lifetime = i64::try_from(self.config.invite_expiry_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::seconds(30));
        let invite = TradeInvite {
            id: InviteId::new(),
            from,
            expires_at: Utc::now() + lifetime,
        };
        let id = invite.id;
        self.session.receive_invite(invite)?;
        Ok(id)
    }

    /// Accept the pending invite. The session stays `Invited` until the
    /// authority pushes the trade state.
    pub async fn accept_invite(&mut self) -> Result<(), ClientError> {
        let trade_id = self.session.accept()?.id;
        self.authority
            .request(Request::TradeRespond {
                trade_id,
                accepted: true,
            })
            .await?;
        Ok(())
    }

    /// Decline the pending invite and return to `Idle`.
    pub async fn decline_invite(&mut self) -> Result<(), ClientError> {
        let invite = self.session.decline()?;
        self.authority
            .request(Request::TradeRespond {
                trade_id: invite.id,
                accepted: false,
            })
            .await?;
        Ok(())
    }

    /// Offer units from an own-inventory slot to the active trade.
    ///
    /// The offer lands at `target`, or one past the highest occupied offer
    /// slot when no target is given. It is added locally first; a channel
    /// failure reverts it.
    pub async fn offer_item(
        &mut self,
        slot: u32,
        count: u32,
        target: Option<u32>,
    ) -> Result<(), ClientError> {
        let trade_id = self
            .session
            .negotiation()
            .ok_or(TradeError::NotTrading)?
            .trade_id;
        let left_id = self.ledger.left().id.clone();
        let base = self
            .ledger
            .slot(&left_id, slot)?
            .cloned()
            .unwrap_or(Slot::empty(slot));
        let count = resolve_amount(count, base.item_count(), self.split);
        let trade_slot = match target {
            Some(explicit) => explicit,
            None => self.session.next_offer_slot()?,
        };
        let offer = offer_from_slot(&base, trade_slot, count)?;
        self.session.offer_add(offer)?;

        match self
            .authority
            .request(Request::TradeOfferItem {
                trade_id,
                slot,
                count,
            })
            .await
        {
            Ok(()) => Ok(()),
            Err(error) => {
                if let Err(revert) = self.session.offer_remove(trade_slot) {
                    warn!(%revert, "Offer revert failed after channel error");
                }
                Err(error.into())
            }
        }
    }

    /// Withdraw the own offer at the given offer-list slot.
    pub async fn remove_offer(&mut self, slot: u32) -> Result<(), ClientError> {
        let trade_id = self
            .session
            .negotiation()
            .ok_or(TradeError::NotTrading)?
            .trade_id;
        let removed = self.session.offer_remove(slot)?;

        match self
            .authority
            .request(Request::TradeRemoveItem { trade_id, slot })
            .await
        {
            Ok(()) => Ok(()),
            Err(error) => {
                if let Err(revert) = self.session.offer_add(removed) {
                    warn!(%revert, "Offer restore failed after channel error");
                }
                Err(error.into())
            }
        }
    }

    /// Confirm the current offers.
    ///
    /// Validation runs first; a failing trade is refused without touching
    /// the session or the wire. On success the local flag is set
    /// optimistically and the authoritative trade state reconciles it.
    pub async fn confirm_trade(&mut self) -> Result<(), ClientError> {
        let (trade_id, validation) = {
            let negotiation = self.session.negotiation().ok_or(TradeError::NotTrading)?;
            let validation = validate_trade_items(
                &self.catalog,
                &negotiation.offers.own,
                &negotiation.offers.partner,
                self.ledger.left(),
            );
            (negotiation.trade_id, validation)
        };
        if !validation.is_valid {
            return Err(ClientError::ValidationFailed {
                reason: validation.reason.unwrap_or(ValidationReason::InvalidItems),
                invalid_items: validation.invalid_items,
            });
        }

        self.session.confirm_own()?;
        match self
            .authority
            .request(Request::TradeConfirm { trade_id })
            .await
        {
            Ok(()) => Ok(()),
            Err(error) => {
                if let Err(revert) = self.session.unconfirm_own() {
                    warn!(%revert, "Confirmation revert failed after channel error");
                }
                Err(error.into())
            }
        }
    }

    /// Request completion of the exchange once both sides have confirmed.
    ///
    /// Carries both item lists so the authority can re-validate against the
    /// exact offers the parties saw. Completion itself still arrives as an
    /// authoritative `tradeClosed` push; the session stays `Active` until
    /// then.
    pub async fn finalize_trade(&mut self) -> Result<(), ClientError> {
        let (target_player_id, player_items, target_items, confirmed) = {
            let negotiation = self.session.negotiation().ok_or(TradeError::NotTrading)?;
            (
                negotiation.partner.id,
                negotiation.offers.own.clone(),
                negotiation.offers.partner.clone(),
                negotiation.confirmations.own && negotiation.confirmations.partner,
            )
        };
        if !confirmed {
            return Err(TradeError::NotConfirmed.into());
        }
        self.authority
            .request(Request::ConfirmTrade {
                target_player_id,
                player_items,
                target_items,
            })
            .await?;
        Ok(())
    }

    /// Replace both offer lists on the wire, re-syncing after a batch of
    /// local offer changes.
    pub async fn sync_offers(&mut self) -> Result<(), ClientError> {
        let (player_items, target_items) = {
            let negotiation = self.session.negotiation().ok_or(TradeError::NotTrading)?;
            (
                negotiation.offers.own.clone(),
                negotiation.offers.partner.clone(),
            )
        };
        self.authority
            .request(Request::UpdateTradeItems {
                player_items,
                target_items,
            })
            .await?;
        Ok(())
    }

    /// Cancel the active trade.
    ///
    /// The session is cleared optimistically; a late authoritative push for
    /// the same trade wins either way.
    pub async fn cancel_trade(&mut self) -> Result<(), ClientError> {
        let trade_id = self
            .session
            .negotiation()
            .ok_or(TradeError::NotTrading)?
            .trade_id;
        self.session.apply_closed();
        self.authority
            .request(Request::TradeCancel { trade_id })
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// The own-inventory view. While trading, offered quantities are held
    /// back at their source slots.
    pub fn own_view(&self) -> Vec<Slot> {
        match self.session.negotiation() {
            Some(negotiation) => reserve_own_offers(self.ledger.left(), &negotiation.offers.own),
            None => self.ledger.left().items.clone(),
        }
    }

    /// The partner trade surface: their offers overlaid on an empty grid,
    /// tagged with the offering side. `None` outside a negotiation.
    pub fn partner_offer_view(&self) -> Option<Vec<Slot>> {
        let negotiation = self.session.negotiation()?;
        let surface = Inventory::new(
            InventoryId::from("trade"),
            InventoryKind::Trade,
            self.ledger.left().slots,
        );
        Some(overlay_offers(
            &surface,
            &negotiation.offers.partner,
            OWNER_PARTNER,
            &self.catalog,
        ))
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    /// Toggle an item's favorite status and persist the list. Returns
    /// whether the item is a favorite afterwards.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let now_favorite = self.favorites.toggle(name);
        if let Err(error) = self.favorites.save(&self.config.storage_dir) {
            warn!(%error, "Failed to persist favorites");
        }
        now_favorite
    }
}
