//! Trade session state machine, offer projection, and trade validation.
//!
//! The session tracks `Idle -> Invited -> Active` under authoritative
//! control: the client requests transitions but only authority pushes make
//! them. Offers never move items; they project read-only views over the
//! ledger until the authority completes the exchange.
//!
//! # Modules
//!
//! - [`session`] -- The trade session state machine and offer negotiation
//! - [`projection`] -- Read-only trade surface and reservation views
//! - [`validate`] -- Advisory pre-confirmation checks
//! - [`error`] -- Trade session errors

pub mod error;
pub mod projection;
pub mod session;
pub mod validate;

pub use error::TradeError;
pub use projection::{overlay_offers, reserve_own_offers};
pub use session::{Negotiation, OWNER_PARTNER, OWNER_SELF, TradeSession, offer_from_slot};
pub use validate::{TradeValidation, ValidationReason, validate_trade_items};
