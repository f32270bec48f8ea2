//! Client surface for the Satchel inventory system.
//!
//! Ties the data model, slot ledger, transfer engine, and trade session to
//! the authority channels: intents flow out as requests, authoritative
//! events flow in as pushes. The controller owns all client-side state and
//! enforces the optimistic apply/rollback discipline end to end.
//!
//! # Modules
//!
//! - [`controller`] -- The inventory controller
//! - [`authority`] -- The async request channel abstraction
//! - [`favorites`] -- The persisted favorites list
//! - [`config`] -- YAML client configuration
//! - [`error`] -- Client error taxonomy

pub mod authority;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;

pub use authority::{Authority, AuthorityError};
pub use config::{ClientConfig, ConfigError};
pub use controller::InventoryController;
pub use error::ClientError;
pub use favorites::{FAVORITES_FILE, Favorites};
