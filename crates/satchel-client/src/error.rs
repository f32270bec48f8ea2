//! Error types for the client surface.

use satchel_engine::{CoordinatorError, TransferError};
use satchel_ledger::LedgerError;
use satchel_trade::{TradeError, ValidationReason};

use crate::authority::AuthorityError;

/// Errors surfaced by the inventory controller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The inventory surface is not open.
    #[error("inventory surface is not open")]
    NotOpen,

    /// A transfer failed an advisory check.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// A trade session transition was refused.
    #[error(transparent)]
    Trade(#[from] TradeError),

    /// The command coordinator refused the operation.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),

    /// A ledger lookup or update failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The trade failed pre-confirmation validation.
    #[error("trade validation failed: {reason}")]
    ValidationFailed {
        /// The first failing check.
        reason: ValidationReason,
        /// Names of own offers that cannot be honored.
        invalid_items: Vec<String>,
    },

    /// The authority channel rejected or failed the request.
    #[error(transparent)]
    Authority(#[from] AuthorityError),
}
