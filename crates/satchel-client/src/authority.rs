//! The server-authoritative command channel.
//!
//! Every client intent resolves to an explicit verdict: `Ok` confirms the
//! optimistic mutation, any `Err` -- rejection or transport failure alike --
//! rolls it back. The controller is generic over the channel so tests can
//! script verdicts without a live transport.

use satchel_types::Request;

/// Errors surfaced by the authority channel.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// The authority refused the request.
    #[error("authority rejected {action}")]
    Rejected {
        /// The wire action name that was refused.
        action: &'static str,
    },

    /// The transport failed before a verdict arrived. Treated exactly like
    /// a rejection by the caller.
    #[error("authority channel failed: {detail}")]
    Channel {
        /// Transport failure detail.
        detail: String,
    },
}

/// An async request channel to the authority.
pub trait Authority {
    /// Dispatch a request and await the authority's verdict.
    async fn request(&mut self, request: Request) -> Result<(), AuthorityError>;
}
