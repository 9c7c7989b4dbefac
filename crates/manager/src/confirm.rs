//! Confirmation collaborator.
//!
//! The replace and take workflows suspend until the user answers a modal.
//! The UI owns the modal; this is the contract the manager drives it
//! through. Cancellation is explicit and simply discards the pending action.

use std::sync::Arc;

/// User's answer to a confirmation prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// Modal confirmation UI (black box).
pub trait ConfirmationPrompt: Send + Sync {
    fn request(&self, message: &str) -> Decision;
}

impl<P> ConfirmationPrompt for Arc<P>
where
    P: ConfirmationPrompt + ?Sized,
{
    fn request(&self, message: &str) -> Decision {
        (**self).request(message)
    }
}
