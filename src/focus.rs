//! Focus capture and restoration hook.
//!
//! The host framework knows what "focused element" means; this crate only
//! needs to capture it when the first dialog opens and hand it back when the
//! last dialog closes. The token is opaque to the host.

use std::any::Any;

/// Opaque handle to whatever the embedder considers the focused element.
pub type FocusToken = Box<dyn Any>;

/// Implemented by the embedding framework to save and restore input focus
/// around a dialog interaction.
pub trait FocusAdapter {
    /// Capture the currently focused element, if any.
    fn capture(&mut self) -> Option<FocusToken>;

    /// Restore focus to a previously captured element.
    fn restore(&mut self, token: FocusToken);
}
