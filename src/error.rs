//! Error taxonomy for dialog hosting.
//!
//! All variants are precondition errors raised synchronously to the
//! immediate caller. The result future returned by a show operation never
//! carries an error: a failed show never produces a future at all.

use thiserror::Error;

/// Errors raised by dialog host operations.
#[derive(Debug, Error)]
pub enum DialogHostError {
    /// Show was called while a single-dialog host already has an open dialog.
    #[error("dialog host is already open and multiple dialogs are not supported")]
    AlreadyOpen,

    /// A close was requested but no matching dialog is open.
    #[error("dialog host does not have a current session")]
    NoCurrentSession,

    /// Registry lookup matched no attached host.
    #[error("no dialog host matches identifier {0:?}")]
    NotFound(Option<String>),

    /// Registry lookup matched more than one attached host.
    #[error("multiple dialog hosts match identifier {0:?}; set a unique identifier on each host")]
    Ambiguous(Option<String>),

    /// A closing observer cancelled a close that was not cancellable.
    #[error("cannot cancel a dialog close after the host was forced closed")]
    InvalidOperation,

    /// Show was called without content and the host has no default content.
    #[error("no dialog content: neither explicit content nor default content is set")]
    MissingContent,

    /// A session outlived its owning host.
    #[error("dialog session is no longer attached to a live host")]
    SessionDetached,
}
