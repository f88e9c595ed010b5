//! Framework-agnostic modal dialog hosting.
//!
//! A [`DialogHost`] docks dialogs at one point of a layout tree: showing
//! returns a future that resolves with the close parameter once the dialog
//! ends, closing is cancellable by observers, and multiple dialogs can be
//! stacked when enabled. Placement of each dialog inside the available
//! area is delegated to a pluggable [`DialogPopupPositioner`].
//!
//! Everything is single-threaded and cooperative: state transitions and
//! notification dispatch run synchronously on the caller's thread, and the
//! show future is fulfilled from within the close routine. The embedding
//! UI framework supplies rendering, input routing, focus (via
//! [`FocusAdapter`]) and drives the arrange pass.

mod error;
mod events;
mod focus;
mod geometry;
mod host;
mod popup_host;
mod positioner;
mod registry;
mod session;

use std::any::Any;
use std::rc::Rc;

/// Opaque caller-defined value used for dialog content, templates and
/// close parameters. Content identity is pointer equality.
pub type DialogValue = Rc<dyn Any>;

pub use error::DialogHostError;
pub use events::{
    DialogClosedEventArgs, DialogClosingEventArgs, DialogObserver, DialogOpenedEventArgs,
    ShowHandlers,
};
pub use focus::{FocusAdapter, FocusToken};
pub use geometry::{HorizontalAlignment, Point, Rect, Size, Thickness, VerticalAlignment};
pub use host::{DialogCommand, DialogHost};
pub use popup_host::{DialogOverlayPopupHost, DialogResultFuture, DialogShowFuture};
pub use positioner::{
    AlignedDialogPopupPositioner, CenteredDialogPopupPositioner, DialogPopupPositioner,
};
pub use registry::DialogRegistry;
pub use session::DialogSession;
