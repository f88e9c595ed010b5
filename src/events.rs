//! Dialog lifecycle notifications.
//!
//! One logical occurrence (opened, closing, closed) is dispatched through a
//! single routine in a fixed order: registered observers first, then the
//! host-level callback, then the handlers supplied to the show call.
//! Closing is the only cancellable notification.

use crate::host::DialogHost;
use crate::session::DialogSession;
use crate::DialogValue;

/// Arguments for the opened notification.
pub struct DialogOpenedEventArgs {
    session: DialogSession,
}

impl DialogOpenedEventArgs {
    pub(crate) fn new(session: DialogSession) -> Self {
        Self { session }
    }

    /// The session that just opened.
    pub fn session(&self) -> &DialogSession {
        &self.session
    }
}

/// Arguments for the closing notification.
///
/// Observers of a cancellable close may call [`cancel`](Self::cancel) to
/// keep the dialog open. Cancelling a close that was forced (for example by
/// setting the host's open flag to false) is a programming error and makes
/// the forcing call fail with `InvalidOperation`.
pub struct DialogClosingEventArgs {
    session: DialogSession,
    cancellable: bool,
    cancelled: bool,
}

impl DialogClosingEventArgs {
    pub(crate) fn new(session: DialogSession, cancellable: bool) -> Self {
        Self { session, cancellable, cancelled: false }
    }

    /// The session that is about to close.
    pub fn session(&self) -> &DialogSession {
        &self.session
    }

    /// The parameter the close was requested with.
    pub fn parameter(&self) -> Option<DialogValue> {
        self.session.close_parameter()
    }

    /// Whether this close request may be cancelled.
    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    /// Request that the dialog stays open.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Arguments for the closed notification.
pub struct DialogClosedEventArgs {
    session: DialogSession,
}

impl DialogClosedEventArgs {
    pub(crate) fn new(session: DialogSession) -> Self {
        Self { session }
    }

    /// The session that just ended.
    pub fn session(&self) -> &DialogSession {
        &self.session
    }

    /// The parameter the dialog was closed with.
    pub fn parameter(&self) -> Option<DialogValue> {
        self.session.close_parameter()
    }
}

/// Observer registered on a host, notified for every dialog it shows.
///
/// All methods default to no-ops so implementers only override what they
/// care about.
pub trait DialogObserver {
    fn on_opened(&self, _host: &DialogHost, _args: &DialogOpenedEventArgs) {}

    fn on_closing(&self, _host: &DialogHost, _args: &mut DialogClosingEventArgs) {}

    fn on_closed(&self, _host: &DialogHost, _args: &DialogClosedEventArgs) {}
}

/// Handlers scoped to a single show call.
///
/// These observe the lifecycle of one dialog without subscribing to the
/// host's broadcast channel.
#[derive(Default)]
pub struct ShowHandlers {
    pub(crate) opened: Option<Box<dyn Fn(&DialogOpenedEventArgs)>>,
    pub(crate) closing: Option<Box<dyn Fn(&mut DialogClosingEventArgs)>>,
    pub(crate) closed: Option<Box<dyn Fn(&DialogClosedEventArgs)>>,
}

impl ShowHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_opened(mut self, f: impl Fn(&DialogOpenedEventArgs) + 'static) -> Self {
        self.opened = Some(Box::new(f));
        self
    }

    pub fn on_closing(mut self, f: impl Fn(&mut DialogClosingEventArgs) + 'static) -> Self {
        self.closing = Some(Box::new(f));
        self
    }

    pub fn on_closed(mut self, f: impl Fn(&DialogClosedEventArgs) + 'static) -> Self {
        self.closed = Some(Box::new(f));
        self
    }
}
