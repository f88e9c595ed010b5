//! Dialog host controller - owns the open/close state machine.
//!
//! A `DialogHost` tracks zero or more overlay popup hosts (one per open
//! dialog), dispatches opened/closing/closed notifications in a fixed
//! order and resolves the future returned by show when the matching
//! dialog ends. All close paths (programmatic, session, command,
//! click-away, forced teardown) funnel into one internal close routine.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::error::DialogHostError;
use crate::events::{
    DialogClosedEventArgs, DialogClosingEventArgs, DialogObserver, DialogOpenedEventArgs,
    ShowHandlers,
};
use crate::focus::{FocusAdapter, FocusToken};
use crate::geometry::{Rect, Size, Thickness};
use crate::popup_host::{DialogOverlayPopupHost, DialogShowFuture};
use crate::positioner::DialogPopupPositioner;
use crate::session::{CloseState, DialogSession};
use crate::DialogValue;

type OpenedCallback = Rc<dyn Fn(&DialogOpenedEventArgs)>;
type ClosingCallback = Rc<dyn Fn(&mut DialogClosingEventArgs)>;
type ClosedCallback = Rc<dyn Fn(&DialogClosedEventArgs)>;

pub(crate) struct HostInner {
    identifier: Option<String>,
    hosts: Vec<DialogOverlayPopupHost>,
    default_content: Option<DialogValue>,
    default_template: Option<DialogValue>,
    margin: Thickness,
    positioner: Option<Rc<dyn DialogPopupPositioner>>,
    multiple_dialogs: bool,
    close_on_click_away: bool,
    click_away_parameter: Option<DialogValue>,
    disable_opening_animation: bool,
    observers: Vec<Rc<dyn DialogObserver>>,
    opened_callback: Option<OpenedCallback>,
    closing_callback: Option<ClosingCallback>,
    closed_callback: Option<ClosedCallback>,
    focus: Option<Rc<RefCell<dyn FocusAdapter>>>,
    restore_focus: Option<FocusToken>,
    next_session_id: u64,
}

impl HostInner {
    fn new() -> Self {
        Self {
            identifier: None,
            hosts: Vec::new(),
            default_content: None,
            default_template: None,
            margin: Thickness::default(),
            positioner: None,
            multiple_dialogs: false,
            close_on_click_away: false,
            click_away_parameter: None,
            disable_opening_animation: false,
            observers: Vec::new(),
            opened_callback: None,
            closing_callback: None,
            closed_callback: None,
            focus: None,
            restore_focus: None,
            next_session_id: 0,
        }
    }
}

/// Controller hosting modal dialogs at one docking point.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct DialogHost {
    inner: Rc<RefCell<HostInner>>,
}

impl Default for DialogHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogHost {
    pub fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(HostInner::new())) }
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<HostInner>>) -> Self {
        Self { inner }
    }

    pub(crate) fn ptr_eq(&self, other: &DialogHost) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // Builder-style configuration

    pub fn with_identifier(self, identifier: impl Into<String>) -> Self {
        self.inner.borrow_mut().identifier = Some(identifier.into());
        self
    }

    pub fn with_multiple_dialogs(self, supported: bool) -> Self {
        self.inner.borrow_mut().multiple_dialogs = supported;
        self
    }

    pub fn with_margin(self, margin: Thickness) -> Self {
        self.inner.borrow_mut().margin = margin;
        self
    }

    pub fn with_close_on_click_away(self, close: bool) -> Self {
        self.inner.borrow_mut().close_on_click_away = close;
        self
    }

    // Configuration

    pub fn identifier(&self) -> Option<String> {
        self.inner.borrow().identifier.clone()
    }

    pub fn set_identifier(&self, identifier: Option<String>) {
        self.inner.borrow_mut().identifier = identifier;
    }

    pub fn is_multiple_dialogs_supported(&self) -> bool {
        self.inner.borrow().multiple_dialogs
    }

    pub fn set_multiple_dialogs_supported(&self, supported: bool) {
        self.inner.borrow_mut().multiple_dialogs = supported;
    }

    /// Fallback content used when show is called without explicit content.
    /// Explicit content always wins when both are present.
    pub fn set_default_content(&self, content: Option<DialogValue>) {
        self.inner.borrow_mut().default_content = content;
    }

    pub fn set_default_template(&self, template: Option<DialogValue>) {
        self.inner.borrow_mut().default_template = template;
    }

    pub fn set_margin(&self, margin: Thickness) {
        let mut inner = self.inner.borrow_mut();
        inner.margin = margin;
        for host in &mut inner.hosts {
            host.set_margin(margin);
        }
    }

    /// Replace the placement strategy for this host and its active slots.
    pub fn set_positioner(&self, positioner: Option<Rc<dyn DialogPopupPositioner>>) {
        let mut inner = self.inner.borrow_mut();
        inner.positioner = positioner.clone();
        for host in &mut inner.hosts {
            host.set_positioner(positioner.clone());
        }
    }

    pub fn set_close_on_click_away(&self, close: bool) {
        self.inner.borrow_mut().close_on_click_away = close;
    }

    /// Parameter delivered when a dialog is closed by clicking away.
    pub fn set_close_on_click_away_parameter(&self, parameter: Option<DialogValue>) {
        self.inner.borrow_mut().click_away_parameter = parameter;
    }

    pub fn set_disable_opening_animation(&self, disable: bool) {
        self.inner.borrow_mut().disable_opening_animation = disable;
    }

    pub fn set_focus_adapter(&self, adapter: impl FocusAdapter + 'static) {
        self.inner.borrow_mut().focus = Some(Rc::new(RefCell::new(adapter)));
    }

    // Notification wiring

    pub fn add_observer(&self, observer: Rc<dyn DialogObserver>) {
        self.inner.borrow_mut().observers.push(observer);
    }

    pub fn set_opened_callback(&self, callback: impl Fn(&DialogOpenedEventArgs) + 'static) {
        self.inner.borrow_mut().opened_callback = Some(Rc::new(callback));
    }

    pub fn set_closing_callback(&self, callback: impl Fn(&mut DialogClosingEventArgs) + 'static) {
        self.inner.borrow_mut().closing_callback = Some(Rc::new(callback));
    }

    pub fn set_closed_callback(&self, callback: impl Fn(&DialogClosedEventArgs) + 'static) {
        self.inner.borrow_mut().closed_callback = Some(Rc::new(callback));
    }

    // Queries

    /// True iff at least one dialog is open.
    pub fn is_open(&self) -> bool {
        !self.inner.borrow().hosts.is_empty()
    }

    /// The most recently shown (or popped) session, if any.
    pub fn current_session(&self) -> Option<DialogSession> {
        self.inner.borrow().hosts.last().map(|host| host.session().clone())
    }

    /// All open sessions in active-list order, oldest first.
    pub fn current_sessions(&self) -> Vec<DialogSession> {
        self.inner
            .borrow()
            .hosts
            .iter()
            .map(|host| host.session().clone())
            .collect()
    }

    // Show

    /// Show a dialog and get a future resolving with its close parameter.
    ///
    /// `content` falls back to the host's default content; errors with
    /// `MissingContent` when both are absent, and with `AlreadyOpen` when
    /// multiple dialogs are not supported and one is open. Showing content
    /// that is already active pops the existing dialog to the front and
    /// returns its pending future instead of creating a new session.
    pub fn show(&self, content: Option<DialogValue>) -> Result<DialogShowFuture, DialogHostError> {
        self.show_with(content, ShowHandlers::new())
    }

    /// [`show`](Self::show) with handlers scoped to this one dialog.
    pub fn show_with(
        &self,
        content: Option<DialogValue>,
        handlers: ShowHandlers,
    ) -> Result<DialogShowFuture, DialogHostError> {
        let (future, session, was_empty) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.multiple_dialogs && !inner.hosts.is_empty() {
                return Err(DialogHostError::AlreadyOpen);
            }

            let resolved = content
                .clone()
                .or_else(|| inner.default_content.clone())
                .ok_or(DialogHostError::MissingContent)?;

            if let Some(explicit) = &content {
                if let Some(index) = inner
                    .hosts
                    .iter()
                    .position(|host| Rc::ptr_eq(host.content(), explicit))
                {
                    let mut host = inner.hosts.remove(index);
                    host.pop();
                    let future = host.result_future();
                    inner.hosts.push(host);
                    debug!("show: content already active, popped to front");
                    return Ok(future);
                }
            }

            let id = inner.next_session_id;
            inner.next_session_id += 1;
            let session = DialogSession {
                host: Rc::downgrade(&self.inner),
                state: Rc::new(RefCell::new(CloseState::Open)),
                handlers: Rc::new(handlers),
                id,
            };
            let host = DialogOverlayPopupHost::new(
                session.clone(),
                resolved,
                inner.default_template.clone(),
                inner.margin,
                inner.positioner.clone(),
                inner.disable_opening_animation,
            );
            let future = host.result_future();
            let was_empty = inner.hosts.is_empty();
            inner.hosts.push(host);
            debug!("dialog {} opened", id);
            (future, session, was_empty)
        };

        if was_empty {
            self.capture_focus();
        }
        self.dispatch_opened(&session);
        Ok(future)
    }

    /// Open the default content, or force-close everything.
    ///
    /// Mirrors a two-way bound open flag: setting it true on a closed host
    /// shows the default content, setting it false closes every open
    /// dialog without allowing cancellation.
    pub fn set_open(&self, open: bool) -> Result<(), DialogHostError> {
        if open {
            if self.is_open() {
                return Ok(());
            }
            self.show(None).map(|_| ())
        } else {
            self.close_all()
        }
    }

    // Close

    /// Close the current (most recent) dialog.
    pub fn close(&self, parameter: Option<DialogValue>) -> Result<(), DialogHostError> {
        let session = self
            .current_session()
            .ok_or(DialogHostError::NoCurrentSession)?;
        self.internal_close(session.id, parameter, true)
    }

    /// Close the dialog displaying `content` (pointer identity).
    pub fn close_content(
        &self,
        content: &DialogValue,
        parameter: Option<DialogValue>,
    ) -> Result<(), DialogHostError> {
        let session = {
            let inner = self.inner.borrow();
            inner
                .hosts
                .iter()
                .find(|host| Rc::ptr_eq(host.content(), content))
                .map(|host| host.session().clone())
        };
        let session = session.ok_or(DialogHostError::NoCurrentSession)?;
        self.internal_close(session.id, parameter, true)
    }

    /// Force-close every open dialog, newest first.
    ///
    /// The closing notification still runs but is not cancellable; an
    /// observer that cancels anyway is a programming error surfaced as
    /// `InvalidOperation`.
    pub fn close_all(&self) -> Result<(), DialogHostError> {
        let sessions: Vec<DialogSession> = {
            let inner = self.inner.borrow();
            inner
                .hosts
                .iter()
                .rev()
                .map(|host| host.session().clone())
                .collect()
        };
        for session in sessions {
            if session.is_ended() {
                continue;
            }
            self.internal_close(session.id, session.close_parameter(), false)?;
        }
        Ok(())
    }

    /// Notify the host that the overlay background was clicked.
    ///
    /// Closes the current dialog with the configured click-away parameter
    /// when close-on-click-away is enabled; otherwise does nothing.
    pub fn click_away(&self) -> Result<(), DialogHostError> {
        let (enabled, parameter, session) = {
            let inner = self.inner.borrow();
            (
                inner.close_on_click_away,
                inner.click_away_parameter.clone(),
                inner.hosts.last().map(|host| host.session().clone()),
            )
        };
        if enabled {
            if let Some(session) = session {
                return self.internal_close(session.id, parameter, true);
            }
        }
        Ok(())
    }

    /// Bring an already-active dialog to the front without creating a new
    /// session. Returns whether matching content was found.
    pub fn pop(&self, content: &DialogValue) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner
            .hosts
            .iter()
            .position(|host| Rc::ptr_eq(host.content(), content))
        {
            Some(index) => {
                let mut host = inner.hosts.remove(index);
                host.pop();
                inner.hosts.push(host);
                debug!("dialog popped to front");
                true
            }
            None => false,
        }
    }

    // Commands

    /// Command that shows a dialog with the command parameter as content.
    pub fn open_dialog_command(&self) -> DialogCommand {
        DialogCommand { inner: Rc::downgrade(&self.inner), kind: CommandKind::Open }
    }

    /// Command that closes the current dialog with the command parameter.
    pub fn close_dialog_command(&self) -> DialogCommand {
        DialogCommand { inner: Rc::downgrade(&self.inner), kind: CommandKind::Close }
    }

    // Layout integration

    /// Run an arrange pass over every active slot, oldest first.
    ///
    /// `measure` supplies the desired size for a slot's content; the
    /// returned rectangles are final placements within `available`.
    pub fn arrange_active(
        &self,
        available: Size,
        scale: f64,
        mut measure: impl FnMut(&DialogValue) -> Size,
    ) -> Vec<Rect> {
        let mut inner = self.inner.borrow_mut();
        inner
            .hosts
            .iter_mut()
            .map(|host| {
                let desired = measure(host.content());
                host.arrange(desired, available, scale)
            })
            .collect()
    }

    /// Access the active slots for embedder bookkeeping (flags, per-slot
    /// positioners, arrange requests).
    pub fn with_active_hosts<R>(&self, f: impl FnOnce(&mut [DialogOverlayPopupHost]) -> R) -> R {
        f(&mut self.inner.borrow_mut().hosts)
    }

    // Internal close routine - every close path ends up here.

    pub(crate) fn internal_close(
        &self,
        session_id: u64,
        parameter: Option<DialogValue>,
        cancellable: bool,
    ) -> Result<(), DialogHostError> {
        let (session, observers, closing_callback) = {
            let inner = self.inner.borrow();
            let host = inner
                .hosts
                .iter()
                .find(|host| host.session_id() == session_id)
                .ok_or(DialogHostError::NoCurrentSession)?;
            (
                host.session().clone(),
                inner.observers.clone(),
                inner.closing_callback.clone(),
            )
        };

        // A close already in flight (or finished) for this session is a no-op.
        if !session.is_open() {
            return Ok(());
        }
        session.set_state(CloseState::PendingClose(parameter.clone()));
        debug!("dialog {} closing (cancellable: {})", session_id, cancellable);

        let mut args = DialogClosingEventArgs::new(session.clone(), cancellable);
        for observer in &observers {
            observer.on_closing(self, &mut args);
        }
        if let Some(callback) = &closing_callback {
            callback(&mut args);
        }
        if let Some(handler) = &session.handlers.closing {
            handler(&mut args);
        }

        if args.is_cancelled() {
            session.set_state(CloseState::Open);
            if !cancellable {
                return Err(DialogHostError::InvalidOperation);
            }
            debug!("dialog {} close cancelled", session_id);
            return Ok(());
        }

        session.set_state(CloseState::Ended(parameter.clone()));
        self.finish_close(session_id, parameter)
    }

    fn finish_close(
        &self,
        session_id: u64,
        parameter: Option<DialogValue>,
    ) -> Result<(), DialogHostError> {
        let (mut host, emptied, observers, closed_callback, focus, token) = {
            let mut inner = self.inner.borrow_mut();
            let index = inner
                .hosts
                .iter()
                .position(|host| host.session_id() == session_id);
            let Some(index) = index else {
                return Ok(());
            };
            let host = inner.hosts.remove(index);
            let emptied = inner.hosts.is_empty();
            let token = if emptied { inner.restore_focus.take() } else { None };
            (
                host,
                emptied,
                inner.observers.clone(),
                inner.closed_callback.clone(),
                inner.focus.clone(),
                token,
            )
        };

        host.mark_closed();
        if let Some(tx) = host.take_result_sender() {
            let _ = tx.send(parameter);
        }
        debug!("dialog {} closed", session_id);

        let session = host.session().clone();
        let args = DialogClosedEventArgs::new(session.clone());
        for observer in &observers {
            observer.on_closed(self, &args);
        }
        if let Some(callback) = &closed_callback {
            callback(&args);
        }
        if let Some(handler) = &session.handlers.closed {
            handler(&args);
        }

        if emptied {
            if let (Some(adapter), Some(token)) = (focus, token) {
                adapter.borrow_mut().restore(token);
            }
        }
        Ok(())
    }

    fn capture_focus(&self) {
        let focus = self.inner.borrow().focus.clone();
        if let Some(adapter) = focus {
            let token = adapter.borrow_mut().capture();
            self.inner.borrow_mut().restore_focus = token;
        }
    }

    fn dispatch_opened(&self, session: &DialogSession) {
        let (observers, callback) = {
            let inner = self.inner.borrow();
            (inner.observers.clone(), inner.opened_callback.clone())
        };
        let args = DialogOpenedEventArgs::new(session.clone());
        for observer in &observers {
            observer.on_opened(self, &args);
        }
        if let Some(callback) = callback {
            callback(&args);
        }
        if let Some(handler) = &session.handlers.opened {
            handler(&args);
        }
    }
}

enum CommandKind {
    Open,
    Close,
}

/// Value object suitable for declarative command binding.
///
/// Holds a weak reference to its host; a command outliving the host
/// reports `can_execute` false and fails execution with `SessionDetached`.
pub struct DialogCommand {
    inner: Weak<RefCell<HostInner>>,
    kind: CommandKind,
}

impl DialogCommand {
    pub fn can_execute(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                let open = !inner.borrow().hosts.is_empty();
                match self.kind {
                    CommandKind::Open => !open,
                    CommandKind::Close => open,
                }
            }
            None => false,
        }
    }

    /// Execute the command. For the open command the parameter is the
    /// dialog content; for the close command it is the close parameter.
    pub fn execute(&self, parameter: Option<DialogValue>) -> Result<(), DialogHostError> {
        let inner = self.inner.upgrade().ok_or(DialogHostError::SessionDetached)?;
        let host = DialogHost::from_inner(inner);
        match self.kind {
            CommandKind::Open => host.show(parameter).map(|_| ()),
            CommandKind::Close => host.close(parameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::cell::Cell;

    fn text(value: &str) -> DialogValue {
        Rc::new(value.to_string()) as DialogValue
    }

    fn as_text(parameter: Option<DialogValue>) -> Option<String> {
        parameter.and_then(|value| value.downcast_ref::<String>().cloned())
    }

    #[test]
    fn test_show_close_resolves_future_with_parameter() {
        let host = DialogHost::new();
        let future = host.show(Some(text("dialog"))).unwrap();
        assert!(host.is_open());

        host.close(Some(text("result"))).unwrap();
        assert!(!host.is_open());
        assert_eq!(as_text(block_on(future.clone())), Some("result".to_string()));
        // Shared future: a second await observes the same single resolution
        assert_eq!(as_text(block_on(future)), Some("result".to_string()));
    }

    #[test]
    fn test_close_without_open_dialog_fails() {
        let host = DialogHost::new();
        assert!(matches!(host.close(None), Err(DialogHostError::NoCurrentSession)));

        // Still empty after a show/close cycle
        let _future = host.show(Some(text("dialog"))).unwrap();
        host.close(None).unwrap();
        assert!(matches!(host.close(None), Err(DialogHostError::NoCurrentSession)));
    }

    #[test]
    fn test_second_show_fails_when_single_dialog() {
        let host = DialogHost::new();
        let _future = host.show(Some(text("first"))).unwrap();
        let err = host.show(Some(text("second"))).unwrap_err();
        assert!(matches!(err, DialogHostError::AlreadyOpen));
    }

    #[test]
    fn test_show_without_any_content_fails() {
        let host = DialogHost::new();
        assert!(matches!(host.show(None), Err(DialogHostError::MissingContent)));

        host.set_default_content(Some(text("default")));
        let _future = host.show(None).unwrap();
        assert!(host.is_open());
    }

    #[test]
    fn test_cancelled_close_keeps_dialog_open() {
        let host = DialogHost::new();
        let allow_close = Rc::new(Cell::new(false));
        let allow = allow_close.clone();
        let handlers = ShowHandlers::new().on_closing(move |args| {
            if !allow.get() {
                args.cancel();
            }
        });
        let future = host.show_with(Some(text("dialog")), handlers).unwrap();
        let session = host.current_session().unwrap();

        host.close(Some(text("ignored"))).unwrap();
        assert!(host.is_open());
        assert!(!session.is_ended());
        assert!(future.clone().now_or_never().is_none());

        allow_close.set(true);
        host.close(Some(text("done"))).unwrap();
        assert!(session.is_ended());
        assert_eq!(as_text(block_on(future)), Some("done".to_string()));
    }

    #[test]
    fn test_closing_middle_dialog_leaves_others_ordered() {
        let host = DialogHost::new().with_multiple_dialogs(true);
        let (c1, c2, c3) = (text("one"), text("two"), text("three"));
        let f1 = host.show(Some(c1.clone())).unwrap();
        let f2 = host.show(Some(c2.clone())).unwrap();
        let f3 = host.show(Some(c3.clone())).unwrap();

        host.close_content(&c2, Some(text("middle"))).unwrap();

        assert_eq!(as_text(block_on(f2)), Some("middle".to_string()));
        assert!(f1.now_or_never().is_none());
        assert!(f3.now_or_never().is_none());

        // Remaining dialogs keep their relative order
        host.with_active_hosts(|hosts| {
            assert_eq!(hosts.len(), 2);
            assert!(Rc::ptr_eq(hosts[0].content(), &c1));
            assert!(Rc::ptr_eq(hosts[1].content(), &c3));
        });
    }

    #[test]
    fn test_reshow_pops_instead_of_duplicating() {
        let host = DialogHost::new().with_multiple_dialogs(true);
        let (c1, c2) = (text("one"), text("two"));
        let f1 = host.show(Some(c1.clone())).unwrap();
        let _f2 = host.show(Some(c2.clone())).unwrap();

        let f1_again = host.show(Some(c1.clone())).unwrap();
        host.with_active_hosts(|hosts| {
            assert_eq!(hosts.len(), 2);
            assert!(Rc::ptr_eq(hosts[1].content(), &c1), "popped host moves to the end");
        });

        // Both futures resolve from the one close
        host.close(Some(text("bye"))).unwrap();
        assert_eq!(as_text(block_on(f1)), Some("bye".to_string()));
        assert_eq!(as_text(block_on(f1_again)), Some("bye".to_string()));
    }

    #[test]
    fn test_forced_close_cancel_is_invalid_operation() {
        let host = DialogHost::new();
        let handlers = ShowHandlers::new().on_closing(|args| args.cancel());
        let _future = host.show_with(Some(text("stubborn")), handlers).unwrap();

        let err = host.set_open(false).unwrap_err();
        assert!(matches!(err, DialogHostError::InvalidOperation));
        // The offending dialog is still open
        assert!(host.is_open());
    }

    #[test]
    fn test_set_open_true_shows_default_content() {
        let host = DialogHost::new();
        assert!(matches!(host.set_open(true), Err(DialogHostError::MissingContent)));

        host.set_default_content(Some(text("default")));
        host.set_open(true).unwrap();
        assert!(host.is_open());
        // Idempotent while open
        host.set_open(true).unwrap();
        assert_eq!(host.current_sessions().len(), 1);

        host.set_open(false).unwrap();
        assert!(!host.is_open());
    }

    #[test]
    fn test_click_away_respects_flag_and_parameter() {
        let host = DialogHost::new();
        let future = host.show(Some(text("dialog"))).unwrap();

        host.click_away().unwrap();
        assert!(host.is_open(), "click-away disabled by default");

        host.set_close_on_click_away(true);
        host.set_close_on_click_away_parameter(Some(text("away")));
        host.click_away().unwrap();
        assert!(!host.is_open());
        assert_eq!(as_text(block_on(future)), Some("away".to_string()));

        // No-op when nothing is open
        host.click_away().unwrap();
    }

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl DialogObserver for Recorder {
        fn on_opened(&self, _host: &DialogHost, _args: &DialogOpenedEventArgs) {
            self.log.borrow_mut().push("observer:opened".into());
        }

        fn on_closing(&self, _host: &DialogHost, _args: &mut DialogClosingEventArgs) {
            self.log.borrow_mut().push("observer:closing".into());
        }

        fn on_closed(&self, _host: &DialogHost, _args: &DialogClosedEventArgs) {
            self.log.borrow_mut().push("observer:closed".into());
        }
    }

    #[test]
    fn test_notification_dispatch_order() {
        let host = DialogHost::new();
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        host.add_observer(Rc::new(Recorder { log: log.clone() }));
        let l = log.clone();
        host.set_opened_callback(move |_| l.borrow_mut().push("callback:opened".into()));
        let l = log.clone();
        host.set_closing_callback(move |_| l.borrow_mut().push("callback:closing".into()));
        let l = log.clone();
        host.set_closed_callback(move |_| l.borrow_mut().push("callback:closed".into()));

        let l = log.clone();
        let l2 = log.clone();
        let l3 = log.clone();
        let handlers = ShowHandlers::new()
            .on_opened(move |_| l.borrow_mut().push("handler:opened".into()))
            .on_closing(move |_| l2.borrow_mut().push("handler:closing".into()))
            .on_closed(move |_| l3.borrow_mut().push("handler:closed".into()));

        let _future = host.show_with(Some(text("dialog")), handlers).unwrap();
        host.close(None).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "observer:opened",
                "callback:opened",
                "handler:opened",
                "observer:closing",
                "callback:closing",
                "handler:closing",
                "observer:closed",
                "callback:closed",
                "handler:closed",
            ]
        );
    }

    #[test]
    fn test_closing_args_expose_parameter_and_session() {
        let host = DialogHost::new();
        let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let handlers = ShowHandlers::new().on_closing(move |args| {
            assert!(args.is_cancellable());
            assert!(!args.session().is_ended(), "session not ended until dispatch completes");
            *s.borrow_mut() = as_text(args.parameter());
        });
        let _future = host.show_with(Some(text("dialog")), handlers).unwrap();
        host.close(Some(text("why"))).unwrap();
        assert_eq!(*seen.borrow(), Some("why".to_string()));
    }

    struct FocusLog {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl FocusAdapter for FocusLog {
        fn capture(&mut self) -> Option<FocusToken> {
            self.log.borrow_mut().push("capture".into());
            Some(Box::new("editor".to_string()))
        }

        fn restore(&mut self, token: FocusToken) {
            let element = token.downcast::<String>().unwrap();
            self.log.borrow_mut().push(format!("restore:{element}"));
        }
    }

    #[test]
    fn test_focus_captured_on_first_open_and_restored_on_last_close() {
        let host = DialogHost::new().with_multiple_dialogs(true);
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        host.set_focus_adapter(FocusLog { log: log.clone() });

        let (c1, c2) = (text("one"), text("two"));
        let _f1 = host.show(Some(c1.clone())).unwrap();
        let _f2 = host.show(Some(c2.clone())).unwrap();
        assert_eq!(*log.borrow(), vec!["capture"], "only the first open captures");

        host.close_content(&c1, None).unwrap();
        assert_eq!(*log.borrow(), vec!["capture"], "focus held while dialogs remain");

        host.close_content(&c2, None).unwrap();
        assert_eq!(*log.borrow(), vec!["capture", "restore:editor"]);
    }

    #[test]
    fn test_commands_track_open_state() {
        let host = DialogHost::new();
        let open = host.open_dialog_command();
        let close = host.close_dialog_command();

        assert!(open.can_execute());
        assert!(!close.can_execute());

        open.execute(Some(text("dialog"))).unwrap();
        assert!(host.is_open());
        assert!(!open.can_execute());
        assert!(close.can_execute());

        close.execute(Some(text("done"))).unwrap();
        assert!(!host.is_open());

        drop(host);
        assert!(!open.can_execute());
        assert!(matches!(open.execute(None), Err(DialogHostError::SessionDetached)));
    }

    #[test]
    fn test_session_close_targets_its_own_dialog() {
        let host = DialogHost::new().with_multiple_dialogs(true);
        let (c1, c2) = (text("one"), text("two"));
        let f1 = host.show(Some(c1.clone())).unwrap();
        let _f2 = host.show(Some(c2.clone())).unwrap();

        let first = host.current_sessions().into_iter().next().unwrap();
        first.close(Some(text("first out"))).unwrap();

        assert_eq!(as_text(block_on(f1)), Some("first out".to_string()));
        assert_eq!(host.current_sessions().len(), 1);
        host.with_active_hosts(|hosts| {
            assert!(Rc::ptr_eq(hosts[0].content(), &c2));
        });
    }

    #[test]
    fn test_close_all_resolves_every_future() {
        let host = DialogHost::new().with_multiple_dialogs(true);
        let f1 = host.show(Some(text("one"))).unwrap();
        let f2 = host.show(Some(text("two"))).unwrap();

        host.close_all().unwrap();
        assert!(!host.is_open());
        assert!(matches!(block_on(f1), None));
        assert!(matches!(block_on(f2), None));
    }
}
