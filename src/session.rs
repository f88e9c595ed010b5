//! Dialog session - one open dialog instance and its eventual close value.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::trace;

use crate::error::DialogHostError;
use crate::events::ShowHandlers;
use crate::host::{DialogHost, HostInner};
use crate::DialogValue;

/// Close progress of a session.
///
/// Cancelling a closing notification is a pure transition back to `Open`;
/// there is no flag to roll back.
#[derive(Clone, Default)]
pub(crate) enum CloseState {
    #[default]
    Open,
    /// A close was requested with this parameter; closing observers are
    /// still allowed to cancel it.
    PendingClose(Option<DialogValue>),
    /// The session ended with this parameter.
    Ended(Option<DialogValue>),
}

/// Handle to one open dialog.
///
/// Sessions are handed to opened/closing/closed observers and can be used
/// to close the dialog programmatically. The handle holds a non-owning
/// reference to its host; it stays valid (but detached) if the host is
/// dropped first.
#[derive(Clone)]
pub struct DialogSession {
    pub(crate) host: Weak<RefCell<HostInner>>,
    pub(crate) state: Rc<RefCell<CloseState>>,
    pub(crate) handlers: Rc<ShowHandlers>,
    pub(crate) id: u64,
}

impl DialogSession {
    /// Whether the session has ended.
    ///
    /// A cancelled close attempt leaves this false.
    pub fn is_ended(&self) -> bool {
        matches!(*self.state.borrow(), CloseState::Ended(_))
    }

    /// The parameter of the pending or completed close, if any.
    pub fn close_parameter(&self) -> Option<DialogValue> {
        match &*self.state.borrow() {
            CloseState::Open => None,
            CloseState::PendingClose(parameter) | CloseState::Ended(parameter) => parameter.clone(),
        }
    }

    /// Close this dialog with a parameter.
    ///
    /// Funnels into the host's internal close routine targeting this
    /// session. A closing observer may cancel, in which case the dialog
    /// stays open and this call still returns `Ok`.
    ///
    /// Errors with `SessionDetached` if the owning host is gone, or
    /// `NoCurrentSession` if this session is no longer active on it.
    pub fn close(&self, parameter: Option<DialogValue>) -> Result<(), DialogHostError> {
        let inner = self.host.upgrade().ok_or(DialogHostError::SessionDetached)?;
        trace!("session {} requested close", self.id);
        DialogHost::from_inner(inner).internal_close(self.id, parameter, true)
    }

    pub(crate) fn set_state(&self, state: CloseState) {
        *self.state.borrow_mut() = state;
    }

    pub(crate) fn is_open(&self) -> bool {
        matches!(*self.state.borrow(), CloseState::Open)
    }
}
