//! Dialog host directory - lookup of live hosts by identifier.
//!
//! Rather than a process-wide set of loaded hosts, the registry is an
//! owned object the application constructs and passes to whatever needs
//! cross-host lookup. Attach and detach are its only mutators, called
//! from the embedder's mount/unmount lifecycle hooks.

use log::debug;

use crate::error::DialogHostError;
use crate::events::ShowHandlers;
use crate::host::DialogHost;
use crate::popup_host::DialogShowFuture;
use crate::session::DialogSession;
use crate::DialogValue;

/// Directory of attached dialog hosts.
#[derive(Default)]
pub struct DialogRegistry {
    hosts: Vec<DialogHost>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host. Called when the host enters a live layout tree.
    pub fn attach(&mut self, host: &DialogHost) {
        if self.hosts.iter().any(|existing| existing.ptr_eq(host)) {
            return;
        }
        debug!("dialog host attached (identifier: {:?})", host.identifier());
        self.hosts.push(host.clone());
    }

    /// Deregister a host. Called when the host leaves the layout tree.
    pub fn detach(&mut self, host: &DialogHost) {
        self.hosts.retain(|existing| !existing.ptr_eq(host));
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Resolve a host by identifier.
    ///
    /// `None` means "the sole attached host". Errors with `NotFound` when
    /// nothing matches and `Ambiguous` when more than one host does
    /// (including no identifier given while multiple hosts are attached).
    pub fn resolve(&self, identifier: Option<&str>) -> Result<DialogHost, DialogHostError> {
        let owned = identifier.map(|id| id.to_string());
        if self.hosts.is_empty() {
            return Err(DialogHostError::NotFound(owned));
        }

        let mut matches = self.hosts.iter().filter(|host| match identifier {
            None => true,
            Some(id) => host.identifier().as_deref() == Some(id),
        });

        let first = matches.next().ok_or_else(|| DialogHostError::NotFound(owned.clone()))?;
        if matches.next().is_some() {
            return Err(DialogHostError::Ambiguous(owned));
        }
        Ok(first.clone())
    }

    /// Show a dialog on the host matching `identifier`.
    pub fn show(
        &self,
        identifier: Option<&str>,
        content: Option<DialogValue>,
    ) -> Result<DialogShowFuture, DialogHostError> {
        self.resolve(identifier)?.show(content)
    }

    /// [`show`](Self::show) with handlers scoped to this one dialog.
    pub fn show_with(
        &self,
        identifier: Option<&str>,
        content: Option<DialogValue>,
        handlers: ShowHandlers,
    ) -> Result<DialogShowFuture, DialogHostError> {
        self.resolve(identifier)?.show_with(content, handlers)
    }

    /// Close the current dialog on the host matching `identifier`.
    pub fn close(
        &self,
        identifier: Option<&str>,
        parameter: Option<DialogValue>,
    ) -> Result<(), DialogHostError> {
        self.resolve(identifier)?.close(parameter)
    }

    /// Close the dialog displaying `content` on the matching host.
    pub fn close_content(
        &self,
        identifier: Option<&str>,
        content: &DialogValue,
        parameter: Option<DialogValue>,
    ) -> Result<(), DialogHostError> {
        self.resolve(identifier)?.close_content(content, parameter)
    }

    /// Bring already-active content to the front on the matching host.
    pub fn pop(
        &self,
        identifier: Option<&str>,
        content: &DialogValue,
    ) -> Result<bool, DialogHostError> {
        Ok(self.resolve(identifier)?.pop(content))
    }

    /// The current session of the matching host, if a dialog is open.
    pub fn dialog_session(
        &self,
        identifier: Option<&str>,
    ) -> Result<Option<DialogSession>, DialogHostError> {
        Ok(self.resolve(identifier)?.current_session())
    }

    /// Whether the matching host has a live (not ended) dialog.
    pub fn is_dialog_open(&self, identifier: Option<&str>) -> Result<bool, DialogHostError> {
        Ok(self
            .dialog_session(identifier)?
            .map(|session| !session.is_ended())
            .unwrap_or(false))
    }
}
