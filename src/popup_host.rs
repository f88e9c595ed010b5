//! Overlay popup host - the slot displaying one session's content.
//!
//! A popup host owns the bookkeeping for one open dialog: the displayed
//! content (caller-owned, compared by pointer identity), the optional
//! content template, the placement strategy, the open/animation flags and
//! the pending-result channel that fulfills the show future.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::Shared;
use futures::FutureExt;

use crate::geometry::{Rect, Size, Thickness};
use crate::positioner::{CenteredDialogPopupPositioner, DialogPopupPositioner};
use crate::session::DialogSession;
use crate::DialogValue;

/// Future resolving with the close parameter of one dialog.
///
/// Resolves exactly once, synchronously from the host's internal close
/// routine. If the host is dropped without the dialog being closed the
/// future resolves with `None`; it never carries an error.
pub struct DialogResultFuture {
    rx: oneshot::Receiver<Option<DialogValue>>,
}

impl Future for DialogResultFuture {
    type Output = Option<DialogValue>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(parameter)) => Poll::Ready(parameter),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// The future handed back by show operations.
///
/// Shared so that re-showing already-active content can return the very
/// same pending result to a second caller.
pub type DialogShowFuture = Shared<DialogResultFuture>;

/// One visual slot holding a session's content.
pub struct DialogOverlayPopupHost {
    session: DialogSession,
    content: DialogValue,
    content_template: Option<DialogValue>,
    margin: Thickness,
    positioner: Option<Rc<dyn DialogPopupPositioner>>,
    open: bool,
    /// Kept true through the closing animation; the embedder clears it
    /// when the transition finishes.
    shown: bool,
    disable_opening_animation: bool,
    needs_arrange: bool,
    last_bounds: Option<Rect>,
    result_tx: Option<oneshot::Sender<Option<DialogValue>>>,
    result: DialogShowFuture,
}

impl DialogOverlayPopupHost {
    pub(crate) fn new(
        session: DialogSession,
        content: DialogValue,
        content_template: Option<DialogValue>,
        margin: Thickness,
        positioner: Option<Rc<dyn DialogPopupPositioner>>,
        disable_opening_animation: bool,
    ) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            session,
            content,
            content_template,
            margin,
            positioner,
            open: true,
            shown: true,
            disable_opening_animation,
            needs_arrange: true,
            last_bounds: None,
            result_tx: Some(tx),
            result: DialogResultFuture { rx }.shared(),
        }
    }

    /// The session displayed in this slot.
    pub fn session(&self) -> &DialogSession {
        &self.session
    }

    pub(crate) fn session_id(&self) -> u64 {
        self.session.id
    }

    /// The displayed content. Identity (pointer equality) is what makes a
    /// show call with the same content a bring-to-front instead of a new
    /// session.
    pub fn content(&self) -> &DialogValue {
        &self.content
    }

    /// Template passthrough for the embedding framework.
    pub fn content_template(&self) -> Option<&DialogValue> {
        self.content_template.as_ref()
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Thickness) {
        self.margin = margin;
        self.needs_arrange = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the slot should still be rendered. Stays true after close
    /// until the embedder finishes the closing transition.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Called by the embedder when the closing transition has played out.
    pub fn finish_hide(&mut self) {
        self.shown = false;
    }

    pub fn disable_opening_animation(&self) -> bool {
        self.disable_opening_animation
    }

    pub fn positioner(&self) -> Option<&Rc<dyn DialogPopupPositioner>> {
        self.positioner.as_ref()
    }

    /// Replace the placement strategy.
    ///
    /// This is the explicit "positioner changed" hook: the slot requests a
    /// re-arrange itself, so strategies never need to publish change events.
    pub fn set_positioner(&mut self, positioner: Option<Rc<dyn DialogPopupPositioner>>) {
        self.positioner = positioner;
        self.needs_arrange = true;
    }

    /// True once after anything invalidated placement; clears the flag.
    pub fn take_arrange_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_arrange)
    }

    /// The placement computed by the last arrange pass.
    pub fn bounds(&self) -> Option<Rect> {
        self.last_bounds
    }

    /// Constrain the size offered to content during the measure pass.
    pub fn constrain(&self, available: Size) -> Size {
        let available = available.deflate(self.margin);
        match &self.positioner {
            Some(positioner) => positioner.constrain(available),
            None => available,
        }
    }

    /// Compute this slot's placement inside `available`.
    ///
    /// Deflates by the slot margin, lets the positioner place the content,
    /// clamps the result to the available area and snaps the position to
    /// device pixels for `scale`.
    pub fn arrange(&mut self, desired: Size, available: Size, scale: f64) -> Rect {
        let inner = available.deflate(self.margin);
        let content = desired.min(inner);

        let positioner = self
            .positioner
            .as_deref()
            .unwrap_or(&CenteredDialogPopupPositioner);
        let placed = positioner.arrange(content, inner, scale);

        let bounds = Rect::new(
            snap(placed.x + self.margin.left, scale),
            snap(placed.y + self.margin.top, scale),
            placed.width.min(inner.width),
            placed.height.min(inner.height),
        );
        self.needs_arrange = false;
        self.last_bounds = Some(bounds);
        bounds
    }

    /// Bring-to-front refresh: the slot stays open, its position is
    /// recomputed on the next layout pass.
    pub(crate) fn pop(&mut self) {
        self.shown = true;
        self.needs_arrange = true;
    }

    pub(crate) fn mark_closed(&mut self) {
        self.open = false;
    }

    pub(crate) fn take_result_sender(&mut self) -> Option<oneshot::Sender<Option<DialogValue>>> {
        self.result_tx.take()
    }

    pub(crate) fn result_future(&self) -> DialogShowFuture {
        self.result.clone()
    }
}

/// Snap a layout coordinate to the nearest device pixel.
fn snap(value: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        (value * scale).round() / scale
    } else {
        value
    }
}
