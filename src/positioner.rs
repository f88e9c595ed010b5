//! Popup placement strategies.
//!
//! A positioner maps (content size, available size, scale) to the rectangle
//! the dialog content should occupy. Strategies are plain owned values; when
//! a host's positioner is replaced, the host itself requests a re-arrange,
//! so strategies never publish change events of their own.

use crate::geometry::{HorizontalAlignment, Rect, Size, Thickness, VerticalAlignment};

/// Strategy computing the placement rectangle for dialog content.
pub trait DialogPopupPositioner {
    /// Compute the placement of `content` within `available`.
    ///
    /// The returned rectangle's size is clamped to `available` by the
    /// caller, not here. Built-in strategies return unrounded values; the
    /// popup host snaps the final position against `scale`.
    fn arrange(&self, content: Size, available: Size, scale: f64) -> Rect;

    /// Constrain the space offered to content during measurement.
    ///
    /// Strategies that reserve space (for example a margin) shrink the
    /// available size here. The default reserves nothing.
    fn constrain(&self, available: Size) -> Size {
        available
    }
}

/// Centers the dialog content in the available area.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenteredDialogPopupPositioner;

impl DialogPopupPositioner for CenteredDialogPopupPositioner {
    fn arrange(&self, content: Size, available: Size, _scale: f64) -> Rect {
        let x = (available.width - content.width) / 2.0;
        let y = (available.height - content.height) / 2.0;
        Rect::new(x, y, content.width, content.height)
    }
}

/// Positions the dialog content by per-axis alignment plus a margin inset.
///
/// `Stretch` on an axis collapses the content-size contribution to zero
/// before aligning, pinning the content to the margin-deflated edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlignedDialogPopupPositioner {
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    margin: Thickness,
}

impl AlignedDialogPopupPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal = alignment;
        self
    }

    pub fn with_vertical(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical = alignment;
        self
    }

    pub fn with_margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    pub fn horizontal(&self) -> HorizontalAlignment {
        self.horizontal
    }

    pub fn vertical(&self) -> VerticalAlignment {
        self.vertical
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }
}

impl DialogPopupPositioner for AlignedDialogPopupPositioner {
    fn arrange(&self, content: Size, available: Size, _scale: f64) -> Rect {
        let inner = available.deflate(self.margin);

        let dx = match self.horizontal {
            HorizontalAlignment::Start | HorizontalAlignment::Stretch => 0.0,
            HorizontalAlignment::Center => (inner.width - content.width) / 2.0,
            HorizontalAlignment::End => inner.width - content.width,
        };
        let dy = match self.vertical {
            VerticalAlignment::Start | VerticalAlignment::Stretch => 0.0,
            VerticalAlignment::Center => (inner.height - content.height) / 2.0,
            VerticalAlignment::End => inner.height - content.height,
        };

        Rect::new(self.margin.left + dx, self.margin.top + dy, content.width, content.height)
    }

    fn constrain(&self, available: Size) -> Size {
        available.deflate(self.margin)
    }
}
