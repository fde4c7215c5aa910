// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use understory_fixed_layout::{FrameFit, Margins};

/// The book frame element and the viewport that hosts it.
///
/// The view positions this frame and puts the page surfaces inside it. How
/// styles are applied and how resize notifications are delivered is up to the
/// host; the view only asks for them at the right moments.
pub trait BookFrame {
    /// Current size of the hosting viewport.
    fn viewport_size(&self) -> Size;

    /// Margin, border and padding of the book frame element as last styled.
    fn margins(&self) -> Margins;

    /// Inserts the frame into the viewport.
    fn attach(&mut self);

    /// Removes the frame from the viewport.
    fn detach(&mut self);

    /// Applies user styles to the frame. [`margins`](Self::margins) is read
    /// right after.
    fn apply_styles(&mut self);

    /// Positions and sizes the frame.
    ///
    /// The frame element goes to [`FrameFit::origin`] with size
    /// [`FrameFit::element_size`].
    fn set_geometry(&mut self, fit: &FrameFit);

    /// Starts delivering viewport resizes to
    /// [`FixedView::on_viewport_resize`](crate::FixedView::on_viewport_resize).
    fn subscribe_resize(&mut self);

    /// Stops delivering viewport resizes.
    fn unsubscribe_resize(&mut self);
}
