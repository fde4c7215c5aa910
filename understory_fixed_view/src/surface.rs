// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use understory_fixed_layout::Margins;
use understory_spread::{SpineItem, SpreadSlot};

/// Receipt for one page load requested by a redraw pass.
///
/// The view hands a ticket to [`PageSurface::load_spine_item`]; the host passes
/// it back to [`FixedView::page_loaded`](crate::FixedView::page_loaded) exactly
/// once, when the surface has finished loading and knows its intrinsic size.
///
/// A ticket is only good while its pass is pending. A newer pass that loads or
/// removes a surface drops the pending one, and its tickets are then ignored, so
/// a surface re-pointed at another item may abandon its old load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pass: u64,
    slot: SpreadSlot,
}

impl LoadTicket {
    pub(crate) const fn new(pass: u64, slot: SpreadSlot) -> Self {
        Self { pass, slot }
    }

    /// Sequence number of the redraw pass that issued this ticket.
    #[must_use]
    pub const fn pass(&self) -> u64 {
        self.pass
    }

    /// Slot of the surface that was asked to load.
    #[must_use]
    pub const fn slot(&self) -> SpreadSlot {
        self.slot
    }
}

/// One page surface of a spread: a left, right or center frame that renders a
/// single spine item.
///
/// The view owns three surfaces for its whole lifetime and swaps their content
/// on navigation. Surfaces should align their content according to
/// [`SpreadSlot::content_alignment`] for the slot they were created for.
///
/// Loading is asynchronous: [`load_spine_item`](Self::load_spine_item) only
/// starts it. Once the content is ready (and [`intrinsic_size`](Self::intrinsic_size)
/// reports the new page) the host must report the ticket back to the view.
pub trait PageSurface {
    /// Handle to an element inside the loaded page.
    type Element;

    /// Whether the surface is currently part of the book frame.
    fn is_displaying(&self) -> bool;

    /// Spine index of the item loaded (or being loaded) into this surface.
    fn current_spine_item(&self) -> Option<usize>;

    /// Natural size of the loaded page, before any scaling.
    fn intrinsic_size(&self) -> Size;

    /// Margin, border and padding of the surface's rendered box.
    fn margins(&self) -> Margins;

    /// Adds the surface to the book frame. After this it is displaying.
    fn render(&mut self);

    /// Takes the surface out of the book frame. After this it is not displaying.
    fn remove(&mut self);

    /// Starts loading `item`. Report `ticket` to the view when done.
    fn load_spine_item(&mut self, item: &SpineItem, ticket: LoadTicket);

    /// Scales the page content uniformly by `scale` and moves it to `offset`
    /// inside the book frame.
    fn transform_content(&mut self, scale: f64, offset: Vec2);

    /// Looks up an element of the loaded page.
    fn element(&self, item: &SpineItem, selector: &str) -> Option<Self::Element>;

    /// Elements of the loaded page that take part in a media overlay and are
    /// currently visible.
    fn visible_media_overlay_elements(&self) -> Vec<Self::Element>;

    /// Canonical fragment identifier of the first visible element, if any.
    fn first_visible_element_cfi(&self) -> Option<String>;
}
