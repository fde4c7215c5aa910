// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, error, trace, warn};
use smallvec::SmallVec;
use understory_fixed_layout::{
    Margins, Placement, SpreadLayout, SpreadSurfaces, SurfaceMetrics, fit_spread,
};
use understory_spread::{Spine, SpineItem, Spread, SpreadSlot};

use crate::events::{PaginationChanged, ViewEvent};
use crate::frame::BookFrame;
use crate::pagination::{BookmarkData, Initiator, PaginationInfo, PaginationRequest};
use crate::settings::ViewSettings;
use crate::surface::{LoadTicket, PageSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Rendered,
    Removed,
}

/// Loads still outstanding for one redraw pass.
#[derive(Debug)]
struct PendingRedraw {
    pass: u64,
    waiting: SmallVec<[LoadTicket; 3]>,
    initiator: Option<Initiator>,
    element_id: Option<String>,
}

/// What a redraw pass did to one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotUpdate {
    Unchanged,
    Removed,
    Loading,
}

#[derive(Debug)]
struct Surfaces<S> {
    left: S,
    right: S,
    center: S,
}

impl<S> Surfaces<S> {
    fn get(&self, slot: SpreadSlot) -> &S {
        match slot {
            SpreadSlot::Left => &self.left,
            SpreadSlot::Right => &self.right,
            SpreadSlot::Center => &self.center,
        }
    }

    fn get_mut(&mut self, slot: SpreadSlot) -> &mut S {
        match slot {
            SpreadSlot::Left => &mut self.left,
            SpreadSlot::Right => &mut self.right,
            SpreadSlot::Center => &mut self.center,
        }
    }
}

/// A fixed-layout spread view.
///
/// Owns the [`Spread`] state, three [`PageSurface`]s and a [`BookFrame`].
/// Navigation updates the spread and starts a redraw pass: surfaces whose
/// content changed are asked to load, and once the host has reported every
/// [`LoadTicket`] of the pass through [`page_loaded`](Self::page_loaded) the
/// view lays the spread out and queues a [`ViewEvent::ContentLoaded`] followed
/// by a [`ViewEvent::PaginationChanged`].
///
/// Each pass that loads or removes a surface carries a sequence number, and at
/// most one pass is pending. A newer pass supersedes the pending one at once:
/// the older pass never lays out or notifies and its late tickets are ignored.
/// A navigation that changes no surface leaves the pending pass current.
#[derive(Debug)]
pub struct FixedView<S: PageSurface, F: BookFrame> {
    spine: Spine,
    spread: Spread,
    settings: ViewSettings,
    frame: F,
    surfaces: Surfaces<S>,
    lifecycle: Lifecycle,
    book_margins: Option<Margins>,
    layout: Option<SpreadLayout>,
    redraw_seq: u64,
    pending: Option<PendingRedraw>,
    styles_dirty: bool,
    events: Vec<ViewEvent>,
}

impl<S: PageSurface, F: BookFrame> FixedView<S, F> {
    /// Creates a view over `spine` and subscribes it to viewport resizes.
    ///
    /// Nothing is attached or loaded until [`render`](Self::render) and a
    /// navigation call.
    pub fn new(spine: Spine, mut frame: F, left: S, right: S, center: S) -> Self {
        frame.subscribe_resize();
        Self {
            spine,
            spread: Spread::new(),
            settings: ViewSettings::default(),
            frame,
            surfaces: Surfaces {
                left,
                right,
                center,
            },
            lifecycle: Lifecycle::Created,
            book_margins: None,
            layout: None,
            redraw_seq: 0,
            pending: None,
            styles_dirty: false,
            events: Vec::new(),
        }
    }

    /// Fixed-layout views never reflow.
    #[must_use]
    pub fn is_reflowable(&self) -> bool {
        false
    }

    /// Attaches the book frame and applies styles.
    pub fn render(&mut self) {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Rendered => {
                debug!("fixed view is already rendered");
                return;
            }
            Lifecycle::Removed => {
                warn!("ignoring render of a removed fixed view");
                return;
            }
        }
        self.frame.attach();
        self.lifecycle = Lifecycle::Rendered;
        self.apply_styles();
    }

    /// Tears the view down.
    ///
    /// Releases the resize subscription, takes displaying surfaces out of the
    /// frame and forgets outstanding loads. Later calls are ignored.
    pub fn remove(&mut self) {
        if self.lifecycle == Lifecycle::Removed {
            warn!("fixed view was already removed");
            return;
        }
        self.frame.unsubscribe_resize();
        for slot in SpreadSlot::ALL {
            let surface = self.surfaces.get_mut(slot);
            if surface.is_displaying() {
                surface.remove();
            }
        }
        if self.lifecycle == Lifecycle::Rendered {
            self.frame.detach();
        }
        self.pending = None;
        self.lifecycle = Lifecycle::Removed;
    }

    /// Whether [`remove`](Self::remove) has been called.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.lifecycle == Lifecycle::Removed
    }

    /// Applies reader settings. Takes effect at the next navigation.
    pub fn set_view_settings(&mut self, settings: ViewSettings) {
        self.settings = settings;
        self.spread.set_synthetic_spread(settings.synthetic_spread);
    }

    /// Current reader settings.
    #[must_use]
    pub fn view_settings(&self) -> ViewSettings {
        self.settings
    }

    /// Opens the spine item named by `request` and redraws.
    ///
    /// Requests without a spine item, or naming an item that is not in the
    /// spine, are ignored.
    pub fn open_page(&mut self, request: PaginationRequest) {
        if self.ignore_after_remove("open_page") {
            return;
        }
        let Some(idref) = request.spine_item.as_deref() else {
            debug!("ignoring pagination request without a spine item");
            return;
        };
        let Some(index) = self.spine.item_by_idref(idref).map(SpineItem::index) else {
            debug!("ignoring pagination request for unknown spine item {idref:?}");
            return;
        };
        self.spread.open_item(&self.spine, index);
        self.redraw(request.initiator, request.element_id);
    }

    /// Moves to the previous spread and redraws.
    pub fn open_page_prev(&mut self, initiator: Option<Initiator>) {
        if self.ignore_after_remove("open_page_prev") {
            return;
        }
        self.spread.open_prev(&self.spine);
        self.redraw(initiator, None);
    }

    /// Moves to the next spread and redraws.
    pub fn open_page_next(&mut self, initiator: Option<Initiator>) {
        if self.ignore_after_remove("open_page_next") {
            return;
        }
        self.spread.open_next(&self.spine);
        self.redraw(initiator, None);
    }

    /// Reports that the surface behind `ticket` finished loading.
    ///
    /// Tickets of superseded passes, and tickets reported twice, are ignored.
    pub fn page_loaded(&mut self, ticket: LoadTicket) {
        if self.ignore_after_remove("page_loaded") {
            return;
        }
        let Some((pending, waiting)) = self.pending.as_mut().and_then(|pending| {
            let waiting = pending.waiting.iter().position(|t| *t == ticket)?;
            Some((pending, waiting))
        }) else {
            warn!(
                "ignoring load ticket for {:?} of redraw pass {}: not awaited",
                ticket.slot(),
                ticket.pass()
            );
            return;
        };
        pending.waiting.swap_remove(waiting);
        if !pending.waiting.is_empty() {
            debug!(
                "redraw pass {} waiting on {} more page(s)",
                pending.pass,
                pending.waiting.len()
            );
            return;
        }

        if let Some(pending) = self.pending.take() {
            self.complete_redraw(pending.initiator, pending.element_id);
        }
    }

    /// Re-fits the spread after the viewport changed size.
    pub fn on_viewport_resize(&mut self) {
        if self.lifecycle != Lifecycle::Rendered {
            trace!("ignoring viewport resize while not rendered");
            return;
        }
        self.update_layout();
    }

    /// The pages currently open, in slot order left, right, center.
    #[must_use]
    pub fn pagination_info(&self) -> PaginationInfo {
        let mut info = PaginationInfo::new(
            self.spine.len(),
            self.spine.is_fixed_layout(),
            self.spine.direction(),
        );
        for slot in SpreadSlot::ALL {
            if let Some(item) = self.spread.slot(slot).and_then(|i| self.spine.get(i)) {
                info.add_open_page(item.idref(), item.index());
            }
        }
        info
    }

    /// Bookmark for the first displaying page in reading order.
    ///
    /// Returns an empty bookmark when no page is displaying.
    #[must_use]
    pub fn bookmark_current_page(&self) -> BookmarkData {
        for slot in self.displaying_slots() {
            let surface = self.surfaces.get(slot);
            let Some(item) = surface.current_spine_item().and_then(|i| self.spine.get(i))
            else {
                continue;
            };
            let cfi = surface.first_visible_element_cfi().unwrap_or_default();
            return BookmarkData::new(item.idref(), cfi);
        }
        BookmarkData::default()
    }

    /// Spine items held by the spread, in spine order.
    #[must_use]
    pub fn loaded_spine_items(&self) -> SmallVec<[&SpineItem; 3]> {
        self.spread
            .valid_items()
            .into_iter()
            .filter_map(|i| self.spine.get(i))
            .collect()
    }

    /// Looks up an element in the displaying surface that shows `spine_index`.
    ///
    /// Logs an error and returns `None` when no displaying surface holds that
    /// item.
    #[must_use]
    pub fn element(&self, spine_index: usize, selector: &str) -> Option<S::Element> {
        if let Some(item) = self.spine.get(spine_index) {
            for slot in self.displaying_slots() {
                let surface = self.surfaces.get(slot);
                if surface.current_spine_item() == Some(spine_index) {
                    return surface.element(item, selector);
                }
            }
        }
        error!("spine item {spine_index} is not loaded");
        None
    }

    /// Visible media-overlay elements of all displaying surfaces, in reading
    /// order.
    #[must_use]
    pub fn visible_media_overlay_elements(&self) -> Vec<S::Element> {
        let mut elements = Vec::new();
        for slot in self.displaying_slots() {
            elements.extend(self.surfaces.get(slot).visible_media_overlay_elements());
        }
        elements
    }

    /// Drains queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        core::mem::take(&mut self.events)
    }

    /// The last successful layout pass.
    #[must_use]
    pub fn layout(&self) -> Option<&SpreadLayout> {
        self.layout.as_ref()
    }

    /// Book margins captured when styles were last applied.
    #[must_use]
    pub fn book_margins(&self) -> Option<Margins> {
        self.book_margins
    }

    /// The spread state.
    #[must_use]
    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    /// The spine.
    #[must_use]
    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    /// The surface for `slot`.
    #[must_use]
    pub fn surface(&self, slot: SpreadSlot) -> &S {
        self.surfaces.get(slot)
    }

    /// Mutable access to the surface for `slot`.
    pub fn surface_mut(&mut self, slot: SpreadSlot) -> &mut S {
        self.surfaces.get_mut(slot)
    }

    /// The book frame.
    #[must_use]
    pub fn frame(&self) -> &F {
        &self.frame
    }

    /// Mutable access to the book frame.
    pub fn frame_mut(&mut self) -> &mut F {
        &mut self.frame
    }

    /// Number of redraw passes still waiting for page loads: zero or one.
    #[must_use]
    pub fn pending_redraws(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    fn ignore_after_remove(&self, operation: &str) -> bool {
        if self.lifecycle == Lifecycle::Removed {
            warn!("ignoring {operation} on a removed fixed view");
            return true;
        }
        false
    }

    /// Slots with a displaying surface, in reading order.
    fn displaying_slots(&self) -> SmallVec<[SpreadSlot; 3]> {
        let order = if self.spine.is_left_to_right() {
            [SpreadSlot::Left, SpreadSlot::Center, SpreadSlot::Right]
        } else {
            [SpreadSlot::Right, SpreadSlot::Center, SpreadSlot::Left]
        };
        order
            .into_iter()
            .filter(|slot| self.surfaces.get(*slot).is_displaying())
            .collect()
    }

    fn redraw(&mut self, initiator: Option<Initiator>, element_id: Option<String>) {
        // Only passes that load or remove something take the number, so an
        // empty pass leaves the pass still loading current.
        let pass = self.redraw_seq + 1;

        let mut waiting = SmallVec::new();
        let mut removed = false;
        for slot in SpreadSlot::ALL {
            let item = self.spread.slot(slot).and_then(|i| self.spine.get(i));
            let ticket = LoadTicket::new(pass, slot);
            let surface = self.surfaces.get_mut(slot);
            match update_surface(surface, item, ticket, &mut self.styles_dirty) {
                SlotUpdate::Unchanged => {}
                SlotUpdate::Removed => removed = true,
                SlotUpdate::Loading => waiting.push(ticket),
            }
        }

        if waiting.is_empty() && !removed {
            debug!("redraw has nothing to load; pass {} stays current", self.redraw_seq);
            return;
        }
        self.redraw_seq = pass;
        if let Some(stale) = self.pending.take() {
            debug!("redraw pass {pass} supersedes pass {}", stale.pass);
        }

        if waiting.is_empty() {
            debug!("redraw pass {pass} only removed pages");
            self.complete_redraw(initiator, element_id);
            return;
        }

        debug!("redraw pass {pass} loading {} page(s)", waiting.len());
        self.pending = Some(PendingRedraw {
            pass,
            waiting,
            initiator,
            element_id,
        });
    }

    fn complete_redraw(&mut self, initiator: Option<Initiator>, element_id: Option<String>) {
        if self.styles_dirty && self.lifecycle == Lifecycle::Rendered {
            self.apply_styles();
        }
        self.update_layout();
        self.events.push(ViewEvent::ContentLoaded);
        let info = self.pagination_info();
        self.events
            .push(ViewEvent::PaginationChanged(PaginationChanged {
                info,
                initiator,
                element_id,
            }));
    }

    fn apply_styles(&mut self) {
        self.frame.apply_styles();
        self.book_margins = Some(self.frame.margins());
        self.styles_dirty = false;
        self.update_layout();
    }

    fn surface_metrics(&self) -> SpreadSurfaces {
        let metrics = |slot: SpreadSlot| {
            let surface: &S = self.surfaces.get(slot);
            surface.is_displaying().then(|| SurfaceMetrics {
                intrinsic_size: surface.intrinsic_size(),
                margins: surface.margins(),
            })
        };
        SpreadSurfaces {
            left: metrics(SpreadSlot::Left),
            right: metrics(SpreadSlot::Right),
            center: metrics(SpreadSlot::Center),
        }
    }

    fn update_layout(&mut self) {
        let Some(book_margins) = self.book_margins else {
            trace!("skipping layout: book margins are not known yet");
            return;
        };
        let viewport = self.frame.viewport_size();
        let Some(layout) = fit_spread(viewport, &book_margins, &self.surface_metrics()) else {
            trace!("skipping layout for viewport {viewport:?}");
            return;
        };
        trace!(
            "spread scale {} frame {:?}",
            layout.fit.scale,
            layout.fit.frame_rect()
        );

        self.frame.set_geometry(&layout.fit);
        let placements = [
            (SpreadSlot::Left, layout.placements.left),
            (SpreadSlot::Right, layout.placements.right),
            (SpreadSlot::Center, layout.placements.center),
        ];
        for (slot, placement) in placements {
            if let Some(Placement { scale, offset }) = placement {
                self.surfaces.get_mut(slot).transform_content(scale, offset);
            }
        }
        self.layout = Some(layout);
    }
}

fn update_surface<S: PageSurface>(
    surface: &mut S,
    item: Option<&SpineItem>,
    ticket: LoadTicket,
    styles_dirty: &mut bool,
) -> SlotUpdate {
    let Some(item) = item else {
        if surface.is_displaying() {
            surface.remove();
            return SlotUpdate::Removed;
        }
        return SlotUpdate::Unchanged;
    };

    if surface.is_displaying() {
        if surface.current_spine_item() == Some(item.index()) {
            return SlotUpdate::Unchanged;
        }
    } else {
        surface.render();
        *styles_dirty = true;
    }
    surface.load_spine_item(item, ticket);
    SlotUpdate::Loading
}
