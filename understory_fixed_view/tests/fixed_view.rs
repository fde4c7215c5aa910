// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for page-load orchestration, layout and host queries of `FixedView`.

use kurbo::{Insets, Size, Vec2};
use understory_fixed_layout::{FrameFit, Margins};
use understory_fixed_view::{
    BookFrame, BookmarkData, FixedView, Initiator, LoadTicket, PageSurface, PaginationChanged,
    PaginationRequest, ViewEvent, ViewSettings,
};
use understory_spread::{ReadingDirection, Spine, SpineEntry, SpineItem, SpreadSlot};

const PAGE: Size = Size::new(400.0, 600.0);

#[derive(Debug, Default)]
struct TestSurface {
    displaying: bool,
    item: Option<usize>,
    size: Size,
    margins: Margins,
    tickets: Vec<LoadTicket>,
    renders: usize,
    removes: usize,
    transform: Option<(f64, Vec2)>,
    cfi: Option<String>,
}

impl TestSurface {
    fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl PageSurface for TestSurface {
    type Element = String;

    fn is_displaying(&self) -> bool {
        self.displaying
    }

    fn current_spine_item(&self) -> Option<usize> {
        self.item
    }

    fn intrinsic_size(&self) -> Size {
        self.size
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn render(&mut self) {
        self.displaying = true;
        self.renders += 1;
    }

    fn remove(&mut self) {
        self.displaying = false;
        self.removes += 1;
    }

    fn load_spine_item(&mut self, item: &SpineItem, ticket: LoadTicket) {
        self.item = Some(item.index());
        self.tickets.push(ticket);
    }

    fn transform_content(&mut self, scale: f64, offset: Vec2) {
        self.transform = Some((scale, offset));
    }

    fn element(&self, item: &SpineItem, selector: &str) -> Option<String> {
        Some(format!("{}{selector}", item.idref()))
    }

    fn visible_media_overlay_elements(&self) -> Vec<String> {
        self.item
            .map(|index| vec![format!("overlay-{index}")])
            .unwrap_or_default()
    }

    fn first_visible_element_cfi(&self) -> Option<String> {
        self.cfi.clone()
    }
}

#[derive(Debug)]
struct TestFrame {
    viewport: Size,
    margins: Margins,
    attached: bool,
    styles_applied: usize,
    geometry: Option<FrameFit>,
    subscriptions: usize,
    unsubscriptions: usize,
}

impl TestFrame {
    fn new(viewport: Size) -> Self {
        Self {
            viewport,
            margins: Margins::new(Insets::ZERO, Insets::ZERO, Insets::uniform(10.0)),
            attached: false,
            styles_applied: 0,
            geometry: None,
            subscriptions: 0,
            unsubscriptions: 0,
        }
    }
}

impl BookFrame for TestFrame {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn apply_styles(&mut self) {
        self.styles_applied += 1;
    }

    fn set_geometry(&mut self, fit: &FrameFit) {
        self.geometry = Some(*fit);
    }

    fn subscribe_resize(&mut self) {
        self.subscriptions += 1;
    }

    fn unsubscribe_resize(&mut self) {
        self.unsubscriptions += 1;
    }
}

type View = FixedView<TestSurface, TestFrame>;

fn spine(direction: ReadingDirection, pages: usize) -> Spine {
    Spine::new(
        direction,
        (0..pages).map(|i| SpineEntry::new(format!("p{i}"), format!("p{i}.xhtml"))),
    )
    .unwrap()
}

fn unrendered_view(spine: Spine) -> View {
    let _ = env_logger::builder().is_test(true).try_init();
    FixedView::new(
        spine,
        TestFrame::new(Size::new(1000.0, 700.0)),
        TestSurface::new(PAGE),
        TestSurface::new(PAGE),
        TestSurface::new(PAGE),
    )
}

fn view(spine: Spine) -> View {
    let mut view = unrendered_view(spine);
    view.render();
    view
}

fn take_tickets(view: &mut View, slot: SpreadSlot) -> Vec<LoadTicket> {
    core::mem::take(&mut view.surface_mut(slot).tickets)
}

/// Reports every outstanding load back to the view.
fn finish_loads(view: &mut View) {
    for slot in SpreadSlot::ALL {
        for ticket in take_tickets(view, slot) {
            view.page_loaded(ticket);
        }
    }
}

fn pagination_changed(events: &[ViewEvent]) -> &PaginationChanged {
    match events.last() {
        Some(ViewEvent::PaginationChanged(changed)) => changed,
        other => panic!("expected a pagination change, got {other:?}"),
    }
}

#[test]
fn spread_is_laid_out_and_announced_after_all_pages_load() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page(
        PaginationRequest::new("p1")
            .with_initiator(Initiator(7))
            .with_element_id("figure-2"),
    );
    assert_eq!(view.pending_redraws(), 1);

    let left = take_tickets(&mut view, SpreadSlot::Left);
    let right = take_tickets(&mut view, SpreadSlot::Right);
    assert_eq!((left.len(), right.len()), (1, 1));
    assert!(take_tickets(&mut view, SpreadSlot::Center).is_empty());

    view.page_loaded(left[0]);
    assert!(view.take_events().is_empty());
    assert!(view.frame().geometry.is_none());

    view.page_loaded(right[0]);
    let events = view.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], ViewEvent::ContentLoaded);
    let changed = pagination_changed(&events);
    assert_eq!(changed.initiator, Some(Initiator(7)));
    assert_eq!(changed.element_id.as_deref(), Some("figure-2"));
    let open: Vec<_> = changed
        .info
        .open_pages
        .iter()
        .map(|p| (p.idref.as_str(), p.spine_item_index))
        .collect();
    assert_eq!(open, [("p1", 1), ("p2", 2)]);
    assert_eq!(changed.info.total_items, 6);
    assert!(changed.info.is_fixed_layout);

    // 800x600 of content in 1000x700 minus 10px book padding on every side.
    let scale = 680.0 / 600.0;
    let layout = view.layout().unwrap();
    assert_eq!(layout.fit.scale, scale);
    assert_eq!(view.frame().geometry, Some(layout.fit));
    assert_eq!(
        view.surface(SpreadSlot::Left).transform,
        Some((scale, Vec2::new(10.0, 10.0)))
    );
    assert_eq!(
        view.surface(SpreadSlot::Right).transform,
        Some((scale, Vec2::new(10.0 + 400.0 * scale, 10.0)))
    );
    assert_eq!(view.pending_redraws(), 0);
}

#[test]
fn superseded_redraw_pass_is_dropped() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page_next(None);
    view.open_page_next(Some(Initiator(2)));

    // The right surface was asked twice: once per pass.
    let right = take_tickets(&mut view, SpreadSlot::Right);
    let left = take_tickets(&mut view, SpreadSlot::Left);
    assert_eq!(right.len(), 2);
    assert_eq!(left.len(), 1);
    assert!(right[0].pass() < right[1].pass());

    view.page_loaded(right[0]);
    assert!(view.take_events().is_empty());
    assert!(view.layout().is_none());
    assert_eq!(view.pending_redraws(), 1);

    view.page_loaded(left[0]);
    view.page_loaded(right[1]);
    let events = view.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(pagination_changed(&events).initiator, Some(Initiator(2)));
}

#[test]
fn reopening_the_loading_spread_keeps_it_current() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page(PaginationRequest::new("p1").with_initiator(Initiator(1)));
    // A second tap on the other page of the same spread changes no surface.
    view.open_page(PaginationRequest::new("p2").with_initiator(Initiator(2)));
    assert_eq!(view.pending_redraws(), 1);

    finish_loads(&mut view);
    let events = view.take_events();
    assert_eq!(events.len(), 2);
    let changed = pagination_changed(&events);
    assert_eq!(changed.initiator, Some(Initiator(1)));
    let open: Vec<_> = changed
        .info
        .open_pages
        .iter()
        .map(|p| p.idref.as_str())
        .collect();
    assert_eq!(open, ["p1", "p2"]);
    assert!(view.layout().is_some());
    assert_eq!(view.pending_redraws(), 0);
}

#[test]
fn next_at_the_end_while_loading_keeps_the_load_current() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 1));
    view.open_page_next(None);
    view.open_page_next(None);
    assert_eq!(view.pending_redraws(), 1);

    finish_loads(&mut view);
    let events = view.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(pagination_changed(&events).info.open_pages.len(), 1);
    assert!(view.layout().is_some());
    assert!(view.frame().geometry.is_some());
}

#[test]
fn superseded_passes_do_not_accumulate() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 24));
    for _ in 0..10 {
        view.open_page_next(Some(Initiator(3)));
        assert_eq!(view.pending_redraws(), 1);
    }

    // Surfaces drop the loads they were re-pointed away from.
    let tickets: Vec<_> = SpreadSlot::ALL
        .into_iter()
        .flat_map(|slot| take_tickets(&mut view, slot))
        .collect();
    let last = tickets.iter().map(LoadTicket::pass).max().unwrap();
    for ticket in tickets.into_iter().filter(|t| t.pass() == last) {
        view.page_loaded(ticket);
    }

    assert_eq!(view.pending_redraws(), 0);
    let events = view.take_events();
    assert_eq!(events.len(), 2);
    let open: Vec<_> = pagination_changed(&events)
        .info
        .open_pages
        .iter()
        .map(|p| p.spine_item_index)
        .collect();
    assert_eq!(open.as_slice(), view.spread().valid_items().as_slice());
    assert!(view.layout().is_some());
}

#[test]
fn unknown_and_repeated_tickets_are_ignored() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page_next(None);
    let ticket = take_tickets(&mut view, SpreadSlot::Right)[0];
    view.page_loaded(ticket);
    assert_eq!(view.take_events().len(), 2);

    view.page_loaded(ticket);
    assert!(view.take_events().is_empty());
}

#[test]
fn reopening_the_current_spread_loads_nothing() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page(PaginationRequest::new("p2"));
    finish_loads(&mut view);
    assert_eq!(view.take_events().len(), 2);

    view.open_page(PaginationRequest::new("p1"));
    assert_eq!(view.pending_redraws(), 0);
    assert!(take_tickets(&mut view, SpreadSlot::Left).is_empty());
    assert!(view.take_events().is_empty());
}

#[test]
fn invalid_requests_are_ignored() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 3));
    view.open_page(PaginationRequest::default());
    view.open_page(PaginationRequest::new("missing"));
    assert!(view.spread().is_empty());
    assert_eq!(view.pending_redraws(), 0);
}

#[test]
fn styles_are_reapplied_only_when_surfaces_are_added() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    assert_eq!(view.frame().styles_applied, 1);

    view.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut view);
    assert_eq!(view.frame().styles_applied, 2);

    // Both surfaces are already displaying; their content is swapped in place.
    view.open_page_next(None);
    assert_eq!(view.spread().valid_items().as_slice(), &[3, 4]);
    finish_loads(&mut view);
    assert_eq!(view.frame().styles_applied, 2);
    assert_eq!(view.surface(SpreadSlot::Left).renders, 1);
}

#[test]
fn single_page_mode_uses_the_center_surface() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 4));
    view.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut view);
    view.take_events();

    view.set_view_settings(ViewSettings::default().with_synthetic_spread(false));
    assert!(!view.view_settings().synthetic_spread);
    view.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut view);

    assert!(!view.surface(SpreadSlot::Left).is_displaying());
    assert!(!view.surface(SpreadSlot::Right).is_displaying());
    assert!(view.surface(SpreadSlot::Center).is_displaying());

    let layout = view.layout().unwrap();
    assert_eq!(layout.content.size(), PAGE);
    assert_eq!(layout.content.separator_position, 0.0);
    assert_eq!(
        view.surface(SpreadSlot::Center).transform.map(|(_, offset)| offset),
        Some(Vec2::new(10.0, 10.0))
    );

    let events = view.take_events();
    assert_eq!(pagination_changed(&events).info.open_pages.len(), 1);
}

#[test]
fn resize_refits_and_degenerate_viewports_keep_the_last_layout() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 4));
    view.open_page_next(None);
    finish_loads(&mut view);
    let before = *view.layout().unwrap();

    view.frame_mut().viewport = Size::new(820.0, 620.0);
    view.on_viewport_resize();
    let resized = *view.layout().unwrap();
    assert_eq!(resized.fit.scale, 1.0);
    assert_ne!(resized, before);
    let frame = resized.fit.frame_rect();
    assert!(frame.x1 <= 820.0 && frame.y1 <= 620.0);

    view.frame_mut().viewport = Size::new(15.0, 700.0);
    view.on_viewport_resize();
    assert_eq!(view.layout(), Some(&resized));
}

#[test]
fn navigation_before_render_lays_out_on_render() {
    let mut view = unrendered_view(spine(ReadingDirection::LeftToRight, 4));
    view.open_page_next(None);
    finish_loads(&mut view);
    assert_eq!(view.take_events().len(), 2);
    assert!(view.layout().is_none());
    assert_eq!(view.frame().styles_applied, 0);

    view.render();
    assert!(view.frame().attached);
    assert_eq!(view.frame().styles_applied, 1);
    assert!(view.layout().is_some());
}

#[test]
fn remove_tears_down_once() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 4));
    assert_eq!(view.frame().subscriptions, 1);
    view.open_page_next(None);
    let ticket = take_tickets(&mut view, SpreadSlot::Right)[0];

    view.remove();
    view.remove();
    assert!(view.is_removed());
    assert_eq!(view.frame().unsubscriptions, 1);
    assert!(!view.frame().attached);
    assert!(!view.surface(SpreadSlot::Right).is_displaying());
    assert_eq!(view.surface(SpreadSlot::Right).removes, 1);

    view.page_loaded(ticket);
    view.open_page_next(None);
    assert!(view.take_events().is_empty());
    assert!(take_tickets(&mut view, SpreadSlot::Left).is_empty());
}

#[test]
fn bookmark_follows_reading_order() {
    let mut ltr = view(spine(ReadingDirection::LeftToRight, 4));
    assert_eq!(ltr.bookmark_current_page(), BookmarkData::new("", ""));
    ltr.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut ltr);
    ltr.surface_mut(SpreadSlot::Right).cfi = Some("/4/2".into());
    assert_eq!(ltr.bookmark_current_page(), BookmarkData::new("p1", ""));

    // Right-to-left: page 1 is on the right and is read first.
    let mut rtl = view(spine(ReadingDirection::RightToLeft, 4));
    rtl.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut rtl);
    assert_eq!(rtl.spread().right(), Some(1));
    rtl.surface_mut(SpreadSlot::Right).cfi = Some("/4/2".into());
    assert_eq!(rtl.bookmark_current_page(), BookmarkData::new("p1", "/4/2"));
}

#[test]
fn element_queries_only_reach_loaded_items() {
    let mut view = view(spine(ReadingDirection::LeftToRight, 6));
    view.open_page(PaginationRequest::new("p1"));
    finish_loads(&mut view);

    assert_eq!(view.element(2, "#panel").as_deref(), Some("p2#panel"));
    assert_eq!(view.element(4, "#panel"), None);
    assert_eq!(view.element(99, "#panel"), None);

    let loaded: Vec<_> = view
        .loaded_spine_items()
        .into_iter()
        .map(SpineItem::idref)
        .collect();
    assert_eq!(loaded, ["p1", "p2"]);

    assert_eq!(
        view.visible_media_overlay_elements(),
        ["overlay-1", "overlay-2"]
    );
}

#[test]
fn fixed_views_do_not_reflow() {
    let view = view(spine(ReadingDirection::LeftToRight, 1));
    assert!(!view.is_reflowable());
}

#[cfg(feature = "serde")]
#[test]
fn settings_and_pagination_info_use_camel_case_json() {
    let settings: ViewSettings = serde_json::from_str(r#"{"isSyntheticSpread":false}"#).unwrap();
    assert!(!settings.synthetic_spread);
    let settings: ViewSettings = serde_json::from_str("{}").unwrap();
    assert!(settings.synthetic_spread);

    let mut view = view(spine(ReadingDirection::LeftToRight, 2));
    view.open_page_next(None);
    let json = serde_json::to_string(&view.pagination_info()).unwrap();
    assert!(json.contains("\"openPages\""));
    assert!(json.contains("\"spineItemIndex\":0"));
    assert!(json.contains("\"direction\":\"ltr\""));
}
