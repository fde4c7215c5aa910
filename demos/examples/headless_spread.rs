// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless fixed-layout spread.
//!
//! Drive a `FixedView` over a small comic-like spine with logging page
//! surfaces: turn pages, resize the window, switch to single-page mode and
//! print what the host would see.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example headless_spread`

use std::collections::VecDeque;

use kurbo::{Insets, Size, Vec2};
use log::info;
use understory_fixed_layout::{FrameFit, Margins};
use understory_fixed_view::{
    BookFrame, FixedView, Initiator, LoadTicket, PageSurface, PaginationRequest, ViewEvent,
    ViewSettings,
};
use understory_spread::{PageSpread, ReadingDirection, Spine, SpineEntry, SpineItem, SpreadSlot};

/// A page that "loads" instantly and reports a size per spine item.
struct LoggingPage {
    slot: SpreadSlot,
    sizes: Vec<Size>,
    displaying: bool,
    item: Option<usize>,
    inbox: VecDeque<LoadTicket>,
}

impl LoggingPage {
    fn new(slot: SpreadSlot, sizes: Vec<Size>) -> Self {
        Self {
            slot,
            sizes,
            displaying: false,
            item: None,
            inbox: VecDeque::new(),
        }
    }
}

impl PageSurface for LoggingPage {
    type Element = String;

    fn is_displaying(&self) -> bool {
        self.displaying
    }

    fn current_spine_item(&self) -> Option<usize> {
        self.item
    }

    fn intrinsic_size(&self) -> Size {
        self.item
            .and_then(|i| self.sizes.get(i).copied())
            .unwrap_or(Size::ZERO)
    }

    fn margins(&self) -> Margins {
        Margins::new(Insets::ZERO, Insets::uniform(1.0), Insets::ZERO)
    }

    fn render(&mut self) {
        info!("{:?} surface added to the book frame", self.slot);
        self.displaying = true;
    }

    fn remove(&mut self) {
        info!("{:?} surface removed", self.slot);
        self.displaying = false;
    }

    fn load_spine_item(&mut self, item: &SpineItem, ticket: LoadTicket) {
        info!(
            "{:?} surface loading {} ({:?}, aligned {:?})",
            self.slot,
            item.href(),
            item.page_spread(),
            self.slot.content_alignment()
        );
        self.item = Some(item.index());
        self.inbox.push_back(ticket);
    }

    fn transform_content(&mut self, scale: f64, offset: Vec2) {
        info!(
            "{:?} surface scaled by {scale:.3} at ({:.1}, {:.1})",
            self.slot, offset.x, offset.y
        );
    }

    fn element(&self, item: &SpineItem, selector: &str) -> Option<String> {
        Some(format!("{}{selector}", item.href()))
    }

    fn visible_media_overlay_elements(&self) -> Vec<String> {
        Vec::new()
    }

    fn first_visible_element_cfi(&self) -> Option<String> {
        self.item.map(|_| String::from("/4/2/1:0"))
    }
}

struct Window {
    size: Size,
}

impl BookFrame for Window {
    fn viewport_size(&self) -> Size {
        self.size
    }

    fn margins(&self) -> Margins {
        Margins::new(Insets::uniform(8.0), Insets::ZERO, Insets::uniform(4.0))
    }

    fn attach(&mut self) {
        info!("book frame attached");
    }

    fn detach(&mut self) {
        info!("book frame detached");
    }

    fn apply_styles(&mut self) {
        info!("book styles applied");
    }

    fn set_geometry(&mut self, fit: &FrameFit) {
        info!(
            "book frame at ({}, {}) size {:.1}x{:.1}",
            fit.origin.x, fit.origin.y, fit.element_size.width, fit.element_size.height
        );
    }

    fn subscribe_resize(&mut self) {
        info!("listening for window resizes");
    }

    fn unsubscribe_resize(&mut self) {
        info!("stopped listening for window resizes");
    }
}

type View = FixedView<LoggingPage, Window>;

/// Plays the host: hands every pending ticket back and prints the events.
fn settle(view: &mut View) {
    for slot in SpreadSlot::ALL {
        while let Some(ticket) = view.surface_mut(slot).inbox.pop_front() {
            view.page_loaded(ticket);
        }
    }
    for event in view.take_events() {
        match event {
            ViewEvent::ContentLoaded => println!("content loaded"),
            ViewEvent::PaginationChanged(changed) => {
                let pages: Vec<_> = changed
                    .info
                    .open_pages
                    .iter()
                    .map(|p| p.idref.as_str())
                    .collect();
                println!(
                    "pagination changed: {pages:?} (initiator {:?})",
                    changed.initiator
                );
            }
        }
    }
}

fn main() {
    env_logger::init();

    let mut entries = vec![SpineEntry::new("cover", "cover.xhtml")];
    entries.extend((1..=4).map(|i| SpineEntry::new(format!("page{i}"), format!("page{i}.xhtml"))));
    entries.push(SpineEntry::new("poster", "poster.xhtml").with_page_spread(PageSpread::Center));
    entries.push(SpineEntry::new("back", "back.xhtml"));
    let Ok(spine) = Spine::new(ReadingDirection::LeftToRight, entries) else {
        eprintln!("invalid spine");
        return;
    };

    // Page 3 was scanned at a different resolution; the poster is landscape.
    let mut sizes = vec![Size::new(600.0, 900.0); spine.len()];
    sizes[3] = Size::new(400.0, 600.0);
    sizes[5] = Size::new(1200.0, 900.0);

    let mut view = FixedView::new(
        spine,
        Window {
            size: Size::new(1280.0, 800.0),
        },
        LoggingPage::new(SpreadSlot::Left, sizes.clone()),
        LoggingPage::new(SpreadSlot::Right, sizes.clone()),
        LoggingPage::new(SpreadSlot::Center, sizes),
    );
    view.render();

    let reader = Initiator(1);
    for _ in 0..4 {
        view.open_page_next(Some(reader));
        settle(&mut view);
    }
    println!("bookmark: {:?}", view.bookmark_current_page());

    view.frame_mut().size = Size::new(900.0, 1200.0);
    view.on_viewport_resize();

    view.set_view_settings(ViewSettings::default().with_synthetic_spread(false));
    view.open_page(PaginationRequest::new("page3").with_element_id("panel-2"));
    settle(&mut view);
    if let Some(layout) = view.layout() {
        println!(
            "single page: scale {:.3}, frame {:?}",
            layout.fit.scale,
            layout.fit.frame_rect()
        );
    }
    println!("element: {:?}", view.element(3, "#panel-2"));

    view.remove();
}
