// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Fixed View: a headless view for fixed-layout page spreads.
//!
//! [`FixedView`] ties together the spread state from `understory_spread` and
//! the scale-to-fit geometry from `understory_fixed_layout`. The host supplies
//! the parts that touch a real document or window:
//!
//! - three [`PageSurface`]s (left, right and center) that load and draw single
//!   pages;
//! - a [`BookFrame`] that wraps the book element and reports the viewport size.
//!
//! Page loads are asynchronous. Each navigation starts a redraw pass that hands
//! out [`LoadTicket`]s; the host returns them with [`FixedView::page_loaded`].
//! When the last ticket of the latest pass comes back, the view fits the spread
//! into the viewport and queues [`ViewEvent`]s for the host to drain with
//! [`FixedView::take_events`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_fixed_layout::{FrameFit, Margins};
//! use understory_fixed_view::{BookFrame, FixedView, LoadTicket, PageSurface, ViewEvent};
//! use understory_spread::{ReadingDirection, Spine, SpineEntry, SpineItem, SpreadSlot};
//!
//! #[derive(Default)]
//! struct Page {
//!     shown: bool,
//!     item: Option<usize>,
//!     ticket: Option<LoadTicket>,
//!     scale: f64,
//! }
//!
//! impl PageSurface for Page {
//!     type Element = ();
//!     fn is_displaying(&self) -> bool { self.shown }
//!     fn current_spine_item(&self) -> Option<usize> { self.item }
//!     fn intrinsic_size(&self) -> Size { Size::new(400.0, 600.0) }
//!     fn margins(&self) -> Margins { Margins::ZERO }
//!     fn render(&mut self) { self.shown = true; }
//!     fn remove(&mut self) { self.shown = false; }
//!     fn load_spine_item(&mut self, item: &SpineItem, ticket: LoadTicket) {
//!         self.item = Some(item.index());
//!         self.ticket = Some(ticket);
//!     }
//!     fn transform_content(&mut self, scale: f64, _offset: Vec2) { self.scale = scale; }
//!     fn element(&self, _: &SpineItem, _: &str) -> Option<()> { None }
//!     fn visible_media_overlay_elements(&self) -> Vec<()> { Vec::new() }
//!     fn first_visible_element_cfi(&self) -> Option<String> { None }
//! }
//!
//! struct Frame;
//!
//! impl BookFrame for Frame {
//!     fn viewport_size(&self) -> Size { Size::new(1200.0, 900.0) }
//!     fn margins(&self) -> Margins { Margins::ZERO }
//!     fn attach(&mut self) {}
//!     fn detach(&mut self) {}
//!     fn apply_styles(&mut self) {}
//!     fn set_geometry(&mut self, _fit: &FrameFit) {}
//!     fn subscribe_resize(&mut self) {}
//!     fn unsubscribe_resize(&mut self) {}
//! }
//!
//! let spine = Spine::new(
//!     ReadingDirection::LeftToRight,
//!     (0..4).map(|i| SpineEntry::new(format!("p{i}"), format!("p{i}.xhtml"))),
//! )
//! .unwrap();
//! let mut view = FixedView::new(spine, Frame, Page::default(), Page::default(), Page::default());
//! view.render();
//!
//! // The cover opens on the right; the host reports the load back.
//! view.open_page_next(None);
//! let ticket = view.surface_mut(SpreadSlot::Right).ticket.take().unwrap();
//! view.page_loaded(ticket);
//!
//! let events = view.take_events();
//! assert_eq!(events[0], ViewEvent::ContentLoaded);
//! assert!(matches!(events[1], ViewEvent::PaginationChanged(_)));
//!
//! // 800x600 of logical content fitted into 1200x900.
//! assert_eq!(view.surface(SpreadSlot::Right).scale, 1.5);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: derives `Serialize`/`Deserialize` for [`ViewSettings`],
//!   [`PaginationInfo`], [`PaginationRequest`] and [`BookmarkData`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod frame;
mod pagination;
mod settings;
mod surface;
mod view;

pub use events::{PaginationChanged, ViewEvent};
pub use frame::BookFrame;
pub use pagination::{BookmarkData, Initiator, OpenPage, PaginationInfo, PaginationRequest};
pub use settings::ViewSettings;
pub use surface::{LoadTicket, PageSurface};
pub use view::FixedView;
