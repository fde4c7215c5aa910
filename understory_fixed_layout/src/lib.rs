// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Fixed Layout: scale-to-fit geometry for fixed-layout page spreads.
//!
//! A fixed-layout spread shows up to three page surfaces (left, right and
//! center), each with a natural content size and its own margin, border and
//! padding. This crate turns those measurements into one uniformly scaled,
//! centered book frame:
//!
//! - [`Margins`]: margin/border/padding edges of a box, with
//!   [`Margins::aggregate`] for the worst case over several surfaces.
//! - [`ActiveSurfaces`] / [`resolve_content_size`]: the logical size of the
//!   displayed pages as one [`ContentSize`], including the separator offset
//!   between a left and a right page.
//! - [`fit_frame`]: the uniform scale and the centered frame position.
//! - [`fit_spread`]: the whole pass, including per-surface [`Placement`]s.
//!
//! Everything here is pure: same inputs, same outputs, no retained state.
//! Degenerate inputs (a viewport smaller than the margins, content with no
//! area, no displaying surface) produce `None` instead of a layout.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Size, Vec2};
//! use understory_fixed_layout::{Margins, SpreadSurfaces, SurfaceMetrics, fit_spread};
//!
//! let page = SurfaceMetrics {
//!     intrinsic_size: Size::new(400.0, 600.0),
//!     margins: Margins::ZERO,
//! };
//! let surfaces = SpreadSurfaces {
//!     left: Some(page),
//!     right: Some(page),
//!     center: None,
//! };
//! let book = Margins::new(Insets::ZERO, Insets::ZERO, Insets::uniform(10.0));
//!
//! let layout = fit_spread(Size::new(1020.0, 620.0), &book, &surfaces).unwrap();
//! assert_eq!(layout.fit.scale, 1.0);
//! assert_eq!(layout.fit.book_size, Size::new(820.0, 620.0));
//! assert_eq!(layout.fit.origin.x, 100.0);
//!
//! // The right page sits past the separator.
//! let right = layout.placements.right.unwrap();
//! assert_eq!(right.offset, Vec2::new(410.0, 10.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//!
//! This crate is `no_std`.

#![no_std]

mod content;
mod fit;
mod margins;

pub use content::{ActiveSurfaces, ContentSize, resolve_content_size};
pub use fit::{
    FrameFit, Placement, Placements, SpreadLayout, SpreadSurfaces, SurfaceMetrics, fit_frame,
    fit_spread, place_surfaces,
};
pub use margins::Margins;
