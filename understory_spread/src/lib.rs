// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Spread: spine and page-spread state for fixed-layout publications.
//!
//! Pre-paginated publications (comics, magazines, picture books) show one or
//! two pages at a time. This crate models _which_ pages are open:
//!
//! - [`Spine`]: the ordered items of a publication, built from [`SpineEntry`]
//!   values. Each item's [`PageSpread`] (left, right or center) is resolved once
//!   at construction from explicit properties and the [`ReadingDirection`].
//! - [`Spread`]: the left/right/center slot occupancy, with navigation
//!   operations ([`Spread::open_item`], [`Spread::open_next`],
//!   [`Spread::open_prev`]) and a synthetic-spread flag that forces
//!   single-page display.
//!
//! It does not load, render or lay out anything; see `understory_fixed_layout`
//! for the geometry and `understory_fixed_view` for the view that drives page
//! surfaces.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_spread::{ReadingDirection, Spine, SpineEntry, Spread};
//!
//! let spine = Spine::new(
//!     ReadingDirection::LeftToRight,
//!     (0..5).map(|i| SpineEntry::new(format!("page{i}"), format!("page{i}.xhtml"))),
//! )
//! .unwrap();
//!
//! let mut spread = Spread::new();
//!
//! // The cover opens alone on the right.
//! spread.open_first(&spine);
//! assert_eq!(spread.right(), Some(0));
//! assert_eq!(spread.left(), None);
//!
//! // Then pages pair up: 1 on the left, 2 on the right.
//! spread.open_next(&spine);
//! assert_eq!(spread.valid_items().as_slice(), &[1, 2]);
//!
//! // Single-page mode puts everything in the center slot.
//! spread.set_synthetic_spread(false);
//! spread.open_next(&spine);
//! assert_eq!(spread.center(), Some(3));
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for the spine types and [`SpreadSlot`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod spine;
mod spread;

pub use spine::{PageSpread, ReadingDirection, Spine, SpineEntry, SpineError, SpineItem};
pub use spread::{ContentAlignment, Spread, SpreadSlot};
