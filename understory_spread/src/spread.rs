// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::spine::{PageSpread, Spine, SpineItem};

/// One of the three page slots of a fixed-layout spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpreadSlot {
    /// Left half of a two-up spread.
    Left,
    /// Right half of a two-up spread.
    Right,
    /// Full-bleed page shown on its own.
    Center,
}

impl SpreadSlot {
    /// All slots, in the order surfaces are visited during a redraw.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Center];

    /// Slot that holds a page with the given spread position.
    #[must_use]
    pub const fn from_page_spread(page_spread: PageSpread) -> Self {
        match page_spread {
            PageSpread::Left => Self::Left,
            PageSpread::Right => Self::Right,
            PageSpread::Center => Self::Center,
        }
    }

    /// How a surface in this slot aligns its content.
    ///
    /// Side pages hug the fold between them.
    #[must_use]
    pub const fn content_alignment(self) -> ContentAlignment {
        match self {
            Self::Left => ContentAlignment::Right,
            Self::Right => ContentAlignment::Left,
            Self::Center => ContentAlignment::Center,
        }
    }
}

/// Horizontal alignment of a page inside its surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentAlignment {
    /// Flush against the left edge.
    Left,
    /// Flush against the right edge.
    Right,
    /// Centered.
    Center,
}

/// Which spine items currently occupy the left, right and center slots.
///
/// `Spread` holds spine indices only and borrows the [`Spine`] for each
/// navigation step. A center item never shares the spread with a left or right
/// item: every open operation clears all slots before placing items.
///
/// When synthetic spreads are disabled every item opens in the center slot,
/// one page at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spread {
    left: Option<usize>,
    right: Option<usize>,
    center: Option<usize>,
    synthetic_spread: bool,
}

impl Default for Spread {
    fn default() -> Self {
        Self::new()
    }
}

impl Spread {
    /// Creates an empty spread with synthetic spreads enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: None,
            right: None,
            center: None,
            synthetic_spread: true,
        }
    }

    /// Enables or disables two-up display.
    ///
    /// Takes effect on the next open operation; the current slots are kept.
    pub fn set_synthetic_spread(&mut self, synthetic_spread: bool) {
        self.synthetic_spread = synthetic_spread;
    }

    /// Returns `true` if side pages are paired into two-up spreads.
    #[must_use]
    pub fn is_synthetic_spread(&self) -> bool {
        self.synthetic_spread
    }

    /// Spine index in the left slot.
    #[must_use]
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// Spine index in the right slot.
    #[must_use]
    pub fn right(&self) -> Option<usize> {
        self.right
    }

    /// Spine index in the center slot.
    #[must_use]
    pub fn center(&self) -> Option<usize> {
        self.center
    }

    /// Spine index in `slot`.
    #[must_use]
    pub fn slot(&self, slot: SpreadSlot) -> Option<usize> {
        match slot {
            SpreadSlot::Left => self.left,
            SpreadSlot::Right => self.right,
            SpreadSlot::Center => self.center,
        }
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.center.is_none()
    }

    /// Clears every slot.
    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
        self.center = None;
    }

    /// Spine indices currently open, sorted in spine order.
    #[must_use]
    pub fn valid_items(&self) -> SmallVec<[usize; 3]> {
        let mut items: SmallVec<[usize; 3]> =
            [self.left, self.right, self.center].into_iter().flatten().collect();
        items.sort_unstable();
        items
    }

    /// Opens the first item of the spine, or clears the spread if the spine is empty.
    ///
    /// Returns `true` if the slot occupancy changed.
    pub fn open_first(&mut self, spine: &Spine) -> bool {
        match spine.first() {
            Some(item) => self.open_item(spine, item.index()),
            None => self.replace_with(Slots::EMPTY),
        }
    }

    /// Opens the last item of the spine, or clears the spread if the spine is empty.
    ///
    /// Returns `true` if the slot occupancy changed.
    pub fn open_last(&mut self, spine: &Spine) -> bool {
        match spine.last() {
            Some(item) => self.open_item(spine, item.index()),
            None => self.replace_with(Slots::EMPTY),
        }
    }

    /// Opens the spine item at `index`, pairing it with its neighbour when the
    /// spread allows.
    ///
    /// A left page is paired with the page that follows it in reading order and
    /// a right page with the one that precedes it; for right-to-left
    /// publications the pairing is mirrored. The neighbour is only placed if it
    /// belongs on the opposite side.
    ///
    /// Unknown indices leave the spread untouched. Returns `true` if the slot
    /// occupancy changed.
    pub fn open_item(&mut self, spine: &Spine, index: usize) -> bool {
        let Some(item) = spine.get(index) else {
            log::debug!("spread: ignoring open of unknown spine index {index}");
            return false;
        };

        let mut slots = Slots::EMPTY;
        let position = self.position_of(item);
        slots.place(position, item.index());

        if position != SpreadSlot::Center {
            if let Some(neighbour) = Self::neighbour_of(spine, item) {
                let neighbour_position = self.position_of(neighbour);
                if neighbour_position != position && neighbour_position != SpreadSlot::Center {
                    slots.place(neighbour_position, neighbour.index());
                }
            }
        }

        log::debug!(
            "spread: open {} -> left={:?} right={:?} center={:?}",
            item.idref(),
            slots.left,
            slots.right,
            slots.center
        );
        self.replace_with(slots)
    }

    /// Advances one spread.
    ///
    /// An empty spread opens the first item. At the end of the spine the spread
    /// is left untouched. Returns `true` if the slot occupancy changed.
    pub fn open_next(&mut self, spine: &Spine) -> bool {
        let Some(&last) = self.valid_items().last() else {
            return self.open_first(spine);
        };
        match spine.next_item(last) {
            Some(next) => self.open_item(spine, next.index()),
            None => false,
        }
    }

    /// Retreats one spread.
    ///
    /// An empty spread opens the last item. At the start of the spine the spread
    /// is left untouched. Returns `true` if the slot occupancy changed.
    pub fn open_prev(&mut self, spine: &Spine) -> bool {
        let Some(&first) = self.valid_items().first() else {
            return self.open_last(spine);
        };
        match spine.prev_item(first) {
            Some(prev) => self.open_item(spine, prev.index()),
            None => false,
        }
    }

    fn position_of(&self, item: &SpineItem) -> SpreadSlot {
        if self.synthetic_spread {
            SpreadSlot::from_page_spread(item.page_spread())
        } else {
            SpreadSlot::Center
        }
    }

    fn neighbour_of<'a>(spine: &'a Spine, item: &SpineItem) -> Option<&'a SpineItem> {
        let forward = match item.page_spread() {
            PageSpread::Left => spine.is_left_to_right(),
            PageSpread::Right => !spine.is_left_to_right(),
            PageSpread::Center => return None,
        };
        if forward {
            spine.next_item(item.index())
        } else {
            spine.prev_item(item.index())
        }
    }

    fn replace_with(&mut self, slots: Slots) -> bool {
        let changed =
            self.left != slots.left || self.right != slots.right || self.center != slots.center;
        self.left = slots.left;
        self.right = slots.right;
        self.center = slots.center;
        changed
    }
}

struct Slots {
    left: Option<usize>,
    right: Option<usize>,
    center: Option<usize>,
}

impl Slots {
    const EMPTY: Self = Self {
        left: None,
        right: None,
        center: None,
    };

    fn place(&mut self, slot: SpreadSlot, index: usize) {
        match slot {
            SpreadSlot::Left => self.left = Some(index),
            SpreadSlot::Right => self.right = Some(index),
            SpreadSlot::Center => self.center = Some(index),
        }
    }
}
