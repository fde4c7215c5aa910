// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spine model: the ordered items of a publication with resolved page-spread positions.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Reading progression of a publication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadingDirection {
    /// Pages advance from left to right.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ltr"))]
    LeftToRight,
    /// Pages advance from right to left (manga, Arabic and Hebrew titles).
    #[cfg_attr(feature = "serde", serde(rename = "rtl"))]
    RightToLeft,
}

impl ReadingDirection {
    /// Returns `true` for [`ReadingDirection::LeftToRight`].
    #[must_use]
    pub const fn is_left_to_right(self) -> bool {
        matches!(self, Self::LeftToRight)
    }

    /// Returns `true` for [`ReadingDirection::RightToLeft`].
    #[must_use]
    pub const fn is_right_to_left(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

/// Physical position of a page inside a two-up spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSpread {
    /// Left half of a spread.
    Left,
    /// Right half of a spread.
    Right,
    /// Full-bleed page occupying the whole spread.
    Center,
}

impl PageSpread {
    /// Returns the other side of a spread. `Center` maps to itself.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }
}

/// Description of one spine item as read from the package document.
///
/// This is the input to [`Spine::new`]; the resolved form is [`SpineItem`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpineEntry {
    /// Manifest id referenced by the spine `itemref`.
    pub idref: String,
    /// Content document location.
    pub href: String,
    /// Explicit `page-spread-*` property, if any.
    pub page_spread: Option<PageSpread>,
    /// `false` when the item's rendition forbids spreads (`rendition:spread="none"`).
    pub spread_allowed: bool,
}

impl SpineEntry {
    /// Creates an entry with no explicit page spread that may take part in spreads.
    #[must_use]
    pub fn new(idref: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
            href: href.into(),
            page_spread: None,
            spread_allowed: true,
        }
    }

    /// Sets an explicit page-spread position.
    #[must_use]
    pub fn with_page_spread(mut self, page_spread: PageSpread) -> Self {
        self.page_spread = Some(page_spread);
        self
    }

    /// Sets whether the item may be paired with a neighbour.
    #[must_use]
    pub fn with_spread_allowed(mut self, spread_allowed: bool) -> Self {
        self.spread_allowed = spread_allowed;
        self
    }
}

/// A spine item with its position in the spine and its resolved page spread.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpineItem {
    idref: String,
    href: String,
    index: usize,
    page_spread: PageSpread,
}

impl SpineItem {
    /// Manifest id of the item.
    #[must_use]
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// Content document location.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Position of the item in the spine.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Resolved page-spread position.
    #[must_use]
    pub fn page_spread(&self) -> PageSpread {
        self.page_spread
    }

    /// Returns `true` if the item sits on the left of a spread.
    #[must_use]
    pub fn is_left_page(&self) -> bool {
        self.page_spread == PageSpread::Left
    }

    /// Returns `true` if the item sits on the right of a spread.
    #[must_use]
    pub fn is_right_page(&self) -> bool {
        self.page_spread == PageSpread::Right
    }

    /// Returns `true` if the item is a full-bleed center page.
    #[must_use]
    pub fn is_center_page(&self) -> bool {
        self.page_spread == PageSpread::Center
    }
}

/// Error returned by [`Spine::new`] for malformed entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpineError {
    /// An entry has an empty idref.
    EmptyIdref {
        /// Position of the offending entry.
        index: usize,
    },
    /// Two entries share an idref.
    DuplicateIdref {
        /// The repeated idref.
        idref: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },
}

impl fmt::Display for SpineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdref { index } => write!(f, "spine entry {index} has an empty idref"),
            Self::DuplicateIdref {
                idref,
                first,
                second,
            } => write!(
                f,
                "idref {idref:?} appears twice in the spine (entries {first} and {second})"
            ),
        }
    }
}

impl core::error::Error for SpineError {}

/// Ordered spine of a publication.
///
/// Page-spread positions are resolved once, at construction:
/// - An explicit [`SpineEntry::page_spread`] wins.
/// - Entries that forbid spreads become [`PageSpread::Center`].
/// - Remaining entries alternate sides. The first page of a spread takes the
///   reading direction's base side (left for LTR, right for RTL). The first item
///   of the book is not the start of a spread, so it lands on the opposite side,
///   the way a cover sits on the right of an LTR book. A center page restarts the
///   alternation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spine {
    items: Vec<SpineItem>,
    direction: ReadingDirection,
    fixed_layout: bool,
}

impl Spine {
    /// Builds a spine from package entries.
    ///
    /// Spines default to pre-paginated; see [`Spine::with_fixed_layout`].
    ///
    /// # Errors
    ///
    /// Returns [`SpineError`] if an idref is empty or repeated.
    pub fn new(
        direction: ReadingDirection,
        entries: impl IntoIterator<Item = SpineEntry>,
    ) -> Result<Self, SpineError> {
        let base_side = match direction {
            ReadingDirection::LeftToRight => PageSpread::Left,
            ReadingDirection::RightToLeft => PageSpread::Right,
        };

        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        let mut items = Vec::new();
        let mut first_in_spread = false;

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.idref.is_empty() {
                return Err(SpineError::EmptyIdref { index });
            }
            if let Some(&first) = seen.get(&entry.idref) {
                return Err(SpineError::DuplicateIdref {
                    idref: entry.idref,
                    first,
                    second: index,
                });
            }
            seen.insert(entry.idref.clone(), index);

            let page_spread = match entry.page_spread {
                Some(explicit) => explicit,
                None if !entry.spread_allowed => PageSpread::Center,
                None if first_in_spread => base_side,
                None => base_side.opposite(),
            };
            first_in_spread =
                !entry.spread_allowed || page_spread == PageSpread::Center || !first_in_spread;

            items.push(SpineItem {
                idref: entry.idref,
                href: entry.href,
                index,
                page_spread,
            });
        }

        Ok(Self {
            items,
            direction,
            fixed_layout: true,
        })
    }

    /// Sets whether the package declares a pre-paginated layout.
    #[must_use]
    pub fn with_fixed_layout(mut self, fixed_layout: bool) -> Self {
        self.fixed_layout = fixed_layout;
        self
    }

    /// Reading direction of the publication.
    #[must_use]
    pub fn direction(&self) -> ReadingDirection {
        self.direction
    }

    /// Returns `true` if pages advance left to right.
    #[must_use]
    pub fn is_left_to_right(&self) -> bool {
        self.direction.is_left_to_right()
    }

    /// Returns `true` if the package is pre-paginated.
    #[must_use]
    pub fn is_fixed_layout(&self) -> bool {
        self.fixed_layout
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the spine has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in spine order.
    #[must_use]
    pub fn items(&self) -> &[SpineItem] {
        &self.items
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SpineItem> {
        self.items.get(index)
    }

    /// Item with the given idref.
    #[must_use]
    pub fn item_by_idref(&self, idref: &str) -> Option<&SpineItem> {
        self.items.iter().find(|item| item.idref == idref)
    }

    /// First item in spine order.
    #[must_use]
    pub fn first(&self) -> Option<&SpineItem> {
        self.items.first()
    }

    /// Last item in spine order.
    #[must_use]
    pub fn last(&self) -> Option<&SpineItem> {
        self.items.last()
    }

    /// Item following `index` in spine order.
    #[must_use]
    pub fn next_item(&self, index: usize) -> Option<&SpineItem> {
        self.items.get(index.checked_add(1)?)
    }

    /// Item preceding `index` in spine order.
    #[must_use]
    pub fn prev_item(&self, index: usize) -> Option<&SpineItem> {
        self.items.get(index.checked_sub(1)?)
    }
}
