// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use understory_spread::ReadingDirection;

/// Opaque identifier of whoever asked for a navigation.
///
/// Carried through a redraw pass and echoed in
/// [`PaginationChanged`](crate::PaginationChanged) so the requester can tell
/// its own page turns apart from others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Initiator(pub u64);

/// A request to show a specific spine item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaginationRequest {
    /// Idref of the spine item to open. Requests without one are ignored.
    pub spine_item: Option<String>,
    /// Who asked for the page turn.
    pub initiator: Option<Initiator>,
    /// Element the requester wants to reach inside the item.
    pub element_id: Option<String>,
}

impl PaginationRequest {
    /// Request for the spine item with the given idref.
    #[must_use]
    pub fn new(idref: impl Into<String>) -> Self {
        Self {
            spine_item: Some(idref.into()),
            initiator: None,
            element_id: None,
        }
    }

    /// Sets the initiator.
    #[must_use]
    pub fn with_initiator(mut self, initiator: Initiator) -> Self {
        self.initiator = Some(initiator);
        self
    }

    /// Sets the target element id.
    #[must_use]
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }
}

/// One open page. Fixed-layout items are always a single page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpenPage {
    /// Page index inside the spine item; always 0.
    pub spine_item_page_index: usize,
    /// Number of pages of the spine item; always 1.
    pub spine_item_page_count: usize,
    /// Idref of the spine item.
    pub idref: String,
    /// Position of the spine item in the spine.
    pub spine_item_index: usize,
}

/// What the view currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaginationInfo {
    /// Number of items in the spine.
    pub total_items: usize,
    /// Whether the publication is pre-paginated.
    pub is_fixed_layout: bool,
    /// Reading direction of the spine.
    pub direction: ReadingDirection,
    /// Open pages in slot order: left, right, then center.
    pub open_pages: Vec<OpenPage>,
}

impl PaginationInfo {
    /// Info with no open pages.
    #[must_use]
    pub fn new(total_items: usize, is_fixed_layout: bool, direction: ReadingDirection) -> Self {
        Self {
            total_items,
            is_fixed_layout,
            direction,
            open_pages: Vec::new(),
        }
    }

    /// Records a single-page spine item as open.
    pub fn add_open_page(&mut self, idref: impl Into<String>, spine_item_index: usize) {
        self.open_pages.push(OpenPage {
            spine_item_page_index: 0,
            spine_item_page_count: 1,
            idref: idref.into(),
            spine_item_index,
        });
    }
}

/// A reading position: a spine item and a location inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BookmarkData {
    /// Idref of the spine item, or empty when nothing is displayed.
    pub idref: String,
    /// Content fragment identifier inside the item, or empty.
    pub content_cfi: String,
}

impl BookmarkData {
    /// Creates a bookmark.
    #[must_use]
    pub fn new(idref: impl Into<String>, content_cfi: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
            content_cfi: content_cfi.into(),
        }
    }

    /// Whether this bookmark points nowhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idref.is_empty()
    }
}
