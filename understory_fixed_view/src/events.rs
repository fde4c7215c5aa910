// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::pagination::{Initiator, PaginationInfo};

/// Payload of [`ViewEvent::PaginationChanged`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationChanged {
    /// Pages shown after the redraw.
    pub info: PaginationInfo,
    /// Initiator of the navigation that caused the redraw.
    pub initiator: Option<Initiator>,
    /// Element id carried by the navigation request, if any.
    pub element_id: Option<String>,
}

/// Notification queued by [`FixedView`](crate::FixedView).
///
/// Drain with [`FixedView::take_events`](crate::FixedView::take_events). For a
/// completed redraw pass, `ContentLoaded` always comes right before
/// `PaginationChanged`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// All pages of a redraw pass finished loading.
    ContentLoaded,
    /// The pages were laid out and the open pages changed.
    PaginationChanged(PaginationChanged),
}
