// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Logical size of everything shown in a spread, in unscaled content units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentSize {
    /// Combined width of the active pages.
    pub width: f64,
    /// Common height of the active pages.
    pub height: f64,
    /// X offset of the boundary between the left and right halves.
    ///
    /// Zero for a center page.
    pub separator_position: f64,
}

impl ContentSize {
    /// Width and height as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Which surfaces are active, with their intrinsic sizes.
///
/// Variants are listed in priority order: a center page hides any side pages,
/// and two side pages take precedence over one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActiveSurfaces {
    /// Nothing is displayed.
    None,
    /// A full-bleed center page.
    Center(Size),
    /// A left and a right page side by side.
    Dual {
        /// Intrinsic size of the left page.
        left: Size,
        /// Intrinsic size of the right page.
        right: Size,
    },
    /// Only the left half of a spread.
    LeftOnly(Size),
    /// Only the right half of a spread.
    RightOnly(Size),
}

impl ActiveSurfaces {
    /// Classifies the intrinsic sizes of the displaying surfaces.
    #[must_use]
    pub fn from_sizes(left: Option<Size>, right: Option<Size>, center: Option<Size>) -> Self {
        match (left, right, center) {
            (_, _, Some(center)) => Self::Center(center),
            (Some(left), Some(right), None) => Self::Dual { left, right },
            (Some(left), None, None) => Self::LeftOnly(left),
            (None, Some(right), None) => Self::RightOnly(right),
            (None, None, None) => Self::None,
        }
    }

    /// Combines the active sizes into one logical content size.
    ///
    /// - A center page is used as is.
    /// - Two side pages are summed. When their heights differ, the right page's
    ///   width is rescaled to the left page's height before summing and the
    ///   left height is reported.
    /// - A lone side page reserves room for its absent partner, so the width is
    ///   doubled.
    #[must_use]
    pub fn resolve(self) -> Option<ContentSize> {
        match self {
            Self::None => None,
            Self::Center(center) => Some(ContentSize {
                width: center.width,
                height: center.height,
                separator_position: 0.0,
            }),
            Self::Dual { left, right } => {
                let right_width = if left.height == right.height || right.height <= 0.0 {
                    right.width
                } else {
                    right.width * (left.height / right.height)
                };
                Some(ContentSize {
                    width: left.width + right_width,
                    height: left.height,
                    separator_position: left.width,
                })
            }
            Self::LeftOnly(page) | Self::RightOnly(page) => Some(ContentSize {
                width: page.width * 2.0,
                height: page.height,
                separator_position: page.width,
            }),
        }
    }
}

/// Shorthand for `ActiveSurfaces::from_sizes(left, right, center).resolve()`.
#[must_use]
pub fn resolve_content_size(
    left: Option<Size>,
    right: Option<Size>,
    center: Option<Size>,
) -> Option<ContentSize> {
    ActiveSurfaces::from_sizes(left, right, center).resolve()
}
