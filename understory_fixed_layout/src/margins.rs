// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Insets;

/// Margin, border and padding edges of a rendered box.
///
/// Each group is a [`Insets`] (`x0` left, `y0` top, `x1` right, `y1` bottom).
/// All edges are non-negative: [`Margins::new`] clamps negative and non-finite
/// values to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    margin: Insets,
    border: Insets,
    padding: Insets,
}

impl Margins {
    /// A box with no margin, border or padding.
    pub const ZERO: Self = Self {
        margin: Insets::ZERO,
        border: Insets::ZERO,
        padding: Insets::ZERO,
    };

    /// Creates a margins box from its three edge groups.
    #[must_use]
    pub fn new(margin: Insets, border: Insets, padding: Insets) -> Self {
        Self {
            margin: sanitize(margin),
            border: sanitize(border),
            padding: sanitize(padding),
        }
    }

    /// Margin edges.
    #[must_use]
    pub fn margin(&self) -> Insets {
        self.margin
    }

    /// Border edges.
    #[must_use]
    pub fn border(&self) -> Insets {
        self.border
    }

    /// Padding edges.
    #[must_use]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Total left edge: margin + border + padding.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.margin.x0 + self.border.x0 + self.padding.x0
    }

    /// Total right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.margin.x1 + self.border.x1 + self.padding.x1
    }

    /// Total top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.margin.y0 + self.border.y0 + self.padding.y0
    }

    /// Total bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.margin.y1 + self.border.y1 + self.padding.y1
    }

    /// Horizontal space taken by the edges.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.left() + self.right()
    }

    /// Vertical space taken by the edges.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top() + self.bottom()
    }

    /// Per-group, per-side maximum of two boxes.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            margin: max_insets(self.margin, other.margin),
            border: max_insets(self.border, other.border),
            padding: max_insets(self.padding, other.padding),
        }
    }

    /// Worst-case box over a set of side-by-side surfaces.
    ///
    /// Surfaces that are not displaying should be passed as [`Margins::ZERO`]
    /// (or left out). An empty input yields [`Margins::ZERO`].
    #[must_use]
    pub fn aggregate(boxes: impl IntoIterator<Item = Self>) -> Self {
        boxes.into_iter().fold(Self::ZERO, Self::max)
    }
}

fn sanitize(insets: Insets) -> Insets {
    Insets::new(
        edge(insets.x0),
        edge(insets.y0),
        edge(insets.x1),
        edge(insets.y1),
    )
}

fn edge(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn max_insets(a: Insets, b: Insets) -> Insets {
    Insets::new(a.x0.max(b.x0), a.y0.max(b.y0), a.x1.max(b.x1), a.y1.max(b.y1))
}
