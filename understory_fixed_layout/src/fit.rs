// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::content::{ActiveSurfaces, ContentSize};
use crate::margins::Margins;

/// Measured state of one displaying page surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceMetrics {
    /// Natural size of the page content before scaling.
    pub intrinsic_size: Size,
    /// Margin, border and padding of the surface's rendered box.
    pub margins: Margins,
}

/// Displaying surfaces of a spread. `None` means the surface is not displaying.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpreadSurfaces {
    /// Left page surface.
    pub left: Option<SurfaceMetrics>,
    /// Right page surface.
    pub right: Option<SurfaceMetrics>,
    /// Center page surface.
    pub center: Option<SurfaceMetrics>,
}

impl SpreadSurfaces {
    /// Classifies the displaying surfaces for content sizing.
    #[must_use]
    pub fn active(&self) -> ActiveSurfaces {
        ActiveSurfaces::from_sizes(
            self.left.map(|s| s.intrinsic_size),
            self.right.map(|s| s.intrinsic_size),
            self.center.map(|s| s.intrinsic_size),
        )
    }

    /// Logical content size of the displaying surfaces.
    #[must_use]
    pub fn content_size(&self) -> Option<ContentSize> {
        self.active().resolve()
    }

    /// Worst-case page margins; hidden surfaces count as empty boxes.
    #[must_use]
    pub fn page_margins(&self) -> Margins {
        Margins::aggregate(
            [self.left, self.right, self.center]
                .into_iter()
                .map(|s| s.map_or(Margins::ZERO, |s| s.margins)),
        )
    }
}

/// Scale and frame geometry produced by [`fit_frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameFit {
    /// Uniform content scale.
    pub scale: f64,
    /// Top-left corner of the book frame in viewport coordinates.
    pub origin: Point,
    /// Scaled content plus page margins; the size applied to the book element.
    pub element_size: Size,
    /// Element size plus book margins; the space the frame occupies.
    pub book_size: Size,
}

impl FrameFit {
    /// Outer rectangle of the book frame in viewport coordinates.
    #[must_use]
    pub fn frame_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.book_size)
    }
}

/// Scale and offset a surface must apply to its rendered content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Uniform content scale.
    pub scale: f64,
    /// Offset of the content inside the book element.
    pub offset: Vec2,
}

/// Per-slot placements. `None` for surfaces that are not displaying.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placements {
    /// Placement of the left surface.
    pub left: Option<Placement>,
    /// Placement of the right surface.
    pub right: Option<Placement>,
    /// Placement of the center surface.
    pub center: Option<Placement>,
}

/// A complete layout pass: frame geometry plus per-surface placements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadLayout {
    /// Frame geometry and scale.
    pub fit: FrameFit,
    /// Logical content size the fit was computed for.
    pub content: ContentSize,
    /// Aggregated page margins.
    pub page_margins: Margins,
    /// Where each displaying surface goes.
    pub placements: Placements,
}

/// Fits `content` into `viewport` and centers the resulting book frame.
///
/// The space left for content is the viewport minus book and page margins. The
/// scale is the smaller of the horizontal and vertical ratios, so the aspect
/// ratio is preserved and the binding dimension fills its axis. The frame is
/// centered with its origin floored to whole pixels; a frame that does not fit
/// is pinned to the top-left corner.
///
/// Returns `None` when there is nothing sensible to lay out: the viewport is
/// used up by the book margins or page margins, or the content has no area.
#[must_use]
pub fn fit_frame(
    viewport: Size,
    book_margins: &Margins,
    page_margins: &Margins,
    content: &ContentSize,
) -> Option<FrameFit> {
    let target = Size::new(
        viewport.width - book_margins.width(),
        viewport.height - book_margins.height(),
    );
    if !(target.width > 0.0 && target.height > 0.0) {
        return None;
    }

    let available = Size::new(
        target.width - page_margins.width(),
        target.height - page_margins.height(),
    );
    if !(available.width > 0.0 && available.height > 0.0) {
        return None;
    }
    if !(content.width > 0.0 && content.height > 0.0) {
        return None;
    }

    let scale = (available.width / content.width).min(available.height / content.height);

    let element_size = Size::new(
        content.width * scale + page_margins.width(),
        content.height * scale + page_margins.height(),
    );
    let book_size = Size::new(
        element_size.width + book_margins.width(),
        element_size.height + book_margins.height(),
    );

    let left = libm::floor((viewport.width - book_size.width) / 2.0).max(0.0);
    let top = libm::floor((viewport.height - book_size.height) / 2.0).max(0.0);

    Some(FrameFit {
        scale,
        origin: Point::new(left, top),
        element_size,
        book_size,
    })
}

/// Computes where each displaying surface goes inside the book element.
///
/// Every surface starts at the book padding origin. The right surface is
/// shifted past the separator (scaled), and past the left surface's left edge
/// when a left surface is displaying.
#[must_use]
pub fn place_surfaces(
    fit: &FrameFit,
    book_margins: &Margins,
    content: &ContentSize,
    surfaces: &SpreadSurfaces,
) -> Placements {
    let scale = fit.scale;
    let padding = book_margins.padding();
    let base = Vec2::new(padding.x0, padding.y0);

    let right = surfaces.right.map(|_| {
        let mut x = base.x + content.separator_position * scale;
        if let Some(left) = surfaces.left {
            x += left.margins.left();
        }
        Placement {
            scale,
            offset: Vec2::new(x, base.y),
        }
    });

    Placements {
        left: surfaces.left.map(|_| Placement {
            scale,
            offset: base,
        }),
        right,
        center: surfaces.center.map(|_| Placement {
            scale,
            offset: base,
        }),
    }
}

/// Runs a full layout pass for the displaying surfaces.
///
/// This is [`SpreadSurfaces::content_size`], [`SpreadSurfaces::page_margins`],
/// [`fit_frame`] and [`place_surfaces`] in sequence. Returns `None` when no
/// surface is displaying or the fit is degenerate.
#[must_use]
pub fn fit_spread(
    viewport: Size,
    book_margins: &Margins,
    surfaces: &SpreadSurfaces,
) -> Option<SpreadLayout> {
    let content = surfaces.content_size()?;
    let page_margins = surfaces.page_margins();
    let fit = fit_frame(viewport, book_margins, &page_margins, &content)?;
    let placements = place_surfaces(&fit, book_margins, &content, surfaces);
    Some(SpreadLayout {
        fit,
        content,
        page_margins,
        placements,
    })
}
