// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry used by the arrangers: rectangles, insets, sizes, axes.

/// Axis-aligned on-screen rectangle in integer pixels.
///
/// `right` and `bottom` are exclusive. A rectangle whose right edge is left of
/// its left edge (or bottom above top) is treated as empty and reports a zero
/// width (or height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Minimum x (left)
    pub left: i32,
    /// Minimum y (top)
    pub top: i32,
    /// Maximum x (right, exclusive)
    pub right: i32,
    /// Maximum y (bottom, exclusive)
    pub bottom: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a new rectangle from its edges.
    #[inline(always)]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(left: i32, top: i32, size: Size) -> Self {
        Self::new(
            left,
            top,
            left.saturating_add(size.width),
            top.saturating_add(size.height),
        )
    }

    /// Width, floored at zero.
    #[inline]
    pub const fn width(&self) -> i32 {
        let w = self.right.saturating_sub(self.left);
        if w < 0 { 0 } else { w }
    }

    /// Height, floored at zero.
    #[inline]
    pub const fn height(&self) -> i32 {
        let h = self.bottom.saturating_sub(self.top);
        if h < 0 { 0 } else { h }
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Whether the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive).
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether the two rectangles share at least one pixel.
    ///
    /// Rectangles that only touch along an edge do not intersect, and an
    /// empty rectangle intersects nothing.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Shrink by `insets` on each side. The result never inverts.
    #[must_use]
    pub fn deflate(&self, insets: Insets) -> Self {
        let left = self.left.saturating_add(insets.left);
        let top = self.top.saturating_add(insets.top);
        let right = self.right.saturating_sub(insets.right).max(left);
        let bottom = self.bottom.saturating_sub(insets.bottom).max(top);
        Self::new(left, top, right, bottom)
    }

    /// Start coordinate along `axis`.
    #[inline]
    pub const fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Extent along `axis`, floored at zero.
    #[inline]
    pub const fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    /// Convert to a `kurbo::Rect`.
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }

    /// Convert from a `kurbo::Rect`, rounding outward to whole pixels.
    ///
    /// Coordinates outside the `i32` range saturate.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "values are integral after `expand` and `as` saturates"
    )]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        let r = rect.abs().expand();
        Self::new(r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32)
    }
}

/// Per-side insets (margins or paddings).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Left inset.
    pub left: i32,
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0);

    /// Create insets from four sides.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every side.
    pub const fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Leading inset along `axis` (left or top).
    #[inline]
    pub const fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing inset along `axis` (right or bottom).
    #[inline]
    pub const fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Sum of both insets along `axis`.
    #[inline]
    pub const fn along(&self, axis: Axis) -> i32 {
        self.leading(axis).saturating_add(self.trailing(axis))
    }
}

/// Integer width and height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component along `axis`.
    #[inline]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Build a size from main- and cross-axis components.
    #[inline]
    pub const fn from_axes(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }
}

/// Layout axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The orthogonal axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Placement of a box inside a larger span.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Left or top.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right or bottom.
    End,
}

impl Align {
    /// Offset of a box of `size` inside a span of `available` pixels.
    ///
    /// Oversized boxes are start-aligned.
    #[inline]
    pub const fn offset(self, available: i32, size: i32) -> i32 {
        let free = available.saturating_sub(size);
        if free <= 0 {
            return 0;
        }
        match self {
            Self::Start => 0,
            Self::Center => free / 2,
            Self::End => free,
        }
    }
}

/// Display scale as a percentage (100 is 1x).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpiScale(pub u32);

impl Default for DpiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DpiScale {
    /// 1x scale.
    pub const IDENTITY: Self = Self(100);

    /// Scale a logical length, rounding half away from zero.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "result is clamped into the i32 range before narrowing"
    )]
    pub fn scale(self, value: i32) -> i32 {
        if self.0 == 100 {
            return value;
        }
        let scaled = i64::from(value) * i64::from(self.0);
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Scale every side of `insets`.
    pub fn scale_insets(self, insets: Insets) -> Insets {
        Insets::new(
            self.scale(insets.left),
            self.scale(insets.top),
            self.scale(insets.right),
            self.scale(insets.bottom),
        )
    }
}
