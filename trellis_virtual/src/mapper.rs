// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure index/pixel arithmetic over a tile geometry.
//!
//! Content coordinates are 64-bit: the full scrolled extent of a large element
//! set does not fit the 32-bit pixel range used for on-screen rectangles.

use core::ops::RangeInclusive;

use trellis_layout::{Axis, TileGeometry};

/// A point in content coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContentPoint {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
}

impl ContentPoint {
    /// Create a new point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    pub const fn along(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// The same point as a float point.
    #[allow(
        clippy::cast_precision_loss,
        reason = "content coordinates stay well inside the f64 mantissa"
    )]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }
}

/// An axis-aligned rectangle in content coordinates; `x1`/`y1` are exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContentRect {
    /// Minimum x.
    pub x0: i64,
    /// Minimum y.
    pub y0: i64,
    /// Maximum x (exclusive).
    pub x1: i64,
    /// Maximum y (exclusive).
    pub y1: i64,
}

impl ContentRect {
    /// Create a new rectangle from its edges.
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle spanning two corners in any order.
    pub fn from_points(a: ContentPoint, b: ContentPoint) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Integer rectangle covering a float one, rounding outward.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate; content coordinates stay far inside i64"
    )]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        let r = rect.abs().expand();
        Self::new(r.x0 as i64, r.y0 as i64, r.x1 as i64, r.y1 as i64)
    }

    /// Leading edge along `axis`.
    pub const fn start(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.x0,
            Axis::Vertical => self.y0,
        }
    }

    /// Trailing edge (exclusive) along `axis`.
    pub const fn end(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.x1,
            Axis::Vertical => self.y1,
        }
    }

    /// Whether the rectangle has no area.
    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Whether the two rectangles share a non-empty area.
    ///
    /// An empty rectangle intersects nothing.
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }
}

/// Maps element indices to content positions and back for one tile geometry.
///
/// Lists are the one-track-wide special case: a single column in vertical
/// flow. Every query degrades to `0` / empty / `None` when the geometry has a
/// non-positive item extent or pitch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexMapper {
    geometry: TileGeometry,
}

impl IndexMapper {
    /// Wrap a geometry.
    pub const fn new(geometry: TileGeometry) -> Self {
        Self { geometry }
    }

    /// The wrapped geometry.
    pub const fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    /// The scrolling axis.
    pub const fn main_axis(&self) -> Axis {
        self.geometry.main_axis()
    }

    /// Whether index math is meaningful for this geometry.
    pub fn is_valid(&self) -> bool {
        !self.geometry.is_degenerate()
    }

    /// Elements per track.
    pub fn cross_count(&self) -> usize {
        self.geometry.cross_count()
    }

    /// Main-axis distance between two consecutive tracks.
    pub fn pitch(&self) -> i64 {
        self.geometry.pitch(self.main_axis())
    }

    /// Track (row in vertical flow, column in horizontal flow) of `index`.
    pub fn track_of(&self, index: usize) -> usize {
        index / self.cross_count()
    }

    /// Content rectangle of the tile at `index`.
    pub fn element_rect(&self, index: usize) -> ContentRect {
        if !self.is_valid() {
            return ContentRect::default();
        }
        let (x, y) = self.geometry.tile_origin(index);
        ContentRect::new(
            x,
            y,
            x + i64::from(self.geometry.item.width),
            y + i64::from(self.geometry.item.height),
        )
    }

    /// First element of the track under the main-axis `offset`.
    pub fn top_element_index(&self, offset: i64) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let track = offset.max(0) / self.pitch();
        usize::try_from(track)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.cross_count())
    }

    /// Inclusive range of elements whose tracks intersect
    /// `[offset, offset + viewport_extent)`, clamped to `count`.
    pub fn visible_range(
        &self,
        offset: i64,
        viewport_extent: i64,
        count: usize,
    ) -> Option<RangeInclusive<usize>> {
        if !self.is_valid() || count == 0 || viewport_extent <= 0 {
            return None;
        }
        let offset = offset.max(0);
        let cross = self.cross_count();
        let first = self.top_element_index(offset);
        if first >= count {
            return None;
        }
        let last_track = usize::try_from((offset + viewport_extent - 1) / self.pitch())
            .unwrap_or(usize::MAX);
        let last = last_track
            .saturating_add(1)
            .saturating_mul(cross)
            .saturating_sub(1)
            .min(count - 1);
        Some(first..=last)
    }

    /// Whether the tile at `index` overlaps `[offset, offset + viewport_extent)`
    /// along the main axis.
    pub fn is_element_visible(&self, index: usize, offset: i64, viewport_extent: i64) -> bool {
        if !self.is_valid() || viewport_extent <= 0 {
            return false;
        }
        let axis = self.main_axis();
        let rect = self.element_rect(index);
        rect.end(axis) > offset && rect.start(axis) < offset + viewport_extent
    }

    /// Pool slots needed so any scroll offset has every visible tile backed.
    ///
    /// One track is added to the covering track count for the partially
    /// visible edge rows; tiled grids also add one cross slot.
    pub fn pool_capacity(&self, viewport_extent: i64) -> usize {
        if !self.is_valid() || viewport_extent <= 0 {
            return 0;
        }
        let pitch = self.pitch();
        let tracks = usize::try_from((viewport_extent + pitch - 1) / pitch).unwrap_or(usize::MAX);
        let cross = self.cross_count();
        let cross = if cross == 1 { 1 } else { cross + 1 };
        tracks.saturating_add(1).saturating_mul(cross)
    }

    /// Main-axis extent of `count` elements.
    pub fn content_extent(&self, count: usize) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        let (w, h) = self.geometry.content_size(count);
        match self.main_axis() {
            Axis::Horizontal => w,
            Axis::Vertical => h,
        }
    }

    /// Largest main-axis scroll offset for `count` elements.
    pub fn scroll_range(&self, count: usize, viewport_extent: i64) -> i64 {
        (self.content_extent(count) - viewport_extent.max(0)).max(0)
    }

    /// Main-axis offset that brings `index` into view.
    ///
    /// With `to_top` the tile's leading edge is aligned with the viewport
    /// start. Otherwise a fully visible tile keeps `current`, and a hidden one
    /// aligns whichever edge is the smaller move away. The result is clamped
    /// to `[0, scroll_range]`.
    pub fn ensure_visible_offset(
        &self,
        index: usize,
        current: i64,
        viewport_extent: i64,
        to_top: bool,
        count: usize,
    ) -> i64 {
        let range = self.scroll_range(count, viewport_extent);
        if !self.is_valid() || count == 0 {
            return current.clamp(0, range);
        }
        let axis = self.main_axis();
        let rect = self.element_rect(index.min(count - 1));
        let (start, end) = (rect.start(axis), rect.end(axis));
        let target = if to_top {
            start
        } else if start >= current && end <= current + viewport_extent {
            current
        } else {
            let leading = start;
            let trailing = end - viewport_extent;
            if (leading - current).abs() <= (trailing - current).abs() {
                leading
            } else {
                trailing
            }
        };
        target.clamp(0, range)
    }

    /// Element whose tile contains `point`, if any.
    ///
    /// Points in the gaps between tiles hit nothing.
    pub fn element_at(&self, point: ContentPoint, count: usize) -> Option<usize> {
        if !self.is_valid() || point.x < 0 || point.y < 0 {
            return None;
        }
        let main = self.main_axis();
        let cross_axis = main.cross();
        let item = self.geometry.item;

        let m = point.along(main);
        let track = m / self.pitch();
        if m - track * self.pitch() >= i64::from(item.along(main)) {
            return None;
        }
        let c = point.along(cross_axis);
        let cross_pitch = self.geometry.pitch(cross_axis);
        let slot = c / cross_pitch;
        if c - slot * cross_pitch >= i64::from(item.along(cross_axis)) {
            return None;
        }
        let slot = usize::try_from(slot).ok()?;
        if slot >= self.cross_count() {
            return None;
        }
        let index = usize::try_from(track)
            .ok()?
            .checked_mul(self.cross_count())?
            .checked_add(slot)?;
        (index < count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentPoint, ContentRect, IndexMapper};
    use trellis_layout::{LayoutContext, Orientation, Size, TileGeometry, TileLayout};

    fn list(height: i32) -> IndexMapper {
        let g = TileLayout::list(height)
            .geometry(Size::new(200, 180), &LayoutContext::default())
            .unwrap();
        IndexMapper::new(g)
    }

    fn grid() -> IndexMapper {
        // 3 columns of 100x40 tiles with 10px gaps.
        let g = TileLayout::new(Size::new(100, 40))
            .geometry(Size::new(320, 180), &LayoutContext::with_spacing(10))
            .unwrap();
        IndexMapper::new(g)
    }

    #[test]
    fn list_window_at_unaligned_offset() {
        let m = list(40);
        assert_eq!(m.top_element_index(80), 2);
        assert_eq!(m.visible_range(80, 180, 12), Some(2..=6));
        assert_eq!(m.visible_range(100, 180, 12), Some(2..=6));
        assert_eq!(m.visible_range(119, 180, 12), Some(2..=7));
        assert_eq!(m.pool_capacity(180), 6);
    }

    #[test]
    fn visible_range_clamps_to_count() {
        let m = list(40);
        assert_eq!(m.visible_range(0, 180, 3), Some(0..=2));
        assert_eq!(m.visible_range(400, 180, 3), None);
        assert_eq!(m.visible_range(0, 180, 0), None);
    }

    #[test]
    fn grid_rows_cover_whole_tracks() {
        let m = grid();
        assert_eq!(m.cross_count(), 3);
        assert_eq!(m.pitch(), 50);
        assert_eq!(m.top_element_index(60), 3);
        assert_eq!(m.visible_range(60, 180, 100), Some(3..=14));
        assert_eq!(m.pool_capacity(180), 20);
        assert_eq!(m.element_rect(4), ContentRect::new(110, 50, 210, 90));
        assert_eq!(m.track_of(4), 1);
    }

    #[test]
    fn horizontal_flow_scrolls_along_x() {
        let mut layout = TileLayout::new(Size::new(40, 100));
        layout.orientation = Orientation::Horizontal;
        let g = layout
            .geometry(Size::new(180, 320), &LayoutContext::with_spacing(10))
            .unwrap();
        let m = IndexMapper::new(g);
        assert_eq!(m.top_element_index(50), 3);
        assert_eq!(m.element_rect(4), ContentRect::new(50, 110, 90, 210));
        assert_eq!(m.content_extent(10), 4 * 50 - 10);
    }

    #[test]
    fn element_visibility_uses_half_open_span() {
        let m = list(40);
        assert!(m.is_element_visible(2, 80, 180));
        assert!(m.is_element_visible(6, 80, 180));
        assert!(!m.is_element_visible(7, 80, 180));
        assert!(!m.is_element_visible(1, 80, 180));
    }

    #[test]
    fn content_extent_and_scroll_range() {
        let m = list(40);
        assert_eq!(m.content_extent(12), 480);
        assert_eq!(m.scroll_range(12, 180), 300);
        assert_eq!(m.scroll_range(2, 180), 0);
        assert_eq!(grid().content_extent(7), 3 * 50 - 10);
    }

    #[test]
    fn ensure_visible_picks_smaller_move() {
        let m = list(40);
        // Already fully visible.
        assert_eq!(m.ensure_visible_offset(3, 80, 180, false, 12), 80);
        // Below the viewport: align trailing edge.
        assert_eq!(m.ensure_visible_offset(8, 80, 180, false, 12), 360 - 180);
        // Above the viewport: align leading edge.
        assert_eq!(m.ensure_visible_offset(1, 80, 180, false, 12), 40);
        // To top, clamped to the scroll range.
        assert_eq!(m.ensure_visible_offset(5, 0, 180, true, 12), 200);
        assert_eq!(m.ensure_visible_offset(11, 0, 180, true, 12), 300);
    }

    #[test]
    fn hit_testing_skips_gaps() {
        let m = grid();
        assert_eq!(m.element_at(ContentPoint::new(5, 5), 100), Some(0));
        assert_eq!(m.element_at(ContentPoint::new(115, 55), 100), Some(4));
        assert_eq!(m.element_at(ContentPoint::new(105, 5), 100), None);
        assert_eq!(m.element_at(ContentPoint::new(5, 45), 100), None);
        assert_eq!(m.element_at(ContentPoint::new(330, 5), 100), None);
        assert_eq!(m.element_at(ContentPoint::new(115, 55), 4), None);
        assert_eq!(m.element_at(ContentPoint::new(-1, 5), 100), None);
    }

    #[test]
    fn degenerate_geometry_degrades_to_empty() {
        let m = IndexMapper::new(TileGeometry::default());
        assert!(!m.is_valid());
        assert_eq!(m.top_element_index(100), 0);
        assert_eq!(m.visible_range(0, 100, 10), None);
        assert_eq!(m.pool_capacity(100), 0);
        assert_eq!(m.content_extent(10), 0);
        assert_eq!(m.element_at(ContentPoint::new(1, 1), 10), None);
        assert_eq!(m.ensure_visible_offset(3, 50, 100, true, 10), 0);
    }

    #[test]
    fn empty_rect_intersects_nothing() {
        let tile = ContentRect::new(0, 0, 15, 21);
        let flat = ContentRect::new(0, 5, 1, 5);
        assert!(flat.is_empty());
        assert!(!tile.intersects(&flat));
        assert!(!flat.intersects(&tile));
        assert!(tile.intersects(&ContentRect::new(0, 5, 1, 6)));
    }

    #[test]
    fn kurbo_rect_rounds_outward() {
        let r = ContentRect::from_kurbo(kurbo::Rect::new(10.5, 20.2, 3.4, 8.0));
        assert_eq!(r, ContentRect::new(3, 8, 11, 21));
    }
}
