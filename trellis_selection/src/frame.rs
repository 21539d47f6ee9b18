// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band (frame) selection.

use alloc::vec::Vec;

use trellis_virtual::{ContentRect, IndexMapper};

/// Selectable elements whose tiles intersect `drag`, in ascending order.
///
/// `drag` is in content coordinates. The walk starts at the first element of
/// the track under the drag's leading edge and stops at the first tile that
/// starts past its trailing edge.
pub fn compute_frame_selection(
    mapper: &IndexMapper,
    count: usize,
    drag: ContentRect,
    mut is_selectable: impl FnMut(usize) -> bool,
) -> Vec<usize> {
    let mut hits = Vec::new();
    if !mapper.is_valid() || count == 0 || drag.is_empty() {
        return hits;
    }
    let axis = mapper.main_axis();
    let mut index = mapper.top_element_index(drag.start(axis));
    while index < count {
        let tile = mapper.element_rect(index);
        if tile.start(axis) >= drag.end(axis) {
            break;
        }
        if tile.intersects(&drag) && is_selectable(index) {
            hits.push(index);
        }
        index += 1;
    }
    hits
}

/// Tracks a rubber-band drag in content coordinates.
///
/// Content coordinates keep the anchor corner fixed while the view scrolls
/// during the drag.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameDrag {
    origin: Option<kurbo::Point>,
    current: kurbo::Point,
}

impl FrameDrag {
    /// An idle tracker.
    pub const fn new() -> Self {
        Self {
            origin: None,
            current: kurbo::Point::ZERO,
        }
    }

    /// Start a drag at `point`.
    pub fn begin(&mut self, point: kurbo::Point) {
        self.origin = Some(point);
        self.current = point;
    }

    /// Move the free corner to `point`; returns the new frame while active.
    pub fn update(&mut self, point: kurbo::Point) -> Option<kurbo::Rect> {
        self.origin?;
        self.current = point;
        Some(self.rect())
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// The normalized frame, or a zero rect when idle.
    pub fn rect(&self) -> kurbo::Rect {
        match self.origin {
            Some(origin) => kurbo::Rect::from_points(origin, self.current),
            None => kurbo::Rect::ZERO,
        }
    }

    /// End the drag, returning the final frame.
    pub fn finish(&mut self) -> Option<kurbo::Rect> {
        let rect = self.origin.map(|_| self.rect());
        self.origin = None;
        rect
    }

    /// Abandon the drag.
    pub fn cancel(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FrameDrag, compute_frame_selection};
    use trellis_layout::{LayoutContext, Size, TileLayout};
    use trellis_virtual::{ContentRect, IndexMapper};

    fn grid() -> IndexMapper {
        // 3 columns of 100x40 tiles with 10px gaps.
        let g = TileLayout::new(Size::new(100, 40))
            .geometry(Size::new(320, 180), &LayoutContext::with_spacing(10))
            .unwrap();
        IndexMapper::new(g)
    }

    #[test]
    fn frame_hits_intersecting_tiles() {
        let hits = compute_frame_selection(
            &grid(),
            100,
            ContentRect::new(50, 20, 150, 70),
            |_| true,
        );
        assert_eq!(hits, vec![0, 1, 3, 4]);
    }

    #[test]
    fn frame_in_gap_hits_nothing() {
        let hits = compute_frame_selection(
            &grid(),
            100,
            ContentRect::new(101, 0, 109, 200),
            |_| true,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn zero_height_frame_hits_nothing() {
        let flat = ContentRect::new(0, 20, 1, 20);
        let hits = compute_frame_selection(&grid(), 100, flat, |_| true);
        assert!(hits.is_empty());
        assert!(!grid().element_rect(0).intersects(&flat));
    }

    #[test]
    fn frame_skips_unselectable_and_stops_at_count() {
        let hits = compute_frame_selection(
            &grid(),
            5,
            ContentRect::new(0, 0, 320, 1000),
            |i| i != 1,
        );
        assert_eq!(hits, vec![0, 2, 3, 4]);
    }

    #[test]
    fn frame_stops_past_trailing_edge() {
        let mut probed = Vec::new();
        compute_frame_selection(&grid(), 1000, ContentRect::new(0, 120, 50, 130), |i| {
            probed.push(i);
            true
        });
        assert_eq!(probed, vec![6]);
    }

    #[test]
    fn drag_normalizes_corners() {
        let mut drag = FrameDrag::new();
        assert!(drag.update(kurbo::Point::new(1.0, 1.0)).is_none());
        drag.begin(kurbo::Point::new(50.0, 60.0));
        assert!(drag.is_active());
        let r = drag.update(kurbo::Point::new(10.0, 20.0)).unwrap();
        assert_eq!(r, kurbo::Rect::new(10.0, 20.0, 50.0, 60.0));
        assert_eq!(drag.finish(), Some(r));
        assert!(!drag.is_active());
        assert_eq!(drag.rect(), kurbo::Rect::ZERO);
        assert_eq!(drag.finish(), None);
    }
}
