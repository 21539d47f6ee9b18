// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-size tile grids: tile counting, per-pass geometry, and a plain
//! (non-virtual) tile arranger.

use alloc::string::{String, ToString};

use crate::linear::place_floating;
use crate::{Axis, LayoutContext, LayoutError, LayoutItem, Rect, Size};

/// How many tiles a grid has along its cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileCount {
    /// Fit as many tiles as the container allows.
    #[default]
    Auto,
    /// Always use this many tiles (at least one).
    Fixed(usize),
}

/// Flow direction of a tile grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Rows stack top to bottom; content scrolls vertically.
    #[default]
    Vertical,
    /// Columns stack left to right; content scrolls horizontally.
    Horizontal,
}

impl Orientation {
    /// The scrolling (main) axis.
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Vertical,
            Self::Horizontal => Axis::Horizontal,
        }
    }
}

/// Number of tiles of `item_extent` that fit in `container_extent` with
/// `child_spacing` between neighbors.
///
/// A fixed count is returned as-is. Always returns at least one, even for an
/// empty container or a non-positive item extent.
pub fn compute_tile_count(
    container_extent: i32,
    item_extent: i32,
    child_spacing: i32,
    count: TileCount,
) -> usize {
    match count {
        TileCount::Fixed(n) => n.max(1),
        TileCount::Auto => {
            if item_extent <= 0 || container_extent <= 0 {
                return 1;
            }
            let spacing = i64::from(child_spacing.max(0));
            let fit = (i64::from(container_extent) + spacing) / (i64::from(item_extent) + spacing);
            usize::try_from(fit).unwrap_or(1).max(1)
        }
    }
}

/// Tile geometry derived for one arrangement pass.
///
/// `columns` and `rows` count tiles across the viewport: the cross-axis count
/// is the grid width (in tiles) for every track, while the main-axis count is
/// the number of tracks needed to cover the viewport extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGeometry {
    /// Tile size after scaling and optional auto sizing.
    pub item: Size,
    /// Horizontal and vertical gap between tiles.
    pub spacing: Size,
    /// Tiles across the viewport horizontally.
    pub columns: usize,
    /// Tiles across the viewport vertically.
    pub rows: usize,
    /// Flow direction.
    pub orientation: Orientation,
}

impl TileGeometry {
    /// The scrolling axis.
    pub const fn main_axis(&self) -> Axis {
        self.orientation.main_axis()
    }

    /// Tiles per track (columns in vertical flow, rows in horizontal flow).
    pub fn cross_count(&self) -> usize {
        match self.orientation {
            Orientation::Vertical => self.columns.max(1),
            Orientation::Horizontal => self.rows.max(1),
        }
    }

    /// Tracks spanned by the viewport along the scrolling axis.
    pub fn main_count(&self) -> usize {
        match self.orientation {
            Orientation::Vertical => self.rows,
            Orientation::Horizontal => self.columns,
        }
    }

    /// Distance between the starts of two neighboring tiles along `axis`.
    pub fn pitch(&self, axis: Axis) -> i64 {
        i64::from(self.item.along(axis)) + i64::from(self.spacing.along(axis))
    }

    /// Whether the geometry can map indices at all.
    pub fn is_degenerate(&self) -> bool {
        self.item.width <= 0
            || self.item.height <= 0
            || self.pitch(Axis::Horizontal) <= 0
            || self.pitch(Axis::Vertical) <= 0
    }

    /// Content-space origin of tile `index` in raster order.
    pub fn tile_origin(&self, index: usize) -> (i64, i64) {
        let cross = self.cross_count();
        let track = (index / cross) as i64;
        let slot = (index % cross) as i64;
        match self.orientation {
            Orientation::Vertical => (
                slot * self.pitch(Axis::Horizontal),
                track * self.pitch(Axis::Vertical),
            ),
            Orientation::Horizontal => (
                track * self.pitch(Axis::Horizontal),
                slot * self.pitch(Axis::Vertical),
            ),
        }
    }

    /// Content extent of `count` tiles: `(width, height)` without padding.
    pub fn content_size(&self, count: usize) -> (i64, i64) {
        if count == 0 {
            return (0, 0);
        }
        let cross = self.cross_count();
        let tracks = count.div_ceil(cross) as i64;
        let across = count.min(cross) as i64;
        let span = |n: i64, axis: Axis| {
            (n * self.pitch(axis) - i64::from(self.spacing.along(axis))).max(0)
        };
        match self.orientation {
            Orientation::Vertical => (
                span(across, Axis::Horizontal),
                span(tracks, Axis::Vertical),
            ),
            Orientation::Horizontal => (
                span(tracks, Axis::Horizontal),
                span(across, Axis::Vertical),
            ),
        }
    }
}

/// Configuration of a tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayout {
    /// Tile size in logical pixels.
    pub item_size: Size,
    /// Column count; only the cross axis of a vertical grid honors it.
    pub columns: TileCount,
    /// Row count; the cross axis of a horizontal grid, or the auto sizing
    /// divisor when `auto_calc_item_size` is set.
    pub rows: TileCount,
    /// Stretch tile height so the rows fill the container height.
    pub auto_calc_item_size: bool,
    /// Gap between tiles in logical pixels; `None` uses the context spacing.
    pub child_margin: Option<Size>,
    /// Flow direction.
    pub orientation: Orientation,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            item_size: Size::new(100, 100),
            columns: TileCount::Auto,
            rows: TileCount::Auto,
            auto_calc_item_size: false,
            child_margin: None,
            orientation: Orientation::Vertical,
        }
    }
}

impl TileLayout {
    /// A vertical grid of `item_size` tiles.
    pub fn new(item_size: Size) -> Self {
        Self {
            item_size,
            ..Self::default()
        }
    }

    /// A single-column vertical list with rows of `item_height`.
    ///
    /// The row width follows the viewport width on every pass.
    pub fn list(item_height: i32) -> Self {
        Self {
            item_size: Size::new(i32::MAX, item_height),
            columns: TileCount::Fixed(1),
            ..Self::default()
        }
    }

    /// Derive the geometry for a viewport of `viewport` pixels.
    pub fn geometry(
        &self,
        viewport: Size,
        cx: &LayoutContext,
    ) -> Result<TileGeometry, LayoutError> {
        if self.item_size.width <= 0 || self.item_size.height <= 0 {
            return Err(LayoutError::InvalidItemSize {
                width: self.item_size.width,
                height: self.item_size.height,
            });
        }
        let padding = cx.padding();
        let inner = Size::new(
            viewport.width.saturating_sub(padding.along(Axis::Horizontal)).max(0),
            viewport.height.saturating_sub(padding.along(Axis::Vertical)).max(0),
        );
        let spacing = match self.child_margin {
            Some(m) => Size::new(cx.dpi.scale(m.width).max(0), cx.dpi.scale(m.height).max(0)),
            None => Size::new(cx.spacing(), cx.spacing()),
        };
        let mut item = Size::new(
            scale_item(cx, self.item_size.width),
            scale_item(cx, self.item_size.height),
        );
        // Full-width list rows.
        if self.item_size.width == i32::MAX {
            item.width = inner.width.max(1);
        }

        let mut geometry = TileGeometry {
            item,
            spacing,
            columns: 1,
            rows: 1,
            orientation: self.orientation,
        };
        match self.orientation {
            Orientation::Vertical => {
                geometry.columns =
                    compute_tile_count(inner.width, item.width, spacing.width, self.columns);
                if self.auto_calc_item_size {
                    let n = match self.rows {
                        TileCount::Fixed(n) => n.max(1),
                        TileCount::Auto => 1,
                    };
                    geometry.item.height = fill_extent(inner.height, spacing.height, n);
                }
                geometry.rows = tracks_covering(inner.height, geometry.pitch(Axis::Vertical));
            }
            Orientation::Horizontal => {
                geometry.rows =
                    compute_tile_count(inner.height, item.height, spacing.height, self.rows);
                if self.auto_calc_item_size {
                    geometry.item.height = fill_extent(inner.height, spacing.height, geometry.rows);
                }
                geometry.columns = tracks_covering(inner.width, geometry.pitch(Axis::Horizontal));
            }
        }
        Ok(geometry)
    }

    /// Position visible children tile by tile in raster order.
    ///
    /// Each child fills its tile minus its own margin. Floating children are
    /// placed against the full rectangle. Returns the content size including
    /// padding.
    pub fn arrange<W: LayoutItem>(
        &self,
        items: &mut [W],
        rect: Rect,
        cx: &LayoutContext,
    ) -> Result<Size, LayoutError> {
        let geometry = self.geometry(rect.size(), cx)?;
        let padding = cx.padding();
        let inner = rect.deflate(padding);
        let mut placed = 0_usize;
        for item in items.iter_mut() {
            if !item.is_visible() {
                continue;
            }
            if item.is_float() {
                place_floating(item, rect);
                continue;
            }
            let (x, y) = geometry.tile_origin(placed);
            let tile = Rect::from_origin_size(
                clamp_i32(i64::from(inner.left) + x),
                clamp_i32(i64::from(inner.top) + y),
                geometry.item,
            );
            item.set_pos(tile.deflate(item.margin()));
            placed += 1;
        }
        let (w, h) = geometry.content_size(placed);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            placed,
            columns = geometry.columns,
            rows = geometry.rows,
            "tile arrange"
        );

        Ok(Size::new(
            clamp_i32(w).saturating_add(padding.along(Axis::Horizontal)),
            clamp_i32(h).saturating_add(padding.along(Axis::Vertical)),
        ))
    }

    /// Apply a string-keyed attribute.
    ///
    /// Recognized names: `item_size` (`"W,H"`), `auto_calc_item_size`
    /// (`"true"` / `"false"`), `columns` and `rows` (`"auto"` or a positive
    /// integer), `child_margin` (`"N"` or `"X,Y"`), and `orientation`
    /// (`"vertical"` / `"horizontal"`).
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), LayoutError> {
        let invalid = || LayoutError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();
        match name {
            "item_size" => {
                let (w, h) = parse_pair(value).ok_or_else(invalid)?;
                self.item_size = Size::new(w, h);
            }
            "auto_calc_item_size" => {
                self.auto_calc_item_size = match value {
                    "true" => true,
                    "false" => false,
                    _ => return Err(invalid()),
                };
            }
            "columns" => self.columns = parse_count(value).ok_or_else(invalid)?,
            "rows" => self.rows = parse_count(value).ok_or_else(invalid)?,
            "child_margin" => {
                let (x, y) = match value.parse::<i32>() {
                    Ok(v) => (v, v),
                    Err(_) => parse_pair(value).ok_or_else(invalid)?,
                };
                if x < 0 || y < 0 {
                    return Err(invalid());
                }
                self.child_margin = Some(Size::new(x, y));
            }
            "orientation" => {
                self.orientation = match value {
                    "vertical" => Orientation::Vertical,
                    "horizontal" => Orientation::Horizontal,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(LayoutError::UnknownAttribute(String::from(name))),
        }
        Ok(())
    }
}

fn scale_item(cx: &LayoutContext, v: i32) -> i32 {
    if v == i32::MAX { v } else { cx.dpi.scale(v) }
}

/// Tile extent so that `n` tiles with `spacing` gaps fill `extent`, at least 1.
fn fill_extent(extent: i32, spacing: i32, n: usize) -> i32 {
    let n = i64::try_from(n).unwrap_or(i64::MAX).max(1);
    let free = i64::from(extent) - (n - 1) * i64::from(spacing);
    clamp_i32(free / n).max(1)
}

/// Tracks of `pitch` needed to cover `extent` (`ceil`), at least 1.
fn tracks_covering(extent: i32, pitch: i64) -> usize {
    if pitch <= 0 || extent <= 0 {
        return 1;
    }
    let n = (i64::from(extent) + pitch - 1) / pitch;
    usize::try_from(n).unwrap_or(1).max(1)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped into the i32 range before narrowing"
)]
pub(crate) fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn parse_pair(value: &str) -> Option<(i32, i32)> {
    let (a, b) = value.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_count(value: &str) -> Option<TileCount> {
    if value == "auto" {
        return Some(TileCount::Auto);
    }
    match value.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(TileCount::Fixed(n)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{Orientation, TileCount, TileLayout, compute_tile_count};
    use crate::{EstimatedSize, Insets, LayoutContext, LayoutError, LayoutItem, Rect, Size};

    #[derive(Debug, Default)]
    struct Tile {
        hidden: bool,
        margin: Insets,
        pos: Rect,
    }

    impl LayoutItem for Tile {
        fn estimate_size(&self, _available: Size) -> EstimatedSize {
            EstimatedSize::fixed(1, 1)
        }
        fn margin(&self) -> Insets {
            self.margin
        }
        fn is_visible(&self) -> bool {
            !self.hidden
        }
        fn set_visible(&mut self, visible: bool) {
            self.hidden = !visible;
        }
        fn set_pos(&mut self, rect: Rect) {
            self.pos = rect;
        }
    }

    #[test]
    fn tile_count_packs_greedily() {
        assert_eq!(compute_tile_count(300, 100, 10, TileCount::Auto), 2);
        assert_eq!(compute_tile_count(320, 100, 10, TileCount::Auto), 3);
        assert_eq!(compute_tile_count(50, 100, 10, TileCount::Auto), 1);
        assert_eq!(compute_tile_count(0, 100, 10, TileCount::Auto), 1);
        assert_eq!(compute_tile_count(-40, 100, 10, TileCount::Auto), 1);
        assert_eq!(compute_tile_count(300, 0, 10, TileCount::Auto), 1);
    }

    #[test]
    fn fixed_tile_count_is_verbatim() {
        assert_eq!(compute_tile_count(300, 100, 10, TileCount::Fixed(7)), 7);
        assert_eq!(compute_tile_count(300, 100, 10, TileCount::Fixed(0)), 1);
    }

    #[test]
    fn vertical_geometry_counts_columns_and_covering_rows() {
        let layout = TileLayout::new(Size::new(100, 40));
        let g = layout
            .geometry(Size::new(320, 180), &LayoutContext::with_spacing(10))
            .unwrap();
        assert_eq!(g.columns, 3);
        assert_eq!(g.rows, 4);
        assert_eq!(g.cross_count(), 3);
        assert_eq!(g.tile_origin(4), (110, 50));
    }

    #[test]
    fn horizontal_geometry_swaps_axes() {
        let mut layout = TileLayout::new(Size::new(40, 100));
        layout.orientation = Orientation::Horizontal;
        let g = layout
            .geometry(Size::new(180, 320), &LayoutContext::with_spacing(10))
            .unwrap();
        assert_eq!(g.rows, 3);
        assert_eq!(g.columns, 4);
        assert_eq!(g.cross_count(), 3);
        assert_eq!(g.tile_origin(4), (50, 110));
    }

    #[test]
    fn auto_calc_stretches_tile_height() {
        let mut layout = TileLayout::new(Size::new(50, 10));
        layout.auto_calc_item_size = true;
        layout.rows = TileCount::Fixed(2);
        let g = layout
            .geometry(Size::new(200, 210), &LayoutContext::with_spacing(10))
            .unwrap();
        assert_eq!(g.item.height, 100);
        assert_eq!(g.rows, 2);
    }

    #[test]
    fn list_rows_follow_viewport_width() {
        let g = TileLayout::list(40)
            .geometry(Size::new(250, 180), &LayoutContext::default())
            .unwrap();
        assert_eq!(g.item, Size::new(250, 40));
        assert_eq!(g.columns, 1);
        assert_eq!(g.rows, 5);
    }

    #[test]
    fn zero_item_size_is_an_error() {
        let layout = TileLayout::new(Size::new(0, 40));
        assert_eq!(
            layout.geometry(Size::new(100, 100), &LayoutContext::default()),
            Err(LayoutError::InvalidItemSize {
                width: 0,
                height: 40
            })
        );
    }

    #[test]
    fn arrange_places_tiles_in_raster_order() {
        let mut items = vec![
            Tile::default(),
            Tile {
                hidden: true,
                ..Tile::default()
            },
            Tile::default(),
            Tile {
                margin: Insets::uniform(5),
                ..Tile::default()
            },
        ];
        let layout = TileLayout::new(Size::new(100, 40));
        let size = layout
            .arrange(
                &mut items,
                Rect::new(0, 0, 210, 500),
                &LayoutContext::with_spacing(10),
            )
            .unwrap();
        assert_eq!(items[0].pos, Rect::new(0, 0, 100, 40));
        assert_eq!(items[2].pos, Rect::new(110, 0, 210, 40));
        assert_eq!(items[3].pos, Rect::new(5, 55, 95, 85));
        assert_eq!(size, Size::new(210, 90));
    }

    #[test]
    fn attributes_configure_layout() {
        let mut layout = TileLayout::default();
        layout.set_attribute("item_size", "120, 80").unwrap();
        layout.set_attribute("auto_calc_item_size", "true").unwrap();
        layout.set_attribute("columns", "4").unwrap();
        layout.set_attribute("rows", "auto").unwrap();
        layout.set_attribute("child_margin", "6,8").unwrap();
        layout.set_attribute("orientation", "horizontal").unwrap();
        assert_eq!(layout.item_size, Size::new(120, 80));
        assert!(layout.auto_calc_item_size);
        assert_eq!(layout.columns, TileCount::Fixed(4));
        assert_eq!(layout.rows, TileCount::Auto);
        assert_eq!(layout.child_margin, Some(Size::new(6, 8)));
        assert_eq!(layout.orientation, Orientation::Horizontal);
    }

    #[test]
    fn bad_attributes_are_rejected() {
        let mut layout = TileLayout::default();
        assert_eq!(
            layout.set_attribute("columns", "0"),
            Err(LayoutError::InvalidAttribute {
                name: "columns".to_string(),
                value: "0".to_string(),
            })
        );
        assert!(layout.set_attribute("item_size", "12").is_err());
        assert_eq!(
            layout.set_attribute("flavor", "x"),
            Err(LayoutError::UnknownAttribute("flavor".to_string()))
        );
    }
}
