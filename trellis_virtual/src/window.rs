// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pooled widget window over a [`DataProvider`].

use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

use hashbrown::HashMap;
use trellis_layout::{Axis, LayoutContext, LayoutError, LayoutItem, Rect, Size, TileLayout};

use crate::{ContentPoint, DataProvider, IndexMapper, PoolWidget};

/// Scroll offsets of a virtual container, in content pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollPosition {
    /// Horizontal offset.
    pub x: i64,
    /// Vertical offset.
    pub y: i64,
}

impl ScrollPosition {
    /// Create a new scroll position.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Offset along `axis`.
    pub const fn along(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with the offset along `axis` replaced.
    pub const fn with_along(self, axis: Axis, value: i64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(value, self.y),
            Axis::Vertical => Self::new(self.x, value),
        }
    }
}

/// Handle to a pool slot (generational).
///
/// Handles from before a pool shrink or a provider swap stop resolving.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SlotId(u32, u32);

impl SlotId {
    /// Position of the slot in raster order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One recycled widget and the element it currently shows.
#[derive(Clone, Debug)]
pub struct PoolSlot<W> {
    widget: W,
    element: Option<usize>,
    generation: u32,
}

impl<W> PoolSlot<W> {
    /// The widget.
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// The bound element, or `None` when the slot is hidden.
    pub fn element(&self) -> Option<usize> {
        self.element
    }
}

/// A fixed-size pool of widgets bound to the visible slice of a large element
/// set.
///
/// The window owns the pool; everything else refers to pool widgets through
/// [`SlotId`] handles. Slot `k` always shows element `top + k`, so slots are in
/// raster order across the viewport.
///
/// Hosts call [`arrange`](Self::arrange) once per layout pass. It rebuilds the
/// tile geometry and pool when the viewport changed and rebinds slots only when
/// [`needs_recompute`](Self::needs_recompute) says the scroll offset moved.
pub struct VirtualWindow<P: DataProvider> {
    provider: Option<P>,
    layout: TileLayout,
    cx: LayoutContext,
    viewport: Rect,
    mapper: IndexMapper,
    geometry_dirty: bool,
    scroll: ScrollPosition,
    last_scroll: Option<ScrollPosition>,
    count: usize,
    slots: Vec<PoolSlot<P::Widget>>,
    bound: HashMap<usize, SlotId>,
    generation: u32,
}

impl<P: DataProvider> fmt::Debug for VirtualWindow<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualWindow")
            .field("has_provider", &self.provider.is_some())
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("count", &self.count)
            .field("slots", &self.slots.len())
            .field("bound", &self.bound.len())
            .finish_non_exhaustive()
    }
}

impl<P: DataProvider> VirtualWindow<P> {
    /// A window without a data provider.
    pub fn new(layout: TileLayout, cx: LayoutContext) -> Self {
        Self {
            provider: None,
            layout,
            cx,
            viewport: Rect::ZERO,
            mapper: IndexMapper::default(),
            geometry_dirty: true,
            scroll: ScrollPosition::default(),
            last_scroll: None,
            count: 0,
            slots: Vec::new(),
            bound: HashMap::new(),
            generation: 0,
        }
    }

    /// A window over `provider`.
    pub fn with_provider(provider: P, layout: TileLayout, cx: LayoutContext) -> Self {
        let mut window = Self::new(layout, cx);
        window.set_provider(provider);
        window
    }

    /// Attach `provider`, returning the previous one.
    ///
    /// The pool is dropped and rebuilt from the new provider on the next
    /// [`arrange`](Self::arrange).
    pub fn set_provider(&mut self, provider: P) -> Option<P> {
        self.count = provider.element_count();
        self.clear_pool();
        self.geometry_dirty = true;
        self.last_scroll = None;
        self.provider.replace(provider)
    }

    /// The data provider, if attached.
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Mutable access to the data provider.
    ///
    /// Changes to the element count must be followed by
    /// [`on_count_changed`](Self::on_count_changed).
    pub fn provider_mut(&mut self) -> Option<&mut P> {
        self.provider.as_mut()
    }

    /// Tile configuration.
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Replace the tile configuration.
    pub fn set_layout(&mut self, layout: TileLayout) {
        if layout != self.layout {
            self.layout = layout;
            self.geometry_dirty = true;
        }
    }

    /// Arrangement context.
    pub fn context(&self) -> &LayoutContext {
        &self.cx
    }

    /// Replace the arrangement context.
    pub fn set_context(&mut self, cx: LayoutContext) {
        if cx != self.cx {
            self.cx = cx;
            self.geometry_dirty = true;
        }
    }

    /// Index math for the current geometry.
    pub fn mapper(&self) -> &IndexMapper {
        &self.mapper
    }

    /// Element count as of the last refresh.
    pub fn element_count(&self) -> usize {
        self.count
    }

    /// The viewport rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Move or resize the viewport.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.geometry_dirty = true;
        }
    }

    fn inner(&self) -> Rect {
        self.viewport.deflate(self.cx.padding())
    }

    fn viewport_extent(&self) -> i64 {
        i64::from(self.inner().extent(self.mapper.main_axis()))
    }

    fn main_offset(&self) -> i64 {
        self.scroll.along(self.mapper.main_axis())
    }

    /// Current scroll offsets.
    pub fn scroll_pos(&self) -> ScrollPosition {
        self.scroll
    }

    /// Largest valid scroll offsets.
    pub fn scroll_range(&self) -> ScrollPosition {
        if !self.mapper.is_valid() {
            return ScrollPosition::default();
        }
        let (w, h) = self.mapper.geometry().content_size(self.count);
        let inner = self.inner();
        ScrollPosition::new(
            (w - i64::from(inner.width())).max(0),
            (h - i64::from(inner.height())).max(0),
        )
    }

    /// Scroll to `pos`, clamped to `[0, scroll_range]`; returns whether the
    /// offset changed.
    pub fn set_scroll_pos(&mut self, pos: ScrollPosition) -> bool {
        let range = self.scroll_range();
        let pos = ScrollPosition::new(pos.x.clamp(0, range.x), pos.y.clamp(0, range.y));
        if pos == self.scroll {
            return false;
        }
        self.scroll = pos;
        true
    }

    /// Scroll by a delta; returns whether the offset changed.
    pub fn scroll_by(&mut self, dx: i64, dy: i64) -> bool {
        self.set_scroll_pos(ScrollPosition::new(
            self.scroll.x.saturating_add(dx),
            self.scroll.y.saturating_add(dy),
        ))
    }

    fn clamp_scroll(&mut self) {
        self.set_scroll_pos(self.scroll);
    }

    /// Slots needed to back every visible element at any offset.
    pub fn max_pool_capacity(&self) -> usize {
        self.mapper.pool_capacity(self.viewport_extent())
    }

    /// First element of the track at the scroll offset.
    pub fn top_visible_element_index(&self) -> usize {
        self.mapper.top_element_index(self.main_offset())
    }

    /// Whether element `index` overlaps the viewport.
    pub fn is_element_visible(&self, index: usize) -> bool {
        index < self.count
            && self
                .mapper
                .is_element_visible(index, self.main_offset(), self.viewport_extent())
    }

    /// Elements overlapping the viewport.
    pub fn visible_element_indices(&self) -> Option<RangeInclusive<usize>> {
        self.mapper
            .visible_range(self.main_offset(), self.viewport_extent(), self.count)
    }

    /// Whether slots must be rebound before the next paint.
    pub fn needs_recompute(&self) -> bool {
        self.last_scroll != Some(self.scroll)
    }

    /// Rebind every slot to the elements at the current scroll offset.
    pub fn recompute_window(&mut self) -> Result<(), LayoutError> {
        self.bind_window(false)
    }

    /// Scroll so element `index` becomes visible; returns whether the offset
    /// changed.
    ///
    /// With `to_top` the element is aligned with the viewport start; otherwise
    /// the view moves as little as possible.
    pub fn ensure_visible(&mut self, index: usize, to_top: bool) -> bool {
        let axis = self.mapper.main_axis();
        let offset = self.mapper.ensure_visible_offset(
            index,
            self.main_offset(),
            self.viewport_extent(),
            to_top,
            self.count,
        );
        self.set_scroll_pos(self.scroll.with_along(axis, offset))
    }

    /// Lay out the window inside `viewport`.
    ///
    /// Returns the full content size including padding.
    pub fn arrange(&mut self, viewport: Rect) -> Result<Size, LayoutError> {
        self.set_viewport(viewport);
        if self.provider.is_none() {
            return Err(LayoutError::MissingProvider);
        }
        if self.geometry_dirty {
            self.update_geometry()?;
            self.adjust_pool_capacity()?;
            self.clamp_scroll();
            self.last_scroll = None;
        }
        if self.needs_recompute() {
            self.bind_window(false)?;
        }
        Ok(self.content_size())
    }

    /// Resynchronize with the provider after its element count changed.
    ///
    /// Re-reads the count, resizes the pool, clamps the scroll offset, and
    /// refills every slot.
    pub fn refresh(&mut self) -> Result<(), LayoutError> {
        let provider = self.provider.as_ref().ok_or(LayoutError::MissingProvider)?;
        self.count = provider.element_count();
        self.update_geometry()?;
        self.adjust_pool_capacity()?;
        self.clamp_scroll();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = self.count,
            capacity = self.slots.len(),
            offset = self.main_offset(),
            "virtual window refresh"
        );

        self.bind_window(true)
    }

    /// The provider's element count changed.
    pub fn on_count_changed(&mut self) -> Result<(), LayoutError> {
        self.refresh()
    }

    /// Elements in `[start, end]` changed; refill the slots showing them.
    pub fn on_data_changed(&mut self, start: usize, end: usize) -> Result<(), LayoutError> {
        let provider = self.provider.as_mut().ok_or(LayoutError::MissingProvider)?;
        let range = start.min(end)..=start.max(end);
        let count = self.count;
        for slot in &mut self.slots {
            let Some(element) = slot.element else {
                continue;
            };
            if element < count && range.contains(&element) {
                slot.widget.set_selected(provider.is_element_selected(element));
                provider.fill_element(&mut slot.widget, element);
            }
        }
        Ok(())
    }

    /// Re-apply the provider's selection bit to bound widgets in `range`.
    pub fn sync_selection_marks(
        &mut self,
        range: RangeInclusive<usize>,
    ) -> Result<(), LayoutError> {
        let provider = self.provider.as_ref().ok_or(LayoutError::MissingProvider)?;
        for slot in &mut self.slots {
            if let Some(element) = slot.element.filter(|e| range.contains(e)) {
                slot.widget.set_selected(provider.is_element_selected(element));
            }
        }
        Ok(())
    }

    /// All pool slots in raster order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &PoolSlot<P::Widget>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(k, slot)| (slot_id(k, slot.generation), slot))
    }

    /// Number of pool slots.
    pub fn pool_len(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, id: SlotId) -> Option<&PoolSlot<P::Widget>> {
        self.slots.get(id.index()).filter(|s| s.generation == id.1)
    }

    /// Widget in slot `id`.
    pub fn widget(&self, id: SlotId) -> Option<&P::Widget> {
        self.slot(id).map(|s| &s.widget)
    }

    /// Mutable widget in slot `id`.
    pub fn widget_mut(&mut self, id: SlotId) -> Option<&mut P::Widget> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.1)
            .map(|s| &mut s.widget)
    }

    /// Element shown by slot `id`.
    pub fn element_of_slot(&self, id: SlotId) -> Option<usize> {
        self.slot(id).and_then(|s| s.element)
    }

    /// Slot showing element `index`.
    pub fn slot_of_element(&self, index: usize) -> Option<SlotId> {
        self.bound.get(&index).copied()
    }

    /// Convert a point in viewport coordinates to content coordinates.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate; the point is floored first"
    )]
    pub fn content_point(&self, point: kurbo::Point) -> ContentPoint {
        let p = point.floor();
        let inner = self.inner();
        ContentPoint::new(
            p.x as i64 - i64::from(inner.left) + self.scroll.x,
            p.y as i64 - i64::from(inner.top) + self.scroll.y,
        )
    }

    /// Slot under a point in viewport coordinates.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate; the point is floored first"
    )]
    pub fn slot_at(&self, point: kurbo::Point) -> Option<SlotId> {
        let p = point.floor();
        let inner = self.inner();
        let (x, y) = (p.x as i64, p.y as i64);
        let inside = x >= i64::from(inner.left)
            && x < i64::from(inner.right)
            && y >= i64::from(inner.top)
            && y < i64::from(inner.bottom);
        if !inside {
            return None;
        }
        let element = self.mapper.element_at(self.content_point(point), self.count)?;
        self.slot_of_element(element)
    }

    /// Full content size including padding.
    pub fn content_size(&self) -> Size {
        let padding = self.cx.padding();
        let (w, h) = if self.mapper.is_valid() {
            self.mapper.geometry().content_size(self.count)
        } else {
            (0, 0)
        };
        Size::new(
            clamp_i32(w).saturating_add(padding.along(Axis::Horizontal)),
            clamp_i32(h).saturating_add(padding.along(Axis::Vertical)),
        )
    }

    fn update_geometry(&mut self) -> Result<(), LayoutError> {
        match self.layout.geometry(self.viewport.size(), &self.cx) {
            Ok(geometry) => {
                self.mapper = IndexMapper::new(geometry);
                self.geometry_dirty = false;
                Ok(())
            }
            Err(err) => {
                self.mapper = IndexMapper::default();
                Err(err)
            }
        }
    }

    /// Grow or shrink the pool to the capacity the viewport needs.
    ///
    /// The pool never holds more slots than there are elements.
    fn adjust_pool_capacity(&mut self) -> Result<(), LayoutError> {
        let wanted = self.max_pool_capacity().min(self.count);
        let provider = self.provider.as_mut().ok_or(LayoutError::MissingProvider)?;
        let current = self.slots.len();
        if wanted > current {
            for _ in current..wanted {
                let mut widget = provider.create_element();
                widget.set_visible(false);
                self.slots.push(PoolSlot {
                    widget,
                    element: None,
                    generation: self.generation,
                });
            }
        } else if wanted < current {
            for slot in self.slots.drain(wanted..) {
                if let Some(element) = slot.element {
                    self.bound.remove(&element);
                }
            }
            self.generation = self.generation.wrapping_add(1);
        }

        if wanted != current {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = current, to = wanted, "pool resized");
        }

        Ok(())
    }

    fn clear_pool(&mut self) {
        self.slots.clear();
        self.bound.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Bind slot `k` to element `top + k`, hiding slots past the last element.
    ///
    /// Slots already showing their element keep their contents unless `force`.
    fn bind_window(&mut self, force: bool) -> Result<(), LayoutError> {
        let top = self.top_visible_element_index();
        let inner = self.inner();
        let origin = (
            i64::from(inner.left) - self.scroll.x,
            i64::from(inner.top) - self.scroll.y,
        );
        let count = self.count;
        let mapper = self.mapper;
        let provider = self.provider.as_mut().ok_or(LayoutError::MissingProvider)?;

        self.bound.clear();
        let mut filled = 0_usize;
        for (k, slot) in self.slots.iter_mut().enumerate() {
            let Some(element) = top.checked_add(k).filter(|&e| e < count) else {
                slot.element = None;
                slot.widget.set_visible(false);
                continue;
            };
            if force || slot.element != Some(element) {
                slot.element = Some(element);
                slot.widget.set_visible(true);
                slot.widget.set_selected(provider.is_element_selected(element));
                provider.fill_element(&mut slot.widget, element);
                filled += 1;
            }
            let tile = mapper.element_rect(element);
            let rect = Rect::new(
                clamp_i32(origin.0 + tile.x0),
                clamp_i32(origin.1 + tile.y0),
                clamp_i32(origin.0 + tile.x1),
                clamp_i32(origin.1 + tile.y1),
            );
            let margin = slot.widget.margin();
            slot.widget.set_pos(rect.deflate(margin));
            let previous = self.bound.insert(element, slot_id(k, slot.generation));
            debug_assert!(previous.is_none(), "element {element} bound to two pool slots");
        }
        self.last_scroll = Some(self.scroll);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            top,
            bound = self.bound.len(),
            filled,
            offset = self.main_offset(),
            "window recomputed"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = filled;

        Ok(())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "pool capacity is bounded by the viewport, far below u32::MAX"
)]
fn slot_id(index: usize, generation: u32) -> SlotId {
    SlotId(index as u32, generation)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped into the i32 range before narrowing"
)]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
