// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-axis arrangement with weighted stretch distribution.
//!
//! Children are split into *fixed* (concrete main-axis size) and *stretch*
//! (weighted main-axis size) sets. Fixed children take their clamped sizes
//! first; whatever main-axis space remains after fixed sizes, margins, and
//! spacing is shared among stretch children by weight.
//!
//! - When the minimum sizes of the stretch children fit, each gets
//!   `round(weight * usable / max(weight_sum, 100))` clamped to its min/max.
//!   A surplus caused by max clamping is handed out again in proportion to the
//!   remaining headroom, but only when the weights sum to at least 100. An
//!   overshoot caused by min clamping is always taken back in proportion to the
//!   slack above each minimum.
//! - When even the minimums do not fit, children in original order receive
//!   their minimum until the space runs out; the rest collapse to zero.
//!
//! Leftover pixels from the proportional passes are handed out one at a time
//! in original child order. A stretch child whose share resolves to zero is
//! dropped from the run, and the margins and spacing it reserved are shared
//! again among the rest.

use smallvec::SmallVec;

use crate::{Align, Axis, LayoutContext, LayoutItem, Rect, Size, SizeSpec};

/// Arranges children along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearArranger {
    /// Main axis.
    pub axis: Axis,
    /// Placement of the whole run when it is shorter than the container.
    pub align: Align,
}

/// Resolved main-axis data for one participating child.
#[derive(Copy, Clone, Debug)]
struct Entry {
    index: usize,
    weight: Option<u32>,
    size: i32,
    min: i32,
    max: i32,
}

type Entries = SmallVec<[Entry; 8]>;

impl LinearArranger {
    /// Create an arranger for `axis` with the given run alignment.
    pub const fn new(axis: Axis, align: Align) -> Self {
        Self { axis, align }
    }

    /// Left-to-right, start aligned.
    pub const fn horizontal() -> Self {
        Self::new(Axis::Horizontal, Align::Start)
    }

    /// Top-to-bottom, start aligned.
    pub const fn vertical() -> Self {
        Self::new(Axis::Vertical, Align::Start)
    }

    /// Position `items` inside `rect`.
    ///
    /// Returns the laid-out content size including padding: the run length on
    /// the main axis and the largest child extent (with margins) on the cross
    /// axis.
    pub fn arrange<W: LayoutItem>(&self, items: &mut [W], rect: Rect, cx: &LayoutContext) -> Size {
        let axis = self.axis;
        let cross = axis.cross();
        let padding = cx.padding();
        let inner = rect.deflate(padding);
        let spacing = cx.spacing();
        let available = inner.size();

        let mut entries = self.collect(items, available);
        let weight_sum: u64 = entries
            .iter()
            .filter_map(|e| e.weight)
            .map(u64::from)
            .sum();
        // Stretch children that resolve to zero are dropped from the run, so
        // their margins and spacing go back to the others.
        loop {
            let usable = self.usable_space(items, &entries, available, spacing);
            let proportional = distribute(&mut entries, usable, weight_sum);
            if !proportional || !entries.iter().any(|e| e.weight.is_some() && e.size <= 0) {
                break;
            }
            entries.retain(|e| e.weight.is_none() || e.size > 0);
        }

        // (index, main position, main size)
        let mut placed: SmallVec<[(usize, i32, i32); 8]> = SmallVec::new();
        let main_start = inner.start(axis);
        let mut cursor = main_start;
        for entry in entries.iter().filter(|e| e.size > 0) {
            let margin = items[entry.index].margin();
            if !placed.is_empty() {
                cursor = cursor.saturating_add(spacing);
            }
            let pos = cursor.saturating_add(margin.leading(axis));
            cursor = pos
                .saturating_add(entry.size)
                .saturating_add(margin.trailing(axis));
            placed.push((entry.index, pos, entry.size));
        }
        let content_main = cursor.saturating_sub(main_start);
        let shift = self.align.offset(inner.extent(axis), content_main);

        let mut content_cross = 0;
        for &(index, pos, size) in &placed {
            let item = &mut items[index];
            let margin = item.margin();
            let cross_avail = inner
                .extent(cross)
                .saturating_sub(margin.along(cross))
                .max(0);
            let (min, max) = bounds(item, cross);
            let cross_size = match item.estimate_size(available).along(cross) {
                SizeSpec::Fixed(v) => v.clamp(min, max),
                SizeSpec::Stretch(_) => cross_avail.clamp(min, max),
            };
            let cross_align = match cross {
                Axis::Horizontal => item.h_align(),
                Axis::Vertical => item.v_align(),
            };
            let cross_pos = inner.start(cross)
                + margin.leading(cross)
                + cross_align.offset(cross_avail, cross_size);
            content_cross = content_cross.max(cross_size.saturating_add(margin.along(cross)));
            item.set_pos(rect_from_axes(
                axis,
                pos.saturating_add(shift),
                size,
                cross_pos,
                cross_size,
            ));
        }

        for item in items.iter_mut().filter(|i| i.is_visible() && i.is_float()) {
            place_floating(item, rect);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            axis = ?axis,
            children = items.len(),
            placed = placed.len(),
            content_main,
            content_cross,
            "linear arrange"
        );

        Size::from_axes(
            axis,
            content_main.saturating_add(padding.along(axis)),
            content_cross.saturating_add(padding.along(cross)),
        )
    }

    /// Estimate the size the run wants inside `available`.
    ///
    /// Stretch children contribute only their minimum size and are never
    /// dropped from the run; run alignment is ignored. The result is advisory,
    /// meant for parents sizing an automatic dimension.
    pub fn estimate_size<W: LayoutItem>(
        &self,
        items: &[W],
        available: Size,
        cx: &LayoutContext,
    ) -> Size {
        let axis = self.axis;
        let cross = axis.cross();
        let padding = cx.padding();
        let spacing = cx.spacing();
        let inner = Size::new(
            available.width.saturating_sub(padding.along(Axis::Horizontal)).max(0),
            available.height.saturating_sub(padding.along(Axis::Vertical)).max(0),
        );

        let mut entries = self.collect(items, inner);
        for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
            entry.size = entry.min;
        }

        let mut main = 0_i32;
        let mut cross_max = 0_i32;
        let mut count = 0_usize;
        for entry in &entries {
            if entry.weight.is_none() && entry.size <= 0 {
                continue;
            }
            let item = &items[entry.index];
            let margin = item.margin();
            if count > 0 {
                main = main.saturating_add(spacing);
            }
            main = main
                .saturating_add(entry.size)
                .saturating_add(margin.along(axis));
            count += 1;

            let (min, max) = bounds(item, cross);
            let cross_size = match item.estimate_size(inner).along(cross) {
                SizeSpec::Fixed(v) => v.clamp(min, max),
                SizeSpec::Stretch(_) => min,
            };
            cross_max = cross_max.max(cross_size.saturating_add(margin.along(cross)));
        }

        Size::from_axes(
            axis,
            main.saturating_add(padding.along(axis)),
            cross_max.saturating_add(padding.along(cross)),
        )
    }

    /// Gather participating children with fixed sizes resolved.
    fn collect<W: LayoutItem>(&self, items: &[W], available: Size) -> Entries {
        let axis = self.axis;
        let mut entries = Entries::new();
        for (index, item) in items.iter().enumerate() {
            if !item.is_visible() || item.is_float() {
                continue;
            }
            let (min, max) = bounds(item, axis);
            let entry = match item.estimate_size(available).along(axis) {
                SizeSpec::Fixed(v) => Entry {
                    index,
                    weight: None,
                    size: v.clamp(min, max),
                    min,
                    max,
                },
                SizeSpec::Stretch(w) => Entry {
                    index,
                    weight: Some(w),
                    size: 0,
                    min,
                    max,
                },
            };
            entries.push(entry);
        }
        entries
    }

    /// Main-axis space left for stretch children, floored at zero.
    ///
    /// Zero-sized fixed children are never placed and reserve nothing.
    fn usable_space<W: LayoutItem>(
        &self,
        items: &[W],
        entries: &Entries,
        available: Size,
        spacing: i32,
    ) -> i64 {
        let axis = self.axis;
        let placed = || entries.iter().filter(|e| e.weight.is_some() || e.size > 0);
        let count = placed().count();
        if count == 0 {
            return 0;
        }
        let fixed: i64 = placed()
            .filter(|e| e.weight.is_none())
            .map(|e| i64::from(e.size))
            .sum();
        let margins: i64 = placed()
            .map(|e| i64::from(items[e.index].margin().along(axis)))
            .sum();
        let gaps = i64::from(spacing) * (count as i64 - 1);
        (i64::from(available.along(axis)) - fixed - margins - gaps).max(0)
    }
}

/// Min and max along `axis`, with `max >= min >= 0`.
fn bounds<W: LayoutItem>(item: &W, axis: Axis) -> (i32, i32) {
    let min = item.min_size().along(axis).max(0);
    let max = item.max_size().along(axis).max(min);
    (min, max)
}

fn rect_from_axes(axis: Axis, main_pos: i32, main: i32, cross_pos: i32, cross: i32) -> Rect {
    match axis {
        Axis::Horizontal => {
            Rect::from_origin_size(main_pos, cross_pos, Size::new(main, cross))
        }
        Axis::Vertical => Rect::from_origin_size(cross_pos, main_pos, Size::new(cross, main)),
    }
}

/// Share `usable` pixels among the stretch entries.
///
/// `weight_sum` is the total weight of every stretch child in the run, which
/// may include children already dropped. Returns `true` when the minimums fit
/// and the proportional split was used.
fn distribute(entries: &mut Entries, usable: i64, weight_sum: u64) -> bool {
    if !entries.iter().any(|e| e.weight.is_some()) {
        return false;
    }
    if usable == 0 {
        for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
            entry.size = 0;
        }
        return false;
    }

    let min_sum: i64 = entries
        .iter()
        .filter(|e| e.weight.is_some())
        .map(|e| i64::from(e.min))
        .sum();

    if min_sum > usable {
        // Earlier children win: hand out minimums in order until one no longer fits.
        let mut remaining = usable;
        let mut exhausted = false;
        for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
            if !exhausted && i64::from(entry.min) <= remaining {
                entry.size = entry.min;
                remaining -= i64::from(entry.min);
            } else {
                exhausted = true;
                entry.size = 0;
            }
        }
        return false;
    }

    let denom = i128::from(weight_sum.max(100));
    for entry in entries.iter_mut() {
        if let Some(weight) = entry.weight {
            let target = round_div(i128::from(weight) * i128::from(usable), denom);
            entry.size = clamp_to(target, entry.min, entry.max);
        }
    }

    let assigned: i64 = entries
        .iter()
        .filter(|e| e.weight.is_some())
        .map(|e| i64::from(e.size))
        .sum();
    let diff = usable - assigned;
    if diff > 0 && weight_sum >= 100 {
        grow(entries, diff);
    } else if diff < 0 {
        shrink(entries, -diff);
    }
    true
}

/// Hand out `surplus` pixels in proportion to headroom below each max.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each share is at most `surplus`, which fits in i64"
)]
fn grow(entries: &mut Entries, surplus: i64) {
    let headroom = |e: &Entry| i64::from(e.max) - i64::from(e.size);
    let total: i64 = entries
        .iter()
        .filter(|e| e.weight.is_some())
        .map(headroom)
        .sum();
    if total <= 0 {
        return;
    }
    let mut remaining = surplus;
    for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
        let room = headroom(entry);
        let share = (i128::from(surplus) * i128::from(room) / i128::from(total)) as i64;
        let add = share.min(room).min(remaining);
        entry.size = clamp_to(i128::from(entry.size) + i128::from(add), entry.min, entry.max);
        remaining -= add;
    }
    while remaining > 0 {
        let mut progressed = false;
        for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
            if remaining == 0 {
                break;
            }
            if entry.size < entry.max {
                entry.size += 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
}

/// Take back `excess` pixels in proportion to slack above each min.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each share is at most `excess`, which fits in i64"
)]
fn shrink(entries: &mut Entries, excess: i64) {
    let slack = |e: &Entry| i64::from(e.size) - i64::from(e.min);
    let total: i64 = entries
        .iter()
        .filter(|e| e.weight.is_some())
        .map(slack)
        .sum();
    if total <= 0 {
        return;
    }
    let mut remaining = excess;
    for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
        let room = slack(entry);
        let share = (i128::from(excess) * i128::from(room) / i128::from(total)) as i64;
        let sub = share.min(room).min(remaining);
        entry.size = clamp_to(i128::from(entry.size) - i128::from(sub), entry.min, entry.max);
        remaining -= sub;
    }
    while remaining > 0 {
        let mut progressed = false;
        for entry in entries.iter_mut().filter(|e| e.weight.is_some()) {
            if remaining == 0 {
                break;
            }
            if entry.size > entry.min {
                entry.size -= 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
}

/// `round(num / denom)` for non-negative `num` and positive `denom`.
fn round_div(num: i128, denom: i128) -> i128 {
    (2 * num + denom) / (2 * denom)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped into [min, max] which lies in the i32 range"
)]
fn clamp_to(value: i128, min: i32, max: i32) -> i32 {
    value.clamp(i128::from(min), i128::from(max)) as i32
}

/// Size and align a floating child against the full container rectangle.
pub(crate) fn place_floating<W: LayoutItem>(item: &mut W, container: Rect) {
    let margin = item.margin();
    let estimate = item.estimate_size(container.size());
    let avail_w = container
        .width()
        .saturating_sub(margin.along(Axis::Horizontal))
        .max(0);
    let avail_h = container
        .height()
        .saturating_sub(margin.along(Axis::Vertical))
        .max(0);
    let (min_w, max_w) = bounds(item, Axis::Horizontal);
    let (min_h, max_h) = bounds(item, Axis::Vertical);
    let width = match estimate.width {
        SizeSpec::Fixed(v) => v.clamp(min_w, max_w),
        SizeSpec::Stretch(_) => avail_w.clamp(min_w, max_w),
    };
    let height = match estimate.height {
        SizeSpec::Fixed(v) => v.clamp(min_h, max_h),
        SizeSpec::Stretch(_) => avail_h.clamp(min_h, max_h),
    };
    let x = container.left + margin.left + item.h_align().offset(avail_w, width);
    let y = container.top + margin.top + item.v_align().offset(avail_h, height);
    item.set_pos(Rect::from_origin_size(x, y, Size::new(width, height)));
}
