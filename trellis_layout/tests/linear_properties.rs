// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the linear arranger.
//!
//! 1. Full stretch weight covers the container exactly.
//! 2. A run never overflows the container.
//! 3. Stretch extents stay within their min/max bounds.

use proptest::prelude::*;
use trellis_layout::{
    EstimatedSize, Insets, LayoutContext, LayoutItem, LinearArranger, Rect, Size, SizeSpec,
};

#[derive(Clone, Debug)]
struct Child {
    spec: SizeSpec,
    min: i32,
    max: i32,
    margin: i32,
    pos: Rect,
}

impl Child {
    fn new(spec: SizeSpec, min: i32, max: i32, margin: i32) -> Self {
        Self {
            spec,
            min,
            max,
            margin,
            pos: Rect::ZERO,
        }
    }
}

impl LayoutItem for Child {
    fn estimate_size(&self, _available: Size) -> EstimatedSize {
        EstimatedSize::new(self.spec, SizeSpec::Fixed(10))
    }
    fn margin(&self) -> Insets {
        Insets::new(self.margin, 0, self.margin, 0)
    }
    fn min_size(&self) -> Size {
        Size::new(self.min, 0)
    }
    fn max_size(&self) -> Size {
        Size::new(self.max, i32::MAX)
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn set_visible(&mut self, _visible: bool) {}
    fn set_pos(&mut self, rect: Rect) {
        self.pos = rect;
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// `(weight, min, max)` for a stretch child.
fn stretch_child(min: std::ops::RangeInclusive<i32>) -> impl Strategy<Value = (u32, i32, i32)> {
    (0_u32..=150, min, prop::option::of(0_i32..=300)).prop_map(|(w, min, extra)| {
        let max = extra.map_or(i32::MAX, |e| min + e);
        (w, min, max)
    })
}

fn fixed_sizes() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1_i32..=40, 0..=4)
}

/// Children in a mixed order: fixed first, then stretch, then rotated.
fn build(fixed: &[i32], stretch: &[(u32, i32, i32)], margin: i32, rotate: usize) -> Vec<Child> {
    let mut children: Vec<Child> = fixed
        .iter()
        .map(|&v| Child::new(SizeSpec::Fixed(v), 0, i32::MAX, margin))
        .chain(
            stretch
                .iter()
                .map(|&(w, min, max)| Child::new(SizeSpec::Stretch(w), min, max, margin)),
        )
        .collect();
    if !children.is_empty() {
        let k = rotate % children.len();
        children.rotate_left(k);
    }
    children
}

/// Pixels required by fixed children, margins, and gaps.
fn fixed_overhead(fixed: &[i32], count: usize, margin: i32, spacing: i32) -> i32 {
    let gaps = spacing * (count.saturating_sub(1) as i32);
    fixed.iter().sum::<i32>() + 2 * margin * count as i32 + gaps
}

/// Resolved extents + margins + spacing of the placed children.
fn run_length(children: &[Child], spacing: i32) -> i32 {
    let placed: Vec<&Child> = children.iter().filter(|c| c.pos.width() > 0).collect();
    let extents: i32 = placed.iter().map(|c| c.pos.width() + 2 * c.margin).sum();
    extents + spacing * (placed.len().saturating_sub(1) as i32)
}

fn arrange(children: &mut [Child], extent: i32, spacing: i32) -> Size {
    LinearArranger::horizontal().arrange(
        children,
        Rect::new(0, 0, extent, 10),
        &LayoutContext::with_spacing(spacing),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Full stretch weight covers the container exactly
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_weight_covers_container(
        fixed in fixed_sizes(),
        stretch in prop::collection::vec(stretch_child(0..=5), 1..=6),
        margin in 0_i32..=3,
        spacing in 0_i32..=10,
        extra in 40_i32..=2000,
        rotate in 0_usize..10,
    ) {
        let weight_sum: u32 = stretch.iter().map(|s| s.0).sum();
        prop_assume!(weight_sum >= 100);
        let stretch: Vec<_> = stretch.into_iter().map(|(w, min, _)| (w, min, i32::MAX)).collect();
        let count = fixed.len() + stretch.len();
        let extent = fixed_overhead(&fixed, count, margin, spacing) + extra;

        let mut children = build(&fixed, &stretch, margin, rotate);
        let size = arrange(&mut children, extent, spacing);

        prop_assert_eq!(run_length(&children, spacing), extent);
        prop_assert_eq!(size.width, extent);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. A run never overflows the container
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn run_never_overflows(
        fixed in fixed_sizes(),
        stretch in prop::collection::vec(
            (0_u32..=200, 0_i32..=80, prop::option::of(0_i32..=200)),
            0..=6,
        ),
        margin in 0_i32..=3,
        spacing in 0_i32..=10,
        extra in 0_i32..=300,
        rotate in 0_usize..10,
    ) {
        let stretch: Vec<_> = stretch
            .into_iter()
            .map(|(w, min, e)| (w, min, e.map_or(i32::MAX, |e| min + e)))
            .collect();
        let count = fixed.len() + stretch.len();
        let extent = fixed_overhead(&fixed, count, margin, spacing) + extra;

        let mut children = build(&fixed, &stretch, margin, rotate);
        arrange(&mut children, extent, spacing);

        prop_assert!(run_length(&children, spacing) <= extent);
        for child in &children {
            prop_assert!(child.pos.left >= 0 && child.pos.right <= extent);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Stretch extents stay within their min/max bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stretch_extents_respect_bounds(
        fixed in fixed_sizes(),
        stretch in prop::collection::vec(stretch_child(0..=20), 1..=6),
        margin in 0_i32..=3,
        spacing in 0_i32..=10,
        extra in 0_i32..=1500,
        rotate in 0_usize..10,
    ) {
        let count = fixed.len() + stretch.len();
        let min_sum: i32 = stretch.iter().map(|s| s.1).sum();
        let extent = fixed_overhead(&fixed, count, margin, spacing) + min_sum + extra;

        let mut children = build(&fixed, &stretch, margin, rotate);
        arrange(&mut children, extent, spacing);

        for child in children.iter().filter(|c| c.spec.is_stretch()) {
            let width = child.pos.width();
            prop_assert!(
                width >= child.min && width <= child.max,
                "width {} outside [{}, {}]", width, child.min, child.max
            );
        }
    }
}
