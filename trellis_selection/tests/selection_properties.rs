// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the selection controller.
//!
//! 1. Shift-click selects exactly the selectable span from the anchor.
//! 2. Single-select mode never holds more than one element.
//! 3. Frame selection matches a brute-force tile intersection.

use std::collections::BTreeSet;

use proptest::prelude::*;
use trellis_layout::{EstimatedSize, LayoutContext, LayoutItem, Rect, Size, TileLayout};
use trellis_selection::{Modifiers, Navigation, SelectionController, compute_frame_selection};
use trellis_virtual::{
    ContentRect, DataProvider, IndexMapper, PoolWidget, SelectionSet, VirtualWindow,
};

#[derive(Debug, Default)]
struct Row;

impl LayoutItem for Row {
    fn estimate_size(&self, _available: Size) -> EstimatedSize {
        EstimatedSize::fixed(0, 0)
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn set_visible(&mut self, _visible: bool) {}
    fn set_pos(&mut self, _rect: Rect) {}
}

impl PoolWidget for Row {
    fn set_selected(&mut self, _selected: bool) {}
}

#[derive(Debug, Default)]
struct Table {
    count: usize,
    multi: bool,
    selection: SelectionSet,
    pinned: BTreeSet<usize>,
}

impl DataProvider for Table {
    type Widget = Row;

    fn create_element(&mut self) -> Row {
        Row
    }
    fn fill_element(&mut self, _widget: &mut Row, _index: usize) -> bool {
        true
    }
    fn element_count(&self) -> usize {
        self.count
    }
    fn is_element_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }
    fn set_element_selected(&mut self, index: usize, selected: bool) {
        self.selection.set(index, selected);
    }
    fn selected_elements(&self) -> Vec<usize> {
        self.selection.sorted()
    }
    fn is_multi_select(&self) -> bool {
        self.multi
    }
    fn set_multi_select(&mut self, multi: bool) {
        self.multi = multi;
    }
    fn is_element_selectable(&self, index: usize) -> bool {
        !self.pinned.contains(&index)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn window(count: usize, multi: bool, pinned: BTreeSet<usize>) -> VirtualWindow<Table> {
    let table = Table {
        count,
        multi,
        pinned,
        ..Table::default()
    };
    let mut w = VirtualWindow::with_provider(table, TileLayout::list(20), LayoutContext::default());
    w.arrange(Rect::new(0, 0, 200, 200)).unwrap();
    w
}

#[derive(Clone, Debug)]
enum Action {
    Click(usize, u8),
    Nav(u8, u8),
    All,
    None,
}

fn modifiers(bits: u8) -> Modifiers {
    Modifiers::from_bits_truncate(bits)
}

fn navigation(n: u8) -> Navigation {
    match n % 8 {
        0 => Navigation::Left,
        1 => Navigation::Right,
        2 => Navigation::Up,
        3 => Navigation::Down,
        4 => Navigation::PageUp,
        5 => Navigation::PageDown,
        6 => Navigation::Home,
        _ => Navigation::End,
    }
}

fn action(count: usize) -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..count, 0_u8..8).prop_map(|(i, m)| Action::Click(i, m)),
        2 => (0_u8..8, 0_u8..8).prop_map(|(n, m)| Action::Nav(n, m)),
        1 => Just(Action::All),
        1 => Just(Action::None),
    ]
}

fn run(c: &mut SelectionController, w: &mut VirtualWindow<Table>, action: &Action) {
    match *action {
        Action::Click(i, m) => {
            c.select_element(w, i, modifiers(m)).unwrap();
        }
        Action::Nav(n, m) => {
            c.on_navigate(w, navigation(n), modifiers(m)).unwrap();
        }
        Action::All => {
            c.select_all(w).unwrap();
        }
        Action::None => {
            c.select_none(w).unwrap();
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Shift-click selects exactly the selectable span
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shift_click_selects_selectable_span(
        count in 1_usize..200,
        a in 0_usize..200,
        b in 0_usize..200,
        pinned in prop::collection::btree_set(0_usize..200, 0..20),
        history in prop::collection::vec(0_usize..200, 0..5),
    ) {
        let (a, b) = (a % count, b % count);
        prop_assume!(!pinned.contains(&a));
        let mut w = window(count, true, pinned.clone());
        let mut c = SelectionController::new();
        for i in history {
            c.select_element(&mut w, i % count, Modifiers::CTRL).unwrap();
        }

        c.select_element(&mut w, a, Modifiers::empty()).unwrap();
        prop_assert_eq!(c.anchor(), Some(a));
        c.select_element(&mut w, b, Modifiers::SHIFT).unwrap();

        let expected: Vec<usize> = (a.min(b)..=a.max(b)).filter(|i| !pinned.contains(i)).collect();
        prop_assert_eq!(w.provider().unwrap().selected_elements(), expected);
        prop_assert_eq!(c.anchor(), Some(a));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Single-select mode holds at most one element
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_mode_holds_at_most_one(
        count in 1_usize..100,
        actions in prop::collection::vec(action(100), 1..30),
    ) {
        let mut w = window(count, false, BTreeSet::new());
        let mut c = SelectionController::new();
        for action in &actions {
            let action = match *action {
                Action::Click(i, m) => Action::Click(i % count, m),
                ref other => other.clone(),
            };
            run(&mut c, &mut w, &action);
            let selected = w.provider().unwrap().selected_elements();
            prop_assert!(selected.len() <= 1, "selected {:?}", selected);
            prop_assert!(selected.iter().all(|&i| i < count));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Frame selection matches brute force
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn frame_selection_matches_brute_force(
        w in 10_i32..80,
        h in 10_i32..80,
        spacing in 0_i32..12,
        count in 0_usize..300,
        corners in (0_i64..600, 0_i64..1500, 0_i64..600, 0_i64..1500),
        pinned in prop::collection::btree_set(0_usize..300, 0..30),
    ) {
        let geometry = TileLayout::new(Size::new(w, h))
            .geometry(Size::new(400, 300), &LayoutContext::with_spacing(spacing))
            .unwrap();
        let mapper = IndexMapper::new(geometry);
        let (x0, y0, x1, y1) = corners;
        let drag = ContentRect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));

        let hits = compute_frame_selection(&mapper, count, drag, |i| !pinned.contains(&i));
        let expected: Vec<usize> = (0..count)
            .filter(|&i| !pinned.contains(&i) && mapper.element_rect(i).intersects(&drag))
            .collect();
        prop_assert_eq!(hits, expected);
    }
}
