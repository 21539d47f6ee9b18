// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Virtual: recycled widget pools over large element sets.
//!
//! A virtual container shows a few dozen widgets for a data set of any size.
//! As the user scrolls, the same widgets are rebound to whichever elements are
//! in view. This crate provides:
//!
//! - [`IndexMapper`]: pure arithmetic between element indices and 64-bit
//!   content coordinates for a [`TileGeometry`](trellis_layout::TileGeometry)
//!   (lists are single-column grids).
//! - [`DataProvider`]: the host's data, widget factory, and authoritative
//!   selection storage. [`SelectionSet`] is a ready-made selection store.
//! - [`VirtualWindow`]: the widget pool. It sizes the pool from the viewport,
//!   binds slot `k` to element `top + k`, positions the widgets, and answers
//!   hit tests. Pool widgets are addressed by generational [`SlotId`] handles.
//!
//! Selection is keyed by element index, never by widget, so it survives
//! recycling: every rebind re-applies the provider's selection bit before the
//! widget is filled.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_layout::{EstimatedSize, LayoutContext, LayoutItem, Rect, Size, TileLayout};
//! use trellis_virtual::{DataProvider, PoolWidget, ScrollPosition, SelectionSet, VirtualWindow};
//!
//! #[derive(Default)]
//! struct Label {
//!     text: String,
//!     visible: bool,
//! }
//!
//! impl LayoutItem for Label {
//!     fn estimate_size(&self, _available: Size) -> EstimatedSize {
//!         EstimatedSize::fixed(0, 0)
//!     }
//!     fn is_visible(&self) -> bool {
//!         self.visible
//!     }
//!     fn set_visible(&mut self, visible: bool) {
//!         self.visible = visible;
//!     }
//!     fn set_pos(&mut self, _rect: Rect) {}
//! }
//!
//! impl PoolWidget for Label {
//!     fn set_selected(&mut self, _selected: bool) {}
//! }
//!
//! struct Names {
//!     names: Vec<String>,
//!     selection: SelectionSet,
//! }
//!
//! impl DataProvider for Names {
//!     type Widget = Label;
//!     fn create_element(&mut self) -> Label {
//!         Label::default()
//!     }
//!     fn fill_element(&mut self, widget: &mut Label, index: usize) -> bool {
//!         widget.text.clone_from(&self.names[index]);
//!         true
//!     }
//!     fn element_count(&self) -> usize {
//!         self.names.len()
//!     }
//!     fn is_element_selected(&self, index: usize) -> bool {
//!         self.selection.contains(index)
//!     }
//!     fn set_element_selected(&mut self, index: usize, selected: bool) {
//!         self.selection.set(index, selected);
//!     }
//!     fn selected_elements(&self) -> Vec<usize> {
//!         self.selection.sorted()
//!     }
//!     fn is_multi_select(&self) -> bool {
//!         true
//!     }
//!     fn set_multi_select(&mut self, _multi: bool) {}
//! }
//!
//! let names = (0..10_000).map(|i| format!("row {i}")).collect();
//! let provider = Names { names, selection: SelectionSet::new() };
//! let mut window = VirtualWindow::with_provider(
//!     provider,
//!     TileLayout::list(20),
//!     LayoutContext::default(),
//! );
//!
//! let viewport = Rect::new(0, 0, 300, 200);
//! window.arrange(viewport).unwrap();
//! window.set_scroll_pos(ScrollPosition::new(0, 4_000));
//! window.arrange(viewport).unwrap();
//!
//! assert_eq!(window.visible_element_indices(), Some(200..=209));
//! assert_eq!(window.pool_len(), 11);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod mapper;
mod provider;
mod window;

pub use mapper::{ContentPoint, ContentRect, IndexMapper};
pub use provider::{DataProvider, PoolWidget, SelectionSet};
pub use window::{PoolSlot, ScrollPosition, SlotId, VirtualWindow};
