// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Selection: selection semantics over recycled widget pools.
//!
//! - [`SelectionController`]: the click and keyboard state machine. It maps
//!   clicked pool slots to element indices, tracks the shift-range anchor and
//!   the focused element, and writes membership into the window's
//!   [`DataProvider`](trellis_virtual::DataProvider).
//! - [`compute_frame_selection`] and [`FrameDrag`]: rubber-band selection that
//!   hit-tests a drag rectangle against the tile geometry.
//! - [`Modifiers`], [`ClickEvent`], and [`Navigation`]: the input vocabulary.
//!
//! Membership is always stored per element, so a selection made on one page
//! is still there after the widgets showing it have been recycled.
//!
//! ## Minimal example
//!
//! ```rust
//! # use trellis_layout::{EstimatedSize, LayoutContext, LayoutItem, Rect, Size, TileLayout};
//! # use trellis_virtual::{DataProvider, PoolWidget, SelectionSet, VirtualWindow};
//! # #[derive(Default)]
//! # struct Row;
//! # impl LayoutItem for Row {
//! #     fn estimate_size(&self, _: Size) -> EstimatedSize { EstimatedSize::fixed(0, 0) }
//! #     fn is_visible(&self) -> bool { true }
//! #     fn set_visible(&mut self, _: bool) {}
//! #     fn set_pos(&mut self, _: Rect) {}
//! # }
//! # impl PoolWidget for Row {
//! #     fn set_selected(&mut self, _: bool) {}
//! # }
//! # struct Rows(SelectionSet);
//! # impl DataProvider for Rows {
//! #     type Widget = Row;
//! #     fn create_element(&mut self) -> Row { Row }
//! #     fn fill_element(&mut self, _: &mut Row, _: usize) -> bool { true }
//! #     fn element_count(&self) -> usize { 100 }
//! #     fn is_element_selected(&self, i: usize) -> bool { self.0.contains(i) }
//! #     fn set_element_selected(&mut self, i: usize, s: bool) { self.0.set(i, s) }
//! #     fn selected_elements(&self) -> Vec<usize> { self.0.sorted() }
//! #     fn is_multi_select(&self) -> bool { true }
//! #     fn set_multi_select(&mut self, _: bool) {}
//! # }
//! use trellis_selection::{Modifiers, SelectionController};
//!
//! let rows = Rows(SelectionSet::new());
//! let mut window =
//!     VirtualWindow::with_provider(rows, TileLayout::list(20), LayoutContext::default());
//! window.arrange(Rect::new(0, 0, 200, 200)).unwrap();
//!
//! let mut selection = SelectionController::new();
//! selection.select_element(&mut window, 3, Modifiers::empty()).unwrap();
//! selection.select_element(&mut window, 7, Modifiers::SHIFT).unwrap();
//!
//! assert_eq!(window.provider().unwrap().selected_elements(), [3, 4, 5, 6, 7]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod frame;
mod input;

pub use controller::{SelectionController, SelectionState};
pub use frame::{FrameDrag, compute_frame_selection};
pub use input::{ClickEvent, Modifiers, Navigation};
