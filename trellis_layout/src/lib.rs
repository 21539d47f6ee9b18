// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: integer arrangers for container children.
//!
//! This crate computes child rectangles for two container shapes:
//!
//! - [`LinearArranger`]: a single-axis stack (horizontal or vertical). Each
//!   child reports an [`EstimatedSize`] made of [`SizeSpec`] values. Fixed
//!   children get their clamped size; stretch children share the remaining
//!   space by weight, honoring their min/max bounds.
//! - [`TileLayout`]: a grid of uniform tiles. [`TileLayout::geometry`] derives
//!   the per-pass [`TileGeometry`] (tile size, spacing, tiles per track) that
//!   virtualized containers reuse for index math.
//!
//! Children are anything implementing [`LayoutItem`]. All lengths are integer
//! pixels; [`LayoutContext`] carries spacing, padding, and a [`DpiScale`].
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_layout::{
//!     EstimatedSize, LayoutContext, LayoutItem, LinearArranger, Rect, Size, SizeSpec,
//! };
//!
//! struct Row {
//!     spec: SizeSpec,
//!     pos: Rect,
//! }
//!
//! impl LayoutItem for Row {
//!     fn estimate_size(&self, _available: Size) -> EstimatedSize {
//!         EstimatedSize::new(self.spec, SizeSpec::Fixed(20))
//!     }
//!     fn is_visible(&self) -> bool {
//!         true
//!     }
//!     fn set_visible(&mut self, _visible: bool) {}
//!     fn set_pos(&mut self, rect: Rect) {
//!         self.pos = rect;
//!     }
//! }
//!
//! let mut rows = [
//!     Row { spec: SizeSpec::Fixed(100), pos: Rect::ZERO },
//!     Row { spec: SizeSpec::STRETCH, pos: Rect::ZERO },
//! ];
//! LinearArranger::horizontal().arrange(
//!     &mut rows,
//!     Rect::new(0, 0, 300, 20),
//!     &LayoutContext::default(),
//! );
//! assert_eq!(rows[1].pos, Rect::new(100, 0, 300, 20));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod geometry;
mod item;
mod linear;
mod size_spec;
mod tile;

pub use context::LayoutContext;
pub use error::LayoutError;
pub use geometry::{Align, Axis, DpiScale, Insets, Rect, Size};
pub use item::LayoutItem;
pub use linear::LinearArranger;
pub use size_spec::{EstimatedSize, SizeSpec};
pub use tile::{Orientation, TileCount, TileGeometry, TileLayout, compute_tile_count};
