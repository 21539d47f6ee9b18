// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget capability consumed by the arrangers.

use crate::{Align, EstimatedSize, Insets, Rect, Size};

/// A child that can be measured and positioned by an arranger.
///
/// Arrangers only ever see children through this trait together with a
/// [`LayoutContext`](crate::LayoutContext); they never reach into the
/// container that owns the children.
pub trait LayoutItem {
    /// Estimate the size this child wants given the `available` space.
    fn estimate_size(&self, available: Size) -> EstimatedSize;

    /// Outer margin around the child.
    fn margin(&self) -> Insets {
        Insets::ZERO
    }

    /// Minimum width and height.
    fn min_size(&self) -> Size {
        Size::ZERO
    }

    /// Maximum width and height.
    fn max_size(&self) -> Size {
        Size::new(i32::MAX, i32::MAX)
    }

    /// Whether the child participates in layout at all.
    fn is_visible(&self) -> bool;

    /// Show or hide the child.
    fn set_visible(&mut self, visible: bool);

    /// Floating children are excluded from normal flow and placed against the
    /// full container rectangle.
    fn is_float(&self) -> bool {
        false
    }

    /// Horizontal alignment preference.
    fn h_align(&self) -> Align {
        Align::Start
    }

    /// Vertical alignment preference.
    fn v_align(&self) -> Align {
        Align::Start
    }

    /// Receive the final position.
    fn set_pos(&mut self, rect: Rect);
}
