// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{DpiScale, Insets};

/// Parameters threaded through one arrangement pass.
///
/// Lengths are stored in logical pixels and scaled on read, so the same
/// context can be reused after a display scale change by updating `dpi`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    /// Gap between adjacent children, in logical pixels.
    pub child_spacing: i32,
    /// Container padding, in logical pixels.
    pub padding: Insets,
    /// Display scale.
    pub dpi: DpiScale,
}

impl LayoutContext {
    /// A context with the given child spacing and no padding.
    pub fn with_spacing(child_spacing: i32) -> Self {
        Self {
            child_spacing,
            ..Self::default()
        }
    }

    /// Scaled child spacing, never negative.
    pub fn spacing(&self) -> i32 {
        self.dpi.scale(self.child_spacing).max(0)
    }

    /// Scaled padding.
    pub fn padding(&self) -> Insets {
        self.dpi.scale_insets(self.padding)
    }
}
