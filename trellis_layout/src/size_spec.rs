// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis size descriptors.

/// Size request for one axis: a concrete pixel length or a stretch weight.
///
/// A stretch weight is a percentage share of the space left over after fixed
/// siblings are placed. Weights are summed across siblings; when the sum is
/// below 100 the leftover space is only partially handed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeSpec {
    /// Concrete length in pixels.
    Fixed(i32),
    /// Stretch with the given percentage weight.
    Stretch(u32),
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

impl SizeSpec {
    /// Stretch with a full (100%) weight.
    pub const STRETCH: Self = Self::Stretch(100);

    /// Whether this is a stretch request.
    #[inline]
    pub const fn is_stretch(self) -> bool {
        matches!(self, Self::Stretch(_))
    }

    /// The concrete length, if any.
    #[inline]
    pub const fn fixed(self) -> Option<i32> {
        match self {
            Self::Fixed(v) => Some(v),
            Self::Stretch(_) => None,
        }
    }

    /// The stretch weight, if any.
    #[inline]
    pub const fn stretch_weight(self) -> Option<u32> {
        match self {
            Self::Fixed(_) => None,
            Self::Stretch(w) => Some(w),
        }
    }
}

/// Width and height requests returned by a widget's size estimate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatedSize {
    /// Horizontal request.
    pub width: SizeSpec,
    /// Vertical request.
    pub height: SizeSpec,
}

impl EstimatedSize {
    /// Create an estimate from both axes.
    pub const fn new(width: SizeSpec, height: SizeSpec) -> Self {
        Self { width, height }
    }

    /// A fixed-size estimate.
    pub const fn fixed(width: i32, height: i32) -> Self {
        Self::new(SizeSpec::Fixed(width), SizeSpec::Fixed(height))
    }

    /// Request along `axis`.
    #[inline]
    pub const fn along(&self, axis: crate::Axis) -> SizeSpec {
        match axis {
            crate::Axis::Horizontal => self.width,
            crate::Axis::Vertical => self.height,
        }
    }
}
