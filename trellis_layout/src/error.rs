// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Misconfiguration reported by layout and windowing operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A tile item dimension was zero or negative.
    #[error("tile item size must be positive, got {width}x{height}")]
    InvalidItemSize {
        /// Configured item width.
        width: i32,
        /// Configured item height.
        height: i32,
    },
    /// A virtual container was used before a data provider was attached.
    #[error("no data provider attached")]
    MissingProvider,
    /// An attribute name is not recognized.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// An attribute value could not be parsed.
    #[error("invalid value `{value}` for attribute `{name}`")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Offending value.
        value: String,
    },
}
