// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by the selection controller.

use trellis_virtual::SlotId;

bitflags::bitflags! {
    /// Modifier keys and button state accompanying a click or key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift is held.
        const SHIFT        = 0b0000_0001;
        /// Ctrl (Cmd on macOS) is held.
        const CTRL         = 0b0000_0010;
        /// The secondary button was pressed.
        const RIGHT_BUTTON = 0b0000_0100;
    }
}

impl Modifiers {
    /// Shift without Ctrl.
    ///
    /// Shift and Ctrl together count as neither.
    pub const fn is_shift_only(self) -> bool {
        self.contains(Self::SHIFT) && !self.contains(Self::CTRL)
    }

    /// Ctrl without Shift.
    pub const fn is_ctrl_only(self) -> bool {
        self.contains(Self::CTRL) && !self.contains(Self::SHIFT)
    }
}

/// A click on a pool widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// Slot of the clicked widget.
    pub slot: SlotId,
    /// Modifier and button state.
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// A plain left click on `slot`.
    pub const fn new(slot: SlotId) -> Self {
        Self {
            slot,
            modifiers: Modifiers::empty(),
        }
    }

    /// A click on `slot` with `modifiers`.
    pub const fn with_modifiers(slot: SlotId, modifiers: Modifiers) -> Self {
        Self { slot, modifiers }
    }
}

/// Keyboard navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// One step left.
    Left,
    /// One step right.
    Right,
    /// One step up.
    Up,
    /// One step down.
    Down,
    /// One viewport back.
    PageUp,
    /// One viewport forward.
    PageDown,
    /// First element.
    Home,
    /// Last element.
    End,
}

#[cfg(test)]
mod tests {
    use super::Modifiers;

    #[test]
    fn shift_and_ctrl_cancel_out() {
        let both = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(!both.is_shift_only());
        assert!(!both.is_ctrl_only());
        assert!(Modifiers::SHIFT.is_shift_only());
        assert!((Modifiers::CTRL | Modifiers::RIGHT_BUTTON).is_ctrl_only());
    }
}
