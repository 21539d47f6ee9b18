// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click and keyboard selection over a virtual window.

use alloc::vec::Vec;

use trellis_layout::{Axis, LayoutError};
use trellis_virtual::{ContentRect, DataProvider, VirtualWindow};

use crate::{ClickEvent, Modifiers, Navigation, compute_frame_selection};

/// Observable selection state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing is selected.
    Unselected,
    /// Single-select mode with one selected element.
    Single(usize),
    /// Multi-select mode; selected elements in ascending order.
    Multi(Vec<usize>),
}

/// How a click or key press changes the selection in multi-select mode.
#[derive(Copy, Clone, Debug)]
enum Gesture {
    Exclusive,
    Range(usize),
    Toggle,
}

/// The selection state machine.
///
/// The controller holds only the anchor (the fixed end of shift ranges) and
/// the current (focused) element. Selection membership lives in the window's
/// [`DataProvider`], keyed by element index, so it survives widget recycling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    anchor: Option<usize>,
    current: Option<usize>,
}

impl SelectionController {
    /// A controller with no anchor and no focus.
    pub const fn new() -> Self {
        Self {
            anchor: None,
            current: None,
        }
    }

    /// The fixed end of shift ranges.
    pub const fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Move the anchor without touching the selection.
    pub fn set_anchor(&mut self, anchor: Option<usize>) {
        self.anchor = anchor;
    }

    /// The focused element.
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// Current selection state as reported by the provider.
    pub fn state<P: DataProvider>(
        &self,
        window: &VirtualWindow<P>,
    ) -> Result<SelectionState, LayoutError> {
        let provider = window.provider().ok_or(LayoutError::MissingProvider)?;
        let selected = provider.selected_elements();
        Ok(match selected.as_slice() {
            [] => SelectionState::Unselected,
            [one] if !provider.is_multi_select() => SelectionState::Single(*one),
            _ => SelectionState::Multi(selected),
        })
    }

    /// Handle a click on a pool widget.
    ///
    /// Clicks on unbound slots are ignored. Returns whether the selection set
    /// changed.
    pub fn on_click<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
        event: ClickEvent,
    ) -> Result<bool, LayoutError> {
        if window.provider().is_none() {
            return Err(LayoutError::MissingProvider);
        }
        match window.element_of_slot(event.slot) {
            Some(index) => self.select_element(window, index, event.modifiers),
            None => Ok(false),
        }
    }

    /// Apply a click on element `index`.
    ///
    /// In single-select mode the element replaces the selection, whether or
    /// not it is selectable. In multi-select mode:
    /// - a plain click selects only `index` and makes it the anchor;
    /// - a right click on a selected element keeps the selection as is;
    /// - Shift selects the selectable elements between the anchor and `index`;
    /// - Ctrl toggles `index` and makes it the anchor.
    ///
    /// Shift and Ctrl together act as a plain click, as does Shift with no
    /// anchor. A plain click on an element that is not selectable toggles its
    /// membership and leaves the anchor alone.
    pub fn select_element<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
        index: usize,
        modifiers: Modifiers,
    ) -> Result<bool, LayoutError> {
        let count = window.element_count();
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        if index >= count {
            return Ok(false);
        }
        let selectable = provider.is_element_selectable(index);

        let (changed, action) = if !provider.is_multi_select() {
            self.anchor = Some(index);
            (replace_selection(provider, &[index]), "single")
        } else if modifiers.contains(Modifiers::RIGHT_BUTTON)
            && provider.is_element_selected(index)
        {
            self.current = Some(index);
            return Ok(false);
        } else {
            let gesture = if modifiers.contains(Modifiers::RIGHT_BUTTON) {
                Gesture::Exclusive
            } else if modifiers.is_ctrl_only() {
                Gesture::Toggle
            } else if modifiers.is_shift_only() {
                self.anchor.map_or(Gesture::Exclusive, Gesture::Range)
            } else {
                Gesture::Exclusive
            };
            match gesture {
                Gesture::Exclusive if !selectable => {
                    let selected = provider.is_element_selected(index);
                    provider.set_element_selected(index, !selected);
                    (true, "toggle_unselectable")
                }
                Gesture::Exclusive => {
                    self.anchor = Some(index);
                    (replace_selection(provider, &[index]), "exclusive")
                }
                Gesture::Range(anchor) => {
                    let wanted = selectable_span(provider, anchor.min(count - 1), index);
                    (replace_selection(provider, &wanted), "range")
                }
                Gesture::Toggle => {
                    if !selectable {
                        return Ok(false);
                    }
                    let selected = provider.is_element_selected(index);
                    provider.set_element_selected(index, !selected);
                    self.anchor = Some(index);
                    (true, "toggle")
                }
            }
        };
        self.current = Some(index);
        if changed {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change(action, window);
        Ok(changed)
    }

    /// Select every selectable element (multi-select mode only).
    pub fn select_all<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
    ) -> Result<bool, LayoutError> {
        let count = window.element_count();
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        if !provider.is_multi_select() {
            return Ok(false);
        }
        let mut changed = false;
        for index in 0..count {
            if provider.is_element_selectable(index) && !provider.is_element_selected(index) {
                provider.set_element_selected(index, true);
                changed = true;
            }
        }
        if changed {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change("select_all", window);
        Ok(changed)
    }

    /// Deselect everything.
    pub fn select_none<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
    ) -> Result<bool, LayoutError> {
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        let changed = replace_selection(provider, &[]);
        if changed {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change("select_none", window);
        Ok(changed)
    }

    /// Switch between single and multiple selection.
    ///
    /// Leaving multi-select keeps only the focused element when it is
    /// selected, otherwise the lowest selected one.
    pub fn set_multi_select<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
        multi: bool,
    ) -> Result<(), LayoutError> {
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        provider.set_multi_select(multi);
        if multi {
            return Ok(());
        }
        let selected = provider.selected_elements();
        let keep = self
            .current
            .filter(|c| selected.binary_search(c).is_ok())
            .or_else(|| selected.first().copied());
        if replace_selection(provider, keep.as_slice()) {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change("single_mode", window);
        Ok(())
    }

    /// Move the focus with the keyboard.
    ///
    /// A plain move selects the new element alone and anchors there; Shift
    /// extends from the anchor; Ctrl moves the focus only. Elements that are
    /// not selectable are skipped in the direction of travel, and the new
    /// focus is scrolled into view. Returns whether the focus or the
    /// selection changed.
    pub fn on_navigate<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
        navigation: Navigation,
        modifiers: Modifiers,
    ) -> Result<bool, LayoutError> {
        let count = window.element_count();
        let mapper = *window.mapper();
        let page = page_tracks(window);
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        if count == 0 {
            return Ok(false);
        }
        let last = count - 1;
        let from = self.current.map(|c| c.min(last));

        let (target, forward) = match (navigation, from) {
            (Navigation::Home, _) => (0, true),
            (Navigation::End, _) => (last, false),
            (_, None) => (0, true),
            (navigation, Some(from)) => {
                let (delta, forward) =
                    step(navigation, mapper.main_axis(), mapper.cross_count(), page);
                if forward {
                    (from.saturating_add(delta).min(last), true)
                } else {
                    (from.saturating_sub(delta), false)
                }
            }
        };
        let Some(target) = seek_selectable(provider, target, forward, last) else {
            return Ok(false);
        };

        let multi = provider.is_multi_select();
        let (changed, action) = if multi && modifiers.is_ctrl_only() {
            (false, "focus")
        } else if multi && modifiers.is_shift_only() {
            let anchor = *self.anchor.get_or_insert(from.unwrap_or(target));
            let wanted = selectable_span(provider, anchor.min(last), target);
            (replace_selection(provider, &wanted), "range")
        } else {
            self.anchor = Some(target);
            (replace_selection(provider, &[target]), "exclusive")
        };
        self.current = Some(target);
        window.ensure_visible(target, false);
        if changed {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change(action, window);
        Ok(changed || from != Some(target))
    }

    /// Replace the selection with the elements under a rubber-band frame.
    ///
    /// `drag` is in content coordinates. Single-select mode keeps only the
    /// first hit.
    pub fn apply_frame_selection<P: DataProvider>(
        &mut self,
        window: &mut VirtualWindow<P>,
        drag: kurbo::Rect,
    ) -> Result<bool, LayoutError> {
        let count = window.element_count();
        let mapper = *window.mapper();
        let provider = window.provider_mut().ok_or(LayoutError::MissingProvider)?;
        let mut hits = compute_frame_selection(&mapper, count, ContentRect::from_kurbo(drag), |i| {
            provider.is_element_selectable(i)
        });
        if !provider.is_multi_select() {
            hits.truncate(1);
        }
        let changed = replace_selection(provider, &hits);
        if let (Some(&first), Some(&last)) = (hits.first(), hits.last()) {
            self.anchor = Some(first);
            self.current = Some(last);
        }
        if changed {
            window.sync_selection_marks(0..=usize::MAX)?;
        }
        self.log_change("frame", window);
        Ok(changed)
    }

    /// The element count changed; forget indices that fell out of range.
    pub fn on_count_changed(&mut self, count: usize) {
        self.anchor = self.anchor.filter(|&a| a < count);
        self.current = self.current.filter(|&c| c < count);
    }

    fn log_change<P: DataProvider>(&self, action: &str, window: &VirtualWindow<P>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "selection.change",
            action,
            selected_count = window.provider().map_or(0, |p| p.selected_elements().len()),
            anchor = ?self.anchor,
            current = ?self.current,
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (action, window);
    }
}

/// Make exactly `wanted` (ascending) selected; returns whether anything changed.
fn replace_selection<P: DataProvider>(provider: &mut P, wanted: &[usize]) -> bool {
    let mut changed = false;
    for old in provider.selected_elements() {
        if wanted.binary_search(&old).is_err() {
            provider.set_element_selected(old, false);
            changed = true;
        }
    }
    for &index in wanted {
        if !provider.is_element_selected(index) {
            provider.set_element_selected(index, true);
            changed = true;
        }
    }
    changed
}

/// Selectable elements in `[min(a, b), max(a, b)]`, ascending.
fn selectable_span<P: DataProvider>(provider: &P, a: usize, b: usize) -> Vec<usize> {
    (a.min(b)..=a.max(b))
        .filter(|&i| provider.is_element_selectable(i))
        .collect()
}

/// First selectable element at or after (`forward`) / before `start`.
fn seek_selectable<P: DataProvider>(
    provider: &P,
    start: usize,
    forward: bool,
    last: usize,
) -> Option<usize> {
    if forward {
        (start..=last).find(|&i| provider.is_element_selectable(i))
    } else {
        (0..=start).rev().find(|&i| provider.is_element_selectable(i))
    }
}

/// Elements moved by one key press and whether the move goes forward.
fn step(navigation: Navigation, main: Axis, cross: usize, page_tracks: usize) -> (usize, bool) {
    // Along the flow: one element. Across tracks: one track of `cross` elements.
    let (along_back, along_fwd, across_back, across_fwd) = match main {
        Axis::Vertical => (
            Navigation::Left,
            Navigation::Right,
            Navigation::Up,
            Navigation::Down,
        ),
        Axis::Horizontal => (
            Navigation::Up,
            Navigation::Down,
            Navigation::Left,
            Navigation::Right,
        ),
    };
    match navigation {
        Navigation::PageUp => (page_tracks.saturating_mul(cross), false),
        Navigation::PageDown => (page_tracks.saturating_mul(cross), true),
        n if n == along_back => (1, false),
        n if n == along_fwd => (1, true),
        n if n == across_back => (cross, false),
        n if n == across_fwd => (cross, true),
        _ => (0, true),
    }
}

/// Tracks moved by a page key: one viewport of whole tracks minus one.
fn page_tracks<P: DataProvider>(window: &VirtualWindow<P>) -> usize {
    let mapper = window.mapper();
    let pitch = mapper.pitch();
    if pitch <= 0 {
        return 1;
    }
    let extent = window
        .viewport()
        .deflate(window.context().padding())
        .extent(mapper.main_axis());
    usize::try_from(i64::from(extent) / pitch - 1)
        .unwrap_or(0)
        .max(1)
}
