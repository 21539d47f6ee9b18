// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data side of a virtual container: element data, selection storage, and
//! the widgets that display them.

use alloc::vec::Vec;

use hashbrown::HashSet;
use trellis_layout::LayoutItem;

/// A widget that can be recycled to display any element.
pub trait PoolWidget: LayoutItem {
    /// Show or clear the selected look.
    fn set_selected(&mut self, selected: bool);
}

/// Owner of the element data behind a virtual container.
///
/// The provider, not the widget pool, is the authority on selection: pool
/// widgets are rebound as the user scrolls, so selection is always keyed by
/// element index.
pub trait DataProvider {
    /// Widget type created for pool slots.
    type Widget: PoolWidget;

    /// Create a fresh, unbound widget.
    fn create_element(&mut self) -> Self::Widget;

    /// Populate `widget` from the data at `index`.
    ///
    /// Returns `false` when the element could not be displayed; the slot stays
    /// bound either way.
    fn fill_element(&mut self, widget: &mut Self::Widget, index: usize) -> bool;

    /// Number of elements.
    fn element_count(&self) -> usize;

    /// Whether `index` is selected.
    fn is_element_selected(&self, index: usize) -> bool;

    /// Add or remove `index` from the selection.
    fn set_element_selected(&mut self, index: usize, selected: bool);

    /// All selected indices in ascending order.
    fn selected_elements(&self) -> Vec<usize>;

    /// Whether more than one element may be selected.
    fn is_multi_select(&self) -> bool;

    /// Switch between single and multiple selection.
    fn set_multi_select(&mut self, multi: bool);

    /// Whether `index` may be selected at all.
    ///
    /// Pinned header rows and similar decorations answer `false`.
    fn is_element_selectable(&self, index: usize) -> bool {
        let _ = index;
        true
    }
}

/// Set of selected element indices.
///
/// Providers can embed this as their selection storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: HashSet<usize>,
}

impl SelectionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `index`; returns whether it was newly inserted.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Remove `index`; returns whether it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        self.indices.remove(&index)
    }

    /// Set membership of `index`.
    pub fn set(&mut self, index: usize, selected: bool) {
        if selected {
            self.insert(index);
        } else {
            self.remove(index);
        }
    }

    /// Whether `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Drop indices at or past `count`, after the element count shrank.
    pub fn retain_below(&mut self, count: usize) {
        self.indices.retain(|&i| i < count);
    }

    /// Selected indices in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.indices.iter().copied().collect();
        out.sort_unstable();
        out
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for SelectionSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.indices.extend(iter);
    }
}
