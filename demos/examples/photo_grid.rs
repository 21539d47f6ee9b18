// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A virtualized photo grid with a toolbar, driven end to end.
//!
//! This example shows how to combine:
//! - `trellis_layout` for a stretch-distributing toolbar row,
//! - `trellis_virtual` for a recycled thumbnail pool over 10,000 photos,
//! - `trellis_selection` for click, keyboard, and rubber-band selection.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example photo_grid`

use std::collections::HashSet;

use tracing::info;
use tracing_subscriber::EnvFilter;
use trellis_layout::{
    EstimatedSize, LayoutContext, LayoutItem, LinearArranger, Rect, Size, SizeSpec, TileLayout,
};
use trellis_selection::{ClickEvent, FrameDrag, Modifiers, Navigation, SelectionController};
use trellis_virtual::{
    ContentPoint, DataProvider, PoolWidget, ScrollPosition, SelectionSet, VirtualWindow,
};

/// A toolbar child with a fixed or stretching width.
#[derive(Debug)]
struct ToolbarItem {
    name: &'static str,
    width: SizeSpec,
    pos: Rect,
}

impl ToolbarItem {
    fn new(name: &'static str, width: SizeSpec) -> Self {
        Self {
            name,
            width,
            pos: Rect::default(),
        }
    }
}

impl LayoutItem for ToolbarItem {
    fn estimate_size(&self, _available: Size) -> EstimatedSize {
        EstimatedSize::new(self.width, SizeSpec::Fixed(32))
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn set_visible(&mut self, _visible: bool) {}
    fn set_pos(&mut self, rect: Rect) {
        self.pos = rect;
    }
}

/// A pooled thumbnail widget.
#[derive(Debug, Default)]
struct Thumbnail {
    caption: String,
    selected: bool,
    visible: bool,
    pos: Rect,
}

impl LayoutItem for Thumbnail {
    fn estimate_size(&self, _available: Size) -> EstimatedSize {
        EstimatedSize::fixed(0, 0)
    }
    fn is_visible(&self) -> bool {
        self.visible
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
    fn set_pos(&mut self, rect: Rect) {
        self.pos = rect;
    }
}

impl PoolWidget for Thumbnail {
    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// The photo library, with a few locked photos that cannot be selected.
#[derive(Debug)]
struct Library {
    photos: Vec<String>,
    locked: HashSet<usize>,
    selection: SelectionSet,
    multi: bool,
}

impl DataProvider for Library {
    type Widget = Thumbnail;

    fn create_element(&mut self) -> Thumbnail {
        Thumbnail::default()
    }

    fn fill_element(&mut self, widget: &mut Thumbnail, index: usize) -> bool {
        match self.photos.get(index) {
            Some(name) => {
                widget.caption.clone_from(name);
                true
            }
            None => false,
        }
    }

    fn element_count(&self) -> usize {
        self.photos.len()
    }

    fn is_element_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    fn set_element_selected(&mut self, index: usize, selected: bool) {
        self.selection.set(index, selected);
    }

    fn selected_elements(&self) -> Vec<usize> {
        self.selection.sorted()
    }

    fn is_multi_select(&self) -> bool {
        self.multi
    }

    fn set_multi_select(&mut self, multi: bool) {
        self.multi = multi;
    }

    fn is_element_selectable(&self, index: usize) -> bool {
        !self.locked.contains(&index)
    }
}

fn print_window(window: &VirtualWindow<Library>) {
    let range = window.visible_element_indices();
    println!(
        "scroll={:?} visible={:?} pool={}",
        window.scroll_pos(),
        range,
        window.pool_len()
    );
    for (_, slot) in window.slots() {
        let w = slot.widget();
        if w.visible && w.selected {
            println!("  [x] {} at {:?}", w.caption, w.pos);
        }
    }
}

fn main() -> Result<(), trellis_layout::LayoutError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Toolbar: fixed buttons around a search box taking the remaining width.
    let cx = LayoutContext::with_spacing(4);
    let mut toolbar = [
        ToolbarItem::new("back", SizeSpec::Fixed(32)),
        ToolbarItem::new("search", SizeSpec::STRETCH),
        ToolbarItem::new("menu", SizeSpec::Fixed(32)),
    ];
    let bar = LinearArranger::horizontal().arrange(&mut toolbar, Rect::new(0, 0, 640, 32), &cx);
    info!(width = bar.width, height = bar.height, "toolbar arranged");
    for item in &toolbar {
        println!("{:>6}: {:?}", item.name, item.pos);
    }

    // Grid: 10,000 photos in 120x90 tiles below the toolbar.
    let library = Library {
        photos: (0..10_000).map(|i| format!("IMG_{i:05}.jpg")).collect(),
        locked: [5, 6].into_iter().collect(),
        selection: SelectionSet::new(),
        multi: true,
    };
    let mut window = VirtualWindow::with_provider(library, TileLayout::new(Size::new(120, 90)), cx);
    let viewport = Rect::new(0, 36, 640, 516);
    window.arrange(viewport)?;
    print_window(&window);

    let mut selection = SelectionController::new();

    let span = tracing::info_span!("clicks").entered();
    // Click the second thumbnail, then shift-click two rows down.
    if let Some(slot) = window.slot_of_element(1) {
        selection.on_click(&mut window, ClickEvent::new(slot))?;
    }
    if let Some(slot) = window.slot_of_element(11) {
        selection.on_click(&mut window, ClickEvent::with_modifiers(slot, Modifiers::SHIFT))?;
    }
    println!("after shift-click: {:?}", selection.state(&window)?);
    drop(span);

    // Keyboard: page down twice; the grid scrolls to follow the focus.
    let span = tracing::info_span!("keyboard").entered();
    selection.on_navigate(&mut window, Navigation::PageDown, Modifiers::empty())?;
    selection.on_navigate(&mut window, Navigation::PageDown, Modifiers::SHIFT)?;
    window.arrange(viewport)?;
    drop(span);
    info!(scroll = ?window.scroll_pos(), current = ?selection.current(), "paged down");
    print_window(&window);

    // Rubber band over the top-left corner of the current page.
    let mut drag = FrameDrag::new();
    let top = window.scroll_pos().y;
    drag.begin(ContentPoint::new(10, top + 10).to_kurbo());
    drag.update(ContentPoint::new(260, top + 150).to_kurbo());
    if let Some(frame) = drag.finish() {
        let changed = selection.apply_frame_selection(&mut window, frame)?;
        info!(changed, "frame selection applied");
    }
    println!("after frame: {:?}", selection.state(&window)?);

    // Jump far away and back; the selection survives recycling.
    window.set_scroll_pos(ScrollPosition::new(0, 500_000));
    window.arrange(viewport)?;
    print_window(&window);
    selection.on_navigate(&mut window, Navigation::Home, Modifiers::CTRL)?;
    window.arrange(viewport)?;
    print_window(&window);

    Ok(())
}
