use serde::{Deserialize, Serialize};

use crate::click::{ClickStrategy, MouseEventInit, SyntheticClick};
use crate::constants::{OVERLAY_CLASS, OVERLAY_Z_INDEX};
use crate::event::ElementId;

/// Pointer cursors a drag target can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Crosshair,
    Move,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

/// Pointer event handling mode of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvents {
    All,
    None,
}

/// Describes the transparent overlay that captures move and up events for
/// the duration of a gesture.
///
/// The overlay covers the whole viewport (fixed position, all edges at 0),
/// has no background and sits above everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    pub class_name: &'static str,
    pub z_index: u32,
    pub cursor: Cursor,
}

impl OverlaySpec {
    pub fn new(cursor: Cursor) -> Self {
        Self {
            class_name: OVERLAY_CLASS,
            z_index: OVERLAY_Z_INDEX,
            cursor,
        }
    }
}

/// Everything the gesture state machine needs from the rendering
/// environment.
pub trait Platform {
    fn set_pointer_events(&mut self, element: ElementId, mode: PointerEvents);

    /// The cursor the element currently shows.
    fn computed_cursor(&self, element: ElementId) -> Cursor;

    /// Insert a full viewport overlay and return its handle.
    fn create_overlay(&mut self, spec: &OverlaySpec) -> ElementId;

    fn remove_element(&mut self, element: ElementId);

    /// Build a click event with the given strategy. Returns `Err` when the
    /// environment does not support that strategy.
    fn construct_click(
        &mut self,
        strategy: ClickStrategy,
        init: &MouseEventInit,
    ) -> Result<SyntheticClick, String>;

    fn dispatch_click(&mut self, target: ElementId, click: SyntheticClick) -> Result<(), String>;

    /// Clear any hover highlighting of the plot.
    fn unhover(&mut self);

    /// Redraw the plot.
    fn replot(&mut self);
}
