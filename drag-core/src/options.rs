use crate::constants::Thresholds;
use crate::event::{ElementId, InputEvent, PointerEvent};

pub type PrepFn = Box<dyn FnMut(&InputEvent, f64, f64)>;
pub type MoveFn = Box<dyn FnMut(f64, f64, bool)>;
pub type DoneFn = Box<dyn FnMut(bool, u32, &InputEvent)>;
pub type CursorFn = Box<dyn FnMut(&PointerEvent)>;

/// Options for [`crate::DragElement::init`].
///
/// - `prep_fn(event, start_x, start_y)` runs on mouse-down / touch-start with
///   the client (page for touch) position of the event.
/// - `move_fn(dx, dy, dragged)` runs on every move with the net pixel offset
///   since the start, and whether the pointer moved far enough to count as a
///   drag.
/// - `done_fn(dragged, num_clicks, event)` runs on mouse-up, or when the
///   pointer leaves the window since no events arrive after that.
///   `num_clicks` is the number of clicks within the double click delay.
/// - `set_cursor(event)` runs on hover before any gesture started, to pick a
///   cursor matching what a drag at that position would do.
pub struct DragOptions {
    pub(crate) element: ElementId,
    pub(crate) prep_fn: Option<PrepFn>,
    pub(crate) move_fn: Option<MoveFn>,
    pub(crate) done_fn: Option<DoneFn>,
    pub(crate) set_cursor: Option<CursorFn>,
    pub(crate) min_drag: Option<f64>,
    pub(crate) thresholds: Thresholds,
}

impl DragOptions {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            prep_fn: None,
            move_fn: None,
            done_fn: None,
            set_cursor: None,
            min_drag: None,
            thresholds: Thresholds::default(),
        }
    }

    pub fn prep_fn(mut self, f: impl FnMut(&InputEvent, f64, f64) + 'static) -> Self {
        self.prep_fn = Some(Box::new(f));
        self
    }

    pub fn move_fn(mut self, f: impl FnMut(f64, f64, bool) + 'static) -> Self {
        self.move_fn = Some(Box::new(f));
        self
    }

    pub fn done_fn(mut self, f: impl FnMut(bool, u32, &InputEvent) + 'static) -> Self {
        self.done_fn = Some(Box::new(f));
        self
    }

    pub fn set_cursor(mut self, f: impl FnMut(&PointerEvent) + 'static) -> Self {
        self.set_cursor = Some(Box::new(f));
        self
    }

    /// Override the minimum drag distance of the pointer path.
    pub fn min_drag(mut self, min_drag: f64) -> Self {
        self.min_drag = Some(min_drag);
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub(crate) fn effective_min_drag(&self) -> f64 {
        self.min_drag.unwrap_or(self.thresholds.min_drag)
    }
}

impl std::fmt::Debug for DragOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragOptions")
            .field("element", &self.element)
            .field("prep_fn", &self.prep_fn.is_some())
            .field("move_fn", &self.move_fn.is_some())
            .field("done_fn", &self.done_fn.is_some())
            .field("set_cursor", &self.set_cursor.is_some())
            .field("min_drag", &self.min_drag)
            .finish()
    }
}
