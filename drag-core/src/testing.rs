//! Test doubles shared by the unit tests of this crate.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::click::{ClickStrategy, MouseEventInit, SyntheticClick};
use crate::event::ElementId;
use crate::options::DragOptions;
use crate::platform::{Cursor, OverlaySpec, Platform, PointerEvents};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every call the controller makes into the platform.
pub struct FakePlatform {
    next_id: u64,
    pub overlays: HashMap<ElementId, OverlaySpec>,
    pub removed: Vec<ElementId>,
    pub cursors: HashMap<ElementId, Cursor>,
    pub pointer_events: Vec<(ElementId, PointerEvents)>,
    pub clicks: Vec<(ElementId, SyntheticClick)>,
    pub unhovers: usize,
    pub replots: usize,
    pub supports_constructor: bool,
    pub supports_init_mouse_event: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            overlays: HashMap::new(),
            removed: Vec::new(),
            cursors: HashMap::new(),
            pointer_events: Vec::new(),
            clicks: Vec::new(),
            unhovers: 0,
            replots: 0,
            supports_constructor: true,
            supports_init_mouse_event: true,
        }
    }

    pub fn live_overlays(&self) -> usize {
        self.overlays.len()
    }
}

impl Platform for FakePlatform {
    fn set_pointer_events(&mut self, element: ElementId, mode: PointerEvents) {
        self.pointer_events.push((element, mode));
    }

    fn computed_cursor(&self, element: ElementId) -> Cursor {
        self.cursors.get(&element).copied().unwrap_or_default()
    }

    fn create_overlay(&mut self, spec: &OverlaySpec) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.overlays.insert(id, spec.clone());
        id
    }

    fn remove_element(&mut self, element: ElementId) {
        self.overlays.remove(&element);
        self.removed.push(element);
    }

    fn construct_click(
        &mut self,
        strategy: ClickStrategy,
        init: &MouseEventInit,
    ) -> Result<SyntheticClick, String> {
        let supported = match strategy {
            ClickStrategy::Constructor => self.supports_constructor,
            ClickStrategy::InitMouseEvent => self.supports_init_mouse_event,
        };
        if supported {
            Ok(SyntheticClick {
                strategy,
                init: init.clone(),
            })
        } else {
            Err(format!("{strategy:?} not supported"))
        }
    }

    fn dispatch_click(&mut self, target: ElementId, click: SyntheticClick) -> Result<(), String> {
        self.clicks.push((target, click));
        Ok(())
    }

    fn unhover(&mut self) {
        self.unhovers += 1;
    }

    fn replot(&mut self) {
        self.replots += 1;
    }
}

/// Collects the arguments of all drag callbacks.
#[derive(Clone, Default)]
pub struct Recorder {
    prepared: Rc<RefCell<Vec<(f64, f64)>>>,
    moves: Rc<RefCell<Vec<(f64, f64, bool)>>>,
    done: Rc<RefCell<Vec<(bool, u32)>>>,
    hovers: Rc<RefCell<usize>>,
}

impl Recorder {
    pub fn attach(&self, options: DragOptions) -> DragOptions {
        let prepared = self.prepared.clone();
        let moves = self.moves.clone();
        let done = self.done.clone();
        let hovers = self.hovers.clone();
        options
            .prep_fn(move |_, x, y| prepared.borrow_mut().push((x, y)))
            .move_fn(move |dx, dy, dragged| moves.borrow_mut().push((dx, dy, dragged)))
            .done_fn(move |dragged, clicks, _| done.borrow_mut().push((dragged, clicks)))
            .set_cursor(move |_| *hovers.borrow_mut() += 1)
    }

    pub fn prepared(&self) -> Vec<(f64, f64)> {
        self.prepared.borrow().clone()
    }

    pub fn moves(&self) -> Vec<(f64, f64, bool)> {
        self.moves.borrow().clone()
    }

    pub fn done(&self) -> Vec<(bool, u32)> {
        self.done.borrow().clone()
    }

    pub fn hovers(&self) -> usize {
        *self.hovers.borrow()
    }
}
