#![warn(clippy::all, rust_2018_idioms)]

//! Click and drag interactions for plot components.
//!
//! A [`DragElement`] turns raw pointer and touch events on one target element
//! into three callbacks (prepare, move, done) so that pan, zoom and box select
//! handlers do not have to deal with event plumbing themselves. Everything
//! that touches the rendering environment goes through the [`Platform`]
//! trait.

pub mod click;
pub mod constants;
pub mod controller;
pub mod event;
pub mod host;
pub mod options;
pub mod platform;
pub mod string_error;
mod touch;

#[cfg(test)]
mod testing;

pub use self::{
    constants::Thresholds,
    controller::DragElement,
    event::{
        ElementId, EventResponse, InputEvent, Modifiers, MouseButton, PointerEvent, TouchEvent,
    },
    host::{finish_drag, HostState},
    options::DragOptions,
    platform::{Cursor, OverlaySpec, Platform, PointerEvents},
};
