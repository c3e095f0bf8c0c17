mod plotter;

pub use plotter::{DragMode, Plotter};
