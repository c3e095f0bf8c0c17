use std::path::Path;

use carpet_defaults::{carpet_from_json, colors::named_color, CarpetTrace, FullLayout};
use drag_core::{string_error::ErrorStringExt, Cursor, ElementId};
use egui::{Color32, Pos2, Rect};

use super::{DragMode, GestureStart};

/// Points per carpet line when neither a nor b are given explicitly.
const DEFAULT_POINTS: usize = 5;

/// Margin added around the carpet when resetting the view.
const VIEW_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

impl super::Plotter {
    pub fn start_gesture(&mut self, x: f64, y: f64) {
        let pos = Pos2::new(x as f32, y as f32);
        self.gesture = Some(GestureStart {
            pos,
            bounds: self.current_plot_bounds,
            frame: self.frame,
        });
        self.zoom_box = None;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), String> {
        let Some(start) = self.gesture else {
            return Err("pan without gesture".into());
        };
        let bounds = pan_bounds(start.bounds, start.frame, dx, dy)?;
        self.request_plot_bounds = Some(bounds);
        Ok(())
    }

    pub fn move_zoom_box(&mut self, dx: f64, dy: f64) -> Result<(), String> {
        let Some(start) = self.gesture else {
            return Err("zoom box without gesture".into());
        };
        let corner = start.pos + egui::vec2(dx as f32, dy as f32);
        self.zoom_box = Some(Rect::from_two_pos(start.pos, corner));
        Ok(())
    }

    pub fn finish_gesture(&mut self, dragged: bool) -> Result<(), String> {
        let start = self.gesture.take();
        let zoom_box = self.zoom_box.take();
        if !dragged || self.mode != DragMode::Zoom {
            return Ok(());
        }
        if let (Some(start), Some(zoom_box)) = (start, zoom_box) {
            let bounds = zoom_bounds(start.bounds, start.frame, zoom_box)?;
            log::debug!("zooming to {:?}", bounds);
            self.request_plot_bounds = Some(bounds);
        }
        Ok(())
    }

    /// Show the whole carpet, or the unit square without one.
    pub fn reset_view(&mut self) {
        self.gesture = None;
        self.zoom_box = None;
        let bounds = grid_bounds(&self.grid)
            .map(|bounds| with_margin(bounds, VIEW_MARGIN))
            .unwrap_or([0.0, 1.0, 0.0, 1.0]);
        self.request_plot_bounds = Some(bounds);
    }

    /// Put the marker at a screen position.
    pub fn place_marker(&mut self, x: f64, y: f64) -> Result<(), String> {
        let point = screen_to_plot(self.current_plot_bounds, self.frame, x, y)?;
        log::debug!("marker at {:?}", point);
        self.marker = Some(point);
        Ok(())
    }

    pub fn clear_marker(&mut self) {
        self.marker = None;
    }

    pub fn marker(&self) -> Option<[f64; 2]> {
        self.marker
    }

    pub fn set_cursor(&mut self, element: ElementId, cursor: Cursor) {
        self.platform.set_cursor(element, cursor);
    }

    pub fn load_trace_file(&mut self, path: &Path) -> Result<(), String> {
        log::debug!("loading carpet trace from {:?}", path);
        let raw = std::fs::read_to_string(path).err_to_string("could not read trace file")?;
        self.load_trace(&raw)
    }

    pub fn load_trace(&mut self, raw: &str) -> Result<(), String> {
        let trace = carpet_from_json(raw, &FullLayout::default())?;
        self.grid = carpet_grid(&trace);
        self.trace = Some(trace);
        self.marker = None;
        self.reset_view();
        self.host.request_replot(&mut self.platform);
        Ok(())
    }

    pub fn trace(&self) -> Option<&CarpetTrace> {
        self.trace.as_ref()
    }

    pub fn apply_bounds(&mut self, bounds: [f64; 4]) {
        self.request_plot_bounds = Some(bounds);
    }

    pub fn get_current_plot_bounds(&self) -> [f64; 4] {
        self.current_plot_bounds
    }

    /// Pretend the plot was drawn into `frame` showing `bounds`.
    #[cfg(test)]
    pub(crate) fn set_frame(&mut self, frame: Rect, bounds: [f64; 4]) {
        self.frame = frame;
        self.current_plot_bounds = bounds;
    }

    #[cfg(test)]
    pub(crate) fn requested_bounds(&self) -> Option<[f64; 4]> {
        self.request_plot_bounds
    }
}

/// Move `bounds` along with a drag of `dx`, `dy` screen pixels. Screen y
/// points down, plot y points up.
pub fn pan_bounds(bounds: [f64; 4], frame: Rect, dx: f64, dy: f64) -> Result<[f64; 4], String> {
    let [xscale, yscale] = scales(bounds, frame)?;
    let [xmin, xmax, ymin, ymax] = bounds;
    let (shift_x, shift_y) = (dx * xscale, dy * yscale);
    Ok([
        xmin - shift_x,
        xmax - shift_x,
        ymin + shift_y,
        ymax + shift_y,
    ])
}

/// The area a zoom box selects. A box collapsed along one axis (the drag
/// stayed below the threshold there) spans the whole frame on that axis.
pub fn effective_zoom_box(frame: Rect, zoom_box: Rect) -> Rect {
    let mut rect = zoom_box;
    if zoom_box.width() < 1.0 {
        rect.min.x = frame.min.x;
        rect.max.x = frame.max.x;
    }
    if zoom_box.height() < 1.0 {
        rect.min.y = frame.min.y;
        rect.max.y = frame.max.y;
    }
    rect
}

pub fn zoom_bounds(bounds: [f64; 4], frame: Rect, zoom_box: Rect) -> Result<[f64; 4], String> {
    let rect = effective_zoom_box(frame, zoom_box);
    let [xmin, ymax] = screen_to_plot(bounds, frame, rect.min.x as f64, rect.min.y as f64)?;
    let [xmax, ymin] = screen_to_plot(bounds, frame, rect.max.x as f64, rect.max.y as f64)?;
    Ok([xmin, xmax, ymin, ymax])
}

pub fn screen_to_plot(bounds: [f64; 4], frame: Rect, x: f64, y: f64) -> Result<[f64; 2], String> {
    let [xscale, yscale] = scales(bounds, frame)?;
    let [xmin, _, _, ymax] = bounds;
    Ok([
        xmin + (x - frame.min.x as f64) * xscale,
        ymax - (y - frame.min.y as f64) * yscale,
    ])
}

/// Plot units per screen pixel.
fn scales(bounds: [f64; 4], frame: Rect) -> Result<[f64; 2], String> {
    let (width, height) = (frame.width() as f64, frame.height() as f64);
    if !(width > 0.0 && height > 0.0) {
        return Err("plot has not been drawn yet".into());
    }
    let [xmin, xmax, ymin, ymax] = bounds;
    Ok([(xmax - xmin) / width, (ymax - ymin) / height])
}

/// Lines of constant a and constant b, drawn in the a-b plane.
pub fn carpet_grid(trace: &CarpetTrace) -> Vec<GridLine> {
    let a_len = trace.a.as_ref().map(Vec::len);
    let b_len = trace.b.as_ref().map(Vec::len);
    let a_count = a_len.or(b_len).unwrap_or(DEFAULT_POINTS);
    let b_count = b_len.or(a_len).unwrap_or(DEFAULT_POINTS);
    let a = trace.a_values(a_count);
    let b = trace.b_values(b_count);
    let (Some(b_first), Some(b_last)) = (b.first(), b.last()) else {
        return Vec::new();
    };
    let (Some(a_first), Some(a_last)) = (a.first(), a.last()) else {
        return Vec::new();
    };

    let mut grid = Vec::new();
    if trace.aaxis.showgrid {
        let color = axis_color(&trace.aaxis);
        grid.extend(a.iter().map(|ai| GridLine {
            points: vec![[*ai, *b_first], [*ai, *b_last]],
            color,
        }));
    }
    if trace.baxis.showgrid {
        let color = axis_color(&trace.baxis);
        grid.extend(b.iter().map(|bi| GridLine {
            points: vec![[*a_first, *bi], [*a_last, *bi]],
            color,
        }));
    }
    grid
}

fn axis_color(axis: &carpet_defaults::CarpetAxis) -> Color32 {
    let color = axis.gridcolor.as_deref().unwrap_or(&axis.color);
    parse_color(color)
}

/// Hex colors and CSS color keywords.
pub fn parse_color(color: &str) -> Color32 {
    let hex = named_color(color).unwrap_or(color);
    match Color32::from_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            log::warn!("unsupported color {color:?}: {err:?}");
            Color32::GRAY
        }
    }
}

/// Bounding box of all grid lines as `[xmin, xmax, ymin, ymax]`.
pub fn grid_bounds(grid: &[GridLine]) -> Option<[f64; 4]> {
    grid.iter()
        .flat_map(|line| line.points.iter())
        .fold(None, |acc, [x, y]| match acc {
            None => Some([*x, *x, *y, *y]),
            Some([xmin, xmax, ymin, ymax]) => {
                Some([xmin.min(*x), xmax.max(*x), ymin.min(*y), ymax.max(*y)])
            }
        })
}

fn with_margin(bounds: [f64; 4], margin: f64) -> [f64; 4] {
    let [xmin, xmax, ymin, ymax] = bounds;
    // Degenerate carpets still get a visible range.
    let mx = ((xmax - xmin) * margin).max(margin);
    let my = ((ymax - ymin) * margin).max(margin);
    [xmin - mx, xmax + mx, ymin - my, ymax + my]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(200.0, 100.0))
    }

    #[test]
    fn test_pan_bounds() {
        let bounds = pan_bounds([0.0, 10.0, 0.0, 5.0], frame(), 20.0, 10.0).unwrap();
        assert_eq!(bounds, [-1.0, 9.0, 0.5, 5.5]);
    }

    #[test]
    fn test_pan_before_first_frame() {
        assert!(pan_bounds([0.0, 1.0, 0.0, 1.0], Rect::NOTHING, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_screen_to_plot() {
        let point = screen_to_plot([0.0, 10.0, 0.0, 5.0], frame(), 200.0, 50.0).unwrap();
        assert_eq!(point, [5.0, 5.0]);
    }

    #[test]
    fn test_zoom_bounds() {
        let zoom_box = Rect::from_two_pos(Pos2::new(120.0, 70.0), Pos2::new(180.0, 90.0));
        let bounds = zoom_bounds([0.0, 10.0, 0.0, 5.0], frame(), zoom_box).unwrap();
        assert_eq!(bounds, [1.0, 4.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zoom_collapsed_axis_keeps_range() {
        // Vertical drag only: x is clamped to 0, so only y zooms.
        let zoom_box = Rect::from_two_pos(Pos2::new(150.0, 70.0), Pos2::new(150.0, 90.0));
        let bounds = zoom_bounds([0.0, 10.0, 0.0, 5.0], frame(), zoom_box).unwrap();
        assert_eq!(bounds, [0.0, 10.0, 3.0, 4.0]);
    }

    #[test]
    fn test_carpet_grid() {
        let trace = carpet_from_json(
            r#"{"a": [1, 2, 3], "b0": 0, "db": 2, "baxis": {"showgrid": false}}"#,
            &FullLayout::default(),
        )
        .unwrap();
        let grid = carpet_grid(&trace);
        // Only lines of constant a, b is generated with the length of a.
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].points, vec![[1.0, 0.0], [1.0, 4.0]]);
        assert_eq!(grid_bounds(&grid), Some([1.0, 3.0, 0.0, 4.0]));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000"), Color32::RED);
        assert_eq!(parse_color("navy"), Color32::from_rgb(0, 0, 0x80));
        assert_eq!(parse_color("rgb(1,2,3)"), Color32::GRAY);
    }

    #[test]
    fn test_grid_bounds_empty() {
        assert_eq!(grid_bounds(&[]), None);
    }
}
