//! Viewport and coordinate transformation for the floor-plan canvas.
//!
//! Maps between pixel coordinates (screen space) and floor-plan coordinates.
//! Both spaces grow y downward, so there is no axis flip.

use std::fmt;

use crate::geometry::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// Zoom and pan state of the floor-plan canvas.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside 0.1..=50 are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts pixel coordinates to floor-plan coordinates.
    ///
    /// ```text
    /// world = (pixel - pan) / zoom
    /// ```
    pub fn screen_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan_x) / self.zoom,
            (pixel_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts floor-plan coordinates to pixel coordinates.
    pub fn world_to_screen(&self, world: Point) -> (f64, f64) {
        (
            world.x * self.zoom + self.pan_x,
            world.y * self.zoom + self.pan_y,
        )
    }

    /// Zooms while keeping `world_point` under the same pixel.
    pub fn zoom_to_point(&mut self, world_point: Point, new_zoom: f64) {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&new_zoom) {
            return;
        }
        let (pixel_x, pixel_y) = self.world_to_screen(world_point);
        self.zoom = new_zoom;
        self.pan_x = pixel_x - world_point.x * new_zoom;
        self.pan_y = pixel_y - world_point.y * new_zoom;
    }

    /// Fits `(min_x, min_y, max_x, max_y)` into the canvas, keeping `padding`
    /// (fraction of the canvas, per side) free.
    pub fn fit_to_bounds(&mut self, bounds: (f64, f64, f64, f64), padding: f64) {
        let (min_x, min_y, max_x, max_y) = bounds;
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let width = max_x - min_x;
        let height = max_y - min_y;
        let factor = 1.0 - padding * 2.0;
        let zoom = ((self.canvas_width * factor) / width)
            .min((self.canvas_height * factor) / height)
            .clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = zoom;
        self.pan_x = (self.canvas_width - width * zoom) / 2.0 - min_x * zoom;
        self.pan_y = (self.canvas_height - height * zoom) / 2.0 - min_y * zoom;
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
