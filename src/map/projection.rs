use crate::config::Settings;
use crate::geo::{GeoBounds, Point};
use rayon::prelude::*;

/// Linear remap from geographic coordinates onto the drawable canvas area.
/// West maps to x = 0, north maps to y = 0.
#[derive(Debug, Clone, Copy)]
pub struct CanvasProjection {
    pub bounds: GeoBounds,
    pub width: f64,
    pub height: f64,
}

impl CanvasProjection {
    pub fn new(bounds: GeoBounds, width: f64, height: f64) -> Self {
        Self {
            bounds,
            width,
            height,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.bounds, settings.width, settings.height)
    }

    /// Project a geographic coordinate (lon, lat) to a canvas point
    #[inline(always)]
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let x_factor = (lon - self.bounds.west) / self.bounds.horizontal_extent();
        let y_factor = (lat - self.bounds.south) / self.bounds.vertical_extent();
        // canvas y grows downwards
        Point::new(self.width * x_factor, self.height * (1.0 - y_factor))
    }

    /// Project many coordinates in parallel, keeping their order
    pub fn project_all(&self, coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .par_iter()
            .map(|&(lon, lat)| self.project(lon, lat))
            .collect()
    }
}

/// Visible part of the canvas, mapped onto braille pixels.
#[derive(Clone)]
pub struct Viewport {
    /// Canvas x shown at the middle of the screen
    pub center_x: f64,
    /// Canvas y shown at the middle of the screen
    pub center_y: f64,
    /// Zoom level (1.0 = whole canvas fits)
    pub zoom: f64,
    /// Braille pixel width
    pub width: usize,
    /// Braille pixel height
    pub height: usize,
    /// Canvas size the zoom level is relative to
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Viewport {
    const MIN_ZOOM: f64 = 0.5;
    const MAX_ZOOM: f64 = 40.0;

    /// Viewport showing the full canvas
    pub fn fit(canvas_width: f64, canvas_height: f64, width: usize, height: usize) -> Self {
        Self {
            center_x: canvas_width / 2.0,
            center_y: canvas_height / 2.0,
            zoom: 1.0,
            width,
            height,
            canvas_width,
            canvas_height,
        }
    }

    /// Braille pixels per canvas unit
    #[inline(always)]
    pub fn scale(&self) -> f64 {
        let fit = (self.width as f64 / self.canvas_width).min(self.height as f64 / self.canvas_height);
        fit * self.zoom
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = self.scale();
        if scale <= 0.0 {
            return;
        }
        self.center_x = (self.center_x + dx as f64 / scale).clamp(0.0, self.canvas_width);
        self.center_y = (self.center_y + dy as f64 / scale).clamp(0.0, self.canvas_height);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(Self::MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(Self::MIN_ZOOM);
    }

    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Zoom by factor keeping the canvas point under (px, py) in place
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let anchor = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let scale = self.scale();
        if scale <= 0.0 {
            return;
        }
        self.center_x = anchor.x - (px as f64 - self.width as f64 / 2.0) / scale;
        self.center_y = anchor.y - (py as f64 - self.height as f64 / 2.0) / scale;
    }

    /// Braille pixel coordinates back to a canvas point
    pub fn unproject(&self, px: i32, py: i32) -> Point {
        let scale = self.scale();
        Point::new(
            (px as f64 - self.width as f64 / 2.0) / scale + self.center_x,
            (py as f64 - self.height as f64 / 2.0) / scale + self.center_y,
        )
    }

    /// Canvas point to braille pixel coordinates
    #[inline(always)]
    pub fn project(&self, p: Point) -> (i32, i32) {
        let scale = self.scale();
        let px = ((p.x - self.center_x) * scale + self.width as f64 / 2.0).round() as i32;
        let py = ((p.y - self.center_y) * scale + self.height as f64 / 2.0).round() as i32;
        (px, py)
    }

    /// Canvas length to pixels
    #[inline(always)]
    pub fn scale_length(&self, len: f64) -> i32 {
        (len * self.scale()).round() as i32
    }

    /// Check if a projected point is visible, with a margin for circle edges
    pub fn is_visible(&self, px: i32, py: i32, margin: i32) -> bool {
        px >= -margin
            && px < self.width as i32 + margin
            && py >= -margin
            && py < self.height as i32 + margin
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0
            && min_x < self.width as i32
            && max_y >= 0
            && min_y < self.height as i32
    }
}
