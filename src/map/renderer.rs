use crate::braille::BrailleCanvas;
use crate::condense::{condense, CondensedCenters};
use crate::config::Settings;
use crate::geo::Point;
use crate::map::geometry::{draw_circle_outline, draw_marker, draw_polygon};
use crate::map::projection::{CanvasProjection, Viewport};
use rayon::prelude::*;
use tracing::{info, warn};

/// A geographic ring (sequence of lon/lat coordinates)
pub type Ring = Vec<(f64, f64)>;

/// Display settings for map layers
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_outline: bool,
    pub show_circles: bool,
    pub show_markers: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_outline: true,
            show_circles: true,
            show_markers: false,
        }
    }
}

/// Separate canvases so each layer can get its own color
pub struct MapLayers {
    pub outline: BrailleCanvas,
    pub circles: BrailleCanvas,
    pub markers: BrailleCanvas,
}

/// Holds the projected outline and markers plus the current condensed centers.
///
/// Everything is stored in canvas space; the viewport only matters when drawing.
pub struct MapRenderer {
    projection: CanvasProjection,
    outline: Vec<Vec<Point>>,
    markers: Vec<Point>,
    centers: CondensedCenters,
    scan_radius: u32,
    radius_increase: u32,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            projection: CanvasProjection::from_settings(settings),
            outline: Vec::new(),
            markers: Vec::new(),
            centers: CondensedCenters::new(),
            scan_radius: settings.scan_radius,
            radius_increase: settings.radius_increase,
            settings: DisplaySettings::default(),
        }
    }

    /// Project and store boundary rings
    pub fn set_outline(&mut self, rings: &[Ring]) {
        let projection = self.projection;
        self.outline = rings
            .par_iter()
            .map(|ring| projection.project_all(ring))
            .collect();
    }

    /// Project the markers and condense them with the current radii.
    /// Markers outside the map bounds are kept but land off the drawable area.
    pub fn set_markers(&mut self, coords: &[(f64, f64)]) {
        let outside = self.count_outside_bounds(coords);
        if outside > 0 {
            warn!(outside, total = coords.len(), "markers outside the map bounds");
        }
        self.markers = self.projection.project_all(coords);
        self.recondense();
    }

    fn count_outside_bounds(&self, coords: &[(f64, f64)]) -> usize {
        let bounds = self.projection.bounds;
        coords.iter().filter(|&&(lon, lat)| !bounds.contains(lon, lat)).count()
    }

    /// Change both radii and condense again
    pub fn set_radii(&mut self, scan_radius: u32, radius_increase: u32) {
        self.scan_radius = scan_radius;
        self.radius_increase = radius_increase;
        self.recondense();
    }

    pub fn adjust_scan_radius(&mut self, delta: i32) {
        let radius = self.scan_radius.saturating_add_signed(delta);
        if radius != self.scan_radius {
            self.set_radii(radius, self.radius_increase);
        }
    }

    pub fn adjust_radius_increase(&mut self, delta: i32) {
        let increase = self.radius_increase.saturating_add_signed(delta);
        if increase != self.radius_increase {
            self.set_radii(self.scan_radius, increase);
        }
    }

    fn recondense(&mut self) {
        self.centers = condense(&self.markers, self.scan_radius, self.radius_increase);
        info!(
            markers = self.markers.len(),
            circles = self.centers.len(),
            scan_radius = self.scan_radius,
            radius_increase = self.radius_increase,
            "condensed markers into circles"
        );
    }

    pub fn outline(&self) -> &[Vec<Point>] {
        &self.outline
    }

    pub fn markers(&self) -> &[Point] {
        &self.markers
    }

    pub fn centers(&self) -> &CondensedCenters {
        &self.centers
    }

    pub fn scan_radius(&self) -> u32 {
        self.scan_radius
    }

    pub fn radius_increase(&self) -> u32 {
        self.radius_increase
    }

    /// Check if any data is loaded
    pub fn has_data(&self) -> bool {
        !self.outline.is_empty() || !self.markers.is_empty()
    }

    /// Render all map layers onto canvases of the given character size
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport) -> MapLayers {
        let mut layers = MapLayers {
            outline: BrailleCanvas::new(width, height),
            circles: BrailleCanvas::new(width, height),
            markers: BrailleCanvas::new(width, height),
        };

        if self.settings.show_outline {
            for ring in &self.outline {
                self.draw_ring(&mut layers.outline, ring, viewport);
            }
        }

        if self.settings.show_circles {
            for entry in &self.centers {
                // circle diameter equals the condensed radius
                let r = viewport.scale_length(entry.radius as f64 / 2.0);
                let (px, py) = viewport.project(entry.center);
                if viewport.is_visible(px, py, r) {
                    draw_circle_outline(&mut layers.circles, px, py, r);
                }
            }
        }

        if self.settings.show_markers {
            for &marker in &self.markers {
                let (px, py) = viewport.project(marker);
                if viewport.is_visible(px, py, 1) {
                    draw_marker(&mut layers.markers, px, py, 1);
                }
            }
        }

        layers
    }

    /// Draw a closed ring, skipping it when no edge can reach the screen
    fn draw_ring(&self, canvas: &mut BrailleCanvas, ring: &[Point], viewport: &Viewport) {
        let vertices: Vec<(i32, i32)> = ring.iter().map(|&p| viewport.project(p)).collect();
        let visible = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .any(|(&a, &b)| viewport.line_might_be_visible(a, b));
        if visible {
            draw_polygon(canvas, &vertices);
        }
    }

    pub fn toggle_outline(&mut self) {
        self.settings.show_outline = !self.settings.show_outline;
    }

    pub fn toggle_circles(&mut self) {
        self.settings.show_circles = !self.settings.show_circles;
    }

    pub fn toggle_markers(&mut self) {
        self.settings.show_markers = !self.settings.show_markers;
    }
}
