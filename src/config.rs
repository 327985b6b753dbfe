use crate::geo::GeoBounds;
use std::path::PathBuf;

/// Common aspect ratio for 2D maps of Berlin (height / width)
pub const BERLIN_RATIO: f64 = 1050.0 / 1280.0;

/// Default drawable width in canvas units
pub const DEFAULT_WIDTH: f64 = 700.0;

/// Extra space added to the right and bottom of the canvas
pub const CANVAS_PADDING: f64 = 10.0;

/// Base radius of the first scan around a seed
pub const SCAN_RADIUS: u32 = 4;

/// Added to the scan radius every time a scan finds neighbours
pub const RADIUS_INCREASE: u32 = 2;

/// Everything needed to load, condense and draw one map.
///
/// `scan_radius` and `radius_increase` are tuned for the default width. A
/// much larger or smaller canvas changes how many circles come out.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub bounds: GeoBounds,
    pub scan_radius: u32,
    pub radius_increase: u32,
    pub outline_path: PathBuf,
    pub markers_path: PathBuf,
}

impl Settings {
    /// Settings for a drawable area `width` wide, keeping the Berlin aspect ratio
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            height: width * BERLIN_RATIO,
            ..Self::default()
        }
    }

    /// Full canvas size including padding
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width + self.padding, self.height + self.padding)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_WIDTH * BERLIN_RATIO,
            padding: CANVAS_PADDING,
            bounds: GeoBounds::BERLIN,
            scan_radius: SCAN_RADIUS,
            radius_increase: RADIUS_INCREASE,
            outline_path: PathBuf::from("data/bezirksgrenzen.geojson"),
            markers_path: PathBuf::from("data/maerkte2.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_size() {
        let s = Settings::default();
        let (w, h) = s.canvas_size();
        assert_eq!(w, 710.0);
        assert_eq!(h, 700.0 * 1050.0 / 1280.0 + 10.0);
        assert_eq!(s.scan_radius, 4);
        assert_eq!(s.radius_increase, 2);
    }

    #[test]
    fn test_with_width_keeps_ratio() {
        let s = Settings::with_width(1280.0);
        assert_eq!(s.height, 1050.0);
        assert_eq!(s.bounds, GeoBounds::BERLIN);
    }
}
