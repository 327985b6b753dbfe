use glam::DVec2;

/// A position in canvas space (x grows right, y grows down).
///
/// Equality is exact coordinate equality. Two markers that project onto the
/// same coordinates are the same point as far as condensing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance in canvas units
    #[inline(always)]
    pub fn distance(self, other: Point) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Westernmost longitude (left edge)
    pub west: f64,
    /// Northernmost latitude (top edge)
    pub north: f64,
    /// Southernmost latitude (bottom edge)
    pub south: f64,
    /// Easternmost longitude (right edge)
    pub east: f64,
}

impl GeoBounds {
    /// Bounding box around the Berlin district boundaries
    pub const BERLIN: GeoBounds = GeoBounds {
        west: 12.9638671875,
        north: 52.70468296296834,
        south: 52.338695481504814,
        east: 13.8153076171875,
    };

    /// Longitude span
    #[inline(always)]
    pub fn horizontal_extent(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span
    #[inline(always)]
    pub fn vertical_extent(&self) -> f64 {
        self.north - self.south
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.west..=self.east).contains(&lon) && (self.south..=self.north).contains(&lat)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::BERLIN
    }
}
