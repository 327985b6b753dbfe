//! Draws district outlines and market markers, condensing overlapping markers
//! into circles sized by how far their aggregation scan had to grow.

pub mod braille;
pub mod condense;
pub mod config;
pub mod data;
pub mod geo;
pub mod map;
pub mod svg;

pub use condense::{condense, condense_many, CondensedCenter, CondensedCenters};
pub use config::Settings;
pub use geo::{GeoBounds, Point};
