//! Condensing of visually overlapping markers into aggregated circles.
//!
//! Points are grouped greedily: the first pending point becomes a seed, and
//! the pending set is scanned around that seed with a radius that grows by a
//! fixed increment every time the scan absorbs something. The result depends
//! on input order.

use crate::geo::Point;
use glam::DVec2;
use rayon::prelude::*;
use tracing::debug;

/// One aggregated circle: the mean of the absorbed points and the scan radius
/// the cluster reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensedCenter {
    pub center: Point,
    pub radius: u32,
}

/// Condensed centers in the order the clusters were formed.
///
/// Entries are per cluster, so two clusters with coinciding centroids stay
/// two entries.
pub type CondensedCenters = Vec<CondensedCenter>;

/// Partition `points` into clusters and return one entry per cluster.
///
/// The input slice is copied into a private pending set and never mutated.
pub fn condense(points: &[Point], base_radius: u32, radius_increment: u32) -> CondensedCenters {
    let mut pending: Vec<Point> = points.to_vec();
    let mut centers = CondensedCenters::new();

    while !pending.is_empty() {
        let (absorbed, radius) = next_cluster(&mut pending, base_radius, radius_increment);
        centers.push(CondensedCenter {
            center: centroid(&absorbed),
            radius,
        });
    }

    debug!(
        input = points.len(),
        clusters = centers.len(),
        base_radius,
        radius_increment,
        "condensed markers"
    );
    centers
}

/// Condense independent point sets in parallel. Output order follows input order.
pub fn condense_many(
    sets: &[Vec<Point>],
    base_radius: u32,
    radius_increment: u32,
) -> Vec<CondensedCenters> {
    sets.par_iter()
        .map(|points| condense(points, base_radius, radius_increment))
        .collect()
}

/// Grow one cluster from the first pending point.
///
/// Returns the absorbed points (seed first) and the radius reached. The
/// radius includes the increment applied after the last successful scan.
fn next_cluster(pending: &mut Vec<Point>, base_radius: u32, radius_increment: u32) -> (Vec<Point>, u32) {
    let seed = pending.remove(0);
    pending.retain(|p| *p != seed);

    if pending.is_empty() {
        return (vec![seed], base_radius);
    }

    let mut absorbed = vec![seed];
    let mut radius = base_radius;

    loop {
        let found = scan_within_radius(pending, seed, radius);
        if found.is_empty() {
            break;
        }
        pending.retain(|p| !found.contains(p));
        absorbed.extend_from_slice(&found);
        radius = radius.saturating_add(radius_increment);
    }

    (absorbed, radius)
}

/// Every pending point within `radius` of `center`, duplicates included
fn scan_within_radius(pending: &[Point], center: Point, radius: u32) -> Vec<Point> {
    let radius = radius as f64;
    pending
        .iter()
        .copied()
        .filter(|p| p.distance(center) <= radius)
        .collect()
}

fn centroid(points: &[Point]) -> Point {
    let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + p.as_dvec2());
    Point::from(sum / points.len() as f64)
}
