use std::f64::consts::PI;

use alcance_core::util::geo_utils::offset_by_meters;
use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

use super::DiskBoundary;

/// a walking-radius region around a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    /// (lon, lat)
    pub center: Coord<f64>,
    pub radius_meters: f64,
    pub label: String,
    /// display name of the route that delivered the traveler here. `None` for the origin.
    pub route: Option<String>,
    pub is_origin: bool,
    /// vertices used when this disk is drawn on its own
    pub sample_points: usize,
}

impl Disk {
    /// a disk with no usable radius. it is reported but never grouped or drawn.
    pub fn is_degenerate(&self) -> bool {
        !(self.radius_meters.is_finite() && self.radius_meters > 0.0)
    }

    /// `n` points evenly spaced on the boundary, starting due north and moving
    /// clockwise. the ring is not closed.
    pub fn sample(&self, n: usize) -> Vec<Coord<f64>> {
        circle_points(&self.center, self.radius_meters, n)
    }

    /// the disk realized with its own vertex count, or a single point when degenerate.
    pub fn boundary(&self) -> DiskBoundary {
        if self.is_degenerate() {
            DiskBoundary::Point(self.center)
        } else {
            DiskBoundary::Ring(circle_polygon(&self.center, self.radius_meters, self.sample_points))
        }
    }
}

/// `n` points at equal bearings around `center`, starting due north.
pub fn circle_points(center: &Coord<f64>, radius_meters: f64, n: usize) -> Vec<Coord<f64>> {
    (0..n)
        .map(|i| {
            let bearing = 2.0 * PI * i as f64 / n as f64;
            offset_by_meters(center, radius_meters, bearing)
        })
        .collect()
}

/// closed regular n-gon approximating a circle of `radius_meters` around `center`.
pub fn circle_polygon(center: &Coord<f64>, radius_meters: f64, n: usize) -> Polygon<f64> {
    // the Polygon constructor closes the ring
    Polygon::new(LineString::from(circle_points(center, radius_meters, n)), vec![])
}
