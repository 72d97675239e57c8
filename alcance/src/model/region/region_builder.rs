use geo::Coord;

use crate::model::{config::IsochroneParameters, reach::ReachableStop};

use super::Disk;

pub const ORIGIN_LABEL: &str = "origin";

/// the area walkable from the origin: the walking share of the budget at walking speed.
pub fn origin_disk(origin: &Coord<f64>, minutes: f64, params: &IsochroneParameters) -> Disk {
    Disk {
        center: *origin,
        radius_meters: params.max_walk_distance(minutes),
        label: String::from(ORIGIN_LABEL),
        route: None,
        is_origin: true,
        sample_points: params.origin_points(),
    }
}

/// the area walkable from a reached stop with the time remaining on arrival.
pub fn stop_disk(reached: &ReachableStop, route: &str, params: &IsochroneParameters) -> Disk {
    Disk {
        center: reached.stop.coord,
        radius_meters: params.walk_meters(reached.time_remaining_seconds),
        label: reached.stop.name.clone(),
        route: Some(route.to_string()),
        is_origin: false,
        sample_points: params.stop_points(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{network::Stop, region::DiskBoundary};
    use alcance_core::util::geo_utils::equirectangular_distance;
    use geo::CoordsIter;

    #[test]
    fn test_origin_disk_radius() {
        let origin = Coord { x: -58.3816, y: -34.6037 };
        let disk = origin_disk(&origin, 30.0, &IsochroneParameters::default());
        assert_eq!(disk.radius_meters, 1680.0);
        assert!(disk.is_origin);
        let polygon = match disk.boundary() {
            DiskBoundary::Ring(p) => p,
            DiskBoundary::Point(_) => panic!("origin disk should not be degenerate"),
        };
        let ring: Vec<Coord<f64>> = polygon.exterior().coords_iter().collect();
        assert_eq!(ring.len(), 25);
        assert_eq!(ring.first(), ring.last());
        for c in ring.iter() {
            let d = equirectangular_distance(&origin, c);
            assert!((d - 1680.0).abs() < 5.0, "vertex at {d} m");
        }
    }

    #[test]
    fn test_stop_disk_and_degenerate_radius() {
        let params = IsochroneParameters::default();
        let reached = ReachableStop {
            stop: Stop::new("b", "Bravo", -58.40, -34.61),
            cumulative_elapsed_seconds: 120.0,
            time_remaining_seconds: 1680.0,
        };
        let disk = stop_disk(&reached, "60", &params);
        assert_eq!(disk.radius_meters, 2240.0);
        assert_eq!(disk.sample_points, 18);
        assert_eq!(disk.route.as_deref(), Some("60"));

        let spent = ReachableStop {
            time_remaining_seconds: 0.0,
            ..reached
        };
        let degenerate = stop_disk(&spent, "60", &params);
        assert!(degenerate.is_degenerate());
        assert_eq!(degenerate.boundary(), DiskBoundary::Point(spent.stop.coord));
    }
}
