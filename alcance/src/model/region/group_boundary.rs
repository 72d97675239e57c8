use std::f64::consts::PI;

use alcance_core::util::geo_utils::equirectangular_delta;
use geo::{ConvexHull, Coord, CoordsIter, MultiPoint};

use crate::model::config::IsochroneParameters;

use super::Disk;

/// boundary points of one connected group as an open ring.
///
/// a lone disk keeps its own sampled polygon, or contributes nothing when it has
/// collapsed to a point. a group of several disks is sampled
/// `group_samples_per_disk` times per member and reduced to a [`radial_envelope`].
pub fn group_boundary(
    disks: &[Disk],
    group: &[usize],
    params: &IsochroneParameters,
) -> Vec<Coord<f64>> {
    match group {
        [] => vec![],
        [single] => disks[*single].boundary().into_open_ring(),
        members => {
            let samples: Vec<Coord<f64>> = members
                .iter()
                .flat_map(|i| disks[*i].sample(params.group_samples_per_disk))
                .collect();
            radial_envelope(
                &samples,
                params.group_envelope_buckets,
                params.group_envelope_half_window_radians,
            )
        }
    }
}

/// coarse outer boundary of a point cloud.
///
/// the full circle around the centroid of `samples` is split into `buckets` directions.
/// for each direction, the sample farthest from the centroid whose own direction lies
/// within `half_window` radians is kept. the kept samples are ordered by angle around
/// the centroid with repeats removed. this is not a polygon union and can misrepresent
/// groups that are not star-shaped around their centroid.
///
/// when fewer than 3 distinct points survive, the convex hull of the samples is used.
pub fn radial_envelope(samples: &[Coord<f64>], buckets: usize, half_window: f64) -> Vec<Coord<f64>> {
    let Some(centroid) = centroid(samples) else {
        return vec![];
    };
    let polar: Vec<(f64, f64, Coord<f64>)> = samples
        .iter()
        .map(|p| {
            let (dx, dy) = equirectangular_delta(&centroid, p);
            (dy.atan2(dx), dx.hypot(dy), *p)
        })
        .collect();

    let mut hull: Vec<(f64, Coord<f64>)> = vec![];
    for bucket in 0..buckets {
        let direction = 2.0 * PI * bucket as f64 / buckets as f64;
        let mut farthest: Option<(f64, f64, Coord<f64>)> = None;
        for (angle, distance, point) in polar.iter() {
            if angular_difference(*angle, direction) >= half_window {
                continue;
            }
            match farthest {
                Some((_, best, _)) if *distance <= best => {}
                _ if *distance <= 0.0 => {}
                _ => farthest = Some((*angle, *distance, *point)),
            }
        }
        if let Some((angle, _, point)) = farthest {
            hull.push((angle, point));
        }
    }
    hull.sort_by(|a, b| a.0.total_cmp(&b.0));
    hull.dedup_by(|a, b| a.1 == b.1);
    let points: Vec<Coord<f64>> = hull.into_iter().map(|(_, p)| p).collect();

    if points.len() < 3 {
        log::debug!(
            "radial envelope kept {} points from {} samples, using convex hull",
            points.len(),
            samples.len()
        );
        let hull = MultiPoint::from(samples.to_vec()).convex_hull();
        let mut ring: Vec<Coord<f64>> = hull.exterior().coords_iter().collect();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        return ring;
    }
    points
}

fn centroid(points: &[Coord<f64>]) -> Option<Coord<f64>> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Coord {
        x: sx / n,
        y: sy / n,
    })
}

/// absolute difference between two angles, folded into [0, pi].
fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % (2.0 * PI);
    if diff > PI {
        2.0 * PI - diff
    } else {
        diff
    }
}
