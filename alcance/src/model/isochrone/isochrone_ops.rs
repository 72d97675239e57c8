use alcance_core::util::geo_utils::{equirectangular_delta, offset_by_meters};
use geo::{Coord, LineString, Polygon};
use itertools::Itertools;

use crate::model::{
    config::IsochroneParameters,
    network::TransitNetwork,
    reach::{locate, traverse, RouteGroup},
    region::{circle_polygon, group_boundary, group_disks, origin_disk, stop_disk, Disk},
};

use super::{
    budget_color, DebugTrace, DiskTrace, Isochrone, IsochroneOutputMode, IsochroneProperties,
    IsochroneRequest, RouteTrace, StopTrace, TravelMode,
};

/// computes the isochrone for a validated request against one network snapshot.
/// public transport requests ride the network; every other mode returns the
/// fallback circle for that mode.
pub fn run_isochrone(
    request: &IsochroneRequest,
    network: &TransitNetwork,
    params: &IsochroneParameters,
) -> Isochrone {
    match request.mode {
        TravelMode::PublicTransport => transit_isochrone(request, network, params),
        mode => {
            let polygon = fallback_circle(
                &request.origin,
                mode,
                request.minutes as f64,
                params.fallback_circle_points,
            );
            Isochrone {
                polygon,
                properties: properties(request, params, None, None),
            }
        }
    }
}

/// walk to the nearest stop of every service, ride it within the budget, then walk
/// from each reached stop with the time left.
///
/// the returned polygon depends on the request's output mode. in merged mode, the
/// boundary of every connected group of disks is collected, sorted by angle around
/// the origin and smoothed into a single ring. in simple mode, the polygon is the
/// origin circle and every disk is attached to the debug trace. when merging leaves
/// fewer than 3 distinct points, the origin disk is returned instead.
pub fn transit_isochrone(
    request: &IsochroneRequest,
    network: &TransitNetwork,
    params: &IsochroneParameters,
) -> Isochrone {
    let minutes = request.minutes as f64;
    let budget_seconds = request.budget_seconds();
    let origin = origin_disk(&request.origin, minutes, params);
    let origin_radius = origin.radius_meters;
    let mut disks: Vec<Disk> = vec![origin];
    let mut routes_used: Vec<RouteTrace> = vec![];

    for located in locate(&request.origin, network, params, minutes) {
        let reached = traverse(&located, network, params, budget_seconds);
        let (route_name, route_id, shape_id) = describe_group(&located.group, network);
        log::debug!(
            "{route_name}: boarding at '{}' after {:.1} min walk, {} stops reached",
            located.stop.name,
            located.walk_seconds / 60.0,
            reached.len()
        );
        let mut stops_reached = Vec::with_capacity(reached.len());
        for r in reached.iter() {
            let disk = stop_disk(r, &route_name, params);
            stops_reached.push(StopTrace {
                name: r.stop.name.clone(),
                stop_id: r.stop.id.clone(),
                coordinates: [r.stop.lon(), r.stop.lat()],
                time_spent: r.cumulative_elapsed_seconds / 60.0,
                time_remaining: r.time_remaining_seconds / 60.0,
                walk_radius: disk.radius_meters,
            });
            disks.push(disk);
        }
        routes_used.push(RouteTrace {
            route_name,
            route_id,
            shape_id,
            nearest_stop: located.stop.name.clone(),
            walk_time_to_stop: located.walk_seconds / 60.0,
            stops_reached,
        });
    }

    let mut debug = DebugTrace {
        max_walk_time: params.max_walk_seconds(minutes) / 60.0,
        max_walk_distance: origin_radius,
        total_time: minutes,
        walk_speed: params.walk_speed_meters_per_minute,
        routes_used,
        disks: None,
        groups: None,
    };

    let polygon = match request.output_mode {
        IsochroneOutputMode::Simple => {
            debug.disks = Some(disks.iter().map(DiskTrace::from).collect());
            circle_polygon(&request.origin, origin_radius, params.simple_circle_points)
        }
        IsochroneOutputMode::Merged => {
            let groups = group_disks(&disks, params.connection_tolerance_meters);
            log::debug!("{} disks in {} connected groups", disks.len(), groups.len());
            debug.groups = Some(groups.len());
            let points: Vec<Coord<f64>> = groups
                .iter()
                .flat_map(|group| group_boundary(&disks, group, params))
                .collect();
            merge_boundaries(&request.origin, points, params).unwrap_or_else(|| {
                log::debug!("merged boundary is degenerate, returning the origin disk");
                circle_polygon(&request.origin, origin_radius, params.origin_points())
            })
        }
    };

    Isochrone {
        polygon,
        properties: properties(request, params, Some(request.output_mode), Some(debug)),
    }
}

/// circle standing in for street routing in the walking, bike and car modes.
/// the radius is the budget at the mode's average speed, shaped per bearing by
/// [`TravelMode::radius_factor`].
pub fn fallback_circle(
    origin: &Coord<f64>,
    mode: TravelMode,
    minutes: f64,
    n: usize,
) -> Polygon<f64> {
    let radius = minutes * mode.fallback_speed_meters_per_minute();
    let points: Vec<Coord<f64>> = (0..n)
        .map(|i| {
            let bearing = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            offset_by_meters(origin, radius * mode.radius_factor(bearing), bearing)
        })
        .collect();
    Polygon::new(LineString::from(points), vec![])
}

/// one pass of cyclic smoothing over an open ring. each point becomes the weighted
/// average of itself and its two neighbors. rings with fewer than 3 points are
/// returned unchanged.
pub fn smooth_ring(ring: &[Coord<f64>], self_weight: f64, neighbor_weight: f64) -> Vec<Coord<f64>> {
    let n = ring.len();
    if n < 3 {
        return ring.to_vec();
    }
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let here = ring[i];
            Coord {
                x: neighbor_weight * prev.x + self_weight * here.x + neighbor_weight * next.x,
                y: neighbor_weight * prev.y + self_weight * here.y + neighbor_weight * next.y,
            }
        })
        .collect()
}

/// sorts boundary points by angle around `origin`, drops repeats and smooths the
/// ring. `None` when fewer than 3 distinct points remain.
fn merge_boundaries(
    origin: &Coord<f64>,
    points: Vec<Coord<f64>>,
    params: &IsochroneParameters,
) -> Option<Polygon<f64>> {
    let ring: Vec<Coord<f64>> = points
        .into_iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| {
            let (dx, dy) = equirectangular_delta(origin, &p);
            (dy.atan2(dx), dx.hypot(dy), p)
        })
        .sorted_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)))
        .map(|(_, _, p)| p)
        .dedup()
        .collect();
    let smoothed = smooth_ring(
        &ring,
        params.smoothing_self_weight,
        params.smoothing_neighbor_weight,
    );
    let distinct = smoothed
        .iter()
        .unique_by(|c| (c.x.to_bits(), c.y.to_bits()))
        .count();
    if distinct < 3 {
        return None;
    }
    Some(Polygon::new(LineString::from(smoothed), vec![]))
}

/// display name plus route and shape ids of a located group
fn describe_group(
    group: &RouteGroup,
    network: &TransitNetwork,
) -> (String, Option<String>, Option<String>) {
    match group {
        RouteGroup::Chain(idx) => match network.chains.get(*idx) {
            Some(chain) => (
                network.routes.display_name(&chain.key.route_id),
                Some(chain.key.route_id.clone()),
                Some(chain.key.shape_id.clone()),
            ),
            None => (String::new(), None, None),
        },
        RouteGroup::Line(idx) => match network.lines.lines.get(*idx) {
            Some(line) => (line.name.clone(), Some(line.id.clone()), None),
            None => (String::new(), None, None),
        },
    }
}

fn properties(
    request: &IsochroneRequest,
    params: &IsochroneParameters,
    output_mode: Option<IsochroneOutputMode>,
    debug: Option<DebugTrace>,
) -> IsochroneProperties {
    let color = budget_color(request.minutes).to_string();
    IsochroneProperties {
        mode: request.mode,
        time_budget: request.minutes,
        fill_color: color.clone(),
        color,
        fill_opacity: params.fill_opacity,
        output_mode,
        debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{ChainEdge, ShapeChain, Stop, StopCatalog};
    use alcance_core::{
        model::RouteShapeKey,
        util::geo_utils::{equirectangular_distance, METERS_PER_DEGREE},
    };

    fn three_stop_network() -> TransitNetwork {
        let spacing = 2000.0 / METERS_PER_DEGREE;
        let mut chain = ShapeChain::new(RouteShapeKey::new("r1", "s1"));
        for (stop, next) in [("a", Some("b")), ("b", Some("c")), ("c", None)] {
            chain.insert(
                stop,
                ChainEdge {
                    next_stop_id: next.map(String::from),
                    travel_time_seconds: next.map(|_| 120.0),
                    travel_distance_meters: None,
                },
            );
        }
        TransitNetwork {
            stops: StopCatalog::from_iter([
                Stop::new("a", "A", 0.0, 0.0),
                Stop::new("b", "B", 0.0, spacing),
                Stop::new("c", "C", 0.0, 2.0 * spacing),
            ]),
            chains: vec![chain],
            ..Default::default()
        }
    }

    fn no_boarding() -> IsochroneParameters {
        IsochroneParameters {
            boarding_seconds: 0.0,
            ..Default::default()
        }
    }

    fn assert_well_formed(polygon: &Polygon<f64>) {
        let ring = polygon.exterior();
        assert!(ring.is_closed(), "ring is not closed");
        let distinct = ring.0[..ring.0.len() - 1]
            .iter()
            .unique_by(|c| (c.x.to_bits(), c.y.to_bits()))
            .count();
        assert!(distinct >= 3, "ring has {distinct} distinct points");
    }

    #[test]
    fn test_empty_network_returns_origin_disk_only() {
        let request = IsochroneRequest::new(-34.6037, -58.3816, TravelMode::PublicTransport, 30)
            .expect("test invariant failed: request should validate");
        let params = IsochroneParameters::default();
        let isochrone = run_isochrone(&request, &TransitNetwork::empty(), &params);
        assert_well_formed(&isochrone.polygon);
        for p in isochrone.polygon.exterior().coords() {
            assert!(equirectangular_distance(&request.origin, p) <= 1680.0 * 1.01);
        }
        let debug = isochrone.properties.debug.expect("transit isochrone has a trace");
        assert!(debug.routes_used.is_empty());
        assert_eq!(debug.groups, Some(1));
        assert_eq!(debug.max_walk_distance, 1680.0);
        assert_eq!(debug.max_walk_time, 21.0);
    }

    #[test]
    fn test_three_stop_merged_polygon() {
        let request = IsochroneRequest::new(0.0, 0.0, TravelMode::PublicTransport, 30)
            .expect("test invariant failed: request should validate");
        let network = three_stop_network();
        let isochrone = run_isochrone(&request, &network, &no_boarding());
        assert_well_formed(&isochrone.polygon);

        let debug = isochrone.properties.debug.expect("transit isochrone has a trace");
        assert_eq!(debug.groups, Some(1));
        assert_eq!(debug.routes_used.len(), 1);
        let route = &debug.routes_used[0];
        assert_eq!(route.route_id.as_deref(), Some("r1"));
        assert_eq!(route.nearest_stop, "A");
        let radii: Vec<f64> = route.stops_reached.iter().map(|s| s.walk_radius).collect();
        assert_eq!(radii, vec![2400.0, 2240.0, 2080.0]);
        assert_eq!(route.stops_reached[0].time_remaining, 30.0);
        assert_eq!(route.stops_reached[1].time_remaining, 28.0);

        // smoothing keeps every vertex inside the farthest disk reach from the origin
        let reach = 4000.0 + 2080.0;
        for p in isochrone.polygon.exterior().coords() {
            assert!(equirectangular_distance(&request.origin, p) <= reach + 1.0);
        }
    }

    #[test]
    fn test_simple_mode_attaches_disks() {
        let request = IsochroneRequest::new(0.0, 0.0, TravelMode::PublicTransport, 30)
            .expect("test invariant failed: request should validate")
            .with_output_mode(IsochroneOutputMode::Simple);
        let isochrone = run_isochrone(&request, &three_stop_network(), &no_boarding());
        assert_eq!(isochrone.polygon.exterior().0.len(), 33);
        assert_eq!(isochrone.properties.output_mode, Some(IsochroneOutputMode::Simple));
        let debug = isochrone.properties.debug.expect("transit isochrone has a trace");
        let disks = debug.disks.expect("simple mode lists disks");
        assert_eq!(disks.len(), 4);
        assert!(disks[0].is_origin);
        assert_eq!(disks[1].route.as_deref(), Some("r1"));
        assert_eq!(debug.groups, None);
    }

    #[test]
    fn test_car_fallback_circle() {
        let request = IsochroneRequest::new(0.0, 0.0, TravelMode::Car, 15)
            .expect("test invariant failed: request should validate");
        let isochrone = run_isochrone(&request, &TransitNetwork::empty(), &IsochroneParameters::default());
        let ring = &isochrone.polygon.exterior().0;
        assert_eq!(ring.len(), 9);
        // due north: 15 min at 420 m/min, stretched by 1.1
        let north = equirectangular_distance(&request.origin, &ring[0]);
        assert!((north - 15.0 * 420.0 * 1.1).abs() < 1e-6);
        assert_eq!(isochrone.properties.color, "#22c55e");
        assert!(isochrone.properties.debug.is_none());
    }

    #[test]
    fn test_smoothing_weights() {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 0.0, y: 10.0 },
        ];
        let smoothed = smooth_ring(&ring, 0.2, 0.4);
        assert!((smoothed[0].x - 4.0).abs() < 1e-12);
        assert!((smoothed[0].y - 4.0).abs() < 1e-12);
        assert_eq!(smooth_ring(&ring[..2], 0.2, 0.4), ring[..2].to_vec());
    }
}
