use alcance_core::util::geo_utils::DistanceMetric;
use geo::Coord;

use crate::model::{
    config::IsochroneParameters,
    network::{ShapeChain, Stop, StopCatalog, TransitLine, TransitNetwork},
};

/// a unit of service that is boarded once: a (route, shape) chain from the
/// adjacency table, or a line from the line asset. values index into the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Chain(usize),
    Line(usize),
}

/// the stop of a route group closest to the origin, and the walk to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedGroup {
    pub group: RouteGroup,
    pub stop: Stop,
    /// position of the stop in its line. `None` for adjacency chains.
    pub position: Option<usize>,
    pub distance_meters: f64,
    pub walk_seconds: f64,
}

/// nearest located stop of a chain. stops missing from the catalog are ignored.
/// ties keep the stop that appears first in the chain.
pub fn nearest_in_chain<'a>(
    origin: &Coord<f64>,
    chain: &ShapeChain,
    stops: &'a StopCatalog,
    metric: DistanceMetric,
) -> Option<(&'a Stop, f64)> {
    let mut best: Option<(&Stop, f64)> = None;
    for stop in chain.stop_ids().filter_map(|id| stops.get(id)) {
        let distance = metric.distance(origin, &stop.coord);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((stop, distance)),
        }
    }
    best
}

/// nearest station of a line, with its position in the line.
pub fn nearest_in_line(
    origin: &Coord<f64>,
    line: &TransitLine,
    metric: DistanceMetric,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, stop) in line.stops.iter().enumerate() {
        let distance = metric.distance(origin, &stop.coord());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best
}

/// finds the nearest stop of every chain and line in the network and keeps the
/// groups whose walk to that stop fits in the walking share of the budget.
///
/// # Arguments
///
/// * `origin` - request origin (lon, lat)
/// * `network` - network snapshot to search
/// * `params` - walking speed and walking share of the budget
/// * `minutes` - time budget
///
/// # Returns
///
/// * located groups, adjacency chains first, each in network order
pub fn locate(
    origin: &Coord<f64>,
    network: &TransitNetwork,
    params: &IsochroneParameters,
    minutes: f64,
) -> Vec<LocatedGroup> {
    locate_with(origin, network, params, minutes, DistanceMetric::Equirectangular)
}

/// [`locate`] measuring walks with the given metric.
pub fn locate_with(
    origin: &Coord<f64>,
    network: &TransitNetwork,
    params: &IsochroneParameters,
    minutes: f64,
    metric: DistanceMetric,
) -> Vec<LocatedGroup> {
    let max_walk_seconds = params.max_walk_seconds(minutes);
    let chains = network.chains.iter().enumerate().filter_map(|(idx, chain)| {
        let (stop, distance) = nearest_in_chain(origin, chain, &network.stops, metric)?;
        Some(LocatedGroup {
            group: RouteGroup::Chain(idx),
            stop: stop.clone(),
            position: None,
            distance_meters: distance,
            walk_seconds: params.walk_seconds(distance),
        })
    });
    let lines = network.lines.lines.iter().enumerate().filter_map(|(idx, line)| {
        let (position, distance) = nearest_in_line(origin, line, metric)?;
        Some(LocatedGroup {
            group: RouteGroup::Line(idx),
            stop: line.stops[position].to_stop(),
            position: Some(position),
            distance_meters: distance,
            walk_seconds: params.walk_seconds(distance),
        })
    });
    chains
        .chain(lines)
        .filter(|located| {
            let keep = located.walk_seconds <= max_walk_seconds;
            if !keep {
                log::debug!(
                    "{:?}: nearest stop '{}' is {:.0} m away, beyond the walking share of the budget",
                    located.group,
                    located.stop.id,
                    located.distance_meters
                );
            }
            keep
        })
        .collect()
}
