use std::{collections::HashSet, hash::Hash};

use crate::model::{
    config::IsochroneParameters,
    network::{Stop, TransitNetwork},
};

use super::{LocatedGroup, ReachableStop, RouteGroup};

/// advances along one direction of travel, accumulating elapsed time.
///
/// from the current stop, `advance` yields the next stop and the seconds needed to
/// reach it, or `None` when there is no usable outgoing edge. the next stop is
/// emitted with its cumulative elapsed time while that time stays below the budget.
/// the branch ends at the first stop without an edge, at the first stop already
/// visited, or when the budget is used up, so every stop is emitted at most once.
///
/// # Arguments
///
/// * `start` - stop where the vehicle is boarded. never emitted.
/// * `initial_elapsed` - seconds already spent before the vehicle departs
/// * `budget` - total seconds available
/// * `advance` - edge lookup for the direction being walked
///
/// # Returns
///
/// * the emitted stops in visiting order, each with its cumulative elapsed seconds
pub fn walk_branch<K, F>(start: K, initial_elapsed: f64, budget: f64, mut advance: F) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&K) -> Option<(K, f64)>,
{
    let mut visited: HashSet<K> = HashSet::from([start.clone()]);
    let mut reached = vec![];
    let mut current = start;
    let mut elapsed = initial_elapsed;
    while let Some((next, seconds)) = advance(&current) {
        if !visited.insert(next.clone()) {
            break;
        }
        elapsed += seconds;
        if elapsed >= budget {
            break;
        }
        reached.push((next.clone(), elapsed));
        current = next;
    }
    reached
}

/// rides the service of a located group from its nearest stop, returning every stop
/// reachable within the budget. elapsed time starts at the walk to the nearest stop
/// plus the boarding overhead. adjacency chains are ridden in their stored direction
/// and also emit their boarding stop with the time left after walking and boarding.
/// lines are ridden in both directions independently and emit only the stops ridden to.
pub fn traverse(
    located: &LocatedGroup,
    network: &TransitNetwork,
    params: &IsochroneParameters,
    budget_seconds: f64,
) -> Vec<ReachableStop> {
    let initial = located.walk_seconds + params.boarding_seconds;
    if initial >= budget_seconds {
        return vec![];
    }
    match located.group {
        RouteGroup::Chain(idx) => {
            let Some(chain) = network.chains.get(idx) else {
                return vec![];
            };
            let fallback_speed = params.vehicle_fallback_speed_meters_per_second;
            let boarding = located.stop.id.clone();
            let ridden = walk_branch(boarding.clone(), initial, budget_seconds, |id| {
                let edge = chain.edge(id)?;
                let next = edge.next_stop_id.as_ref()?;
                let seconds = edge.travel_seconds(fallback_speed)?;
                // a successor without a location cannot be walked from
                network.stops.get(next)?;
                Some((next.clone(), seconds))
            });
            std::iter::once((boarding, initial))
                .chain(ridden)
                .filter_map(|(id, elapsed)| {
                    let stop = network.stops.get(&id)?;
                    Some(reachable(stop.clone(), elapsed, budget_seconds))
                })
                .collect()
        }
        RouteGroup::Line(idx) => {
            let (Some(line), Some(start)) = (network.lines.lines.get(idx), located.position) else {
                return vec![];
            };
            let rail_speed = params.rail_speed_meters_per_minute;
            let backward = walk_branch(start, initial, budget_seconds, |i| {
                let prev = i.checked_sub(1)?;
                Some((prev, line.segment_travel_seconds(prev, rail_speed)?))
            });
            let forward = walk_branch(start, initial, budget_seconds, |i| {
                Some((i + 1, line.segment_travel_seconds(*i, rail_speed)?))
            });
            backward
                .into_iter()
                .chain(forward)
                .filter_map(|(position, elapsed)| {
                    let stop = line.stops.get(position)?.to_stop();
                    Some(reachable(stop, elapsed, budget_seconds))
                })
                .collect()
        }
    }
}

fn reachable(stop: Stop, elapsed: f64, budget_seconds: f64) -> ReachableStop {
    ReachableStop {
        stop,
        cumulative_elapsed_seconds: elapsed,
        time_remaining_seconds: budget_seconds - elapsed,
    }
}
