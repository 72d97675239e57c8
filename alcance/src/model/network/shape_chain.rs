use std::{collections::HashMap, io::Read};

use alcance_core::model::{AdjacencyRow, RouteShapeKey};
use indexmap::IndexMap;
use kdam::tqdm;

use super::{
    table_ops::{require_columns, table_reader},
    NetworkError,
};

/// columns every adjacency table must carry.
const ADJACENCY_COLUMNS: [&str; 4] = ["route_id", "shape_id", "stop_id", "next_stop_id"];

/// outgoing edge of a stop along one route shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainEdge {
    pub next_stop_id: Option<String>,
    pub travel_time_seconds: Option<f64>,
    pub travel_distance_meters: Option<f64>,
}

impl ChainEdge {
    /// in-vehicle seconds to the next stop. when the edge carries only a distance, the
    /// time is inferred from the fallback vehicle speed. `None` if neither is known.
    pub fn travel_seconds(&self, fallback_speed_meters_per_second: f64) -> Option<f64> {
        self.travel_time_seconds.or_else(|| {
            self.travel_distance_meters
                .map(|d| d / fallback_speed_meters_per_second)
        })
    }
}

/// the stops of one (route, shape) in table order, each with at most one outgoing edge.
#[derive(Debug, Clone)]
pub struct ShapeChain {
    pub key: RouteShapeKey,
    stop_ids: Vec<String>,
    edges: HashMap<String, ChainEdge>,
}

impl ShapeChain {
    pub fn new(key: RouteShapeKey) -> ShapeChain {
        ShapeChain {
            key,
            stop_ids: vec![],
            edges: HashMap::new(),
        }
    }

    /// adds the edge leaving `stop_id`. returns false, leaving the chain unchanged,
    /// if the stop already has an edge.
    pub fn insert(&mut self, stop_id: &str, edge: ChainEdge) -> bool {
        if self.edges.contains_key(stop_id) {
            return false;
        }
        self.stop_ids.push(stop_id.to_string());
        self.edges.insert(stop_id.to_string(), edge);
        true
    }

    pub fn edge(&self, stop_id: &str) -> Option<&ChainEdge> {
        self.edges.get(stop_id)
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = &str> {
        self.stop_ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }
}

/// reads an adjacency table into one chain per (route_id, shape_id), in the order
/// the keys first appear. negative or unparseable times and distances are dropped
/// from their row, rows without a stop id are skipped, and a repeated
/// (route, shape, stop) key keeps its first row.
pub fn read_shape_chains<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<ShapeChain>, NetworkError> {
    let mut rdr = table_reader(reader);
    require_columns(&mut rdr, source_name, &ADJACENCY_COLUMNS)?;

    let mut chains: IndexMap<RouteShapeKey, ShapeChain> = IndexMap::new();
    let mut skipped = 0;
    let mut duplicates = 0;
    let iter = tqdm!(
        rdr.deserialize::<AdjacencyRow>().enumerate(),
        desc = "read adjacency table"
    );
    for (idx, result) in iter {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("{source_name} row {}: skipping malformed row: {e}", idx + 1);
                skipped += 1;
                continue;
            }
        };
        if row.stop_id.is_empty() {
            log::warn!("{source_name} row {}: skipping row without stop_id", idx + 1);
            skipped += 1;
            continue;
        }
        let key = row.route_shape_key();
        let edge = ChainEdge {
            next_stop_id: row.next_stop_id,
            travel_time_seconds: row.travel_time_to_next,
            travel_distance_meters: row.travel_distance_to_next,
        };
        let chain = chains
            .entry(key.clone())
            .or_insert_with(|| ShapeChain::new(key));
        if !chain.insert(&row.stop_id, edge) {
            duplicates += 1;
        }
    }
    eprintln!();
    log::info!(
        "loaded {} route shapes from {source_name} ({skipped} rows skipped, {duplicates} duplicate keys ignored)",
        chains.len()
    );
    Ok(chains.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "route_id,shape_id,stop_id,next_stop_id,travel_time_to_next,travel_distance_to_next\n\
                         r1,s1,a,b,120,\n\
                         r1,s1,b,c,,400\n\
                         r1,s1,c,,,\n\
                         r1,s1,a,z,1,\n\
                         r2,s9,x,y,-30,-5\n\
                         r2,s9,,y,10,\n";

    #[test]
    fn test_chains_by_route_shape() {
        let chains = read_shape_chains(TABLE.as_bytes(), "adjacency_by_route.txt")
            .expect("test invariant failed: table should load");
        assert_eq!(chains.len(), 2);
        let r1 = &chains[0];
        assert_eq!(r1.key, RouteShapeKey::new("r1", "s1"));
        assert_eq!(r1.stop_ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        let a = r1.edge("a").expect("a should have an edge");
        assert_eq!(a.next_stop_id.as_deref(), Some("b"));
        assert_eq!(a.travel_time_seconds, Some(120.0));
        let c = r1.edge("c").expect("c should have an edge");
        assert_eq!(c.next_stop_id, None);
    }

    #[test]
    fn test_negative_values_dropped() {
        let chains = read_shape_chains(TABLE.as_bytes(), "adjacency_by_route.txt")
            .expect("test invariant failed: table should load");
        let x = chains[1].edge("x").expect("x should have an edge");
        assert_eq!(x.travel_time_seconds, None);
        assert_eq!(x.travel_distance_meters, None);
        assert_eq!(x.travel_seconds(8.0), None);
        assert_eq!(chains[1].len(), 1);
    }

    #[test]
    fn test_fallback_speed_inference() {
        let chains = read_shape_chains(TABLE.as_bytes(), "adjacency_by_route.txt")
            .expect("test invariant failed: table should load");
        let b = chains[0].edge("b").expect("b should have an edge");
        assert_eq!(b.travel_seconds(8.0), Some(50.0));
    }
}
