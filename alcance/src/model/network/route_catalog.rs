use std::{collections::HashMap, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use super::{
    table_ops::{open_reader, require_columns, table_reader},
    NetworkError,
};

/// display attributes of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub name: String,
    /// `#RRGGBB`, when the feed provides one
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: Option<String>,
    route_short_name: Option<String>,
    route_long_name: Option<String>,
    route_color: Option<String>,
}

/// route display names and colors from GTFS `routes.txt`.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: HashMap<String, RouteInfo>,
}

impl RouteCatalog {
    pub fn from_file(path: &Path) -> Result<RouteCatalog, NetworkError> {
        let reader = open_reader(path)?;
        Self::from_reader(reader, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(
        reader: R,
        source_name: &str,
    ) -> Result<RouteCatalog, NetworkError> {
        let mut rdr = table_reader(reader);
        require_columns(&mut rdr, source_name, &["route_id"])?;
        let mut routes = HashMap::new();
        for (idx, result) in rdr.deserialize::<RouteRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("{source_name} row {}: skipping malformed row: {e}", idx + 1);
                    continue;
                }
            };
            let Some(route_id) = non_empty(row.route_id) else {
                log::warn!("{source_name} row {}: skipping route without route_id", idx + 1);
                continue;
            };
            let name = non_empty(row.route_short_name)
                .or_else(|| non_empty(row.route_long_name))
                .unwrap_or_else(|| route_id.clone());
            let color = row.route_color.as_deref().and_then(normalize_color);
            routes.entry(route_id).or_insert(RouteInfo { name, color });
        }
        log::info!("loaded {} routes from {source_name}", routes.len());
        Ok(RouteCatalog { routes })
    }

    pub fn get(&self, route_id: &str) -> Option<&RouteInfo> {
        self.routes.get(route_id)
    }

    /// the route's display name, falling back to the route id.
    pub fn display_name(&self, route_id: &str) -> String {
        self.get(route_id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| route_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// GTFS colors are six hex digits without a leading `#`.
pub(crate) fn normalize_color(value: &str) -> Option<String> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}
