use std::path::Path;

use serde::{Deserialize, Serialize};

/// locations of the files that make up a transit network snapshot. every entry is
/// optional: a configuration without files serves walking-only isochrones.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// GTFS `stops.txt`, required whenever an adjacency table is configured
    pub stops_file: Option<String>,
    /// stop adjacency table written by `alcance_gtfs build-adjacency`, plain or `.gz`
    pub adjacency_file: Option<String>,
    /// GTFS `routes.txt`, used for route display names and colors
    pub routes_file: Option<String>,
    /// versioned JSON asset describing rail-style lines with ordered stations
    pub lines_file: Option<String>,
}

impl NetworkConfig {
    /// rewrites relative file paths so they are relative to `base`, typically the
    /// directory holding the configuration file.
    pub fn resolve_relative_to(&self, base: &Path) -> NetworkConfig {
        let resolve = |f: &Option<String>| {
            f.as_ref().map(|f| {
                let path = Path::new(f);
                if path.is_absolute() {
                    f.clone()
                } else {
                    base.join(path).display().to_string()
                }
            })
        };
        NetworkConfig {
            stops_file: resolve(&self.stops_file),
            adjacency_file: resolve(&self.adjacency_file),
            routes_file: resolve(&self.routes_file),
            lines_file: resolve(&self.lines_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_follow_config_dir() {
        let conf = NetworkConfig {
            stops_file: Some(String::from("gtfs/stops.txt")),
            adjacency_file: Some(String::from("/data/adjacency_by_route.txt.gz")),
            routes_file: None,
            lines_file: None,
        };
        let resolved = conf.resolve_relative_to(Path::new("/srv/alcance"));
        assert_eq!(
            resolved.stops_file.as_deref(),
            Some("/srv/alcance/gtfs/stops.txt")
        );
        assert_eq!(
            resolved.adjacency_file.as_deref(),
            Some("/data/adjacency_by_route.txt.gz")
        );
        assert_eq!(resolved.routes_file, None);
    }
}
