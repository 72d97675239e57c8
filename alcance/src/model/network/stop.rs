use geo::Coord;
use serde::{Deserialize, Serialize};

/// a boarding location. coordinates are (lon, lat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub coord: Coord<f64>,
}

impl Stop {
    pub fn new(id: &str, name: &str, lon: f64, lat: f64) -> Stop {
        Stop {
            id: id.to_string(),
            name: name.to_string(),
            coord: Coord { x: lon, y: lat },
        }
    }

    pub fn lat(&self) -> f64 {
        self.coord.y
    }

    pub fn lon(&self) -> f64 {
        self.coord.x
    }
}
