use geo::{Coord, Polygon};

/// the drawable realization of a disk.
#[derive(Debug, Clone, PartialEq)]
pub enum DiskBoundary {
    /// a zero or negative radius collapses to its center
    Point(Coord<f64>),
    Ring(Polygon<f64>),
}

impl DiskBoundary {
    /// vertices of the ring without the closing point. a collapsed disk has none.
    pub fn into_open_ring(self) -> Vec<Coord<f64>> {
        match self {
            DiskBoundary::Point(_) => vec![],
            DiskBoundary::Ring(p) => {
                let (exterior, _) = p.into_inner();
                let mut coords = exterior.0;
                if coords.len() > 1 && coords.first() == coords.last() {
                    coords.pop();
                }
                coords
            }
        }
    }
}
