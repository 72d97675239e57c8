use geo::{Coord, Distance, Haversine, Point};

/// meters spanned by one degree of latitude under the flat-earth scaling
/// used throughout the request path.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// planar (dx, dy) offset in meters from `a` to `b` using an equirectangular
/// projection. longitude is scaled by the cosine of the mean latitude of the
/// two points, which keeps the measure symmetric in its arguments.
///
/// # Arguments
///
/// * `a` - reference coordinate (lon, lat)
/// * `b` - target coordinate (lon, lat)
///
/// # Returns
///
/// * the eastward and northward offsets in meters
pub fn equirectangular_delta(a: &Coord<f64>, b: &Coord<f64>) -> (f64, f64) {
    let mean_lat = (a.y + b.y) / 2.0;
    let dx = (b.x - a.x) * METERS_PER_DEGREE * mean_lat.to_radians().cos().abs();
    let dy = (b.y - a.y) * METERS_PER_DEGREE;
    (dx, dy)
}

/// planar distance in meters between two (lon, lat) coordinates under the
/// equirectangular approximation. this is not a great-circle distance.
pub fn equirectangular_distance(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    let (dx, dy) = equirectangular_delta(a, b);
    dx.hypot(dy)
}

/// moves a coordinate by a distance along a bearing using the same flat-earth
/// scaling. bearing is in radians, clockwise from north, so `cos` drives the
/// latitude and `sin` drives the longitude offset.
pub fn offset_by_meters(center: &Coord<f64>, meters: f64, bearing: f64) -> Coord<f64> {
    let lat = center.y + (meters / METERS_PER_DEGREE) * bearing.cos();
    let lon_scale = METERS_PER_DEGREE * center.y.to_radians().cos().abs();
    let lon = center.x + (meters / lon_scale) * bearing.sin();
    Coord { x: lon, y: lat }
}

/// great-circle distance in meters.
pub fn haversine_distance(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    Haversine.distance(Point::from(*a), Point::from(*b))
}

/// how the distance from an origin to a stop is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// [`equirectangular_distance`], used by the request path
    #[default]
    Equirectangular,
    /// [`haversine_distance`], used by the offline areas report
    Haversine,
}

impl DistanceMetric {
    pub fn distance(&self, a: &Coord<f64>, b: &Coord<f64>) -> f64 {
        match self {
            DistanceMetric::Equirectangular => equirectangular_distance(a, b),
            DistanceMetric::Haversine => haversine_distance(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equirectangular_is_symmetric() {
        let a = Coord { x: -58.3816, y: -34.6037 };
        let b = Coord { x: -58.4412, y: -34.6242 };
        assert_eq!(equirectangular_distance(&a, &b), equirectangular_distance(&b, &a));
    }

    #[test]
    fn test_offset_north_is_exact_in_latitude() {
        let center = Coord { x: -58.0, y: -34.0 };
        let moved = offset_by_meters(&center, 1110.0, 0.0);
        assert!((moved.y - (-33.99)).abs() < 1e-12);
        assert!((moved.x - center.x).abs() < 1e-12);
    }

    #[test]
    fn test_offset_roundtrips_through_distance() {
        let center = Coord { x: -58.3816, y: -34.6037 };
        for step in 0..12 {
            let bearing = (step as f64 * 30.0).to_radians();
            let moved = offset_by_meters(&center, 1500.0, bearing);
            let d = equirectangular_distance(&center, &moved);
            assert!((d - 1500.0).abs() < 1.0, "bearing {bearing} gave {d}");
        }
    }

    #[test]
    fn test_haversine_close_to_equirectangular_at_short_range() {
        let a = Coord { x: -58.3816, y: -34.6037 };
        let b = Coord { x: -58.3916, y: -34.6137 };
        let h = haversine_distance(&a, &b);
        let e = equirectangular_distance(&a, &b);
        assert!((h - e).abs() / h < 0.01);
    }
}
