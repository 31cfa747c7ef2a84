use itertools::Itertools;

use crate::Point;

/// Mean earth radius, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6372.795;

/// Great circle distance between two points, in kilometers.
///
/// Uses the haversine formulation. The haversine term is clamped into
/// [0, 1] so rounding near antipodal points never yields NaN.
pub fn distance(a: &Point, b: &Point) -> f64 {
    let central_angle = 2.0 * haversine(a, b).clamp(0.0, 1.0).sqrt().asin();
    central_angle * EARTH_RADIUS_KM
}

// haversine of the central angle, may fall slightly outside [0, 1]
fn haversine(a: &Point, b: &Point) -> f64 {
    let half_lat = (b.latitude - a.latitude) / 2.0;
    let half_lon = (b.longitude - a.longitude).abs() / 2.0;
    half_lat.sin() * half_lat.sin()
        + a.latitude.cos() * b.latitude.cos() * half_lon.sin() * half_lon.sin()
}

/// Total length of the path going through all given points, in kilometers.
pub fn path_length(points: &[Point]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(a, b))
        .sum()
}
