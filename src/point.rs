use std::f64::consts::PI;

/// A location on earth. Both fields are stored in radians.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}
impl Eq for Point {}
impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    /// Build a point from decimal degrees, in the (longitude, latitude)
    /// order used by kml coordinate tuples.
    pub fn from_degrees(longitude: f64, latitude: f64) -> Self {
        Point {
            latitude: latitude * PI / 180.0,
            longitude: longitude * PI / 180.0,
        }
    }

    /// Return (longitude, latitude) in decimal degrees.
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.longitude * 180.0 / PI, self.latitude * 180.0 / PI)
    }
}
