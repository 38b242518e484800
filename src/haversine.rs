//! Haversine distance provider.
//!
//! Uses great-circle distance between coordinates. Ignores roads but is
//! always available and free, so it also drives shortlisting.

use crate::model::{Distance, GeoPair, GeoPoint};
use crate::traits::DistanceProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_PER_MILE: f64 = 1.609344;

/// Great-circle distance between two points in miles.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c / KM_PER_MILE
}

/// Deterministic, local distance provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicDistance;

impl DistanceProvider for GeodesicDistance {
    fn distance(&self, pair: &GeoPair) -> Distance {
        Distance::geodesic(pair.geodesic_miles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: (f64, f64), b: (f64, f64)) -> GeoPair {
        GeoPair::new(a.into(), b.into())
    }

    #[test]
    fn test_haversine_same_point() {
        let d = GeodesicDistance.distance(&pair((30.2672, -97.7431), (30.2672, -97.7431)));
        assert_eq!(d.geodesic_miles, 0);
        assert!(d.driving.is_none());
    }

    #[test]
    fn test_haversine_known_distance() {
        // Austin to Denver, roughly 770 miles as the crow flies
        let miles = haversine_miles(GeoPoint::new(30.2672, -97.7431), GeoPoint::new(39.7392, -104.9903));
        assert!(miles > 740.0 && miles < 800.0, "Austin to Denver should be ~770mi, got {}", miles);
    }

    #[test]
    fn test_one_degree_of_latitude_truncates() {
        let d = GeodesicDistance.distance(&pair((30.0, -97.0), (31.0, -97.0)));
        assert_eq!(d.geodesic_miles, 69);
    }

    #[test]
    fn test_symmetric() {
        let points = [(30.0, -97.0), (31.5, -98.25), (40.0, -100.0), (-33.9, 151.2), (64.8, -147.7)];
        for a in points {
            for b in points {
                assert_eq!(
                    GeodesicDistance.distance(&pair(a, b)),
                    GeodesicDistance.distance(&pair(b, a)),
                    "{:?} <-> {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let miles = haversine_miles(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!(miles.is_finite());
        assert!(miles > 12_400.0 && miles < 12_500.0);
    }
}
