//! Real city-center coordinates for origins and destinations.
//!
//! Origins are approximate ZIP3 centroids; destinations sit in neighbouring
//! states and stand in for clinic locations.

use serde::Serialize;
use travel_burden::model::{Candidate, GeoPoint, Origin};

/// Passthrough attributes carried by every clinic candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicInfo {
    pub state: &'static str,
    pub zip5: &'static str,
    pub kind: &'static str,
}

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Texas ZIP3 centroids (origins)
// ============================================================================

pub const TEXAS_ZIP3: &[Location] = &[
    Location::new("787**", 30.2672, -97.7431),  // Austin
    Location::new("770**", 29.7604, -95.3698),  // Houston
    Location::new("752**", 32.7767, -96.7970),  // Dallas
    Location::new("799**", 31.7619, -106.4850), // El Paso
    Location::new("782**", 29.4241, -98.4936),  // San Antonio
];

// ============================================================================
// Clinic stand-ins in neighbouring states (destinations)
// ============================================================================

pub const CLINICS: &[(Location, ClinicInfo)] = &[
    (
        Location::new("Denver", 39.7392, -104.9903),
        ClinicInfo { state: "CO", zip5: "80202", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Albuquerque", 35.0844, -106.6504),
        ClinicInfo { state: "NM", zip5: "87102", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Las Cruces", 32.3199, -106.7637),
        ClinicInfo { state: "NM", zip5: "88001", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Wichita", 37.6872, -97.3301),
        ClinicInfo { state: "KS", zip5: "67202", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Santa Fe", 35.6870, -105.9378),
        ClinicInfo { state: "NM", zip5: "87501", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Colorado Springs", 38.8339, -104.8214),
        ClinicInfo { state: "CO", zip5: "80903", kind: "synthetic_clinic" },
    ),
    (
        Location::new("Carbondale", 37.7273, -89.2168),
        ClinicInfo { state: "IL", zip5: "62901", kind: "synthetic_clinic" },
    ),
];

pub fn texas_origins() -> Vec<Origin> {
    TEXAS_ZIP3
        .iter()
        .map(|loc| Origin::new(loc.name, loc.point()))
        .collect()
}

pub fn clinic_candidates() -> Vec<Candidate<ClinicInfo>> {
    CLINICS
        .iter()
        .map(|(loc, info)| Candidate::new(info.zip5, loc.point(), info.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_ids_are_unique() {
        let mut ids = CLINICS.iter().map(|(_, info)| info.zip5).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CLINICS.len());
    }
}
