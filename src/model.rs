//! Typed records flowing through matching and matrix assembly.

use serde::Serialize;

use crate::haversine::haversine_miles;

/// A coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Mean coordinate of a set of points, `None` when the set is empty.
    pub fn centroid<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let (count, lat_sum, lng_sum) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lng), p| (n + 1, lat + p.lat, lng + p.lng));

        if count == 0 {
            return None;
        }

        Some(Self::new(lat_sum / count as f64, lng_sum / count as f64))
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Ordered origin/destination pair for a single distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPair {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl GeoPair {
    pub const fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self { origin, destination }
    }

    /// Great-circle distance in whole miles (truncated).
    pub fn geodesic_miles(&self) -> u32 {
        haversine_miles(self.origin, self.destination) as u32
    }
}

/// A region travel is measured from.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub id: String,
    pub point: GeoPoint,
}

impl Origin {
    pub fn new(id: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            id: id.into(),
            point,
        }
    }

    /// Origin placed at the centroid of its member points (e.g. the ZIP5s of a ZIP3).
    pub fn from_members<I>(id: impl Into<String>, members: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        GeoPoint::centroid(members).map(|point| Self::new(id, point))
    }
}

/// A destination with caller-defined passthrough attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<A> {
    pub id: String,
    pub point: GeoPoint,
    pub attributes: A,
}

impl<A> Candidate<A> {
    pub fn new(id: impl Into<String>, point: GeoPoint, attributes: A) -> Self {
        Self {
            id: id.into(),
            point,
            attributes,
        }
    }
}

/// Driving distance and duration reported by a routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrivingLeg {
    pub miles: u32,
    pub minutes: u32,
}

/// Everything a provider knows about one origin/destination pair.
///
/// Ranking always uses `geodesic_miles`; the remaining fields are annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distance {
    pub geodesic_miles: u32,
    pub driving: Option<DrivingLeg>,
    pub origin_state: Option<String>,
    pub destination_state: Option<String>,
}

impl Distance {
    pub fn geodesic(miles: u32) -> Self {
        Self {
            geodesic_miles: miles,
            driving: None,
            origin_state: None,
            destination_state: None,
        }
    }

    /// Hours spent driving there and back.
    pub fn round_trip_hours(&self) -> Option<f64> {
        self.driving.map(|leg| f64::from(leg.minutes) * 2.0 / 60.0)
    }
}

/// One row of a ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow<A> {
    pub origin_id: String,
    pub destination_id: String,
    #[serde(flatten)]
    pub attributes: A,
    #[serde(flatten)]
    pub distance: Distance,
}

/// The k nearest candidates for one origin, closest first.
pub type RankedResult<A> = Vec<RankedRow<A>>;

/// Ranked results for every origin, concatenated in origin order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix<A> {
    pub rows: Vec<RankedRow<A>>,
    /// Origins not processed because the build was cancelled.
    pub skipped_origins: Vec<String>,
}

impl<A> DistanceMatrix<A> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to a single origin.
    pub fn rows_for<'a>(&'a self, origin_id: &'a str) -> impl Iterator<Item = &'a RankedRow<A>> + 'a {
        self.rows.iter().filter(move |row| row.origin_id == origin_id)
    }
}
