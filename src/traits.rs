//! Core domain traits for travel burden estimation.
//!
//! Kept minimal so callers can plug in their own distance sources.

use crate::model::{Distance, GeoPair};

/// Geodesic comparisons per minute assumed for cost estimation.
pub const LOCAL_COMPARISONS_PER_MINUTE: f64 = 250_000.0;

/// Provides a distance for an ordered pair of coordinates.
///
/// Implementations must not fail the whole call: row-level problems are
/// reported through the optional fields of [`Distance`].
pub trait DistanceProvider: Sync {
    fn distance(&self, pair: &GeoPair) -> Distance;

    /// Throughput used for the advisory wall-time estimate.
    fn comparisons_per_minute(&self) -> f64 {
        LOCAL_COMPARISONS_PER_MINUTE
    }

    /// Monetary cost of one call, if the provider is billed per request.
    fn cost_per_request_usd(&self) -> Option<f64> {
        None
    }

    /// Whether each call goes to a metered external service.
    fn is_metered(&self) -> bool {
        self.cost_per_request_usd().is_some()
    }
}
