//! travel-burden core
//!
//! Nearest-k destination matching and distance matrix assembly between
//! origin regions and candidate service locations.

pub mod traits;
pub mod model;
pub mod error;
pub mod haversine;
pub mod google;
pub mod address;
pub mod matcher;
pub mod matrix;
