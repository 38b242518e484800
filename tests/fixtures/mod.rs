//! Test fixtures for travel-burden.
//!
//! Provides realistic test data including:
//! - ZIP3 origin centroids in Texas and nearby clinic-bearing cities

pub mod regional_locations;

pub use regional_locations::*;
