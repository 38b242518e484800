//! Error types for distance lookups and matrix assembly.
//!
//! Lookup and address errors are row-level: providers fold them into
//! `None` fields. Config and matrix errors are fatal and raised before any
//! remote call is issued.

use thiserror::Error;

/// Failure of a single remote driving-distance lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("distance provider unavailable (HTTP {status})")]
    ProviderUnavailable { status: u16 },

    #[error("no route found (element status: {})", .status.as_deref().unwrap_or("missing"))]
    NoRouteFound { status: Option<String> },

    #[error("distance request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Why a jurisdiction could not be read from a provider address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseFailure {
    #[error("no address returned")]
    MissingAddress,

    #[error("address has too few comma-separated parts: {address:?}")]
    TooFewParts { address: String },

    #[error("{token:?} is not a two-letter state code")]
    NotAStateCode { token: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GOOGLE_DISTANCE_API_KEY is not set")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
