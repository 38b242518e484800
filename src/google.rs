//! Google Distance Matrix HTTP adapter for driving distance and duration.
//!
//! Every call is billed, so the client reports its cost through
//! [`DistanceProvider`] and callers should shortlist before querying it.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::address::first_state_code;
use crate::error::{ConfigError, LookupError};
use crate::model::{Distance, DrivingLeg, GeoPair, GeoPoint};
use crate::traits::DistanceProvider;

pub const API_KEY_ENV: &str = "GOOGLE_DISTANCE_API_KEY";
pub const BASE_URL_ENV: &str = "GOOGLE_DISTANCE_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Conversion used for provider meters; matches historical outputs.
const METERS_PER_MILE: f64 = 1609.0;

#[derive(Debug, Clone)]
pub struct GoogleDistanceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub units: String,
    pub timeout_secs: u64,
    /// Expected request throughput, used only for time estimates.
    pub requests_per_minute: f64,
    /// $5 per 1k elements at the time of writing.
    pub cost_per_request_usd: f64,
}

impl Default for GoogleDistanceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            units: "imperial".to_string(),
            timeout_secs: 10,
            requests_per_minute: 600.0,
            cost_per_request_usd: 0.005,
        }
    }
}

impl GoogleDistanceConfig {
    /// Read the API key (and optional base URL override) from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup(BASE_URL_ENV).unwrap_or(defaults.base_url),
            api_key: lookup(API_KEY_ENV),
            ..defaults
        }
    }
}

/// Driving leg plus the jurisdictions the provider resolved for each end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrivingLookup {
    pub leg: DrivingLeg,
    pub origin_state: Option<String>,
    pub destination_state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleDistanceClient {
    config: GoogleDistanceConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GoogleDistanceClient {
    /// Build a client. Fails immediately when no API key is configured.
    pub fn new(config: GoogleDistanceConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Query driving distance and duration for one pair.
    pub fn lookup(&self, pair: &GeoPair) -> Result<DrivingLookup, LookupError> {
        let origins = coordinate_param(pair.origin);
        let destinations = coordinate_param(pair.destination);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("units", self.config.units.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ProviderUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.json::<DistanceMatrixResponse>()?;
        interpret(body)
    }
}

impl DistanceProvider for GoogleDistanceClient {
    fn distance(&self, pair: &GeoPair) -> Distance {
        let mut distance = Distance::geodesic(pair.geodesic_miles());

        match self.lookup(pair) {
            Ok(found) => {
                debug!(
                    miles = found.leg.miles,
                    minutes = found.leg.minutes,
                    "driving lookup succeeded"
                );
                distance.driving = Some(found.leg);
                distance.origin_state = found.origin_state;
                distance.destination_state = found.destination_state;
            }
            Err(err) => {
                warn!(
                    origin = ?pair.origin,
                    destination = ?pair.destination,
                    error = %err,
                    "driving lookup failed, keeping geodesic distance only"
                );
            }
        }

        distance
    }

    fn comparisons_per_minute(&self) -> f64 {
        self.config.requests_per_minute
    }

    fn cost_per_request_usd(&self) -> Option<f64> {
        Some(self.config.cost_per_request_usd)
    }
}

fn coordinate_param(point: GeoPoint) -> String {
    format!("{},{}", point.lat, point.lng)
}

/// Turn a decoded response into a lookup result.
///
/// A missing route is an error; an unreadable address only blanks the
/// corresponding state field.
pub fn interpret(body: DistanceMatrixResponse) -> Result<DrivingLookup, LookupError> {
    let element = body
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or(LookupError::NoRouteFound { status: None })?;

    let (meters, seconds) = match (element.distance, element.duration) {
        (Some(distance), Some(duration)) => (distance.value, duration.value),
        _ => {
            return Err(LookupError::NoRouteFound {
                status: element.status,
            });
        }
    };

    let origin_state = first_state_code(&body.origin_addresses)
        .inspect_err(|err| debug!(error = %err, "origin state unavailable"))
        .ok();
    let destination_state = first_state_code(&body.destination_addresses)
        .inspect_err(|err| debug!(error = %err, "destination state unavailable"))
        .ok();

    Ok(DrivingLookup {
        leg: DrivingLeg {
            miles: (meters / METERS_PER_MILE) as u32,
            minutes: (seconds / 60.0) as u32,
        },
        origin_state,
        destination_state,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    origin_addresses: Vec<String>,
    #[serde(default)]
    destination_addresses: Vec<String>,
    #[serde(default)]
    rows: Vec<ResponseRow>,
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(default)]
    elements: Vec<ResponseElement>,
}

#[derive(Debug, Deserialize)]
struct ResponseElement {
    status: Option<String>,
    distance: Option<ValueField>,
    duration: Option<ValueField>,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}
