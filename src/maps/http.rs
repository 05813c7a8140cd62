//! Blocking HTTP client for a Google-Maps-style mapping service.
//!
//! Wraps the geocoding and distance-matrix web APIs behind the
//! [`MapsService`] trait. Requests are paced by a minimum interval between
//! outbound calls so bursts stay under the provider's per-second quota.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use thiserror::Error;

use super::response::{GeocodeResponse, MatrixResponse};
use super::service::{Coordinates, GeocodeError, MapsService, MatrixBlock, MatrixError};

/// Default base URL of the mapping web service.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default minimum interval between outbound requests (40 req/s).
const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(25);

/// Error building the HTTP client.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Configuration for [`GoogleMapsClient`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use paratransit_routing::maps::MapsClientConfig;
///
/// let config = MapsClientConfig::new("my-key")
///     .with_base_url("http://localhost:8080/maps/api")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url, "http://localhost:8080/maps/api");
/// ```
#[derive(Debug, Clone)]
pub struct MapsClientConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL of the service (override for testing or a proxy).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Minimum interval between outbound requests.
    pub request_interval: Duration,
}

impl MapsClientConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_interval: DEFAULT_REQUEST_INTERVAL,
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the minimum interval between requests.
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }
}

/// Blocking [`MapsService`] implementation over the mapping web APIs.
///
/// # Examples
///
/// ```no_run
/// use paratransit_routing::maps::{GoogleMapsClient, MapsClientConfig, MapsService};
///
/// let client = GoogleMapsClient::new(MapsClientConfig::new("api-key"))?;
/// let depot = client.geocode("10404 1055 W, South Jordan, UT 84095")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GoogleMapsClient {
    client: Client,
    config: MapsClientConfig,
    last_request: Mutex<Option<Instant>>,
}

impl GoogleMapsClient {
    /// Builds a client from the given configuration.
    pub fn new(config: MapsClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    /// Sleeps just long enough to respect the configured request interval.
    fn pace(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.config.request_interval {
                std::thread::sleep(self.config.request_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    fn geocode_url(&self) -> String {
        format!("{}/geocode/json", self.config.base_url.trim_end_matches('/'))
    }

    fn matrix_url(&self) -> String {
        format!(
            "{}/distancematrix/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Joins coordinates into the API's pipe-separated `lat,lng` list.
    fn join_coordinates(points: &[Coordinates]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", p.lat, p.lng))
            .collect::<Vec<_>>()
            .join("|")
    }

    fn geocode_transport_error(error: &reqwest::Error) -> GeocodeError {
        match error.status() {
            // Client-side HTTP errors are definitive; server errors and
            // plain transport failures are worth a retry.
            Some(code) if code.is_client_error() => GeocodeError::Service {
                status: code.to_string(),
                message: error.to_string(),
            },
            _ => GeocodeError::Transport {
                message: error.to_string(),
            },
        }
    }

    fn matrix_transport_error(error: &reqwest::Error) -> MatrixError {
        match error.status() {
            Some(code) if code.is_client_error() => MatrixError::Service {
                status: code.to_string(),
                message: error.to_string(),
            },
            _ => MatrixError::Transport {
                message: error.to_string(),
            },
        }
    }
}

impl MapsService for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        self.pace();
        let response = self
            .client
            .get(self.geocode_url())
            .query(&[("address", address), ("key", self.config.api_key.as_str())])
            .send()
            .map_err(|e| Self::geocode_transport_error(&e))?
            .error_for_status()
            .map_err(|e| Self::geocode_transport_error(&e))?;

        let body: GeocodeResponse = response.json().map_err(|e| GeocodeError::Malformed {
            message: e.to_string(),
        })?;

        if body.is_zero_results() || (body.is_ok() && body.results.is_empty()) {
            return Err(GeocodeError::NotFound {
                address: address.to_string(),
            });
        }
        if !body.is_ok() {
            return Err(GeocodeError::Service {
                status: body.status,
                message: body.error_message.unwrap_or_default(),
            });
        }

        let location = &body.results[0].geometry.location;
        Ok(Coordinates::new(location.lat, location.lng))
    }

    fn travel_matrix(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> Result<MatrixBlock, MatrixError> {
        self.pace();
        let response = self
            .client
            .get(self.matrix_url())
            .query(&[
                ("origins", Self::join_coordinates(origins)),
                ("destinations", Self::join_coordinates(destinations)),
                ("mode", "driving".to_string()),
                ("units", "metric".to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .map_err(|e| Self::matrix_transport_error(&e))?
            .error_for_status()
            .map_err(|e| Self::matrix_transport_error(&e))?;

        let body: MatrixResponse = response.json().map_err(|e| MatrixError::Malformed {
            message: e.to_string(),
        })?;

        if !body.is_ok() {
            return Err(MatrixError::Service {
                status: body.status,
                message: body.error_message.unwrap_or_default(),
            });
        }

        let block: MatrixBlock = body
            .rows
            .iter()
            .map(|row| row.elements.iter().map(|e| e.leg()).collect())
            .collect();
        Ok(block)
    }
}
