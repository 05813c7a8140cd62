//! Address resolver over a mapping oracle.
//!
//! Resolution is cached per exact address string for the resolver's
//! lifetime: pickup lists repeat the same literal addresses often and
//! geocoding is costly and rate-limited. Transient failures are retried a
//! small fixed number of times with no backoff; a definitive "not found" is
//! never retried.

use std::collections::HashMap;

use crate::maps::{Coordinates, GeocodeError, MapsService};

/// One address that could not be resolved, positioned by its index in the
/// batch it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeFailure {
    /// Index of the address in the original batch.
    pub index: usize,
    /// The address as submitted.
    pub address: String,
    /// Why resolution failed.
    pub error: GeocodeError,
}

/// Resolves free-text addresses to coordinates through a [`MapsService`].
///
/// # Examples
///
/// ```no_run
/// use paratransit_routing::geocode::AddressResolver;
/// use paratransit_routing::maps::{GoogleMapsClient, MapsClientConfig};
///
/// let service = GoogleMapsClient::new(MapsClientConfig::new("api-key"))?;
/// let mut resolver = AddressResolver::new(&service);
/// let depot = resolver.resolve("10404 1055 W, South Jordan, UT 84095")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AddressResolver<'a, S: MapsService> {
    service: &'a S,
    cache: HashMap<String, Coordinates>,
    max_attempts: u32,
}

impl<'a, S: MapsService> AddressResolver<'a, S> {
    /// Creates a resolver with the default retry bound (3 attempts).
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            cache: HashMap::new(),
            max_attempts: 3,
        }
    }

    /// Overrides the maximum attempts per address (minimum 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Resolves one address, serving repeats of the exact (case-sensitive)
    /// string from the in-memory cache.
    ///
    /// Transient failures are retried up to the attempt bound; a definitive
    /// "not found" or service rejection fails immediately.
    pub fn resolve(&mut self, address: &str) -> Result<Coordinates, GeocodeError> {
        if let Some(&coords) = self.cache.get(address) {
            return Ok(coords);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.service.geocode(address) {
                Ok(coords) => {
                    self.cache.insert(address.to_string(), coords);
                    return Ok(coords);
                }
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    log::warn!(
                        "geocoding `{address}` failed on attempt {attempt}: {error}; retrying"
                    );
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Resolves a batch of addresses independently.
    ///
    /// One bad address never aborts the batch. Returns per-address results
    /// aligned to the input order (`None` where resolution failed) plus the
    /// failures, each carrying its original index.
    pub fn resolve_all(
        &mut self,
        addresses: &[&str],
    ) -> (Vec<Option<Coordinates>>, Vec<GeocodeFailure>) {
        let mut resolved = Vec::with_capacity(addresses.len());
        let mut failures = Vec::new();

        for (index, &address) in addresses.iter().enumerate() {
            match self.resolve(address) {
                Ok(coords) => resolved.push(Some(coords)),
                Err(error) => {
                    log::warn!("could not geocode `{address}`: {error}");
                    resolved.push(None);
                    failures.push(GeocodeFailure {
                        index,
                        address: address.to_string(),
                        error,
                    });
                }
            }
        }

        (resolved, failures)
    }
}
