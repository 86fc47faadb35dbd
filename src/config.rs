//! Which geolocation source to use

use std::sync::Arc;
use std::time::Duration;

use crate::geolocation::{
    Coordinates, DEFAULT_GEOLOCATION_URL, FixedLocation, IpLocationService, LocationService,
    LocationUnavailable,
};

/// Geolocation source settings, usually built from CLI flags
#[derive(Clone, Debug, PartialEq)]
pub enum LocatorConfig {
    /// Look up the public IP's position
    Ip { url: String, timeout: Duration },
    /// Use a fixed position
    Fixed(Coordinates),
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig::Ip {
            url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LocatorConfig {
    /// A fixed latitude wins over the IP lookup
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        url: String,
        timeout: Duration,
    ) -> Self {
        match latitude {
            Some(lat) => LocatorConfig::Fixed(Coordinates::new(lat, longitude.unwrap_or(0.0))),
            None => LocatorConfig::Ip { url, timeout },
        }
    }

    pub fn build(&self) -> Result<Arc<dyn LocationService>, LocationUnavailable> {
        let service: Arc<dyn LocationService> = match self {
            LocatorConfig::Ip { url, timeout } => {
                Arc::new(IpLocationService::new(url.clone(), *timeout)?)
            }
            LocatorConfig::Fixed(coords) => Arc::new(FixedLocation(*coords)),
        };
        Ok(service)
    }
}
