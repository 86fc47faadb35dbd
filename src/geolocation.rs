//! Geolocation services

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default IP geolocation endpoint
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// A resolved position in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Why a position could not be obtained
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LocationUnavailable {
    #[error("User denied Geolocation")]
    PermissionDenied,
    #[error("{0}")]
    PositionUnavailable(String),
    #[error("Timeout expired")]
    Timeout,
}

/// One-shot position lookup
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationUnavailable>;
}

fn checked(coords: Coordinates) -> Result<Coordinates, LocationUnavailable> {
    if (-90.0..=90.0).contains(&coords.latitude) {
        Ok(coords)
    } else {
        Err(LocationUnavailable::PositionUnavailable(format!(
            "Latitude out of range: {}",
            coords.latitude
        )))
    }
}

// ============================================================================
// Fixed position
// ============================================================================

/// Reports a configured position
#[derive(Clone, Copy, Debug)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationService for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationUnavailable> {
        checked(self.0)
    }
}

// ============================================================================
// IP geolocation
// ============================================================================

/// Response body from ip-api.com style endpoints
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLookupResponse {
    fn into_coordinates(self) -> Result<Coordinates, LocationUnavailable> {
        if self.status != "success" {
            let reason = self.message.unwrap_or_else(|| "lookup failed".into());
            return Err(LocationUnavailable::PositionUnavailable(format!(
                "Position unavailable: {}",
                reason
            )));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => checked(Coordinates::new(lat, lon)),
            _ => Err(LocationUnavailable::PositionUnavailable(
                "Position unavailable: response had no coordinates".into(),
            )),
        }
    }
}

/// Looks up the approximate position of this machine's public IP
pub struct IpLocationService {
    client: reqwest::Client,
    url: String,
}

impl IpLocationService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationUnavailable> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationUnavailable::PositionUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn request_error(e: reqwest::Error) -> LocationUnavailable {
    if e.is_timeout() {
        LocationUnavailable::Timeout
    } else {
        LocationUnavailable::PositionUnavailable(format!("Position unavailable: {}", e))
    }
}

#[async_trait]
impl LocationService for IpLocationService {
    async fn current_position(&self) -> Result<Coordinates, LocationUnavailable> {
        debug!(url = %self.url, "requesting IP geolocation");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(request_error)?;
        let body: IpLookupResponse = response.json().await.map_err(request_error)?;

        let result = body.into_coordinates();
        if let Err(e) = &result {
            warn!(error = %e, "IP geolocation failed");
        }
        result
    }
}
