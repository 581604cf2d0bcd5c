//! Address-to-address distance lookup.
//!
//! The matching run only depends on the [`DistanceProvider`] trait; the
//! geocoding implementation lives in `modules::integrations::nominatim`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Resolves the road-agnostic distance between two postal addresses.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Distance in kilometers between `from` and `to`
    async fn distance_km(&self, from: &str, to: &str) -> Result<f64, DomainError>;
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometers
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Returns the same distance for every address pair.
///
/// Used when no geocoder is configured (offline/dev mode): every candidate
/// then competes on school priority alone.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

#[async_trait]
impl DistanceProvider for FixedDistance {
    async fn distance_km(&self, _from: &str, _to: &str) -> Result<f64, DomainError> {
        Ok(self.0)
    }
}
