//! Nominatim (OpenStreetMap) geocoding and the distance provider built on it.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{Coordinates, DistanceProvider, DomainError};

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// First search hit for `address`, `None` if Nominatim knows nothing.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, String> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !res.status().is_success() {
            return Err(format!("Nominatim API error: {}", res.status()));
        }

        let places: Vec<NominatimPlace> = res
            .json()
            .await
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        let Some(place) = places.first() else {
            return Ok(None);
        };

        let lat = place
            .lat
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude '{}': {}", place.lat, e))?;
        let lon = place
            .lon
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude '{}': {}", place.lon, e))?;

        Ok(Some(Coordinates::new(lat, lon)))
    }
}

/// Geocodes both addresses and returns their haversine distance.
///
/// Results (including "not found") are cached per normalized address for the
/// lifetime of the provider; transport errors are not cached.
pub struct NominatimDistance {
    client: NominatimClient,
    cache: DashMap<String, Option<Coordinates>>,
}

impl NominatimDistance {
    pub fn new(client: NominatimClient) -> Self {
        Self {
            client,
            cache: DashMap::new(),
        }
    }

    async fn locate(&self, address: &str) -> Result<Coordinates, DomainError> {
        let key = address.trim().to_lowercase();

        let cached = self.cache.get(&key).map(|entry| *entry.value());
        let found = match cached {
            Some(found) => found,
            None => {
                let found = self
                    .client
                    .geocode(address.trim())
                    .await
                    .map_err(DomainError::External)?;
                tracing::debug!("Geocoded '{}' -> {:?}", key, found);
                self.cache.insert(key, found);
                found
            }
        };

        found.ok_or_else(|| {
            DomainError::Validation(format!("Address could not be geocoded: {}", address))
        })
    }
}

#[async_trait]
impl DistanceProvider for NominatimDistance {
    async fn distance_km(&self, from: &str, to: &str) -> Result<f64, DomainError> {
        let a = self.locate(from).await?;
        let b = self.locate(to).await?;
        Ok(a.haversine_km(&b))
    }
}
