use crate::domain::ports::{GeoResult, Geocoder};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

/// Nominatim-style forward geocoder. Coordinates arrive as strings.
#[derive(Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

pub struct HttpGeocoder {
    client: Client,
    api_url: String,
}

impl HttpGeocoder {
    pub fn new(api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeoResult>, AppError> {
        let res = self.client.get(&self.api_url)
            .query(&[("q", query), ("format", "json"), ("limit", "3")])
            .header("User-Agent", "encore-backend")
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Geocoder connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            return Err(AppError::Upstream(format!("Geocoder failed. Status: {}", res.status())));
        }

        let hits: Vec<GeocodeHit> = res.json().await
            .map_err(|e| AppError::Upstream(format!("Geocoder returned invalid JSON: {}", e)))?;

        Ok(hits
            .into_iter()
            .filter_map(|h| {
                let lat = h.lat.parse().ok()?;
                let lon = h.lon.parse().ok()?;
                Some(GeoResult { lat, lon })
            })
            .collect())
    }
}
