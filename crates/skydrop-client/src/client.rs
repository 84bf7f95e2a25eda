//! Web server HTTP client.

use crate::geo::{parse_landmarks, parse_no_fly_zones};
use crate::menus::{Menus, Restaurant};
use anyhow::{Context, Result};
use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use skydrop_core::{NoFlyZones, Point};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct LocationDetails {
    coordinates: Point,
}

/// HTTP client for the menus, locations and buildings web server.
pub struct WebClient {
    client: Client,
    base_url: String,
    locations: DashMap<String, Option<Point>>,
}

impl WebClient {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_base_url(format!("http://{}:{}", host, port))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locations: DashMap::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, path: &str, what: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "{} request failed: {} {}",
                what,
                status,
                body
            ));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", what))
    }

    /// Fetch every restaurant menu.
    pub async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>> {
        let body = self.get_text("/menus/menus.json", "menus").await?;
        serde_json::from_str(&body).context("Failed to parse menus response")
    }

    /// Fetch menus and index them for pricing.
    pub async fn fetch_menus(&self) -> Result<Menus> {
        let restaurants = self.fetch_restaurants().await?;
        debug!(restaurants = restaurants.len(), "Fetched menus");
        Ok(Menus::new(&restaurants))
    }

    pub async fn fetch_no_fly_zones(&self) -> Result<NoFlyZones> {
        let body = self
            .get_text("/buildings/no-fly-zones.geojson", "no-fly zones")
            .await?;
        let zones = parse_no_fly_zones(&body)?;
        debug!(zones = zones.len(), "Fetched no-fly zones");
        Ok(zones)
    }

    pub async fn fetch_landmarks(&self) -> Result<Vec<Point>> {
        let body = self
            .get_text("/buildings/landmarks.geojson", "landmarks")
            .await?;
        let landmarks = parse_landmarks(&body)?;
        debug!(landmarks = landmarks.len(), "Fetched landmarks");
        Ok(landmarks)
    }

    /// Resolve a three-word location to coordinates.
    ///
    /// Lookups are cached for the life of the client, misses included. A
    /// malformed name or a non-success status resolves to `Ok(None)`;
    /// transport failures are errors and are not cached.
    pub async fn translate_location(&self, words: &str) -> Result<Option<Point>> {
        if let Some(cached) = self.locations.get(words) {
            return Ok(*cached);
        }

        let Some(path) = words_path(words) else {
            warn!(words, "Malformed three-word location");
            self.locations.insert(words.to_string(), None);
            return Ok(None);
        };

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch location {}", words))?;

        let resolved = match response.status() {
            StatusCode::OK => {
                let details = response
                    .json::<LocationDetails>()
                    .await
                    .with_context(|| format!("Failed to parse location {}", words))?;
                Some(details.coordinates)
            }
            status => {
                warn!(words, %status, "Location lookup failed");
                None
            }
        };

        self.locations.insert(words.to_string(), resolved);
        Ok(resolved)
    }

    pub fn cached_locations(&self) -> usize {
        self.locations.len()
    }
}

/// Path of the details document for `first.second.third`.
pub(crate) fn words_path(words: &str) -> Option<String> {
    let parts: Vec<&str> = words.split('.').collect();
    match parts.as_slice() {
        [a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => {
            Some(format!("/words/{}/{}/{}/details.json", a, b, c))
        }
        _ => None,
    }
}
