
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::Coordinates;
use crate::config::GeocoderConfig;

/// Address lookup against a Nominatim-compatible search API
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: Url,
    user_agent: String,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub coordinates: Coordinates,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimGeocoder {
    #[inline]
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid geocoder URL: {}", config.base_url))?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            user_agent: config.user_agent.clone(),
            agent,
        })
    }

    /// Search URL asking for the single best match as JSON
    #[inline]
    pub fn search_url(&self, address: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search")
            .context("Failed to build geocoder search URL")?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        Ok(url)
    }

    /// Resolve an address; `Ok(None)` when the service knows no match
    #[inline]
    pub fn geocode(&self, address: &str) -> Result<Option<GeocodedLocation>> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let url = self.search_url(address)?;
        debug!("Geocoding {:?} via {}", address, url);

        let body = self
            .agent
            .get(url.as_str())
            .header("User-Agent", &self.user_agent)
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .with_context(|| format!("Geocoding request failed for {address:?}"))?;

        let location = parse_search_response(&body)?;
        match &location {
            Some(found) => info!(
                "Geocoded {:?} to ({}, {})",
                address, found.coordinates.latitude, found.coordinates.longitude
            ),
            None => info!("No geocoding match for {:?}", address),
        }
        Ok(location)
    }
}

/// First result of a search response, with coordinates parsed from strings
fn parse_search_response(body: &str) -> Result<Option<GeocodedLocation>> {
    let results: Vec<SearchResult> =
        serde_json::from_str(body).context("Failed to parse geocoder response")?;

    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    let latitude: f64 = first
        .lat
        .parse()
        .with_context(|| format!("Invalid latitude in geocoder response: {}", first.lat))?;
    let longitude: f64 = first
        .lon
        .parse()
        .with_context(|| format!("Invalid longitude in geocoder response: {}", first.lon))?;

    Ok(Some(GeocodedLocation {
        coordinates: Coordinates::new(latitude, longitude),
        label: first.display_name,
    }))
}
