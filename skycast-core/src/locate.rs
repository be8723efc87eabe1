//! One-shot geolocation.
//!
//! Positioning is an external collaborator: it either reports a coordinate
//! pair or fails, and the session falls back to the default city on any
//! failure. The trait keeps the session testable without a network.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::model::Coordinates;

const IP_API_ENDPOINT: &str = "http://ip-api.com/json";
const LOCATE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("location lookup refused")]
    Denied,
    #[error("location service unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location lookup failed: {0}")]
    Other(String),
}

/// A one-shot position source: succeeds with coordinates or fails, no retry.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Approximate position from the caller's public IP address.
///
/// Free endpoint, no credential. Good enough to pick a city for the first
/// display; not a substitute for real positioning hardware.
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    message: Option<String>,
}

impl IpLocator {
    pub fn new() -> Result<Self, LocateError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(LOCATE_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocateError::Other(e.to_string()))?;

        Ok(Self { http, endpoint: IP_API_ENDPOINT.to_string() })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        info!("looking up position by IP");

        let response = self.http.get(&self.endpoint).send().await.map_err(|e| {
            if e.is_timeout() { LocateError::Timeout } else { LocateError::Unavailable }
        })?;

        if !response.status().is_success() {
            return Err(LocateError::Unavailable);
        }

        let parsed: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocateError::Other(e.to_string()))?;

        if parsed.status != "success" {
            let reason = parsed.message.unwrap_or_else(|| parsed.status.clone());
            return Err(LocateError::Other(reason));
        }

        debug!(lat = parsed.lat, lon = parsed.lon, "position resolved");
        Ok(Coordinates { lat: parsed.lat, lon: parsed.lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_payload_carries_the_reason() {
        let parsed: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"private range"}"#)
                .expect("parses");
        assert_eq!(parsed.status, "fail");
        assert_eq!(parsed.message.as_deref(), Some("private range"));
    }

    #[test]
    fn success_payload_carries_coordinates() {
        let parsed: IpApiResponse =
            serde_json::from_str(r#"{"status":"success","lat":5.56,"lon":-0.2}"#)
                .expect("parses");
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.lat, 5.56);
        assert_eq!(parsed.lon, -0.2);
    }
}
