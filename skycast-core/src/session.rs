//! Display session: one view-state slot and the request flow that feeds it.
//!
//! The UI state (loading flag, current model, error message) lives in a
//! single immutable record that is replaced wholesale on every transition,
//! so state changes can be tested without any rendering surface. Responses
//! are matched against a monotonically increasing request token and stale
//! completions are discarded instead of overwriting a newer result.

use tracing::{debug, warn};

use crate::client::{FetchError, WeatherClient};
use crate::locate::Locator;
use crate::model::{LocationQuery, WeatherSnapshot};
use crate::view::{DisplayModel, to_view_model};

/// City queried when geolocation fails and nothing else was asked for.
pub const DEFAULT_CITY: &str = "Accra";

/// The whole of the UI-visible state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub loading: bool,
    pub model: Option<DisplayModel>,
    pub error: Option<String>,
}

/// Identifies one request within a session. Only the latest token may
/// publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

pub struct Session {
    client: WeatherClient,
    state: ViewState,
    seq: u64,
    default_city: String,
}

impl Session {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
            seq: 0,
            default_city: DEFAULT_CITY.to_string(),
        }
    }

    /// Override the geolocation-failure fallback city.
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Enter the loading state and claim the next request token.
    ///
    /// The previous model stays visible while the request is in flight; a
    /// previous error is cleared.
    pub fn begin(&mut self) -> RequestToken {
        self.seq += 1;
        self.state = ViewState {
            loading: true,
            model: self.state.model.clone(),
            error: None,
        };
        RequestToken(self.seq)
    }

    /// Publish the outcome of the request identified by `token`.
    ///
    /// Clears the loading flag on success and failure alike. A failure keeps
    /// the previously displayed model next to the error message. Returns
    /// whether the result was applied; a stale token is discarded untouched.
    pub fn finish(
        &mut self,
        token: RequestToken,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if token.0 != self.seq {
            warn!(token = token.0, latest = self.seq, "discarding stale response");
            return false;
        }

        self.state = match result {
            Ok(snapshot) => ViewState {
                loading: false,
                model: Some(to_view_model(&snapshot)),
                error: None,
            },
            Err(err) => ViewState {
                loading: false,
                model: self.state.model.clone(),
                error: Some(err.to_string()),
            },
        };

        true
    }

    /// Run one fetch to completion and publish its outcome.
    pub async fn fetch(&mut self, query: &LocationQuery) -> &ViewState {
        let token = self.begin();
        let result = self.client.fetch(query).await;
        self.finish(token, result);
        &self.state
    }

    /// Fetch by free-text city name.
    pub async fn search(&mut self, name: &str) -> &ViewState {
        self.fetch(&LocationQuery::name(name)).await
    }

    /// Initial flow: locate once, fetch for the reported coordinates, and on
    /// any locate failure fall back to the default city.
    pub async fn start(&mut self, locator: &dyn Locator) -> &ViewState {
        match locator.locate().await {
            Ok(position) => {
                debug!(lat = position.lat, lon = position.lon, "starting from located position");
                self.fetch(&LocationQuery::Coordinates { lat: position.lat, lon: position.lon })
                    .await
            }
            Err(err) => {
                warn!(%err, city = %self.default_city, "geolocation failed, using default city");
                let city = self.default_city.clone();
                self.search(&city).await
            }
        }
    }
}
