//! Core library for the `skycast` weather client.
//!
//! This crate defines:
//! - The OpenWeatherMap client and its error taxonomy
//! - Condition-code classification and display styling
//! - View-model assembly from a fetched snapshot
//! - The display session (state record, stale-response guard, fallbacks)
//! - Configuration & credential handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod client;
pub mod condition;
pub mod config;
pub mod locate;
pub mod model;
pub mod session;
pub mod view;

pub use client::{FetchError, WeatherClient};
pub use condition::{ConditionCategory, classify};
pub use config::Config;
pub use locate::{IpLocator, LocateError, Locator};
pub use model::{Coordinates, LocationQuery, Units, WeatherSnapshot};
pub use session::{DEFAULT_CITY, Session, ViewState};
pub use view::{DisplayModel, QUICK_CITIES, to_view_model};
