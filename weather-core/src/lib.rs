//! Core library for the `weather` panel.
//!
//! This crate defines:
//! - Shared domain models (snapshot, current conditions, forecast)
//! - Abstraction over weather sources, plus the mock source
//! - The panel state machine and its text rendering
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use model::{Condition, CurrentConditions, ForecastDay, WeatherSnapshot};
pub use provider::{SourceId, WeatherSource, mock::MockWeatherSource};
pub use view::{FAILURE_MESSAGE, Tab, Ticket, ViewState, WeatherView};
