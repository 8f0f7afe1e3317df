use thiserror::Error;

/// Failure of a [`WeatherSource`](crate::WeatherSource) fetch.
///
/// The mock source only ever produces `NotFound`; the remaining variants are
/// there for sources backed by a real transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City not found: '{city}'")]
    NotFound { city: String },

    #[error("Weather request timed out")]
    Timeout,

    #[error("Weather transport failed: {0}")]
    Transport(String),

    #[error("Invalid weather data: {0}")]
    Invalid(String),
}
