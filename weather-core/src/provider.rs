use crate::{Config, FetchError, WeatherSnapshot, provider::mock::MockWeatherSource};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Mock,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Mock => "mock",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::Mock]
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mock" => Ok(SourceId::Mock),
            _ => Err(anyhow::anyhow!("Unknown weather source '{value}'. Supported sources: mock.")),
        }
    }
}

/// Anything that can produce a [`WeatherSnapshot`] for a city name.
///
/// The view only talks to this trait, so an HTTP-backed source can replace
/// the mock without touching it.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct a source from config and explicit SourceId.
pub fn source_from_config(id: SourceId, config: &Config) -> Box<dyn WeatherSource> {
    match id {
        SourceId::Mock => {
            let mut source = MockWeatherSource::new(Duration::from_millis(config.delay_ms));
            if let Some(seed) = config.seed {
                source = source.with_seed(seed);
            }
            Box::new(source)
        }
    }
}

/// Construct the configured source, using the `source` field.
pub fn default_source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let id = config.source_id()?;
    Ok(source_from_config(id, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn source_id_as_str_roundtrip() {
        for id in SourceId::all() {
            let s = id.as_str();
            let parsed = SourceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_source_error() {
        let err = SourceId::try_from("openweather").unwrap_err();
        assert!(err.to_string().contains("Unknown weather source"));
    }

    #[test]
    fn default_source_from_config_rejects_unknown_source() {
        let cfg = Config { source: "doesnotexist".into(), ..Config::default() };
        let err = default_source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Unknown weather source"));
    }

    #[tokio::test(start_paused = true)]
    async fn default_source_from_config_builds_working_mock() {
        let cfg = Config { delay_ms: 5, seed: Some(3), ..Config::default() };
        let source = default_source_from_config(&cfg).expect("mock source should build");

        let snapshot = source.fetch("Oslo").await.expect("non-sentinel city should succeed");
        assert_eq!(snapshot.city(), "Oslo");
    }
}
