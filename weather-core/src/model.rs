use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Number of entries in every forecast, one per day starting today.
pub const FORECAST_DAYS: usize = 7;

const DATE_LABEL_FORMAT: &str = "%a, %b %-d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Sunny, Condition::Cloudy, Condition::Rainy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "sunny" => Ok(Condition::Sunny),
            "cloudy" => Ok(Condition::Cloudy),
            "rainy" => Ok(Condition::Rainy),
            _ => Err(anyhow::anyhow!(
                "Unknown condition '{value}'. Supported conditions: Sunny, Cloudy, Rainy."
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: i32,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_speed: u8,
    pub feels_like: i32,
    pub uv_index: u8,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// Serialized as its label, e.g. `Sat, Oct 18`.
    #[serde(serialize_with = "serialize_date_label")]
    pub date: NaiveDate,
    pub temperature: i32,
    pub condition: Condition,
}

impl ForecastDay {
    /// Short weekday, month and day of month, e.g. `Sat, Oct 18`.
    pub fn label(&self) -> String {
        self.date.format(DATE_LABEL_FORMAT).to_string()
    }
}

fn serialize_date_label<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_LABEL_FORMAT))
}

/// Complete result of one successful fetch.
///
/// Built once by a source and never mutated afterwards; the view replaces it
/// wholesale on the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    city: String,
    current: CurrentConditions,
    forecast: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    pub fn new(city: String, current: CurrentConditions, forecast: Vec<ForecastDay>) -> Self {
        Self { city, current, forecast }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn current(&self) -> &CurrentConditions {
        &self.current
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }
}
