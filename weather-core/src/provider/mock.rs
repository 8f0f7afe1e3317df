use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{sync::Mutex, time::Duration};
use tracing::{debug, warn};

use crate::model::{Condition, CurrentConditions, FORECAST_DAYS, ForecastDay, WeatherSnapshot};
use crate::{FetchError, provider::WeatherSource};

/// City name that always fails with [`FetchError::NotFound`], compared
/// case-insensitively.
pub const SENTINEL_CITY: &str = "error";

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

const SUNRISE: &str = "6:30 AM";
const SUNSET: &str = "8:15 PM";

/// Stand-in for a real weather API: sleeps, then returns random data.
#[derive(Debug)]
pub struct MockWeatherSource {
    delay: Duration,
    start_date: Option<NaiveDate>,
    rng: Mutex<StdRng>,
}

impl MockWeatherSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay, start_date: None, rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Make the generated values reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Pin the first forecast day instead of using the local date at call time.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }
}

impl Default for MockWeatherSource {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl WeatherSource for MockWeatherSource {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        debug!(city, delay = ?self.delay, "mock fetch started");
        let today = self.start_date.unwrap_or_else(|| Local::now().date_naive());

        tokio::time::sleep(self.delay).await;

        if city.to_lowercase() == SENTINEL_CITY {
            warn!(city, "mock source rejected sentinel city");
            return Err(FetchError::NotFound { city: city.to_string() });
        }

        let snapshot = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            generate_snapshot(city, today, &mut *rng)
        };

        debug!(city, condition = %snapshot.current().condition, "mock fetch finished");
        Ok(snapshot)
    }
}

/// Build a random snapshot for `city` with a forecast starting on `today`.
pub fn generate_snapshot<R: Rng + ?Sized>(city: &str, today: NaiveDate, rng: &mut R) -> WeatherSnapshot {
    let forecast = (0..FORECAST_DAYS as u64)
        .map(|offset| ForecastDay {
            date: today.checked_add_days(Days::new(offset)).unwrap_or(NaiveDate::MAX),
            temperature: rng.gen_range(10..30),
            condition: random_condition(rng),
        })
        .collect();

    let current = CurrentConditions {
        temperature: rng.gen_range(10..40),
        condition: random_condition(rng),
        humidity: rng.gen_range(40..100),
        wind_speed: rng.gen_range(5..25),
        feels_like: rng.gen_range(10..40),
        uv_index: rng.gen_range(0..11),
        sunrise: SUNRISE.to_string(),
        sunset: SUNSET.to_string(),
    };

    WeatherSnapshot::new(city.to_string(), current, forecast)
}

fn random_condition<R: Rng + ?Sized>(rng: &mut R) -> Condition {
    Condition::ALL[rng.gen_range(0..Condition::ALL.len())]
}
