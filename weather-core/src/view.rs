//! State of the weather panel.
//!
//! The panel is either idle, waiting on a fetch, showing a snapshot, or
//! showing the failure message. A submission always passes through
//! `Loading`, and every submission is tagged with a sequence number so a
//! response that arrives after a newer submission is dropped.

use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{FetchError, WeatherSnapshot, provider::WeatherSource};

/// The only text shown to the user when a fetch fails.
pub const FAILURE_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(Arc<WeatherSnapshot>),
    Failure(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Current,
    Forecast,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Current, Tab::Forecast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Current => "current",
            Tab::Forecast => "forecast",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Current => "Current Weather",
            Tab::Forecast => "7-Day Forecast",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Current => Tab::Forecast,
            Tab::Forecast => Tab::Current,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Tab {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "current" => Ok(Tab::Current),
            "forecast" => Ok(Tab::Forecast),
            _ => Err(anyhow::anyhow!("Unknown tab '{value}'. Supported tabs: current, forecast.")),
        }
    }
}

/// Handle for one submission. Hand it back to [`WeatherView::complete`]
/// together with the fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    city: String,
}

impl Ticket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Default)]
pub struct WeatherView {
    query: String,
    state: ViewState,
    tab: Tab,
    latest: u64,
}

impl WeatherView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn result(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            ViewState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tabs. Tabs only exist while a snapshot is shown, so this is a
    /// no-op otherwise.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.result().is_none() {
            return false;
        }
        self.tab = tab;
        true
    }

    pub fn next_tab(&mut self) -> bool {
        self.select_tab(self.tab.next())
    }

    /// Enter `Loading` for the current query, dropping any shown result or
    /// error. Allowed from every state; an older in-flight request is
    /// superseded.
    pub fn begin_submit(&mut self) -> Ticket {
        self.latest += 1;
        self.state = ViewState::Loading;
        self.tab = Tab::Current;

        debug!(seq = self.latest, city = %self.query, "weather request submitted");
        Ticket { seq: self.latest, city: self.query.clone() }
    }

    /// Apply the outcome of the request behind `ticket`.
    ///
    /// Returns `false` and leaves the state alone when a newer submission has
    /// been made since.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        outcome: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(seq = ticket.seq, latest = self.latest, "dropping stale weather response");
            return false;
        }

        self.state = match outcome {
            Ok(snapshot) => ViewState::Success(Arc::new(snapshot)),
            Err(err) => {
                warn!(seq = ticket.seq, city = %ticket.city, error = %err, "weather fetch failed");
                ViewState::Failure(FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Give up on the request behind `ticket` without an outcome.
    pub fn abandon(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        warn!(seq = ticket.seq, city = %ticket.city, "weather request ended without a result");
        self.state = ViewState::Failure(FAILURE_MESSAGE.to_string());
        true
    }

    /// Submit the current query to `source` and wait for the outcome.
    ///
    /// `Loading` is left on every exit path: if the fetch panics or this
    /// future is dropped early, the view ends up in `Failure`.
    pub async fn submit<S>(&mut self, source: &S) -> &ViewState
    where
        S: WeatherSource + ?Sized,
    {
        let ticket = self.begin_submit();
        let guard = LoadingGuard { view: &mut *self, ticket, settled: false };

        let outcome = source.fetch(guard.ticket.city()).await;
        guard.settle(outcome);

        &self.state
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.latest && self.is_loading()
    }
}

struct LoadingGuard<'a> {
    view: &'a mut WeatherView,
    ticket: Ticket,
    settled: bool,
}

impl LoadingGuard<'_> {
    fn settle(mut self, outcome: Result<WeatherSnapshot, FetchError>) {
        self.settled = true;
        self.view.complete(&self.ticket, outcome);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.view.abandon(&self.ticket);
        }
    }
}
