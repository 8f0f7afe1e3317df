//! Text rendering of a [`WeatherView`].
//!
//! Everything here is a pure function of the view, so the same state always
//! produces the same panel.

use crate::{
    model::{Condition, WeatherSnapshot},
    view::{Tab, ViewState, WeatherView},
};

pub const TITLE: &str = "Weather API";
pub const PLACEHOLDER: &str = "Enter city name";

const WIDTH: usize = 56;

/// Background treatment of the panel, keyed off the current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Sunny,
    Overcast,
    Rain,
    Neutral,
}

impl Backdrop {
    /// `None` means nothing has been fetched yet.
    pub fn for_condition(condition: Option<Condition>) -> Backdrop {
        match condition {
            Some(Condition::Sunny) => Backdrop::Sunny,
            Some(Condition::Cloudy) => Backdrop::Overcast,
            Some(Condition::Rainy) => Backdrop::Rain,
            None => Backdrop::Neutral,
        }
    }

    /// Character used for the panel frame.
    pub fn border(&self) -> char {
        match self {
            Backdrop::Sunny => '*',
            Backdrop::Overcast => '~',
            Backdrop::Rain => '\'',
            Backdrop::Neutral => '-',
        }
    }
}

pub fn icon(condition: Condition) -> &'static str {
    match condition {
        Condition::Sunny => "☀",
        Condition::Cloudy => "☁",
        Condition::Rainy => "🌧",
    }
}

pub fn backdrop(view: &WeatherView) -> Backdrop {
    Backdrop::for_condition(view.result().map(|s| s.current().condition))
}

/// Render the whole panel.
pub fn render(view: &WeatherView) -> String {
    let frame = backdrop(view).border().to_string().repeat(WIDTH);
    let mut lines = vec![frame.clone(), center(TITLE), String::new(), input_line(view)];

    if let ViewState::Failure(message) = view.state() {
        lines.push(String::new());
        lines.push(center(message));
    }

    if let Some(snapshot) = view.result() {
        lines.push(String::new());
        lines.push(tab_bar(view.tab()));
        lines.push(String::new());
        lines.extend(match view.tab() {
            Tab::Current => current_lines(snapshot),
            Tab::Forecast => forecast_lines(snapshot),
        });
    }

    lines.push(frame);
    lines.join("\n")
}

fn input_line(view: &WeatherView) -> String {
    let text = if view.query().is_empty() { PLACEHOLDER } else { view.query() };
    let button = if view.can_submit() { "[ Search ]" } else { "[ Loading... ]" };
    format!("[ {text:<36} ] {button}")
}

fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active { format!("[{}]", tab.title()) } else { format!(" {} ", tab.title()) }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn current_lines(snapshot: &WeatherSnapshot) -> Vec<String> {
    let current = snapshot.current();

    vec![
        snapshot.city().to_string(),
        format!("{}°C  {}", current.temperature, icon(current.condition)),
        current.condition.to_string(),
        String::new(),
        pair(
            &format!("Feels like: {}°C", current.feels_like),
            &format!("Humidity: {}%", current.humidity),
        ),
        pair(
            &format!("Wind: {} km/h", current.wind_speed),
            &format!("UV Index: {}", current.uv_index),
        ),
        pair(&format!("Sunrise: {}", current.sunrise), &format!("Sunset: {}", current.sunset)),
    ]
}

fn forecast_lines(snapshot: &WeatherSnapshot) -> Vec<String> {
    let mut lines = vec![Tab::Forecast.title().to_string()];

    for day in snapshot.forecast() {
        lines.push(format!(
            "  {:<12} {:>4}°C  {}  {}",
            day.label(),
            day.temperature,
            icon(day.condition),
            day.condition
        ));
    }

    lines
}

fn pair(left: &str, right: &str) -> String {
    format!("  {left:<26}{right}")
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    let pad = WIDTH.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, provider::mock::generate_snapshot, view::FAILURE_MESSAGE};
    use chrono::NaiveDate;
    use rand::{SeedableRng, rngs::StdRng};

    fn successful_view(city: &str) -> WeatherView {
        let mut view = WeatherView::new();
        view.set_query(city);
        let ticket = view.begin_submit();
        let start = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let snapshot = generate_snapshot(city, start, &mut StdRng::seed_from_u64(1));
        view.complete(&ticket, Ok(snapshot));
        view
    }

    #[test]
    fn pristine_panel_shows_placeholder_and_neutral_frame() {
        let view = WeatherView::new();
        let panel = render(&view);

        assert_eq!(backdrop(&view), Backdrop::Neutral);
        assert!(panel.starts_with(&"-".repeat(WIDTH)));
        assert!(panel.contains(TITLE));
        assert!(panel.contains(PLACEHOLDER));
        assert!(panel.contains("[ Search ]"));
        assert!(!panel.contains("Current Weather"));
    }

    #[test]
    fn loading_panel_disables_submit() {
        let mut view = WeatherView::new();
        view.set_query("Oslo");
        view.begin_submit();

        let panel = render(&view);
        assert!(panel.contains("[ Loading... ]"));
        assert!(panel.contains("Oslo"));
        assert!(!panel.contains("[ Search ]"));
    }

    #[test]
    fn failure_panel_shows_only_the_message() {
        let mut view = WeatherView::new();
        view.set_query("error");
        let ticket = view.begin_submit();
        view.complete(&ticket, Err(FetchError::NotFound { city: "error".into() }));

        let panel = render(&view);
        assert!(panel.contains(FAILURE_MESSAGE));
        assert!(!panel.contains("City not found"));
        assert!(!panel.contains("Current Weather"));
    }

    #[test]
    fn success_panel_shows_current_tab_by_default() {
        let view = successful_view("Paris");
        let snapshot = view.result().unwrap();
        let panel = render(&view);

        assert!(panel.contains("[Current Weather]"));
        assert!(panel.contains("Paris"));
        assert!(panel.contains(&format!("Humidity: {}%", snapshot.current().humidity)));
        assert!(panel.contains("Sunrise: 6:30 AM"));
        assert!(panel.contains("Sunset: 8:15 PM"));
        assert!(!panel.contains(FAILURE_MESSAGE));

        let border = backdrop(&view).border();
        assert!(panel.ends_with(&border.to_string().repeat(WIDTH)));
    }

    #[test]
    fn forecast_tab_lists_seven_days() {
        let mut view = successful_view("Paris");
        view.select_tab(Tab::Forecast);

        let panel = render(&view);
        assert!(panel.contains("[7-Day Forecast]"));

        let snapshot = view.result().unwrap();
        for day in snapshot.forecast() {
            assert!(panel.contains(&day.label()));
        }
        assert!(panel.contains("Sun, Oct 18"));
        assert!(panel.contains("Sat, Oct 24"));
    }

    #[test]
    fn backdrop_follows_condition() {
        assert_eq!(Backdrop::for_condition(Some(Condition::Sunny)), Backdrop::Sunny);
        assert_eq!(Backdrop::for_condition(Some(Condition::Cloudy)), Backdrop::Overcast);
        assert_eq!(Backdrop::for_condition(Some(Condition::Rainy)), Backdrop::Rain);
        assert_eq!(Backdrop::for_condition(None), Backdrop::Neutral);
    }
}
