use std::{fmt, sync::Arc};

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use tracing::warn;

use weather_core::{
    Tab, WeatherSource, WeatherView,
    render::{self, PLACEHOLDER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    ShowTab(Tab),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search a city"),
            Action::ShowTab(tab) => write!(f, "Show {}", tab.title()),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Actions offered for the current state of the view.
fn actions(view: &WeatherView) -> Vec<Action> {
    let mut actions = Vec::new();
    if view.result().is_some() {
        actions.push(Action::ShowTab(view.tab().next()));
    }
    if view.can_submit() {
        actions.push(Action::Search);
    }
    actions.push(Action::Quit);
    actions
}

/// Run the interactive panel until the user quits or cancels a prompt.
pub async fn run(source: Arc<dyn WeatherSource>) -> Result<()> {
    let mut view = WeatherView::new();
    println!("{}", render::render(&view));

    loop {
        let action = match Select::new("What next?", actions(&view)).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Quit => break,
            Action::ShowTab(tab) => {
                view.select_tab(tab);
            }
            Action::Search => {
                let city = match Text::new("City:")
                    .with_placeholder(PLACEHOLDER)
                    .with_initial_value(view.query())
                    .prompt()
                {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err.into()),
                };

                view.set_query(city);
                search(&mut view, Arc::clone(&source)).await;
            }
        }

        println!("{}", render::render(&view));
    }

    Ok(())
}

/// Submit the view's query on a separate task, printing the loading panel
/// while it runs.
async fn search(view: &mut WeatherView, source: Arc<dyn WeatherSource>) {
    let ticket = view.begin_submit();
    println!("{}", render::render(view));

    let city = ticket.city().to_string();
    let handle = tokio::spawn(async move { source.fetch(&city).await });

    match handle.await {
        Ok(outcome) => {
            view.complete(&ticket, outcome);
        }
        Err(err) => {
            warn!(error = %err, "weather fetch task failed");
            view.abandon(&ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use weather_core::{FAILURE_MESSAGE, MockWeatherSource};

    fn source() -> Arc<dyn WeatherSource> {
        Arc::new(MockWeatherSource::new(Duration::from_millis(5)).with_seed(8))
    }

    #[test]
    fn fresh_view_offers_search_and_quit() {
        let view = WeatherView::new();
        assert_eq!(actions(&view), vec![Action::Search, Action::Quit]);
    }

    #[test]
    fn loading_view_hides_search() {
        let mut view = WeatherView::new();
        view.begin_submit();
        assert_eq!(actions(&view), vec![Action::Quit]);
    }

    #[tokio::test]
    async fn search_success_offers_other_tab() {
        let mut view = WeatherView::new();
        view.set_query("Paris");

        search(&mut view, source()).await;

        assert_eq!(view.result().map(|s| s.city()), Some("Paris"));
        assert_eq!(
            actions(&view),
            vec![Action::ShowTab(Tab::Forecast), Action::Search, Action::Quit]
        );
        assert_eq!(Action::ShowTab(Tab::Forecast).to_string(), "Show 7-Day Forecast");
    }

    #[tokio::test]
    async fn search_failure_shows_message() {
        let mut view = WeatherView::new();
        view.set_query("Error");

        search(&mut view, source()).await;

        assert!(!view.is_loading());
        assert_eq!(view.error(), Some(FAILURE_MESSAGE));
        assert_eq!(actions(&view), vec![Action::Search, Action::Quit]);
    }
}
