use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::sync::Arc;
use tracing::debug;

use weather_core::{
    Config, FAILURE_MESSAGE, Tab, ViewState, WeatherView, provider::default_source_from_config,
    render,
};

use crate::panel;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Mock weather panel")]
pub struct Cli {
    /// Override the artificial latency of the mock source, in milliseconds.
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Override the RNG seed, making the mock data reproducible.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the weather source (latency, seed).
    Configure,

    /// Fetch weather for a city once and print the panel.
    Show {
        /// City name; any text is accepted.
        city: String,

        /// Which tab to print: "current" or "forecast".
        #[arg(long, default_value = "current", value_parser = parse_tab)]
        tab: Tab,

        /// Print the raw snapshot as JSON instead of the panel.
        #[arg(long)]
        json: bool,
    },

    /// Interactive panel: search, switch tabs, search again.
    Panel,
}

fn parse_tab(value: &str) -> Result<Tab, String> {
    Tab::try_from(value).map_err(|err| err.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        debug!(?config, "configuration resolved");

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { city, tab, json } => {
                let source = default_source_from_config(&config)?;
                let mut view = WeatherView::new();
                view.set_query(city);

                if let ViewState::Failure(_) = view.submit(&*source).await {
                    bail!(FAILURE_MESSAGE);
                }

                if json {
                    let snapshot = view.result().context("Weather request produced no result")?;
                    let out = serde_json::to_string_pretty(snapshot)
                        .context("Failed to serialize weather snapshot to JSON")?;
                    println!("{out}");
                } else {
                    view.select_tab(tab);
                    println!("{}", render::render(&view));
                }
            }
            Command::Panel => {
                let source = default_source_from_config(&config)?;
                panel::run(Arc::from(source)).await?;
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let delay_ms = CustomType::<u64>::new("Mock latency (ms):")
        .with_default(config.delay_ms)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()?;

    let seed = Text::new("RNG seed (leave empty for random data):")
        .with_initial_value(&config.seed.map(|s| s.to_string()).unwrap_or_default())
        .prompt()?;

    config.delay_ms = delay_ms;
    config.seed = match seed.trim() {
        "" => None,
        s => Some(s.parse().with_context(|| format!("Invalid seed '{s}'"))?),
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
