use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    City, Config, SuggestionDebouncer, ViewState, WeatherProvider, WeatherSession,
    lookup_suggestions, provider_from_config,
};

use crate::{configure, prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Search a city and show its current weather and 5-day forecast"
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search interactively with live suggestions.
    Search,

    /// Show weather for the best match of a city name.
    Show {
        /// City name or prefix.
        query: String,

        /// Use the N-th suggestion instead of the first.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        pick: u16,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the cities matching a name.
    Suggest {
        /// City name or prefix.
        query: String,

        /// Print the suggestions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Edit endpoints and search settings.
    Configure {
        /// Write the default configuration instead of prompting.
        #[arg(long)]
        reset: bool,
    },
}

impl Cli {
    /// Prompts draw on stderr, so interactive runs only log errors by default.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self.command,
            Command::Search | Command::Configure { reset: false }
        )
    }

    /// Errors returned here are printed by `main`. A failed weather fetch is
    /// already shown as a banner and only turns into a failing exit code.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        if let Command::Configure { reset } = self.command {
            let path = tokio::task::spawn_blocking(move || configure::run(reset))
                .await
                .context("Configuration prompt panicked")??;
            println!("Configuration saved to {}", path.display());
            return Ok(ExitCode::SUCCESS);
        }

        let config = Config::load()?;
        let provider = provider_from_config(&config)?;

        match self.command {
            Command::Search => search(&config, provider).await.map(|()| ExitCode::SUCCESS),
            Command::Show { query, pick, json } => {
                show(&config, provider.as_ref(), &query, pick, json).await
            }
            Command::Suggest { query, json } => suggest(provider.as_ref(), &query, json)
                .await
                .map(|()| ExitCode::SUCCESS),
            Command::Configure { .. } => Ok(ExitCode::SUCCESS),
        }
    }
}

async fn suggest(provider: &dyn WeatherProvider, query: &str, json: bool) -> anyhow::Result<()> {
    let cities = lookup_suggestions(provider, query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&cities)?);
    } else if cities.is_empty() {
        eprintln!("{}", render::no_options_text(query));
    } else {
        print!("{}", render::suggestion_list(&cities));
    }

    Ok(())
}

fn pick_from(cities: Vec<City>, query: &str, pick: u16) -> anyhow::Result<City> {
    if cities.is_empty() {
        bail!("{} for '{query}'", render::no_options_text(query));
    }

    let available = cities.len();
    cities
        .into_iter()
        .nth(usize::from(pick) - 1)
        .ok_or_else(|| {
            anyhow!("Only {available} cities match '{query}'; --pick {pick} is out of range.")
        })
}

async fn show(
    config: &Config,
    provider: &dyn WeatherProvider,
    query: &str,
    pick: u16,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let city = pick_from(lookup_suggestions(provider, query).await, query, pick)?;
    tracing::info!(city = %city, pick, "selected city");

    let mut session = WeatherSession::new();
    let request = session.begin(city.clone());
    if !json {
        eprintln!("{}", render::view(&session.state(), &config.endpoints.icon_base_url));
    }

    let result = provider.get_weather(&city).await;
    session.complete(request, result);

    match &*session.state() {
        ViewState::Ready(snapshot) if json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Ready(_) => {
            print!("{}", render::view(&session.state(), &config.endpoints.icon_base_url));
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Failed { message } => {
            eprintln!("{}", render::error_banner(message));
            Ok(ExitCode::FAILURE)
        }
        ViewState::Idle | ViewState::Loading { .. } => {
            Err(anyhow!("Weather request did not complete"))
        }
    }
}

async fn search(config: &Config, provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let debouncer = Arc::new(SuggestionDebouncer::new(
        Arc::clone(&provider),
        config.search.debounce(),
    ));
    let mut session = WeatherSession::new();

    loop {
        let picker = Arc::clone(&debouncer);
        let runtime = tokio::runtime::Handle::current();
        let picked = tokio::task::spawn_blocking(move || prompt::pick_city(picker, runtime))
            .await
            .context("Search prompt panicked")??;

        let Some(city) = picked else {
            return Ok(());
        };

        tracing::info!(city = %city, "selected city");
        eprintln!("{}", render::loading_line(&city));
        let state = session.select_city(provider.as_ref(), city).await;

        match &*state {
            ViewState::Failed { message } => eprintln!("{}\n", render::error_banner(message)),
            other => println!("{}", render::view(other, &config.endpoints.icon_base_url)),
        }
    }
}
