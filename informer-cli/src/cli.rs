use std::{
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use informer_core::{
    Config, RequestEnvelope, Skill,
    envelope::{CITY_SLOT, GET_WEATHER_INTENT},
};
use inquire::Text;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "informer", version, about = "Weather Informer voice skill runner")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a request envelope through the skill and print the response envelope.
    Invoke {
        /// JSON file with the request envelope; reads stdin when absent.
        file: Option<PathBuf>,
    },

    /// Ask for the current weather in a city and print what the skill would say.
    Ask {
        /// City name, e.g. "Atlanta". Omit to hear the prompt for a city.
        city: Option<String>,
    },

    /// Interactively edit supported cities and endpoints.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Invoke { file } => {
                let json = invoke_json(self.config.as_deref(), file.as_deref()).await?;
                println!("{json}");
            }
            Command::Ask { city } => {
                let skill = build_skill(self.config.as_deref())?;
                let envelope = match city {
                    Some(city) => {
                        RequestEnvelope::intent(GET_WEATHER_INTENT).with_slot(CITY_SLOT, &city)
                    }
                    None => RequestEnvelope::intent(GET_WEATHER_INTENT),
                };

                let response = skill.invoke(&envelope).await;
                println!("{}", response.speech_text());
            }
            Command::Configure => configure(self.config.as_deref())?,
            Command::ConfigPath => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                println!("{}", path.display());
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn build_skill(config_path: Option<&Path>) -> Result<Skill> {
    let config = Arc::new(load_config(config_path)?);
    tracing::debug!("Supported cities: {}", config.supported_cities.join(", "));

    Skill::from_config(config).context("Failed to set up the weather source")
}

/// Run one request envelope and render the response envelope as pretty JSON.
async fn invoke_json(config_path: Option<&Path>, file: Option<&Path>) -> Result<String> {
    let skill = build_skill(config_path)?;
    let envelope = read_envelope(file)?;

    let response = skill.invoke_envelope(&envelope).await;
    serde_json::to_string_pretty(&response).context("Failed to serialize response envelope")
}

fn read_envelope(file: Option<&Path>) -> Result<RequestEnvelope> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Failed to parse request envelope JSON")
}

fn configure(config_path: Option<&Path>) -> Result<()> {
    let current = match config_path {
        Some(path) if !path.exists() => Config::default(),
        _ => load_config(config_path)?,
    };

    let cities = Text::new("Supported cities (comma separated):")
        .with_default(&current.supported_cities.join(", "))
        .prompt()?;
    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&current.geocoding_url)
        .prompt()?;
    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&current.forecast_url)
        .prompt()?;
    let timeout = Text::new("Request timeout in seconds (blank for none):")
        .with_default(
            &current
                .request_timeout_secs
                .map(|t| t.to_string())
                .unwrap_or_default(),
        )
        .prompt()?;

    let config = Config {
        supported_cities: parse_cities(&cities),
        geocoding_url: geocoding_url.trim().to_string(),
        forecast_url: forecast_url.trim().to_string(),
        request_timeout_secs: parse_timeout(&timeout)?,
    };

    match config_path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }

    println!(
        "Saved configuration with {} supported cities.",
        config.supported_cities.len()
    );
    Ok(())
}

fn parse_cities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_timeout(input: &str) -> Result<Option<u64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let secs = input
        .parse()
        .with_context(|| format!("Invalid timeout '{input}', expected whole seconds"))?;
    Ok(Some(secs))
}
