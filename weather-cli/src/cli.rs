use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text, validator::Validation};
use std::{net::SocketAddr, path::PathBuf};
use weather_dashboard_core::{Config, dashboard, provider_from_config};

use crate::{output, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard for a single location")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set location, contact address and timezone.
    Configure,

    /// Fetch the dashboard once and print it.
    Show,

    /// Serve the dashboard page over HTTP.
    Serve {
        /// Listen address; overrides `bind` from the config file.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config: config_path, command } = self;

        let config = match &config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match command {
            Command::Configure => {
                let updated = prompt_config(config)?;
                let saved_to = match config_path {
                    Some(path) => {
                        updated.save_to(&path)?;
                        path
                    }
                    None => updated.save()?,
                };
                println!("Configuration saved to {}", saved_to.display());
            }
            Command::Show => {
                let ctx = config.context()?;
                let provider = provider_from_config(&config)?;
                let board = dashboard::load(provider.as_ref(), &ctx)
                    .await
                    .context("Failed to load weather data")?;
                print!("{}", output::render(&board));
            }
            Command::Serve { bind } => {
                let addr = bind.unwrap_or(config.bind);
                server::run(addr, config).await?;
            }
        }

        Ok(())
    }
}

fn prompt_config(mut cfg: Config) -> anyhow::Result<Config> {
    let name = Text::new("Location name:")
        .with_default(&cfg.location.name)
        .prompt()?;

    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(cfg.location.latitude)
        .with_error_message("Please type a decimal number")
        .with_validator(|v: &f64| {
            Ok(if (-90.0..=90.0).contains(v) {
                Validation::Valid
            } else {
                Validation::Invalid("Latitude must be between -90 and 90".into())
            })
        })
        .prompt()?;

    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(cfg.location.longitude)
        .with_error_message("Please type a decimal number")
        .with_validator(|v: &f64| {
            Ok(if (-180.0..=180.0).contains(v) {
                Validation::Valid
            } else {
                Validation::Invalid("Longitude must be between -180 and 180".into())
            })
        })
        .prompt()?;

    let contact = Text::new("Contact e-mail (sent to api.weather.gov):")
        .with_default(&cfg.contact)
        .prompt()?;

    let timezone = Text::new("Timezone:")
        .with_default(&cfg.timezone)
        .with_help_message("IANA name, e.g. America/New_York")
        .with_validator(|tz: &str| {
            Ok(match tz.parse::<chrono_tz::Tz>() {
                Ok(_) => Validation::Valid,
                Err(_) => Validation::Invalid(format!("Unknown timezone '{tz}'").into()),
            })
        })
        .prompt()?;

    cfg.location.name = name;
    cfg.location.latitude = latitude;
    cfg.location.longitude = longitude;
    cfg.contact = contact;
    cfg.timezone = timezone;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_bind_override() {
        let cli = Cli::parse_from(["weather-dashboard", "serve", "--bind", "0.0.0.0:8080"]);

        match cli.command {
            Command::Serve { bind } => assert_eq!(bind, Some(SocketAddr::from(([0, 0, 0, 0], 8080)))),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["weather-dashboard", "show", "--config", "/tmp/wx.toml"]);

        assert!(matches!(cli.command, Command::Show));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/wx.toml")));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["weather-dashboard", "forecast"]).is_err());
    }
}
