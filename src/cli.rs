use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Settings;
use commands::{export_table, predict, serve};

#[derive(Parser)]
#[command(name = "windcast")]
#[command(about = "Wind-speed forecast dashboard backed by a pre-trained seasonal ARIMA model")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML, JSON or TOML)
    ///
    /// Without this flag `windcast.{yaml,json,toml}` in the working directory
    /// is read when present. Every key can also be set through the
    /// environment, e.g. WINDCAST__MODEL_PATH or WINDCAST__HORIZON__START.
    #[arg(short, long, global = true, env = "WINDCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serialized model artifact (.json, .yaml)
    #[arg(short, long, global = true)]
    pub model_path: Option<PathBuf>,

    /// First date of the forecast horizon (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub start_date: Option<NaiveDate>,

    /// Last date of the forecast horizon (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub end_date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Print the forecast interval for a single date
    Predict {
        /// Date to look up (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Write the full forecast table as CSV
    ///
    /// One row per native model step with timestamp, date, lower and upper columns.
    Export {
        /// Output file; `-` writes to stdout
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
}

impl Cli {
    /// Settings from config sources with command line overrides applied
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(model_path) = &self.model_path {
            settings.model_path = model_path.clone();
        }
        if let Some(start) = self.start_date {
            settings.horizon.start = start;
        }
        if let Some(end) = self.end_date {
            settings.horizon.end = end;
        }
        if let Commands::Serve {
            bind_address: Some(bind_address),
        } = &self.command
        {
            settings.bind_address = bind_address.clone();
        }

        Ok(settings)
    }

    pub async fn run(self) -> Result<()> {
        let settings = self.settings()?;
        match self.command {
            Commands::Serve { .. } => {
                serve(&settings).await?;
            }
            Commands::Predict { date } => {
                predict(&settings, date, &mut std::io::stdout().lock())?;
            }
            Commands::Export { output } => {
                export_table(&settings, &output)?;
            }
        }
        Ok(())
    }
}
