use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use common::{Category, Month};
use std::time::Duration;

pub mod commands;

use commands::{history, predict};

use crate::client::HttpForecastApi;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "medipredict")]
#[command(about = "Monthly hospital case-count forecasts from the MediPredict service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the prediction service
    ///
    /// Overrides `api_base_url` from medipredict.toml.
    /// Example: http://localhost:5000/api
    #[arg(long, global = true, env = "MEDIPREDICT_API_BASE_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show average past case counts for a month
    History {
        /// Target month (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Request a monthly case-count forecast
    ///
    /// Past case counts are loaded first for reference; a failure there
    /// is reported but does not stop the prediction.
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Target month (1-12), defaults to the current month
    #[arg(short, long)]
    pub month: Option<Month>,

    /// Disease category: all, Dengue, Road_Accidents, Heart_Patients,
    /// Hadisi_Anthuru, Tuberculosis, Cold or Fever
    #[arg(short, long, default_value = "all")]
    pub category: Category,

    /// Relative humidity in percent
    #[arg(long, allow_hyphen_values = true)]
    pub humidity: Option<String>,

    /// Rainfall in millimetres
    #[arg(long, allow_hyphen_values = true)]
    pub rainfall: Option<String>,

    /// Temperature in degrees Celsius
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: Option<String>,

    /// Major festivals or public events take place this month
    #[arg(long)]
    pub festive: bool,

    /// Public awareness level between 0 and 1
    #[arg(long, default_value_t = 0.5)]
    pub awareness: f64,
}

impl Cli {
    pub async fn run(self, config: AppConfig) -> Result<()> {
        let base_url = self.api_url.unwrap_or(config.api_base_url);
        let api = HttpForecastApi::new(
            base_url.as_str(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        tracing::debug!("Prediction service: {}", base_url);

        match self.command {
            Commands::History { month } => {
                history(&api, month.unwrap_or_else(Month::current)).await?;
            }
            Commands::Predict(args) => {
                predict(&api, args).await?;
            }
        }
        Ok(())
    }
}
