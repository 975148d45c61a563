//! Command implementations for the AQI CLI.
//!
//! Each subcommand calls the backend through [`aqi_api::ApiClient`] and
//! prints the result or writes it to a CSV file, the same exports the
//! dashboard offers.

use aqi_api::{ApiClient, ApiConfig, LogNotifier};
use clap::Subcommand;
use std::rc::Rc;

pub mod model;
pub mod output;
pub mod query;

pub use output::CityArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Show the latest station readings
    Realtime {
        #[command(flatten)]
        city: CityArgs,

        /// Maximum number of stations
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },

    /// Export historical AQI records to CSV
    Historical {
        #[command(flatten)]
        city: CityArgs,

        /// First day, YYYY-MM-DD (default: 30 days ago)
        #[arg(long)]
        start: Option<String>,

        /// Last day, YYYY-MM-DD (default: today)
        #[arg(long)]
        end: Option<String>,

        /// Output path; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export the 7-day forecast to CSV
    Forecast {
        #[command(flatten)]
        city: CityArgs,

        /// Ask the backend to generate forecasts first
        #[arg(long)]
        generate: bool,

        /// Output path; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Health recommendations for an AQI value
    Health {
        aqi: u32,

        /// Include advice for sensitive groups
        #[arg(long)]
        sensitive: bool,
    },

    /// Ask the backend to refresh realtime data
    Refresh {
        /// Cities to refresh; all known cities when omitted
        cities: Vec<String>,
    },

    /// Show forecast model metadata
    ModelInfo,

    /// Train the forecast model
    Train {
        /// Train on the backend's sample data set
        #[arg(long)]
        sample_data: bool,
    },

    /// Show the model's feature importance
    FeatureImportance,

    /// Predict the AQI for a city
    Predict {
        #[command(flatten)]
        city: CityArgs,
    },
}

pub async fn run(config: ApiConfig, command: Command) -> anyhow::Result<()> {
    let client = ApiClient::new(config, Rc::new(LogNotifier))?;
    match command {
        Command::Realtime { city, limit } => query::run_realtime(&client, &city, limit).await,
        Command::Historical {
            city,
            start,
            end,
            output,
        } => {
            query::run_historical(&client, &city, start.as_deref(), end.as_deref(), output.as_deref())
                .await
        }
        Command::Forecast {
            city,
            generate,
            output,
        } => query::run_forecast(&client, &city, generate, output.as_deref()).await,
        Command::Health { aqi, sensitive } => query::run_health(&client, aqi, sensitive).await,
        Command::Refresh { cities } => model::run_refresh(&client, &cities).await,
        Command::ModelInfo => model::run_model_info(&client).await,
        Command::Train { sample_data } => model::run_train(&client, sample_data).await,
        Command::FeatureImportance => model::run_feature_importance(&client).await,
        Command::Predict { city } => model::run_predict(&client, &city).await,
    }
}
