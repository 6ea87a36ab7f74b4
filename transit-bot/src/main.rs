//! Binary crate for the transit route bot.
//!
//! This crate focuses on:
//! - Wiring configuration and external collaborators together
//! - Handling gateway commands
//! - Rendering the status page

use std::sync::Arc;

use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transit_core::{Config, RequestPipeline, WeatherProbe, provider};

mod commands;
mod stats;
mod status;

use stats::SharedStats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    // Required credentials fail here, before the gateway connects. The
    // weather key is optional: without it every observation is "moderate".
    let token = config.bot_token()?.to_owned();
    let completion = provider::default_provider_from_config(&config)?;
    let weather = WeatherProbe::new(config.weather_api_key().map(str::to_owned));

    let pipeline = Arc::new(RequestPipeline::new(weather, completion));
    let stats = SharedStats::default();
    let home_city = config.home_city.clone();

    info!("starting transit bot, home city {}", home_city);

    let bot = Bot::new(token);
    commands::dispatch(bot, pipeline, stats, home_city).await;

    Ok(())
}
