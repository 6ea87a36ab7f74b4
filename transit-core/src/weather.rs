use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::model::WeatherCondition;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Queries OpenWeather for the current condition in a city.
///
/// A probe without an API key is valid: every observation degrades to
/// [`WeatherCondition::Moderate`].
#[derive(Debug, Clone)]
pub struct WeatherProbe {
    api_key: Option<String>,
    http: Client,
}

impl WeatherProbe {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Current condition for `city`. Failures never propagate: a missing
    /// observation must not block route handling.
    pub async fn observe(&self, city: &str) -> WeatherCondition {
        match self.fetch(city).await {
            Ok(condition) => condition,
            Err(err) => {
                warn!("weather lookup for {} failed: {:#}", city, err);
                WeatherCondition::Moderate
            }
        }
    }

    async fn fetch(&self, city: &str) -> Result<WeatherCondition> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no OpenWeather API key configured"))?;

        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        parse_condition(status, &body)
    }
}

/// Status and body of a current-weather response, reduced to a condition.
/// Pure, so wire-format regressions stay testable without a socket.
fn parse_condition(status: StatusCode, body: &str) -> Result<WeatherCondition> {
    if !status.is_success() {
        return Err(anyhow!(
            "OpenWeather current request failed with status {}: {}",
            status,
            truncate_body(body),
        ));
    }

    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    let main = parsed
        .weather
        .first()
        .map(|w| w.main.as_str())
        .ok_or_else(|| anyhow!("OpenWeather response contained no weather entries"))?;

    Ok(map_condition(main))
}

/// OpenWeather's coarse vocabulary onto the catalog's.
fn map_condition(main: &str) -> WeatherCondition {
    match main {
        "Clear" => WeatherCondition::Sunny,
        "Rain" => WeatherCondition::Rainy,
        "Snow" => WeatherCondition::Snowy,
        "Clouds" => WeatherCondition::Cloudy,
        "Extreme" => WeatherCondition::Stormy,
        _ => WeatherCondition::Moderate,
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
