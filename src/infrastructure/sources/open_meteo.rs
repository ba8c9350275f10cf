//! Open-Meteo weather adapter

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::weather::{describe_weather_code, CurrentConditions, DailyForecast, WeatherReport};
use crate::domain::{Coordinates, DomainError, SourceAdapter};
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const PROVIDER: &str = "open-meteo";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: u16,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    weather_code: Vec<Option<u16>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

/// Current conditions and a daily forecast for one location
#[derive(Debug, Clone)]
pub struct OpenMeteoAdapter {
    client: Arc<dyn HttpClientTrait>,
    base_url: String,
    coordinates: Coordinates,
    forecast_days: u8,
    timeout: Duration,
}

impl OpenMeteoAdapter {
    pub fn new(
        client: Arc<dyn HttpClientTrait>,
        base_url: impl Into<String>,
        coordinates: Coordinates,
        forecast_days: u8,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            coordinates,
            forecast_days,
            timeout,
        }
    }
}

#[async_trait]
impl SourceAdapter<WeatherReport> for OpenMeteoAdapter {
    fn provider(&self) -> &str {
        PROVIDER
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_fetch(&self) -> Result<Vec<WeatherReport>, DomainError> {
        let query = [
            ("latitude", self.coordinates.lat.to_string()),
            ("longitude", self.coordinates.lon.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ];

        let body = self.client.get_json(&self.base_url, &query, Vec::new()).await?;

        parse_forecast(body).map(|report| vec![report])
    }
}

/// Convert an Open-Meteo forecast document into a report
pub fn parse_forecast(body: serde_json::Value) -> Result<WeatherReport, DomainError> {
    let response: ForecastResponse = serde_json::from_value(body)
        .map_err(|e| DomainError::parse(PROVIDER, format!("unexpected forecast shape: {}", e)))?;

    let current = CurrentConditions {
        temperature: response.current.temperature_2m,
        humidity: response.current.relative_humidity_2m,
        wind_speed: response.current.wind_speed_10m,
        description: describe_weather_code(response.current.weather_code).to_string(),
    };

    let forecast = response.daily.map(daily_forecast).unwrap_or_default();

    Ok(WeatherReport::new(current, forecast))
}

fn daily_forecast(daily: DailyBlock) -> Vec<DailyForecast> {
    daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, date)| {
            let max_temperature = daily.temperature_2m_max.get(i).copied().flatten()?;
            let min_temperature = daily.temperature_2m_min.get(i).copied().flatten()?;
            let code = daily.weather_code.get(i).copied().flatten();

            Some(DailyForecast {
                date: *date,
                max_temperature,
                min_temperature,
                precipitation_probability: daily
                    .precipitation_probability_max
                    .get(i)
                    .copied()
                    .flatten(),
                description: code.map(describe_weather_code).unwrap_or("Unknown").to_string(),
            })
        })
        .collect()
}
