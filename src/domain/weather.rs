//! Weather reports and farm advisories

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// km/h at 10 m
    pub wind_speed: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_temperature: f64,
    pub min_temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub advisory: Vec<String>,
}

impl WeatherReport {
    /// Builds a report and derives its advisories
    pub fn new(current: CurrentConditions, forecast: Vec<DailyForecast>) -> Self {
        let advisory = farm_advisories(&current, &forecast);
        Self {
            current,
            forecast,
            advisory,
        }
    }
}

const RAIN_PROBABILITY_THRESHOLD: f64 = 60.0;
const HEAT_THRESHOLD_C: f64 = 38.0;
const WIND_THRESHOLD_KMH: f64 = 30.0;
const HUMIDITY_THRESHOLD: f64 = 85.0;

/// Rule-based advisories for the next couple of days
pub fn farm_advisories(current: &CurrentConditions, forecast: &[DailyForecast]) -> Vec<String> {
    let mut advisory = Vec::new();
    let near_term = &forecast[..forecast.len().min(2)];

    let rain_expected = near_term.iter().any(|day| {
        day.precipitation_probability
            .is_some_and(|p| p >= RAIN_PROBABILITY_THRESHOLD)
    });
    if rain_expected {
        advisory.push(
            "Rain likely in the next two days: postpone pesticide and fertiliser spraying."
                .to_string(),
        );
    }

    let peak = near_term
        .iter()
        .map(|day| day.max_temperature)
        .fold(current.temperature, f64::max);
    if peak >= HEAT_THRESHOLD_C {
        advisory.push(
            "High temperatures expected: irrigate in the early morning or evening and keep livestock shaded."
                .to_string(),
        );
    }

    if current.wind_speed >= WIND_THRESHOLD_KMH {
        advisory.push("Strong winds: stake tall crops and secure shade nets.".to_string());
    }

    if current.humidity >= HUMIDITY_THRESHOLD {
        advisory.push(
            "High humidity raises fungal disease risk: inspect paddy and chilli crops."
                .to_string(),
        );
    }

    advisory
}

/// Text for a WMO weather interpretation code
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 => "Light rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 => "Snow",
        80 | 81 => "Rain showers",
        82 => "Violent rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64, humidity: f64, wind_speed: f64) -> CurrentConditions {
        CurrentConditions {
            temperature,
            humidity,
            wind_speed,
            description: "Clear sky".to_string(),
        }
    }

    fn day(max: f64, rain: Option<f64>) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            max_temperature: max,
            min_temperature: max - 8.0,
            precipitation_probability: rain,
            description: "Partly cloudy".to_string(),
        }
    }

    #[test]
    fn test_calm_weather_has_no_advisory() {
        let report = WeatherReport::new(conditions(29.0, 60.0, 8.0), vec![day(31.0, Some(10.0))]);
        assert!(report.advisory.is_empty());
    }

    #[test]
    fn test_rain_and_heat_advisories() {
        let advisory = farm_advisories(
            &conditions(33.0, 50.0, 10.0),
            &[day(34.0, Some(20.0)), day(39.5, Some(75.0))],
        );

        assert_eq!(advisory.len(), 2);
        assert!(advisory[0].starts_with("Rain likely"));
        assert!(advisory[1].starts_with("High temperatures"));
    }

    #[test]
    fn test_only_next_two_days_count() {
        let advisory = farm_advisories(
            &conditions(30.0, 50.0, 5.0),
            &[day(31.0, None), day(31.0, Some(5.0)), day(41.0, Some(95.0))],
        );
        assert!(advisory.is_empty());
    }

    #[test]
    fn test_wind_and_humidity_advisories() {
        let advisory = farm_advisories(&conditions(27.0, 92.0, 41.0), &[]);
        assert_eq!(advisory.len(), 2);
    }

    #[test]
    fn test_weather_codes() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(65), "Heavy rain");
        assert_eq!(describe_weather_code(42), "Unknown");
    }
}
