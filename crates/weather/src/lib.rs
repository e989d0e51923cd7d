//! Current-weather lookups for the observer location.
//!
//! Lookups never block the frame loop: [`WeatherChannel`] runs each fetch on a
//! worker thread and hands results back through a channel drained in
//! [`WeatherChannel::poll`]. Failures are kept as display strings.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

pub mod channel;

pub use channel::{WeatherChannel, WeatherStatus};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,weather_code,is_day";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("weather service returned HTTP {0}")]
    Http(u16),
    #[error("malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to start weather worker: {0}")]
    Worker(#[from] std::io::Error),
}

/// Point on Earth a lookup is keyed by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Location {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Conditions at a location right now.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
    pub is_day: bool,
}

impl WeatherReport {
    pub fn description(&self) -> &'static str {
        describe_code(self.weather_code)
    }

    pub fn summary(&self) -> String {
        format!(
            "{:.1} °C, wind {:.1} km/h, {} ({})",
            self.temperature_c,
            self.wind_speed_kmh,
            self.description(),
            if self.is_day { "day" } else { "night" }
        )
    }
}

/// Human-readable text for a WMO weather code.
pub fn describe_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Dense drizzle",
        56 | 57 => "Freezing drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 | 81 => "Rain showers",
        82 => "Violent rain showers",
        85 => "Snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown conditions",
    }
}

/// Anything that can look up current weather. Called from a worker thread.
pub trait WeatherSource: Send + Sync + 'static {
    fn fetch(&self, location: Location) -> Result<WeatherReport, WeatherError>;
}

/// Open-Meteo forecast API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    wind_speed_10m: f64,
    weather_code: i32,
    is_day: u8,
}

impl OpenMeteoSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn request_url(&self, location: Location) -> String {
        format!(
            "{}?latitude={:.4}&longitude={:.4}&current={}",
            self.endpoint, location.latitude_deg, location.longitude_deg, CURRENT_FIELDS
        )
    }
}

impl WeatherSource for OpenMeteoSource {
    fn fetch(&self, location: Location) -> Result<WeatherReport, WeatherError> {
        let response = self.client.get(self.request_url(location)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http(status.as_u16()));
        }
        let body = response.text()?;
        parse_response(&body)
    }
}

/// Parse an Open-Meteo `current` block.
pub fn parse_response(body: &str) -> Result<WeatherReport, WeatherError> {
    let parsed: OpenMeteoResponse = serde_json::from_str(body)?;
    Ok(WeatherReport {
        temperature_c: parsed.current.temperature_2m,
        wind_speed_kmh: parsed.current.wind_speed_10m,
        weather_code: parsed.current.weather_code,
        is_day: parsed.current.is_day != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_block() {
        let body = r#"{"latitude":51.5,"current":{"time":"2024-06-01T12:00","temperature_2m":18.4,"wind_speed_10m":11.2,"weather_code":2,"is_day":1}}"#;
        let report = parse_response(body).unwrap();
        assert_eq!(report.weather_code, 2);
        assert!(report.is_day);
        assert_eq!(report.description(), "Partly cloudy");
        assert!(report.summary().starts_with("18.4 °C"));
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        let err = parse_response(r#"{"current":{}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn request_url_carries_location_and_fields() {
        let source = OpenMeteoSource::new("https://example.invalid/v1/forecast").unwrap();
        let url = source.request_url(Location::new(51.4779, -0.0015));
        assert!(url.starts_with("https://example.invalid/v1/forecast?latitude=51.4779"));
        assert!(url.contains("longitude=-0.0015"));
        assert!(url.ends_with("current=temperature_2m,wind_speed_10m,weather_code,is_day"));
    }
}
