//! Open-Meteo API client
//!
//! Forecast requests run inside tasks spawned by the effect handler; the
//! client itself knows nothing about actions. Geocoding runs once at start-up
//! to turn `--place` names into coordinates.

use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;

use crate::state::{Coordinate, DailyForecast, Location, WeatherData};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

pub const FORECAST_DAYS: usize = 7;

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed forecast: {0}")]
    Malformed(String),
    #[error("place not found: {0}")]
    NotFound(String),
}

/// Endpoints and timeout for [`WeatherClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.into(),
            geocoding_url: DEFAULT_GEOCODING_URL.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl WeatherClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("weather7day/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetch up to seven days of daily forecast for `coordinate`.
    pub async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<WeatherData, ApiError> {
        let url = forecast_url(&self.config.forecast_url, coordinate);
        tracing::debug!(%url, "fetching forecast");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: ForecastResponse = response.json().await?;
        let data = parse_forecast(coordinate, body)?;

        tracing::info!(%coordinate, days = data.days.len(), "forecast loaded");
        Ok(data)
    }

    /// Resolve a place name to its best match.
    pub async fn geocode(&self, place: &str) -> Result<Location, ApiError> {
        let url = geocoding_url(&self.config.geocoding_url, place);
        tracing::debug!(%url, "geocoding");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: GeocodingResponse = response.json().await?;
        parse_geocoding(place, body)
    }
}

pub fn forecast_url(base: &str, coordinate: Coordinate) -> String {
    format!(
        "{}?latitude={}&longitude={}&daily={}&timezone=auto&timeformat=unixtime&forecast_days={}",
        base, coordinate.lat, coordinate.lng, DAILY_FIELDS, FORECAST_DAYS
    )
}

pub fn geocoding_url(base: &str, place: &str) -> String {
    format!(
        "{}?name={}&count=1&language=en",
        base,
        urlencoding::encode(place)
    )
}

// ============================================================================
// Forecast payload
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    utc_offset_seconds: i64,
    daily: DailySeries,
}

/// Column-oriented daily values; every present column has one entry per day.
#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<i64>,
    weather_code: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f32>>,
    temperature_2m_min: Vec<Option<f32>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<u8>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f32>>,
}

/// Turn the column arrays into rows.
///
/// Days with a missing code or temperature are skipped. Optional columns may
/// be absent entirely, but a present column must match `time` in length.
pub fn parse_forecast(
    coordinate: Coordinate,
    body: ForecastResponse,
) -> Result<WeatherData, ApiError> {
    let daily = body.daily;
    let len = daily.time.len();

    let required = [
        ("weather_code", daily.weather_code.len()),
        ("temperature_2m_max", daily.temperature_2m_max.len()),
        ("temperature_2m_min", daily.temperature_2m_min.len()),
    ];
    for (name, n) in required {
        if n != len {
            return Err(ApiError::Malformed(format!(
                "{} has {} entries, expected {}",
                name, n, len
            )));
        }
    }
    let optional = [
        (
            "precipitation_probability_max",
            daily.precipitation_probability_max.len(),
        ),
        ("wind_speed_10m_max", daily.wind_speed_10m_max.len()),
    ];
    for (name, n) in optional {
        if n != 0 && n != len {
            return Err(ApiError::Malformed(format!(
                "{} has {} entries, expected {}",
                name, n, len
            )));
        }
    }

    let days: Vec<DailyForecast> = (0..len)
        .filter_map(|i| {
            let local = daily.time[i].checked_add(body.utc_offset_seconds)?;
            Some(DailyForecast {
                date: DateTime::from_timestamp(local, 0)?.date_naive(),
                weather_code: daily.weather_code[i]?,
                temp_max: daily.temperature_2m_max[i]?,
                temp_min: daily.temperature_2m_min[i]?,
                precipitation_probability: daily
                    .precipitation_probability_max
                    .get(i)
                    .copied()
                    .flatten(),
                wind_speed_max: daily.wind_speed_10m_max.get(i).copied().flatten(),
            })
        })
        .take(FORECAST_DAYS)
        .collect();

    if days.is_empty() {
        return Err(ApiError::Malformed("no daily data".into()));
    }

    Ok(WeatherData {
        coordinate,
        timezone: body.timezone,
        days,
    })
}

// ============================================================================
// Geocoding payload
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

pub fn parse_geocoding(place: &str, body: GeocodingResponse) -> Result<Location, ApiError> {
    let hit = body
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ApiError::NotFound(place.to_string()))?;

    let coordinate = Coordinate::new(hit.latitude, hit.longitude)
        .map_err(|e| ApiError::Malformed(e.to_string()))?;

    let name = match (hit.admin1, hit.country) {
        (Some(region), Some(country)) if region != hit.name => {
            format!("{}, {}, {}", hit.name, region, country)
        }
        (_, Some(country)) => format!("{}, {}", hit.name, country),
        (Some(region), None) => format!("{}, {}", hit.name, region),
        (None, None) => hit.name,
    };

    Ok(Location { name, coordinate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coord() -> Coordinate {
        Coordinate {
            lat: 37.8651,
            lng: -119.5383,
        }
    }

    fn response(value: serde_json::Value) -> ForecastResponse {
        serde_json::from_value(value).expect("valid forecast json")
    }

    fn ymd(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn test_forecast_url() {
        let url = forecast_url(DEFAULT_FORECAST_URL, Coordinate { lat: 10.0, lng: 20.5 });
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?latitude=10&longitude=20.5"));
        assert!(url.contains("timeformat=unixtime"));
        assert!(url.contains("forecast_days=7"));
        assert!(url.contains("temperature_2m_max"));
    }

    #[test]
    fn test_geocoding_url_encodes_name() {
        let url = geocoding_url(DEFAULT_GEOCODING_URL, "Grand Canyon");
        assert_eq!(
            url,
            "https://geocoding-api.open-meteo.com/v1/search?name=Grand%20Canyon&count=1&language=en"
        );
    }

    #[test]
    fn test_parse_forecast() {
        // local midnights in America/Los_Angeles (UTC-7) for Oct 20 and 21, 2025
        let body = response(json!({
            "timezone": "America/Los_Angeles",
            "utc_offset_seconds": -25200,
            "daily": {
                "time": [1760943600, 1761030000],
                "weather_code": [0, 61],
                "temperature_2m_max": [21.4, 15.0],
                "temperature_2m_min": [4.1, 6.2],
                "precipitation_probability_max": [0, 80],
                "wind_speed_10m_max": [9.5, 22.0]
            }
        }));

        let data = parse_forecast(coord(), body).expect("parse");

        assert_eq!(data.timezone, "America/Los_Angeles");
        assert_eq!(data.coordinate, coord());
        assert_eq!(data.days.len(), 2);
        assert_eq!(data.days[0].date, ymd(2025, 10, 20));
        assert_eq!(data.days[0].weekday(), "Mon");
        assert_eq!(data.days[1].date_label(), "Oct 21");
        assert_eq!(data.days[1].description(), "Rain");
        assert_eq!(data.days[1].precipitation_probability, Some(80));
        assert_eq!(data.days[1].wind_speed_max, Some(22.0));
    }

    #[test]
    fn test_parse_forecast_optional_columns_missing() {
        let body = response(json!({
            "daily": {
                "time": [0],
                "weather_code": [3],
                "temperature_2m_max": [10.0],
                "temperature_2m_min": [2.0]
            }
        }));

        let data = parse_forecast(coord(), body).expect("parse");
        assert_eq!(data.days[0].precipitation_probability, None);
        assert_eq!(data.days[0].wind_speed_max, None);
    }

    #[test]
    fn test_parse_forecast_skips_null_days_and_caps_at_seven() {
        let times: Vec<i64> = (0..9).map(|d| d * 86_400).collect();
        let mut max: Vec<Option<f32>> = vec![Some(10.0); 9];
        max[1] = None;
        let body = response(json!({
            "daily": {
                "time": times,
                "weather_code": vec![1; 9],
                "temperature_2m_max": max,
                "temperature_2m_min": vec![1.0; 9]
            }
        }));

        let data = parse_forecast(coord(), body).expect("parse");
        assert_eq!(data.days.len(), FORECAST_DAYS);
        assert_eq!(data.days[0].date, ymd(1970, 1, 1));
        assert_eq!(data.days[1].date, ymd(1970, 1, 3));
    }

    #[test]
    fn test_parse_forecast_skips_out_of_range_time() {
        let body = response(json!({
            "utc_offset_seconds": 3600,
            "daily": {
                "time": [i64::MAX, 86_400],
                "weather_code": [0, 0],
                "temperature_2m_max": [10.0, 11.0],
                "temperature_2m_min": [1.0, 2.0]
            }
        }));

        let data = parse_forecast(coord(), body).expect("parse");
        assert_eq!(data.days.len(), 1);
        assert_eq!(data.days[0].date, ymd(1970, 1, 2));
    }

    #[test]
    fn test_parse_forecast_rejects_mismatched_columns() {
        let body = response(json!({
            "daily": {
                "time": [0, 86400],
                "weather_code": [0],
                "temperature_2m_max": [1.0, 2.0],
                "temperature_2m_min": [0.0, 1.0]
            }
        }));

        let err = parse_forecast(coord(), body).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(ref m) if m.contains("weather_code")));

        let body = response(json!({
            "daily": {
                "time": [0],
                "weather_code": [0],
                "temperature_2m_max": [1.0],
                "temperature_2m_min": [0.0],
                "wind_speed_10m_max": [1.0, 2.0]
            }
        }));
        let err = parse_forecast(coord(), body).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(ref m) if m.contains("wind_speed_10m_max")));
    }

    #[test]
    fn test_parse_forecast_rejects_empty() {
        let body = response(json!({
            "daily": {
                "time": [],
                "weather_code": [],
                "temperature_2m_max": [],
                "temperature_2m_min": []
            }
        }));
        let err = parse_forecast(coord(), body).unwrap_err();
        assert_eq!(err.to_string(), "malformed forecast: no daily data");
    }

    #[test]
    fn test_parse_geocoding() {
        let body: GeocodingResponse = serde_json::from_value(json!({
            "results": [{
                "name": "Moab",
                "latitude": 38.5733,
                "longitude": -109.5498,
                "country": "United States",
                "admin1": "Utah"
            }]
        }))
        .expect("valid json");

        let location = parse_geocoding("moab", body).expect("found");
        assert_eq!(location.name, "Moab, Utah, United States");
        assert_eq!(location.coordinate.lat, 38.5733);
    }

    #[test]
    fn test_parse_geocoding_not_found() {
        let body: GeocodingResponse =
            serde_json::from_value(json!({ "generationtime_ms": 0.5 })).expect("valid json");
        let err = parse_geocoding("Atlantis", body).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref p) if p == "Atlantis"));
    }
}
