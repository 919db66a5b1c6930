//! Application state and selectors
//!
//! The store owns one `AppState` for the whole process. Components get
//! borrowed views of it through the selectors at the bottom of this file;
//! only the reducer mutates it.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

/// Spinner frame period while a request is in flight.
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside -90..=90")]
    Latitude(f64),
    #[error("longitude {0} is outside -180..=180")]
    Longitude(f64),
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Move by the given deltas. Latitude stops at the poles, longitude wraps
    /// around the antimeridian.
    pub fn nudged(self, dlat: f64, dlng: f64) -> Self {
        let lat = (self.lat + dlat).clamp(-90.0, 90.0);
        let mut lng = self.lng + dlng;
        if lng > 180.0 {
            lng -= 360.0;
        } else if lng < -180.0 {
            lng += 360.0;
        }
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lng < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.2}°{}, {:.2}°{}",
            self.lat.abs(),
            ns,
            self.lng.abs(),
            ew
        )
    }
}

/// A named place to forecast.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: "Yosemite National Park".into(),
            coordinate: Coordinate {
                lat: 37.8651,
                lng: -119.5383,
            },
        }
    }
}

/// One forecast day. Temperatures are Celsius, wind is km/h.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyForecast {
    /// Calendar date at the forecast location
    pub date: NaiveDate,
    /// WMO weather interpretation code
    pub weather_code: u8,
    pub temp_max: f32,
    pub temp_min: f32,
    pub precipitation_probability: Option<u8>,
    pub wind_speed_max: Option<f32>,
}

impl DailyForecast {
    /// "Mon"
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// "Oct 20"
    pub fn date_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    pub fn description(&self) -> &'static str {
        weather_description(self.weather_code)
    }
}

/// A seven-day forecast for one coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherData {
    pub coordinate: Coordinate,
    pub timezone: String,
    pub days: Vec<DailyForecast>,
}

impl WeatherData {
    /// Lowest minimum and highest maximum over all days.
    pub fn temperature_range(&self) -> Option<(f32, f32)> {
        let low = self.days.iter().map(|d| d.temp_min).reduce(f32::min)?;
        let high = self.days.iter().map(|d| d.temp_max).reduce(f32::max)?;
        Some((low, high))
    }
}

/// Lifecycle of the latest forecast request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WeatherStatus {
    #[default]
    Idle,
    Loading,
    Succeeded(WeatherData),
    Failed(String),
}

impl WeatherStatus {
    pub fn name(&self) -> &'static str {
        match self {
            WeatherStatus::Idle => "idle",
            WeatherStatus::Loading => "loading",
            WeatherStatus::Succeeded(_) => "succeeded",
            WeatherStatus::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WeatherStatus::Loading)
    }
}

/// The request whose result the UI is waiting for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingRequest {
    pub id: u64,
    pub coordinate: Coordinate,
}

/// Temperature display unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn convert(&self, celsius: f32) -> f32 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn format(&self, celsius: f32) -> String {
        match self {
            TempUnit::Celsius => format!("{:.1}°C", self.convert(celsius)),
            TempUnit::Fahrenheit => format!("{:.1}°F", self.convert(celsius)),
        }
    }
}

/// Everything the UI renders from.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Never empty
    pub locations: Vec<Location>,
    pub selected: usize,

    pub status: WeatherStatus,
    /// Latest request issued; results for any other id are dropped
    pub request: Option<PendingRequest>,
    pub next_request_id: u64,

    pub unit: TempUnit,
    pub tick_count: u32,
}

impl AppState {
    /// Falls back to the default location when `locations` is empty.
    pub fn new(mut locations: Vec<Location>, unit: TempUnit) -> Self {
        if locations.is_empty() {
            locations.push(Location::default());
        }
        Self {
            locations,
            selected: 0,
            status: WeatherStatus::Idle,
            request: None,
            next_request_id: 0,
            unit,
            tick_count: 0,
        }
    }

    pub fn current_location(&self) -> &Location {
        &self.locations[self.selected]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new(), TempUnit::default())
    }
}

// ===== Selectors =====

pub fn select_status(state: &AppState) -> &WeatherStatus {
    &state.status
}

pub fn select_weather(state: &AppState) -> Option<&WeatherData> {
    match &state.status {
        WeatherStatus::Succeeded(data) => Some(data),
        _ => None,
    }
}

/// The coordinate the forecast component is currently showing.
pub fn select_coordinate(state: &AppState) -> Coordinate {
    state.current_location().coordinate
}

/// Convert a WMO weather code to a short description
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
