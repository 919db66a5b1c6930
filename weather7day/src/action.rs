//! Actions
//!
//! Naming follows the intent/result split: `WeatherFetch` asks for data,
//! `WeatherDidLoad` / `WeatherDidError` carry the outcome back from the task.
//! Results are tagged with the request id they answer.

use weather7day_core::Action as DispatchAction;

use crate::state::{Coordinate, WeatherData};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Weather =====
    /// Request a forecast for this coordinate
    WeatherFetch(Coordinate),

    /// Re-request the last coordinate (refresh key, refresh timer)
    WeatherRefresh,

    WeatherDidLoad { request: u64, data: WeatherData },

    WeatherDidError { request: u64, message: String },

    // ===== Location =====
    LocationNext,
    LocationPrev,
    /// Move the selected location by the given degrees
    LocationNudge { dlat: f64, dlng: f64 },

    // ===== UI =====
    UiToggleUnits,

    Tick,
    Quit,
}

impl DispatchAction for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch(_) => "WeatherFetch",
            Action::WeatherRefresh => "WeatherRefresh",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::LocationNext => "LocationNext",
            Action::LocationPrev => "LocationPrev",
            Action::LocationNudge { .. } => "LocationNudge",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    fn summary(&self) -> String {
        match self {
            Action::WeatherFetch(coordinate) => format!("WeatherFetch({})", coordinate),
            Action::WeatherDidLoad { request, data } => format!(
                "WeatherDidLoad {{ request: {}, days: {}, tz: {} }}",
                request,
                data.days.len(),
                data.timezone
            ),
            Action::WeatherDidError { request, message } => {
                let msg = if message.chars().count() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("WeatherDidError {{ request: {}, {:?} }}", request, msg)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_truncates_long_errors() {
        let action = Action::WeatherDidError {
            request: 3,
            message: "x".repeat(100),
        };
        let summary = action.summary();
        assert!(summary.starts_with("WeatherDidError { request: 3"));
        assert!(summary.contains(&format!("{}...", "x".repeat(37))));
        assert!(!summary.contains(&"x".repeat(38)));
    }

    #[test]
    fn test_summary_fetch_shows_coordinate() {
        let action = Action::WeatherFetch(Coordinate { lat: 10.0, lng: 20.0 });
        assert_eq!(action.summary(), "WeatherFetch(10.00°N, 20.00°E)");
        assert_eq!(action.name(), "WeatherFetch");
    }
}
