//! Seven-day forecast for one coordinate
//!
//! The parent passes the coordinate in props. After every committed frame the
//! runtime calls [`Weather7Day::use_effects`], which asks for a forecast the
//! first time and again whenever the coordinate changes. Which child is drawn
//! follows the request status.

use crossterm::event::KeyCode;
use ratatui::prelude::{Frame, Rect};
use weather7day_core::{EffectDeps, EventKind};

use super::{
    Component, Weather7DayDisplay, Weather7DayDisplayProps, Weather7DayError,
    Weather7DayErrorProps, Weather7DayLoading, Weather7DayLoadingProps,
};
use crate::action::Action;
use crate::state::{Coordinate, TempUnit, WeatherStatus};

#[derive(Clone, Copy)]
pub struct Weather7DayProps<'a> {
    pub coordinate: Coordinate,
    pub status: &'a WeatherStatus,
    pub unit: TempUnit,
    pub tick: u32,
}

#[derive(Default)]
pub struct Weather7Day {
    coordinate: EffectDeps<Coordinate>,
    display: Weather7DayDisplay,
    loading: Weather7DayLoading,
    error: Weather7DayError,
}

impl Weather7Day {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post-commit effect keyed on the coordinate.
    pub fn use_effects(&mut self, props: Weather7DayProps<'_>) -> Vec<Action> {
        if self.coordinate.changed(&props.coordinate) {
            vec![Action::WeatherFetch(props.coordinate)]
        } else {
            Vec::new()
        }
    }
}

impl Component<Action> for Weather7Day {
    type Props<'a> = Weather7DayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherRefresh),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.status {
            WeatherStatus::Succeeded(weather) => self.display.render(
                frame,
                area,
                Weather7DayDisplayProps {
                    weather,
                    unit: props.unit,
                },
            ),
            WeatherStatus::Idle | WeatherStatus::Loading => self.loading.render(
                frame,
                area,
                Weather7DayLoadingProps { tick: props.tick },
            ),
            WeatherStatus::Failed(message) => {
                self.error
                    .render(frame, area, Weather7DayErrorProps { message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DailyForecast, WeatherData};
    use weather7day_core::testing::*;

    fn props(coordinate: Coordinate, status: &WeatherStatus) -> Weather7DayProps<'_> {
        Weather7DayProps {
            coordinate,
            status,
            unit: TempUnit::Celsius,
            tick: 0,
        }
    }

    fn sample(coordinate: Coordinate) -> WeatherData {
        WeatherData {
            coordinate,
            timezone: "GMT".into(),
            days: vec![DailyForecast {
                date: chrono::NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date"),
                weather_code: 0,
                temp_max: 22.5,
                temp_min: 8.0,
                precipitation_probability: Some(10),
                wind_speed_max: Some(12.0),
            }],
        }
    }

    const HERE: Coordinate = Coordinate { lat: 10.0, lng: 20.0 };
    const THERE: Coordinate = Coordinate { lat: 11.0, lng: 20.0 };

    #[test]
    fn test_mount_fetches_once() {
        let mut component = Weather7Day::new();
        let status = WeatherStatus::Idle;

        let actions = component.use_effects(props(HERE, &status));
        actions.assert_count(1);
        actions.assert_first(Action::WeatherFetch(HERE));

        // re-render with the same coordinate
        let status = WeatherStatus::Loading;
        component.use_effects(props(HERE, &status)).assert_empty();
    }

    #[test]
    fn test_coordinate_change_fetches_regardless_of_status() {
        let mut component = Weather7Day::new();
        let status = WeatherStatus::Succeeded(sample(HERE));
        component.use_effects(props(HERE, &status));

        let actions = component.use_effects(props(THERE, &status));
        actions.assert_count(1);
        actions.assert_first(Action::WeatherFetch(THERE));

        let status = WeatherStatus::Failed("offline".into());
        let actions = component.use_effects(props(HERE, &status));
        actions.assert_first(Action::WeatherFetch(HERE));
    }

    #[test]
    fn test_refresh_key() {
        let mut component = Weather7Day::new();
        let status = WeatherStatus::Idle;

        for spec in ["r", "f5"] {
            let actions: Vec<_> = component
                .handle_event(&EventKind::Key(key(spec)), props(HERE, &status))
                .into_iter()
                .collect();
            actions.assert_first(Action::WeatherRefresh);
        }

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("x")), props(HERE, &status))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_follows_status() {
        let mut render = RenderHarness::new(100, 12);
        let mut component = Weather7Day::new();

        for status in [WeatherStatus::Idle, WeatherStatus::Loading] {
            let output = render.render_to_string_plain(|frame| {
                component.render(frame, frame.area(), props(HERE, &status));
            });
            assert!(output.contains("Fetching 7-day forecast"));
            assert!(!output.contains("22.5°C"));
        }

        let status = WeatherStatus::Succeeded(sample(HERE));
        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(HERE, &status));
        });
        assert!(output.contains("22.5°C"));
        assert!(!output.contains("Fetching"));

        let status = WeatherStatus::Failed("server returned 503".into());
        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(HERE, &status));
        });
        assert!(output.contains("Forecast unavailable"));
        assert!(output.contains("server returned 503"));
        assert!(!output.contains("Fetching"));
    }
}
