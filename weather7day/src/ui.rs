//! Root view
//!
//! Owns the component instances, builds their props from the store and maps
//! terminal events that no component claims.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
};
use weather7day_core::{EventKind, EventOutcome};

use crate::action::Action;
use crate::components::{
    Component, HelpBar, HelpBarProps, LocationHeader, LocationHeaderProps, Weather7Day,
    Weather7DayProps, Weather7DayLoading,
};
use crate::reducer::NUDGE_STEP;
use crate::state::{AppState, select_coordinate, select_status};

#[derive(Default)]
pub struct WeatherUi {
    forecast: Weather7Day,
}

impl WeatherUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn forecast_props(state: &AppState) -> Weather7DayProps<'_> {
        Weather7DayProps {
            coordinate: select_coordinate(state),
            status: select_status(state),
            unit: state.unit,
            tick: state.tick_count,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let title = if state.status.is_loading() {
            format!(
                " 7-Day Forecast {} ",
                Weather7DayLoading::spinner(state.tick_count)
            )
        } else {
            " 7-Day Forecast ".to_string()
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::vertical([
            Constraint::Length(LocationHeader::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        LocationHeader.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                location: state.current_location(),
                index: state.selected,
                total: state.locations.len(),
            },
        );

        self.forecast
            .render(frame, chunks[2], Self::forecast_props(state));

        HelpBar.render(
            frame,
            chunks[3],
            HelpBarProps {
                multiple_locations: state.locations.len() > 1,
            },
        );
    }

    /// Post-commit effects of the mounted components.
    pub fn effects(&mut self, state: &AppState) -> Vec<Action> {
        self.forecast.use_effects(Self::forecast_props(state))
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        let key = match event {
            // the next frame picks up the new area
            EventKind::Resize(..) => return EventOutcome::ignored().with_render(),
            EventKind::Key(key) => key,
        };

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('n') | KeyCode::Tab => Some(Action::LocationNext),
            KeyCode::Char('p') | KeyCode::BackTab => Some(Action::LocationPrev),
            KeyCode::Up => Some(nudge(NUDGE_STEP, 0.0)),
            KeyCode::Down => Some(nudge(-NUDGE_STEP, 0.0)),
            KeyCode::Left => Some(nudge(0.0, -NUDGE_STEP)),
            KeyCode::Right => Some(nudge(0.0, NUDGE_STEP)),
            _ => None,
        };
        if let Some(action) = action {
            return EventOutcome::action(action);
        }

        EventOutcome::from_actions(
            self.forecast
                .handle_event(event, Self::forecast_props(state)),
        )
    }
}

fn nudge(dlat: f64, dlng: f64) -> Action {
    Action::LocationNudge { dlat, dlng }
}
