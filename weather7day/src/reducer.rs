//! Reducer - (state, action) -> (changed, effects)
//!
//! All state transitions live here. Fetches are not performed here; the
//! reducer allocates a request id, marks the status as loading and returns
//! an `Effect::FetchForecast` for the runtime to execute.

use weather7day_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Coordinate, PendingRequest, WeatherStatus};

/// Degrees moved per arrow key press.
pub const NUDGE_STEP: f64 = 0.5;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather =====
        Action::WeatherFetch(coordinate) => begin_fetch(state, coordinate),

        Action::WeatherRefresh => {
            // nothing requested yet, or a request is already in flight
            let Some(pending) = state.request else {
                return DispatchResult::unchanged();
            };
            if state.status.is_loading() {
                return DispatchResult::unchanged();
            }
            begin_fetch(state, pending.coordinate)
        }

        Action::WeatherDidLoad { request, data } => {
            if !is_latest(state, request) {
                tracing::debug!(request, "dropping stale forecast");
                return DispatchResult::unchanged();
            }
            state.status = WeatherStatus::Succeeded(data);
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, message } => {
            if !is_latest(state, request) {
                tracing::debug!(request, "dropping stale forecast error");
                return DispatchResult::unchanged();
            }
            tracing::warn!(request, error = %message, "forecast request failed");
            state.status = WeatherStatus::Failed(message);
            DispatchResult::changed()
        }

        // ===== Location =====
        // Changing the selection only changes props; the forecast component
        // notices the new coordinate after the next render and fetches.
        Action::LocationNext => {
            if state.locations.len() < 2 {
                return DispatchResult::unchanged();
            }
            state.selected = (state.selected + 1) % state.locations.len();
            DispatchResult::changed()
        }

        Action::LocationPrev => {
            if state.locations.len() < 2 {
                return DispatchResult::unchanged();
            }
            let len = state.locations.len();
            state.selected = (state.selected + len - 1) % len;
            DispatchResult::changed()
        }

        Action::LocationNudge { dlat, dlng } => {
            let selected = state.selected;
            let location = &mut state.locations[selected];
            let moved = location.coordinate.nudged(dlat, dlng);
            if moved == location.coordinate {
                return DispatchResult::unchanged();
            }
            location.coordinate = moved;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only the spinner animates
            if state.status.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn begin_fetch(state: &mut AppState, coordinate: Coordinate) -> DispatchResult<Effect> {
    state.next_request_id += 1;
    let request = state.next_request_id;
    state.request = Some(PendingRequest {
        id: request,
        coordinate,
    });
    state.status = WeatherStatus::Loading;
    DispatchResult::changed_with(Effect::FetchForecast {
        request,
        coordinate,
    })
}

fn is_latest(state: &AppState, request: u64) -> bool {
    state.request.map(|r| r.id) == Some(request)
}
