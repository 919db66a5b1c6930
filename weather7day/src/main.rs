//! weather7day - seven-day forecast in the terminal
//!
//! ```sh
//! # built-in default location
//! weather7day
//!
//! # explicit coordinate plus two looked-up places
//! weather7day --lat 37.8651 --lng -119.5383 --place Moab --place "Bend, Oregon"
//!
//! # debug log to a file
//! WEATHER7DAY_LOG=debug weather7day --log-file /tmp/weather7day.log
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use weather7day::action::Action;
use weather7day::api::WeatherClient;
use weather7day::config::{Args, Config};
use weather7day::effect::Effect;
use weather7day::reducer::reducer;
use weather7day::state::{AppState, LOADING_ANIM_TICK_MS};
use weather7day::ui::WeatherUi;
use weather7day::logging;
use weather7day_core::{EffectContext, EffectRuntime, EffectStore, LoggingMiddleware};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match Config::load(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(config.log_file.as_deref())?;

    let client = match WeatherClient::new(config.api.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Resolve place names before entering TUI mode
    let mut locations = config.locations.clone();
    for place in &config.places {
        match client.geocode(place).await {
            Ok(location) => locations.push(location),
            Err(e) => {
                eprintln!("Error: could not look up '{}': {}", place, e);
                std::process::exit(1);
            }
        }
    }

    let state = AppState::new(locations, config.unit);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, client, config.refresh_interval).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    client: WeatherClient,
    refresh_interval: Duration,
) -> io::Result<()> {
    let store = EffectStore::new(state, reducer).with_middleware(LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    // Spinner animation
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    // Periodic refresh of whatever was last requested
    runtime
        .subscriptions()
        .interval("refresh", refresh_interval, || Action::WeatherRefresh);

    // The first fetch comes from the forecast component after the first frame
    let ui = RefCell::new(WeatherUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |state| ui.borrow_mut().effects(state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

fn handle_effect(client: &WeatherClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchForecast {
            request,
            coordinate,
        } => {
            let client = client.clone();
            // one key for all fetches: a newer request aborts the older task
            ctx.tasks().spawn("forecast", async move {
                match client.fetch_forecast(coordinate).await {
                    Ok(data) => Action::WeatherDidLoad { request, data },
                    Err(e) => Action::WeatherDidError {
                        request,
                        message: e.to_string(),
                    },
                }
            });
        }
    }
}
