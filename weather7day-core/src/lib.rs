//! Store, effect and runtime primitives for weather7day
//!
//! The application follows a Redux/Elm-style loop:
//!
//! - **Action**: a description of something that happened or is wanted
//! - **EffectStore**: the single owner of application state; a reducer is the
//!   only code allowed to change it, and it answers every dispatch with a
//!   [`DispatchResult`] listing the side effects to run
//! - **Component**: renders from read-only props and turns terminal events
//!   into actions
//! - **TaskManager** / **Subscriptions**: run effects and timers on tokio and
//!   feed their results back as actions
//! - **EffectRuntime**: drives render, post-commit component effects, input
//!   and dispatch until the quit action arrives
//!
//! # Example
//!
//! ```ignore
//! use weather7day_core::{Action, DispatchResult, EffectStore};
//!
//! #[derive(Clone, Debug)]
//! enum Msg { Load, DidLoad(String) }
//!
//! impl Action for Msg {
//!     fn name(&self) -> &'static str {
//!         match self { Msg::Load => "Load", Msg::DidLoad(_) => "DidLoad" }
//!     }
//! }
//!
//! enum Effect { Fetch }
//!
//! #[derive(Default)]
//! struct State { loading: bool, body: Option<String> }
//!
//! fn reducer(state: &mut State, msg: Msg) -> DispatchResult<Effect> {
//!     match msg {
//!         Msg::Load => {
//!             state.loading = true;
//!             DispatchResult::changed_with(Effect::Fetch)
//!         }
//!         Msg::DidLoad(body) => {
//!             state.loading = false;
//!             state.body = Some(body);
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//!
//! let mut store = EffectStore::new(State::default(), reducer);
//! let result = store.dispatch(Msg::Load);
//! assert!(result.has_effects());
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::{Component, EffectDeps};
pub use effect::{DispatchResult, EffectReducer};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use store::{EffectStore, LoggingMiddleware, Middleware, NoopMiddleware};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

pub use ratatui::{layout::Rect, Frame};
