//! The application store
//!
//! [`EffectStore`] owns the state for the whole process. Components read it
//! through selectors and change it only by dispatching actions; the reducer
//! is the single place where mutation happens.

use std::marker::PhantomData;

use crate::action::Action;
use crate::effect::{DispatchResult, EffectReducer};

/// Hooks called around every dispatch.
pub trait Middleware<A: Action> {
    /// Called before the reducer sees the action.
    fn before(&mut self, action: &A);

    /// Called after the reducer with the resulting change flag and the
    /// number of effects it emitted.
    fn after(&mut self, action: &A, state_changed: bool, effect_count: usize);
}

/// Middleware that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool, _effect_count: usize) {}
}

/// Logs every processed action through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    dispatched: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions seen so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        tracing::trace!(action = action.name(), seq = self.dispatched, "dispatch");
    }

    fn after(&mut self, action: &A, state_changed: bool, effect_count: usize) {
        tracing::debug!(
            action = %action.summary(),
            state_changed,
            effects = effect_count,
            "action processed"
        );
    }
}

/// State container driven by an effect-emitting reducer.
///
/// # Example
///
/// ```ignore
/// let mut store = EffectStore::new(AppState::default(), reducer)
///     .with_middleware(LoggingMiddleware::new());
///
/// let result = store.dispatch(Action::WeatherFetch(coordinate));
/// let status = store.select(select_status);
/// ```
pub struct EffectStore<S, A, E, M = NoopMiddleware> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<fn(A) -> E>,
}

impl<S, A: Action, E> EffectStore<S, A, E, NoopMiddleware> {
    /// Create a store with the initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            middleware: NoopMiddleware,
            _marker: PhantomData,
        }
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    /// Replace the middleware.
    pub fn with_middleware<M2: Middleware<A>>(self, middleware: M2) -> EffectStore<S, A, E, M2> {
        EffectStore {
            state: self.state,
            reducer: self.reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    /// Run an action through middleware and the reducer.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware
            .after(&action, result.changed, result.effects.len());
        result
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Read a derived value from the state.
    #[inline]
    pub fn select<'a, R>(&'a self, selector: impl FnOnce(&'a S) -> R) -> R {
        selector(&self.state)
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum Msg {
        Add(i32),
        Save,
        Ignore,
    }

    impl Action for Msg {
        fn name(&self) -> &'static str {
            match self {
                Msg::Add(_) => "Add",
                Msg::Save => "Save",
                Msg::Ignore => "Ignore",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum Job {
        Write(i32),
    }

    #[derive(Default)]
    struct Totals {
        sum: i32,
    }

    fn reducer(state: &mut Totals, msg: Msg) -> DispatchResult<Job> {
        match msg {
            Msg::Add(n) => {
                state.sum += n;
                DispatchResult::changed()
            }
            Msg::Save => DispatchResult::effect(Job::Write(state.sum)),
            Msg::Ignore => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn test_dispatch_and_select() {
        let mut store = EffectStore::new(Totals::default(), reducer);

        assert!(store.dispatch(Msg::Add(2)).changed);
        assert!(store.dispatch(Msg::Add(3)).changed);
        assert!(!store.dispatch(Msg::Ignore).changed);

        assert_eq!(store.select(|s| s.sum), 5);
        assert_eq!(store.state().sum, 5);
    }

    #[test]
    fn test_effects_are_returned() {
        let mut store = EffectStore::new(Totals::default(), reducer);
        store.dispatch(Msg::Add(7));

        let result = store.dispatch(Msg::Save);
        assert!(!result.changed);
        assert_eq!(result.effects, vec![Job::Write(7)]);
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, bool, usize)>,
        before: usize,
    }

    impl<A: Action> Middleware<A> for Recorder {
        fn before(&mut self, _action: &A) {
            self.before += 1;
        }

        fn after(&mut self, action: &A, state_changed: bool, effect_count: usize) {
            self.seen.push((action.name(), state_changed, effect_count));
        }
    }

    #[test]
    fn test_middleware_sees_every_dispatch() {
        let mut store =
            EffectStore::new(Totals::default(), reducer).with_middleware(Recorder::default());

        store.dispatch(Msg::Add(1));
        store.dispatch(Msg::Save);

        assert_eq!(store.middleware().before, 2);
        assert_eq!(
            store.middleware().seen,
            vec![("Add", true, 0), ("Save", false, 1)]
        );
    }

    #[test]
    fn test_logging_middleware_counts() {
        let mut store =
            EffectStore::new(Totals::default(), reducer).with_middleware(LoggingMiddleware::new());

        store.dispatch(Msg::Add(1));
        store.dispatch(Msg::Ignore);

        assert_eq!(store.middleware().dispatched(), 2);
    }
}
