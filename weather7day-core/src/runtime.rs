//! The event/action/render loop.
//!
//! One iteration of [`EffectRuntime::run`]:
//!
//! 1. if the last dispatch changed state, draw a frame
//! 2. after the frame is committed, ask the UI for post-commit actions
//!    (effects keyed on props, such as "fetch when the coordinate changed")
//! 3. wait for either a terminal event or a queued action
//! 4. events are mapped to actions; actions go through the store, and the
//!    effects the reducer returns are handed to the effect handler

use std::io;
use std::marker::PhantomData;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::effect::{DispatchResult, EffectReducer};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::store::{EffectStore, Middleware, NoopMiddleware};
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;

/// Timeout for each `crossterm::event::poll` call.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles.
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Actions produced by an event, plus whether to redraw regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect a component's `handle_event` output.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// What an effect handler can reach.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
    subscriptions: &'a mut Subscriptions<A>,
}

impl<A: Action> EffectContext<'_, A> {
    /// Queue an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        self.subscriptions
    }
}

/// Owns the store, the action queue, tasks and subscriptions.
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    _effect: PhantomData<fn() -> E>,
}

impl<S, A: Action, E> EffectRuntime<S, A, E, NoopMiddleware> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn from_store(store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            should_render: true,
            _effect: PhantomData,
        }
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Dispatch immediately, bypassing the queue, and run the resulting
    /// effects. Returns whether the state changed.
    pub fn dispatch<FEffect>(&mut self, action: A, mut handle_effect: FEffect) -> bool
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let DispatchResult { changed, effects } = self.store.dispatch(action);
        if !effects.is_empty() {
            let mut ctx = EffectContext {
                action_tx: &self.action_tx,
                tasks: &mut self.tasks,
                subscriptions: &mut self.subscriptions,
            };
            for effect in effects {
                handle_effect(effect, &mut ctx);
            }
        }
        changed
    }

    /// Wait for the next queued action, such as a task result.
    pub async fn next_action(&mut self) -> Option<A> {
        self.action_rx.recv().await
    }

    /// Run until `should_quit` accepts an action or every source closes.
    ///
    /// `after_commit` runs right after each drawn frame with the state that
    /// was drawn; the actions it returns are queued.
    pub async fn run<B, FRender, FCommit, C, FEvent, R, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut after_commit: FCommit,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FCommit: FnMut(&S) -> C,
        C: IntoIterator<Item = A>,
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            LOOP_SLEEP,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;

                for action in after_commit(self.store.state()) {
                    let _ = self.action_tx.send(action);
                }
            }

            tokio::select! {
                Some(raw) = event_rx.recv() => {
                    let event = process_raw_event(raw);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }
                    if self.dispatch(action, &mut handle_effect) {
                        self.should_render = true;
                    }
                }

                else => break,
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Start,
        Finished(u32),
        Bump,
    }

    impl Action for Msg {
        fn name(&self) -> &'static str {
            match self {
                Msg::Start => "Start",
                Msg::Finished(_) => "Finished",
                Msg::Bump => "Bump",
            }
        }
    }

    enum Job {
        Compute(u32),
    }

    #[derive(Default)]
    struct Progress {
        running: bool,
        result: Option<u32>,
    }

    fn reducer(state: &mut Progress, msg: Msg) -> DispatchResult<Job> {
        match msg {
            Msg::Start => {
                state.running = true;
                DispatchResult::changed_with(Job::Compute(21))
            }
            Msg::Finished(value) => {
                state.running = false;
                state.result = Some(value);
                DispatchResult::changed()
            }
            Msg::Bump => DispatchResult::unchanged(),
        }
    }

    fn handle(job: Job, ctx: &mut EffectContext<Msg>) {
        match job {
            Job::Compute(n) => {
                ctx.tasks().spawn("compute", async move { Msg::Finished(n * 2) });
            }
        }
    }

    #[test]
    fn test_event_outcome_builders() {
        let o: EventOutcome<Msg> = EventOutcome::ignored();
        assert!(o.actions.is_empty());
        assert!(!o.needs_render);

        let o = EventOutcome::action(Msg::Bump).with_render();
        assert_eq!(o.actions, vec![Msg::Bump]);
        assert!(o.needs_render);

        let o: EventOutcome<Msg> = Some(Msg::Start).into();
        assert_eq!(o.actions, vec![Msg::Start]);

        let o: EventOutcome<Msg> = None.into();
        assert_eq!(o, EventOutcome::default());

        let o = EventOutcome::from_actions(vec![Msg::Start, Msg::Bump]);
        assert_eq!(o.actions.len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_runs_effects_and_feeds_back() {
        let mut runtime = EffectRuntime::new(Progress::default(), reducer);

        assert!(runtime.dispatch(Msg::Start, handle));
        assert!(runtime.state().running);

        let result = tokio::time::timeout(Duration::from_millis(200), runtime.action_rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(result, Msg::Finished(42));

        assert!(runtime.dispatch(result, handle));
        assert!(!runtime.state().running);
        assert_eq!(runtime.state().result, Some(42));
    }

    #[test]
    fn test_unchanged_dispatch_runs_no_effects() {
        let mut runtime = EffectRuntime::new(Progress::default(), reducer);
        let mut handled = 0;

        assert!(!runtime.dispatch(Msg::Bump, |_, _| handled += 1));
        assert_eq!(handled, 0);
        assert!(runtime.action_rx.try_recv().is_err());
    }
}
