//! Component trait and post-commit effect dependencies

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and emits actions
///
/// Rules:
/// 1. Props carry everything the component reads from the store
/// 2. `handle_event` returns actions; it never touches the store
/// 3. `render` draws from props plus purely visual internal state
///
/// # Example
///
/// ```ignore
/// struct Refresh;
///
/// struct RefreshProps {
///     is_focused: bool,
/// }
///
/// impl Component<Action> for Refresh {
///     type Props<'a> = RefreshProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: RefreshProps) -> impl IntoIterator<Item = Action> {
///         match event {
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Char('r') => {
///                 Some(Action::WeatherRefresh)
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, _props: RefreshProps) {
///         frame.render_widget(Paragraph::new("press r"), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Read-only data needed to render
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// Dependency memo for effects that run after a render has been committed.
///
/// `changed` reports `true` the first time it is called and afterwards only
/// when the dependency value differs from the one seen last.
///
/// ```
/// use weather7day_core::EffectDeps;
///
/// let mut deps = EffectDeps::new();
/// assert!(deps.changed(&(10, 20)));
/// assert!(!deps.changed(&(10, 20)));
/// assert!(deps.changed(&(11, 20)));
/// ```
#[derive(Debug, Clone)]
pub struct EffectDeps<T> {
    last: Option<T>,
}

impl<T> Default for EffectDeps<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> EffectDeps<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `deps` and report whether the effect should fire.
    pub fn changed(&mut self, deps: &T) -> bool {
        if self.last.as_ref() == Some(deps) {
            return false;
        }
        self.last = Some(deps.clone());
        true
    }
}
