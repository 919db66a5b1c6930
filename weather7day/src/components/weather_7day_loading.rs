//! Spinner shown while a forecast request is idle or in flight

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct Weather7DayLoadingProps {
    pub tick: u32,
}

#[derive(Default)]
pub struct Weather7DayLoading;

impl Weather7DayLoading {
    pub fn spinner(tick: u32) -> &'static str {
        SPINNERS[(tick as usize / 2) % SPINNERS.len()]
    }
}

impl Component<Action> for Weather7DayLoading {
    type Props<'a> = Weather7DayLoadingProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);

        let line = Line::from(vec![
            Span::styled(
                Self::spinner(props.tick),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::styled(
                " Fetching 7-day forecast",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), row);
    }
}
