//! Failed request: the error message and a retry hint

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;

pub const ERROR_ICON: &str = "⚠";

pub struct Weather7DayErrorProps<'a> {
    pub message: &'a str,
}

#[derive(Default)]
pub struct Weather7DayError;

impl Component<Action> for Weather7DayError {
    type Props<'a> = Weather7DayErrorProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [title, message, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let title_line = Line::from(vec![
            Span::styled(ERROR_ICON, Style::default().fg(Color::Red)),
            Span::styled(
                " Forecast unavailable",
                Style::default().fg(Color::Red).bold(),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(title_line), title);

        let message_line = Line::from(Span::styled(
            props.message.to_string(),
            Style::default().fg(Color::Rgb(200, 100, 100)),
        ))
        .centered();
        frame.render_widget(
            Paragraph::new(message_line).wrap(Wrap { trim: true }),
            message,
        );

        let hint_line = Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(hint_line), hint);
    }
}
