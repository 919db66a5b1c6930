//! Location name, list position and coordinate

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Location;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: &'a Location,
    /// Zero-based position in the location list
    pub index: usize,
    pub total: usize,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let name_line = Line::from(Span::styled(
            props.location.name.clone(),
            Style::default().fg(Color::White).bold(),
        ))
        .centered();
        frame.render_widget(Paragraph::new(name_line), chunks[0]);

        let mut detail = Vec::new();
        if props.total > 1 {
            detail.push(Span::styled(
                format!("{}/{}  ", props.index + 1, props.total),
                Style::default().fg(Color::Cyan),
            ));
        }
        detail.push(Span::styled(
            props.location.coordinate.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(Line::from(detail).centered()), chunks[1]);
    }
}
