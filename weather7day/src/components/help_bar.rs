use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Location switching hints only make sense with more than one
    pub multiple_locations: bool,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut hints = vec![("r", "refresh"), ("u", "units")];
        if props.multiple_locations {
            hints.push(("n/p", "location"));
        }
        hints.push(("arrows", "move"));
        hints.push(("q", "quit"));

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, label) in hints {
            spans.push(Span::styled(
                format!(" {}", key),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather7day_core::testing::*;

    #[test]
    fn test_hints() {
        let mut render = RenderHarness::new(80, 1);

        let output = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    multiple_locations: false,
                },
            );
        });
        assert!(output.contains("r refresh"));
        assert!(output.contains("q quit"));
        assert!(!output.contains("location"));

        let output = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    multiple_locations: true,
                },
            );
        });
        assert!(output.contains("n/p location"));
    }
}
